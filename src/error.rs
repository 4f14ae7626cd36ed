use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("corpus has no pages")]
    EmptyCorpus,

    #[error("page not in corpus: {0}")]
    UnknownPage(String),

    #[error("page {page} links to {target}, which is not in the corpus")]
    DanglingLink { page: String, target: String },

    #[error("page {0} links to itself")]
    SelfLink(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("sampled {actual} pages, expected {expected}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("page ranks sum to {sum}, not 1")]
    NotNormalized { sum: f64 },

    #[error("no convergence after {iterations} iterations, max delta {delta}")]
    NotConverged { iterations: usize, delta: f64 },

    #[error("weighted sampling: {0}")]
    Weights(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
