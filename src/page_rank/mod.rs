//! Two independent PageRank estimators over the same [`Corpus`]:
//! a random surfer walking the raw corpus ([`sampled`]) and a fixed-point
//! iteration over its cleaned copy ([`iterated`]).

mod traits;
pub use self::traits::*;
mod transition;
pub use self::transition::transition_model;

pub mod iterated;
pub mod sampled;

use crate::{Corpus, PageRanks};

/// PageRank estimated from `samples` steps of a random surfer.
pub fn sample_pagerank(corpus: &Corpus, damping: f64, samples: usize) -> crate::Result<PageRanks> {
    let config = sampled::Config {
        damping,
        samples,
        seed: None,
    };
    let result = sampled::SampledPageRank::new(corpus, &config)?.calc()?;
    Ok(result.page_rank)
}

/// PageRank by iterating to within [`iterated::DEFAULT_EPSILON`].
pub fn iterate_pagerank(corpus: &Corpus, damping: f64) -> crate::Result<PageRanks> {
    let config = iterated::Config {
        damping,
        ..iterated::Config::default()
    };
    let result = iterated::IteratedPageRank::new(corpus, &config)?.calc()?;
    Ok(result.page_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_DAMPING;

    #[test]
    fn both_estimators_share_the_raw_corpus() {
        let corpus = Corpus::try_from_links([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec![]),
        ])
        .unwrap();
        let iterated = iterate_pagerank(&corpus, DEFAULT_DAMPING).unwrap();
        assert!(corpus.is_dead_end("3.html").unwrap());
        let sampled = sample_pagerank(&corpus, DEFAULT_DAMPING, sampled::DEFAULT_SAMPLES).unwrap();
        for page in corpus.pages() {
            assert!(
                (iterated[page] - sampled[page]).abs() < 0.05,
                "{:?}\n{:?}",
                RanksDebug(&iterated),
                RanksDebug(&sampled)
            );
        }
    }
}
