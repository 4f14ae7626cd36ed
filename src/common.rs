use crate::{Corpus, Error};
use algograph::graph::VertexId;
use std::collections::HashMap;
use tracing::warn;

/// Page name -> rank (or probability).
pub type PageRanks = HashMap<String, f64, ahash::RandomState>;

pub const DEFAULT_DAMPING: f64 = 0.85;

pub fn norm_inf<K>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().fold(0.0, |acc, x| acc.max(x.abs()))
}

/// Fails unless the values sum to 1 after rounding to the nearest integer.
pub fn check_normalized(p: &PageRanks) -> crate::Result<f64> {
    let sum: f64 = p.values().sum();
    if sum.round() as i64 != 1 {
        warn!(sum, "page ranks are not normalized");
        return Err(Error::NotNormalized { sum });
    }
    Ok(sum)
}

pub(crate) fn check_damping(damping: f64) -> crate::Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("damping={damping}")))
    }
}

pub(crate) fn by_name<T: Copy>(
    corpus: &Corpus,
    p: &HashMap<VertexId, T, ahash::RandomState>,
) -> HashMap<String, T, ahash::RandomState> {
    p.iter()
        .map(|(v, x)| (corpus.name(*v).to_string(), *x))
        .collect()
}
