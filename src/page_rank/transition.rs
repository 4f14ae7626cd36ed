use crate::*;
use algograph::graph::VertexId;

/// Probability of each page being visited right after `page`.
///
/// With probability `damping` the surfer follows one of `page`'s links,
/// otherwise it jumps to any page of the corpus. A dead end jumps uniformly.
pub fn transition_model(corpus: &Corpus, page: &str, damping: f64) -> Result<PageRanks> {
    check_damping(damping)?;
    let u = corpus.vertex(page)?;
    Ok(transitions(corpus, u, damping)
        .into_iter()
        .map(|(v, w)| (corpus.name(v).to_string(), w))
        .collect())
}

/// Same as [`transition_model`], over vertices in page-name order.
pub(crate) fn transitions(corpus: &Corpus, u: VertexId, damping: f64) -> Vec<(VertexId, f64)> {
    let n = corpus.len() as f64;
    let links: Vec<VertexId> = corpus.successors(u).collect();
    if links.is_empty() {
        return corpus.vertices().map(|v| (v, 1.0 / n)).collect();
    }
    let unit = damping / (links.len() as f64);
    let jump = (1.0 - damping) / n;
    corpus
        .vertices()
        .map(|v| {
            let followed = if links.contains(&v) { unit } else { 0.0 };
            (v, followed + jump)
        })
        .collect()
}
