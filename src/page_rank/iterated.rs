use super::*;
use crate::*;
use algograph::graph::VertexId;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_EPSILON: f64 = 0.001;

/// Fixed-point PageRank over the cleaned corpus.
pub struct IteratedPageRank {
    corpus: Corpus,
    damping: f64,
    epsilon: f64,
    max_iterations: Option<usize>,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    /// Stop once no page moves by more than this in one iteration.
    pub epsilon: f64,
    /// `None` iterates until convergence, however long it takes.
    pub max_iterations: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            epsilon: DEFAULT_EPSILON,
            max_iterations: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: PageRanks,
    pub delta: PageRanks,
    pub iterations: usize,
}

impl IteratedPageRank {
    /// Cleans a copy of `corpus`; the caller's corpus is left as is.
    pub fn new(corpus: &Corpus, config: &Config) -> crate::Result<Self> {
        let damping = config.damping;
        check_damping(damping)?;
        let epsilon = config.epsilon;
        if epsilon.is_nan() || epsilon <= 0.0 {
            return Err(Error::InvalidConfig(format!("epsilon={epsilon}")));
        }
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let corpus = corpus.cleaned();
        let transitions = {
            let mut transitions = BTreeMap::new();
            for v in corpus.vertices() {
                for u in corpus.predecessors(v) {
                    // cleaning leaves no page without links
                    let unit = damping / (corpus.link_count_of(u) as f64);
                    transitions.insert((u, v), unit);
                }
            }
            transitions
        };
        Ok(Self {
            corpus,
            damping,
            epsilon,
            max_iterations: config.max_iterations,
            transitions,
        })
    }

    /// The cleaned corpus the ranks are computed on.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }
}

impl PageRank for IteratedPageRank {
    type Result = self::Result;

    #[instrument(skip_all, fields(pages = self.corpus.len()))]
    fn calc(&self) -> crate::Result<Self::Result> {
        let n = self.corpus.len() as f64;
        let jump = (1.0 - self.damping) / n;
        let mut p: HashMap<VertexId, f64, ahash::RandomState> =
            self.corpus.vertices().map(|v| (v, 1.0 / n)).collect();
        let mut r = HashMap::with_hasher(ahash::RandomState::new());
        let mut delta = HashMap::with_hasher(ahash::RandomState::new());
        let mut iterations = 0;
        loop {
            iterations += 1;
            for v in self.corpus.vertices() {
                r.insert(v, jump);
            }
            for ((u, v), w) in self.transitions.iter() {
                let from = p[u];
                if let Some(to) = r.get_mut(v) {
                    *to += from * w;
                }
            }

            delta.clear();
            for v in self.corpus.vertices() {
                delta.insert(v, r[&v] - p[&v]);
            }

            let max_delta = norm_inf(&delta);
            debug!(iterations, max_delta, "iterated");
            if max_delta <= self.epsilon {
                break;
            }
            if let Some(max_iterations) = self.max_iterations {
                if iterations >= max_iterations {
                    warn!(iterations, max_delta, "no convergence");
                    return Err(Error::NotConverged {
                        iterations,
                        delta: max_delta,
                    });
                }
            }

            std::mem::swap(&mut p, &mut r);
            r.clear();
        }

        let page_rank = by_name(&self.corpus, &r);
        let sum = check_normalized(&page_rank)?;
        info!(iterations, sum, "iteration converged");
        Ok(Self::Result {
            page_rank,
            delta: by_name(&self.corpus, &delta),
            iterations,
        })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &PageRanks {
        &self.page_rank
    }

    fn debug(&self) -> impl std::fmt::Debug + '_ {
        ResultDebug { result: self }
    }
}

pub struct ResultDebug<'a> {
    result: &'a self::Result,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pages: Vec<_> = self.result.page_rank.keys().collect();
        pages.sort();
        for page in pages {
            let p = self.result.page_rank[page];
            let d = self.result.delta[page];
            writeln!(f, "{page}: {p:.4}, {d:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrary::ArbitraryCorpus;
    use quickcheck_macros::quickcheck;

    fn calc(links: &[(&str, &[&str])]) -> super::Result {
        let links = links.iter().map(|(p, ls)| (*p, ls.iter().copied()));
        let c = Corpus::try_from_links(links).unwrap();
        IteratedPageRank::new(&c, &Config::default())
            .unwrap()
            .calc()
            .unwrap()
    }

    #[test]
    fn two_cycle_is_uniform() {
        let res = calc(&[("A", &["B"]), ("B", &["A"])]);
        assert_eq!(res.iterations, 1);
        for page in ["A", "B"] {
            assert!((res.page_rank[page] - 0.5).abs() < 1e-9, "{:?}", res.debug());
        }
    }

    #[test]
    fn dead_end_links_back_to_itself() {
        let res = calc(&[("A", &[]), ("B", &["A"])]);
        let p = &res.page_rank;
        assert!(p["A"] > p["B"], "{:?}", res.debug());
        assert!((p["A"] - 0.649).abs() < 0.005, "{:?}", res.debug());
    }

    #[test]
    fn chain_funnels_into_dead_end() {
        let res = calc(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        let p = &res.page_rank;
        assert!(p["C"] > p["B"] && p["B"] > p["A"], "{:?}", res.debug());
        let sum: f64 = p.values().sum();
        assert!((sum - 1.0).abs() < 1e-3, "{:?}", res.debug());
    }

    #[test]
    fn stationary_distribution() {
        let res = calc(&[
            ("1", &["2"]),
            ("2", &["1", "3"]),
            ("3", &["2", "4"]),
            ("4", &["2"]),
        ]);
        let oracle = [("1", 0.2198), ("2", 0.4294), ("3", 0.2198), ("4", 0.1311)];
        for (page, rank) in oracle {
            assert!((res.page_rank[page] - rank).abs() < 2e-3, "{:?}", res.debug());
        }
    }

    #[test]
    fn converged_deltas_are_small() {
        let res = calc(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &["A"]), ("D", &[])]);
        assert!(res.delta.values().all(|d| d.abs() <= DEFAULT_EPSILON), "{:?}", res.debug());
    }

    #[test]
    fn raw_corpus_is_not_cleaned() {
        let c = Corpus::try_from_links([("A", vec![]), ("B", vec!["A"])]).unwrap();
        let pr = IteratedPageRank::new(&c, &Config::default()).unwrap();
        assert!(c.is_dead_end("A").unwrap());
        assert!(!pr.corpus().is_dead_end("A").unwrap());
    }

    #[test]
    fn iteration_cap() {
        let c =
            Corpus::try_from_links([("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]).unwrap();
        let cfg = Config {
            max_iterations: Some(1),
            ..Config::default()
        };
        let res = IteratedPageRank::new(&c, &cfg).unwrap().calc();
        assert!(
            matches!(res, Err(Error::NotConverged { iterations: 1, .. })),
            "{res:?}"
        );
    }

    #[test]
    fn rejects_bad_config() {
        let c = Corpus::try_from_links([("A", Vec::<String>::new())]).unwrap();
        for cfg in [
            Config {
                damping: 1.0,
                ..Config::default()
            },
            Config {
                epsilon: 0.0,
                ..Config::default()
            },
        ] {
            let res = IteratedPageRank::new(&c, &cfg);
            assert!(matches!(res, Err(Error::InvalidConfig(_))), "{cfg:?}");
        }
    }

    #[quickcheck]
    fn sums_to_one(c: ArbitraryCorpus) {
        let res = IteratedPageRank::new(&c.corpus, &Config::default())
            .unwrap()
            .calc()
            .unwrap();
        assert_eq!(res.page_rank.len(), c.corpus.len());
        let sum: f64 = res.page_rank.values().sum();
        assert!((sum - 1.0).abs() < 1e-3, "{:?}", res.debug());
        assert!(
            res.page_rank.values().all(|x| (0.0..=1.0).contains(x)),
            "{:?}",
            res.debug()
        );
    }
}
