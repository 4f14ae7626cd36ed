use super::{transition::transitions, *};
use crate::*;
use algograph::graph::VertexId;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    rngs::SmallRng,
    seq::IndexedRandom,
    Rng, SeedableRng,
};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

pub const DEFAULT_SAMPLES: usize = 10_000;

/// Random-surfer estimate of PageRank over the raw corpus.
///
/// Dead ends are not cleaned away; the transition model jumps uniformly
/// from them instead.
pub struct SampledPageRank<'a> {
    corpus: &'a Corpus,
    samples: usize,
    seed: Option<u64>,
    vertices: Vec<VertexId>,
    transitions: HashMap<VertexId, WeightedIndex<f64>, ahash::RandomState>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
    /// Seeds the walk for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: PageRanks,
    pub visits: HashMap<String, usize, ahash::RandomState>,
}

impl<'a> SampledPageRank<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config) -> crate::Result<Self> {
        check_damping(config.damping)?;
        if config.samples == 0 {
            return Err(Error::InvalidConfig(format!("samples={}", config.samples)));
        }
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let vertices: Vec<_> = corpus.vertices().collect();
        let transitions = {
            let mut res = HashMap::with_hasher(ahash::RandomState::new());
            for u in vertices.iter().copied() {
                let weights = transitions(corpus, u, config.damping).into_iter().map(|(_, w)| w);
                let dist = WeightedIndex::<f64>::new(weights)
                    .map_err(|e| Error::Weights(e.to_string()))?;
                res.insert(u, dist);
            }
            res
        };
        Ok(Self {
            corpus,
            samples: config.samples,
            seed: config.seed,
            vertices,
            transitions,
        })
    }

    /// Walks with a caller-supplied random source.
    #[instrument(skip_all, fields(pages = self.vertices.len(), samples = self.samples))]
    pub fn calc_with<R: Rng + ?Sized>(&self, rng: &mut R) -> crate::Result<self::Result> {
        let mut visits: HashMap<VertexId, usize, ahash::RandomState> =
            self.vertices.iter().map(|v| (*v, 0)).collect();

        let mut cur = *self.vertices.choose(rng).ok_or(Error::EmptyCorpus)?;
        *visits.entry(cur).or_default() += 1;
        for _ in 1..self.samples {
            let idx = self.transitions[&cur].sample(rng);
            cur = self.vertices[idx];
            *visits.entry(cur).or_default() += 1;
        }

        let total: usize = visits.values().sum();
        if total != self.samples {
            warn!(total, "walk lost samples");
            return Err(Error::SampleCountMismatch {
                expected: self.samples,
                actual: total,
            });
        }

        let n = self.samples as f64;
        let page_rank: PageRanks = visits
            .iter()
            .map(|(v, c)| (self.corpus.name(*v).to_string(), *c as f64 / n))
            .collect();
        let sum = check_normalized(&page_rank)?;
        info!(sum, "sampling done");
        Ok(self::Result {
            page_rank,
            visits: by_name(self.corpus, &visits),
        })
    }
}

impl PageRank for SampledPageRank<'_> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.calc_with(&mut rng)
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &PageRanks {
        &self.page_rank
    }

    fn debug(&self) -> impl std::fmt::Debug + '_ {
        RanksDebug(&self.page_rank)
    }
}
