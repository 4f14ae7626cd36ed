use crate::Corpus;
use quickcheck::{Arbitrary, Gen};

#[derive(Debug)]
pub struct ArbitraryCorpus {
    pub corpus: Corpus,
}

impl Clone for ArbitraryCorpus {
    fn clone(&self) -> Self {
        Self {
            corpus: Corpus::try_from_links(self.corpus.to_links()).unwrap(),
        }
    }
}

impl Arbitrary for ArbitraryCorpus {
    fn arbitrary(g: &mut Gen) -> Self {
        const N: usize = 8;

        let n: usize = usize::arbitrary(g) % N + 1;
        let pages: Vec<String> = (0..n).map(|i| format!("{i}.html")).collect();
        let links: Vec<(String, Vec<String>)> = pages
            .iter()
            .map(|page| {
                let targets = pages
                    .iter()
                    .filter(|target| *target != page && bool::arbitrary(g))
                    .cloned()
                    .collect();
                (page.clone(), targets)
            })
            .collect();
        Self {
            corpus: Corpus::try_from_links(links).unwrap(),
        }
    }
}
