use crate::{Error, Result};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A closed hyperlink corpus: every link target is itself a page.
///
/// Pages are kept in name order, so every iteration over the corpus (and
/// therefore every seeded random walk) is reproducible.
pub struct Corpus {
    graph: directed::TreeBackedGraph,
    ids: BTreeMap<String, VertexId>,
    names: HashMap<VertexId, String, ahash::RandomState>,
}

impl Corpus {
    /// Builds a corpus, dropping self-links and links to pages outside it.
    pub fn from_links<I, P, L, T>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let links = collect_links(links);
        if links.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let closed = links
            .iter()
            .map(|(page, targets)| {
                let targets = targets
                    .iter()
                    .filter(|t| *t != page && links.contains_key(*t))
                    .cloned()
                    .collect();
                (page.clone(), targets)
            })
            .collect();
        Ok(Self::build(closed))
    }

    /// Builds a corpus, rejecting self-links and links to pages outside it.
    pub fn try_from_links<I, P, L, T>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let links = collect_links(links);
        if links.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        for (page, targets) in links.iter() {
            for target in targets.iter() {
                if target == page {
                    return Err(Error::SelfLink(page.clone()));
                }
                if !links.contains_key(target) {
                    return Err(Error::DanglingLink {
                        page: page.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(Self::build(links))
    }

    fn build(links: BTreeMap<String, BTreeSet<String>>) -> Self {
        let mut graph = directed::TreeBackedGraph::new();
        let ids: BTreeMap<String, VertexId> = links
            .keys()
            .map(|page| (page.clone(), graph.add_vertex()))
            .collect();
        for (page, targets) in links.iter() {
            let u = ids[page];
            for target in targets.iter() {
                graph.add_edge(u, ids[target]);
            }
        }
        let names = ids.iter().map(|(page, v)| (*v, page.clone())).collect();
        Self { graph, ids, names }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: an empty corpus cannot be built.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.ids.contains_key(page)
    }

    /// Page names in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.keys().map(String::as_str)
    }

    /// Raw outgoing links of `page`.
    pub fn links(&self, page: &str) -> Result<BTreeSet<&str>> {
        let u = self.vertex(page)?;
        Ok(self.successors(u).map(|v| self.name(v)).collect())
    }

    pub fn is_dead_end(&self, page: &str) -> Result<bool> {
        let u = self.vertex(page)?;
        Ok(self.out_degree(u) == 0)
    }

    /// Number of pages `page` links to. A dead end counts as linking to
    /// every page of the corpus.
    pub fn link_count(&self, page: &str) -> Result<usize> {
        let u = self.vertex(page)?;
        Ok(self.link_count_of(u))
    }

    /// Pages whose links contain `page`.
    pub fn incoming_pages(&self, page: &str) -> Result<BTreeSet<&str>> {
        let v = self.vertex(page)?;
        Ok(self.predecessors(v).map(|u| self.name(u)).collect())
    }

    /// A copy of the corpus in which every dead end links to all pages,
    /// itself included. Pages with links are carried over unchanged.
    pub fn cleaned(&self) -> Self {
        let all: BTreeSet<String> = self.ids.keys().cloned().collect();
        let links = self
            .ids
            .iter()
            .map(|(page, u)| {
                let targets = if self.out_degree(*u) == 0 {
                    all.clone()
                } else {
                    self.successors(*u).map(|v| self.name(v).to_string()).collect()
                };
                (page.clone(), targets)
            })
            .collect();
        Self::build(links)
    }

    pub fn to_links(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.ids
            .iter()
            .map(|(page, u)| {
                let targets = self.successors(*u).map(|v| self.name(v).to_string()).collect();
                (page.clone(), targets)
            })
            .collect()
    }

    pub(crate) fn vertex(&self, page: &str) -> Result<VertexId> {
        self.ids
            .get(page)
            .copied()
            .ok_or_else(|| Error::UnknownPage(page.to_string()))
    }

    pub(crate) fn name(&self, v: VertexId) -> &str {
        &self.names[&v]
    }

    /// Vertices in page-name order.
    pub(crate) fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.ids.values().copied()
    }

    pub(crate) fn out_degree(&self, u: VertexId) -> usize {
        self.graph.out_edges(&u).count()
    }

    pub(crate) fn link_count_of(&self, u: VertexId) -> usize {
        match self.out_degree(u) {
            0 => self.len(),
            n => n,
        }
    }

    pub(crate) fn successors(&self, u: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&u).map(|e| e.sink)
    }

    pub(crate) fn predecessors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.in_edges(&v).map(|e| e.source)
    }
}

fn collect_links<I, P, L, T>(links: I) -> BTreeMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = (P, L)>,
    P: Into<String>,
    L: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut res: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (page, targets) in links {
        res.entry(page.into())
            .or_default()
            .extend(targets.into_iter().map(Into::into));
    }
    res
}

impl PartialEq for Corpus {
    fn eq(&self, other: &Self) -> bool {
        self.to_links() == other.to_links()
    }
}

impl std::fmt::Debug for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.to_links()).finish()
    }
}
