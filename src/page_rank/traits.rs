use crate::PageRanks;

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&self) -> crate::Result<Self::Result>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &PageRanks;
    fn debug(&self) -> impl std::fmt::Debug + '_;
}

/// Lists pages in name order with four decimals.
pub struct RanksDebug<'a>(pub &'a PageRanks);

impl std::fmt::Debug for RanksDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pages: Vec<_> = self.0.iter().collect();
        pages.sort_by(|a, b| a.0.cmp(b.0));
        for (page, rank) in pages {
            writeln!(f, "{page}: {rank:.4}")?;
        }
        Ok(())
    }
}
