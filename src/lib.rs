mod error;
pub use self::error::{Error, Result};
mod corpus;
pub use self::corpus::Corpus;
pub mod crawl;
pub use self::crawl::crawl;
mod common;
pub use self::common::*;

pub mod page_rank;

#[cfg(test)]
mod arbitrary;
