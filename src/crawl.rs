//! Builds a [`Corpus`] from a directory of HTML pages.

use crate::{Corpus, Result};
use regex::Regex;
use std::{
    collections::BTreeSet,
    path::Path,
    sync::LazyLock,
};
use tracing::{debug, instrument};
use walkdir::WalkDir;

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("Invalid regex"));

/// Reads every `*.html` file directly inside `dir`. A page's links are the
/// `href` targets of its anchors that name another page of the directory.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn crawl<P: AsRef<Path>>(dir: P) -> Result<Corpus> {
    let mut pages = Vec::new();
    let walker = WalkDir::new(dir.as_ref())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(".html") {
            continue;
        }
        let contents = std::fs::read_to_string(entry.path())?;
        let links = extract_links(&contents);
        debug!(page = %name, links = links.len(), "parsed");
        pages.push((name, links));
    }
    Corpus::from_links(pages)
}

/// Distinct `href` targets of the anchors in `html`.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    HREF_RE
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect()
}
