//! Batch name extraction over many files

use std::path::PathBuf;

use anyhow::Result;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use crate::discovery::FontDiscovery;
use crate::extract::{ExtractOptions, FontNameExtractor, FontNames};
use crate::query::Query;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontNamesMatch {
    pub path: PathBuf,
    #[serde(flatten)]
    pub names: FontNames,
}

#[derive(Debug, Default, Clone)]
pub struct ScanOptions {
    pub jobs: Option<usize>,
    pub extract: ExtractOptions,
}

/// Extract names for every candidate `discovery` yields and keep the matches.
///
/// Files yielding neither name are dropped. Results are sorted by path.
pub fn scan(
    discovery: &impl FontDiscovery,
    query: &Query,
    opts: &ScanOptions,
) -> Result<Vec<FontNamesMatch>> {
    let candidates = discovery.discover()?;
    let extractor = FontNameExtractor::with_options(opts.extract);

    let run_scan = || -> Vec<FontNamesMatch> {
        let mut matches: Vec<FontNamesMatch> = candidates
            .par_iter()
            .map(|loc| FontNamesMatch {
                path: loc.path.clone(),
                names: extractor.names_from_path(&loc.path),
            })
            .filter(|entry| !entry.names.is_empty() && query.matches(&entry.names))
            .collect();

        sort_matches(&mut matches);
        matches
    };

    if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(pool.install(run_scan))
    } else {
        Ok(run_scan())
    }
}

fn sort_matches(matches: &mut [FontNamesMatch]) {
    matches.sort_by(|a, b| a.path.cmp(&b.path));
}
