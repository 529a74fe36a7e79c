//! Name filters for batch scans

use anyhow::{Context, Result};
use regex::Regex;

use crate::extract::FontNames;

#[derive(Debug, Clone, Default)]
pub struct Query {
    family_patterns: Vec<Regex>,
    subfamily_patterns: Vec<Regex>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.family_patterns = patterns;
        self
    }

    pub fn with_subfamily_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.subfamily_patterns = patterns;
        self
    }

    /// Every non-empty pattern list must match its name at least once.
    pub fn matches(&self, names: &FontNames) -> bool {
        any_match(&self.family_patterns, names.family.as_deref())
            && any_match(&self.subfamily_patterns, names.subfamily.as_deref())
    }
}

fn any_match(patterns: &[Regex], name: Option<&str>) -> bool {
    if patterns.is_empty() {
        return true;
    }
    match name {
        Some(name) => patterns.iter().any(|re| re.is_match(name)),
        None => false,
    }
}

/// Compile user-supplied regex patterns.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}
