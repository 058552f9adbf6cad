//! Marker region rewriting
//!
//! A region looks like
//!
//! ```text
//! // @BEGIN:typedefs@
//! ...generated...
//! // @END:typedefs@
//! ```
//!
//! Everything between the markers is replaced; the markers and all text
//! outside regions are kept byte for byte.

use crate::artifacts::Artifacts;
use glsync_core::{Error, RegionKey, RegionOutcome, RegionStatus, Result};
use regex::{Captures, Regex};
use tracing::{debug, warn};

/// Rewrites the six named regions of a document
pub struct RegionUpdater {
    patterns: Vec<(RegionKey, Regex)>,
}

impl RegionUpdater {
    pub fn new() -> Result<Self> {
        let patterns = RegionKey::ALL
            .iter()
            .map(|&key| {
                let pattern = format!(
                    r"(?s)({})(.*?)({})",
                    regex::escape(&key.begin_marker()),
                    regex::escape(&key.end_marker())
                );
                Regex::new(&pattern)
                    .map(|re| (key, re))
                    .map_err(|e| Error::Pattern(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Replace every region's content with its generated block
    pub fn apply(&self, text: &str, artifacts: &Artifacts) -> (String, Vec<RegionOutcome>) {
        let mut current = text.to_string();
        let mut outcomes = Vec::with_capacity(self.patterns.len());

        for (key, pattern) in &self.patterns {
            let (next, outcome) = replace_region(&current, *key, pattern, artifacts.get(*key));
            outcomes.push(outcome);
            current = next;
        }

        (current, outcomes)
    }
}

fn replace_region(
    text: &str,
    key: RegionKey,
    pattern: &Regex,
    block: &str,
) -> (String, RegionOutcome) {
    let body = format!("\n{}\n", block);
    let mut occurrences = 0;
    let mut differs = false;

    let replaced = pattern.replace_all(text, |caps: &Captures| {
        occurrences += 1;
        differs |= &caps[2] != body;
        format!("{}{}{}", &caps[1], body, &caps[3])
    });

    let status = match occurrences {
        0 => {
            warn!("Markers for region '{}' not found; region left unchanged", key);
            RegionStatus::Missing
        }
        _ if differs => RegionStatus::Updated,
        _ => RegionStatus::Unchanged,
    };
    if occurrences > 1 {
        warn!("Region '{}' appears {} times; all were replaced", key, occurrences);
    }
    debug!("Region '{}': {:?}", key, status);

    (
        replaced.into_owned(),
        RegionOutcome {
            key,
            status,
            occurrences,
        },
    )
}
