//! Diff summary statistics

use crate::diff::Diff;
use serde::{Deserialize, Serialize};

/// Change counts for one collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
}

impl CollectionSummary {
    fn new(added: usize, modified: usize, removed: usize) -> Self {
        Self {
            added,
            modified,
            removed,
        }
    }

    /// Total number of changes
    pub fn total(&self) -> usize {
        self.added + self.modified + self.removed
    }
}

/// Summary of a [`Diff`], suitable for display or JSON output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub remotes: CollectionSummary,
    pub components: CollectionSummary,
    pub services: CollectionSummary,
    pub processes: CollectionSummary,
    pub packages: CollectionSummary,
    pub modules: CollectionSummary,
    pub unmodified: usize,
    pub resources_equal: bool,
    pub network_equal: bool,
    pub log_equal: bool,
    pub revision: String,
}

impl DiffSummary {
    /// Create a summary from a diff
    pub fn from_diff(diff: &Diff) -> Self {
        let (added, modified, removed) = (&diff.added, &diff.modified, &diff.removed);
        Self {
            remotes: CollectionSummary::new(
                added.remotes.len(),
                modified.remotes.len(),
                removed.remotes.len(),
            ),
            components: CollectionSummary::new(
                added.components.len(),
                modified.components.len(),
                removed.components.len(),
            ),
            services: CollectionSummary::new(
                added.services.len(),
                modified.services.len(),
                removed.services.len(),
            ),
            processes: CollectionSummary::new(
                added.processes.len(),
                modified.processes.len(),
                removed.processes.len(),
            ),
            packages: CollectionSummary::new(
                added.packages.len(),
                modified.packages.len(),
                removed.packages.len(),
            ),
            modules: CollectionSummary::new(
                added.modules.len(),
                modified.modules.len(),
                removed.modules.len(),
            ),
            unmodified: diff.unmodified_resources.len(),
            resources_equal: diff.resources_equal,
            network_equal: diff.network_equal,
            log_equal: diff.log_equal,
            revision: diff.new_revision().to_string(),
        }
    }

    /// Collections paired with their display names
    pub fn collections(&self) -> [(&'static str, CollectionSummary); 6] {
        [
            ("remotes", self.remotes),
            ("components", self.components),
            ("services", self.services),
            ("processes", self.processes),
            ("packages", self.packages),
            ("modules", self.modules),
        ]
    }

    /// Total number of resource changes
    pub fn total(&self) -> usize {
        self.collections().iter().map(|(_, c)| c.total()).sum()
    }

    /// Check if anything at all changed
    pub fn has_changes(&self) -> bool {
        !(self.resources_equal && self.network_equal && self.log_equal)
    }
}
