use crate::SourceError;
use serde::Serialize;

/// Pipeline step at which a title was given up on for this run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Fetch,
    Extract,
    Parse,
    Add,
}

impl FailureStage {
    /// Stage of a failed product ID lookup
    pub fn of_lookup(err: &SourceError) -> Self {
        match err {
            SourceError::ProductIdNotFound { .. } => FailureStage::Extract,
            SourceError::InvalidProductId { .. } => FailureStage::Parse,
            _ => FailureStage::Fetch,
        }
    }
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureStage::Fetch => "fetch",
            FailureStage::Extract => "extract",
            FailureStage::Parse => "parse",
            FailureStage::Add => "add",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    pub title: String,
    pub slug: String,
    pub stage: FailureStage,
    pub reason: String,
}

/// Outcome of one import batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Titles looked at, including skipped ones
    pub processed: usize,
    /// Slugs added to the wishlist during this batch
    pub imported: Vec<String>,
    /// Slugs that were already on the wishlist
    pub skipped: Vec<String>,
    pub failed: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn record_failure(&mut self, title: &str, slug: &str, stage: FailureStage, err: &SourceError) {
        self.failed.push(ImportFailure {
            title: title.to_string(),
            slug: slug.to_string(),
            stage,
            reason: err.to_string(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
