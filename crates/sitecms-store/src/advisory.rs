//! Outcomes of best-effort file operations.
//!
//! Backups, mirror writes and first-run seeding never fail the operation that
//! triggered them. Instead of discarding their errors they produce an
//! [`Advisory`] which is logged and handed back to the caller for inspection.

use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryOperation {
    /// Copy of the previous primary document to `<name>.bak`
    Backup,
    /// Write of the saved document into the deployed root
    Mirror,
    /// First-run copy of an example template into place
    Seed,
}

impl fmt::Display for AdvisoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisoryOperation::Backup => f.write_str("backup"),
            AdvisoryOperation::Mirror => f.write_str("mirror"),
            AdvisoryOperation::Seed => f.write_str("seed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryStatus {
    Completed,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Advisory {
    pub operation: AdvisoryOperation,
    /// Document name or artifact label the operation was about
    pub subject: String,
    pub path: PathBuf,
    pub status: AdvisoryStatus,
}

impl Advisory {
    pub fn completed(operation: AdvisoryOperation, subject: impl Into<String>, path: PathBuf) -> Self {
        Self {
            operation,
            subject: subject.into(),
            path,
            status: AdvisoryStatus::Completed,
        }
    }

    pub fn skipped(
        operation: AdvisoryOperation,
        subject: impl Into<String>,
        path: PathBuf,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            subject: subject.into(),
            path,
            status: AdvisoryStatus::Skipped(reason.into()),
        }
    }

    pub fn failed(
        operation: AdvisoryOperation,
        subject: impl Into<String>,
        path: PathBuf,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            operation,
            subject: subject.into(),
            path,
            status: AdvisoryStatus::Failed(error.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == AdvisoryStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, AdvisoryStatus::Failed(_))
    }

    /// Emit the outcome at the level its operation warrants and return it.
    pub fn logged(self) -> Self {
        let path = self.path.display();
        match (&self.operation, &self.status) {
            (_, AdvisoryStatus::Skipped(reason)) => {
                tracing::debug!(subject = %self.subject, path = %path, "{} skipped: {}", self.operation, reason);
            }
            (AdvisoryOperation::Backup, AdvisoryStatus::Completed) => {
                tracing::debug!(subject = %self.subject, path = %path, "Backup written");
            }
            (AdvisoryOperation::Backup, AdvisoryStatus::Failed(e)) => {
                tracing::warn!(subject = %self.subject, path = %path, "Failed to back up previous file: {}", e);
            }
            (AdvisoryOperation::Mirror, AdvisoryStatus::Completed) => {
                tracing::info!(subject = %self.subject, path = %path, "Updated production file");
            }
            (AdvisoryOperation::Mirror, AdvisoryStatus::Failed(e)) => {
                tracing::error!(subject = %self.subject, path = %path, "Failed to update production file: {}", e);
            }
            (AdvisoryOperation::Seed, AdvisoryStatus::Completed) => {
                tracing::info!(subject = %self.subject, path = %path, "First run detected: initialized from template");
            }
            (AdvisoryOperation::Seed, AdvisoryStatus::Failed(e)) => {
                tracing::error!(subject = %self.subject, path = %path, "Failed to initialize from template: {}", e);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        let done = Advisory::completed(AdvisoryOperation::Mirror, "config.json", "dist/config.json".into());
        assert!(done.is_completed());
        assert!(!done.is_failed());

        let failed = Advisory::failed(
            AdvisoryOperation::Mirror,
            "config.json",
            "dist/config.json".into(),
            "read-only file system",
        )
        .logged();
        assert!(failed.is_failed());
        assert_eq!(
            failed.status,
            AdvisoryStatus::Failed("read-only file system".to_string())
        );

        let skipped = Advisory::skipped(AdvisoryOperation::Backup, "seo.json", "public/seo.json.bak".into(), "nothing to back up");
        assert!(!skipped.is_completed());
        assert!(!skipped.is_failed());
    }
}
