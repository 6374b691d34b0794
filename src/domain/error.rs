// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Typed failures that the data, ml and infra layers raise.
// The application and CLI layers wrap these in anyhow with
// extra context; nothing below Layer 2 returns anyhow::Error
// for a condition listed here.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source and target files must have one sentence per line each.
    #[error("misaligned corpus: source has {source_lines} lines, target has {target_lines}")]
    MisalignedCorpus {
        source_lines: usize,
        target_lines: usize,
    },

    #[error("corpus is empty")]
    EmptyCorpus,

    /// A width, row count or vocabulary size disagrees with what
    /// another component was built for.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what:     &'static str,
        expected: usize,
        actual:   usize,
    },

    #[error("missing artifact: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("corrupt artifact {}: {reason}", .path.display())]
    CorruptArtifact {
        path:   PathBuf,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    pub fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { what, expected, actual }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptArtifact {
            path:   path.into(),
            reason: reason.to_string(),
        }
    }
}
