// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pressmark.
//
// Formatting and placeholder resolution never fail for malformed
// user-authored input — those paths degrade to passthrough or defaults.
// Errors here cover the operations that are allowed to fail visibly:
// preset persistence, explicit import/export, and the pagination boundary.

use thiserror::Error;

/// Top-level error type for all Pressmark operations.
#[derive(Debug, Error)]
pub enum PressmarkError {
    // -- Preset persistence --
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    #[error("invalid preset record: {0}")]
    InvalidPreset(String),

    #[error("database error: {0}")]
    Database(String),

    // -- Rendering / pagination --
    #[error("markdown render failed: {0}")]
    Render(String),

    #[error("pagination engine did not complete within {0:?}")]
    PaginationTimeout(std::time::Duration),

    #[error("pagination failed: {0}")]
    Pagination(String),

    // -- Storage / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PressmarkError>;
