// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Trait seams for the external collaborators of the rendering pipeline.
//
// The Markdown renderer, the sanitizer, and the pagination/layout engine
// all have real third-party implementations with no algorithmic depth on
// our side; the pipeline only depends on these contracts.

use std::future::Future;

use pressmark_core::PaginatedDocument;
use pressmark_core::error::Result;

/// Renders Markdown source to HTML. Placeholder substitution happens on
/// the rendered HTML afterwards, never on the Markdown source.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String>;
}

/// Passes content through unchanged — used when header/footer source is
/// already HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawHtmlRenderer;

impl MarkdownRenderer for RawHtmlRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        Ok(markdown.to_string())
    }
}

/// Sanitizes rendered HTML before it reaches the pagination engine.
pub trait HtmlSanitizer {
    fn sanitize(&self, html: &str) -> String;
}

/// No-op sanitizer for trusted local content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSanitizer;

impl HtmlSanitizer for NoopSanitizer {
    fn sanitize(&self, html: &str) -> String {
        html.to_string()
    }
}

/// Everything a pagination engine needs for one layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginationJob {
    /// Document body HTML.
    pub body_html: String,
    /// Running header HTML, already wrapped as the `#hf-header` element.
    pub header_html: String,
    /// Running footer HTML, already wrapped as the `#hf-footer` element.
    pub footer_html: String,
    /// Geometry, margin, and override CSS to apply during layout.
    pub stylesheet: String,
}

/// An external layout engine, treated as a black box.
///
/// One call is one layout pass; resolution of the returned future is the
/// pagination-complete signal, at which point every physical page and the
/// total page count are available. There is no cancellation — a caller
/// that changes content mid-pass waits out (or ignores) the stale result
/// and starts a fresh pass.
pub trait PaginationEngine {
    fn paginate(&self, job: &PaginationJob)
    -> impl Future<Output = Result<PaginatedDocument>> + Send;
}
