// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One render session drives the full pipeline for one document: render
// header/footer source, resolve placeholders, hand the body to the
// pagination engine under a bounded timeout, then back-fill the
// page-number markers once the page count is known.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use pressmark_core::error::{PressmarkError, Result};
use pressmark_core::{DocConfig, HeaderFooter, HeaderFooterMode, MaskSet, PaginatedDocument};
use pressmark_template::{MASK_STYLE_OVERRIDE, MaskRegistry, geometry, resolve_header_footer};
use tracing::{debug, instrument, warn};

use crate::traits::{HtmlSanitizer, MarkdownRenderer, NoopSanitizer, PaginationEngine, PaginationJob};

/// Default upper bound for one pagination pass.
pub const DEFAULT_PAGINATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Orchestrates resolve → paginate → fill for one document.
///
/// The registry lives as long as the session, so masks registered on the
/// first pass survive re-pagination; [`RenderSession::refresh`] re-runs
/// only the filling step.
pub struct RenderSession<R, E> {
    config: DocConfig,
    header_footer: HeaderFooter,
    registry: MaskRegistry,
    renderer: R,
    engine: E,
    sanitizer: Box<dyn HtmlSanitizer + Send + Sync>,
    pagination_timeout: Duration,
}

impl<R, E> RenderSession<R, E>
where
    R: MarkdownRenderer,
    E: PaginationEngine,
{
    pub fn new(config: DocConfig, header_footer: HeaderFooter, renderer: R, engine: E) -> Self {
        Self {
            config,
            header_footer,
            registry: MaskRegistry::new(),
            renderer,
            engine,
            sanitizer: Box::new(NoopSanitizer),
            pagination_timeout: DEFAULT_PAGINATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.pagination_timeout = timeout;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Box<dyn HtmlSanitizer + Send + Sync>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn config(&self) -> &DocConfig {
        &self.config
    }

    /// Masks currently registered for this session.
    pub fn masks(&self) -> MaskSet {
        self.registry.masks()
    }

    /// Renders the body plus the configured header/footer and paginates
    /// with the current wall-clock time driving DATE/TIME placeholders.
    pub async fn render(&mut self, body_markdown: &str) -> Result<PaginatedDocument> {
        self.render_at(body_markdown, Local::now().naive_local()).await
    }

    /// Same as [`RenderSession::render`] with an explicit resolution
    /// instant.
    #[instrument(skip(self, body_markdown), fields(bytes = body_markdown.len()))]
    pub async fn render_at(
        &mut self,
        body_markdown: &str,
        now: NaiveDateTime,
    ) -> Result<PaginatedDocument> {
        let body_html = self.sanitizer.sanitize(&self.renderer.render(body_markdown)?);

        let (header_src, footer_src) = match self.header_footer.mode {
            HeaderFooterMode::Md => (
                self.renderer.render(&self.header_footer.header_md)?,
                self.renderer.render(&self.header_footer.footer_md)?,
            ),
            HeaderFooterMode::Html => (
                self.header_footer.header_html.clone(),
                self.header_footer.footer_html.clone(),
            ),
        };

        let (header_html, footer_html) = if self.header_footer.placeholders {
            let resolved = resolve_header_footer(&header_src, &footer_src, &self.config, &now);
            self.registry.register(&resolved.masks);
            (resolved.header_html, resolved.footer_html)
        } else {
            (header_src, footer_src)
        };

        let job = PaginationJob {
            body_html,
            header_html: format!(r#"<div id="hf-header">{header_html}</div>"#),
            footer_html: format!(r#"<div id="hf-footer">{footer_html}</div>"#),
            stylesheet: format!("{}{}", geometry::stylesheet(&self.config), MASK_STYLE_OVERRIDE),
        };

        let pass = tokio::time::timeout(self.pagination_timeout, self.engine.paginate(&job));
        let mut doc = match pass.await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout = ?self.pagination_timeout, "pagination pass timed out");
                return Err(PressmarkError::PaginationTimeout(self.pagination_timeout));
            }
        };

        self.registry.fill(&mut doc);
        debug!(pages = doc.total_pages(), "render pass complete");
        Ok(doc)
    }

    /// Re-runs marker filling on an already-paginated document without a
    /// new layout pass. Page HTML updated in place.
    pub fn refresh(&self, doc: &mut PaginatedDocument) {
        self.registry.refresh(doc);
    }
}
