// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-pagination mask filling for {{PAGE}}/{{PAGES}} markers.
//
// The pagination engine only knows true page numbers after layout, so the
// resolver emits structural marker spans and this registry injects the
// concrete text afterwards: each marker gets a `data-text` attribute with
// the masked number, and the style override below makes the renderer
// prefer that text over its default counter.
//
// The registry is an owned, session-scoped value threaded through the
// rendering session — not process-global state.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use pressmark_core::{MaskSet, PaginatedDocument};
use pressmark_format::number::format_with_mask;

use crate::placeholder::escape_html_attr;

/// Stylesheet fragment to include in paginated output: when `data-text` is
/// present it wins over any counter-based default content.
pub const MASK_STYLE_OVERRIDE: &str = r#".ph-page[data-text]::after  { content: attr(data-text) !important; }
.ph-pages[data-text]::after { content: attr(data-text) !important; }
"#;

/// Marker spans emitted by the resolver (and cloned by the engine into each
/// page). The second group carries whatever attributes are already present.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="(ph-page|ph-pages)"([^>]*)></span>"#).expect("static regex")
});

static DATA_TEXT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#" data-text="[^"]*""#).expect("static regex"));

/// Holds the active page/pages masks for one rendering session and fills
/// marker spans after each completed layout pass.
#[derive(Debug, Clone, Default)]
pub struct MaskRegistry {
    page_mask: Option<String>,
    pages_mask: Option<String>,
}

impl MaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register masks discovered during placeholder resolution.
    ///
    /// A slot is only overwritten when the incoming value is non-empty;
    /// otherwise the previously registered mask survives. Called every time
    /// header/footer content changes.
    pub fn register(&mut self, masks: &MaskSet) {
        if let Some(m) = masks.page_mask.as_deref().filter(|m| !m.is_empty()) {
            self.page_mask = Some(m.to_string());
        }
        if let Some(m) = masks.pages_mask.as_deref().filter(|m| !m.is_empty()) {
            self.pages_mask = Some(m.to_string());
        }
    }

    /// Currently registered masks.
    pub fn masks(&self) -> MaskSet {
        MaskSet {
            page_mask: self.page_mask.clone(),
            pages_mask: self.pages_mask.clone(),
        }
    }

    /// The filling step, run on the pagination-complete signal.
    ///
    /// Walks every physical page and sets each `ph-page` marker's
    /// `data-text` to the masked 1-based page number (and each `ph-pages`
    /// marker to the masked total). With no mask registered for a kind,
    /// any stale `data-text` is removed so the engine's own incrementing
    /// counter shows through. Idempotent: re-running over the same
    /// document yields identical markup.
    pub fn fill(&self, doc: &mut PaginatedDocument) {
        let total = doc.total_pages();
        debug!(total, "filling page-number markers");
        for (idx, page) in doc.pages.iter_mut().enumerate() {
            let ordinal = if page.ordinal > 0 {
                page.ordinal
            } else {
                idx as u32 + 1
            };
            page.html = self.fill_page(&page.html, ordinal, total);
        }
    }

    /// Manual re-run of the filling step, for callers that changed marker
    /// state without triggering a fresh layout pass.
    pub fn refresh(&self, doc: &mut PaginatedDocument) {
        self.fill(doc);
    }

    fn fill_page(&self, html: &str, ordinal: u32, total: u32) -> String {
        MARKER
            .replace_all(html, |caps: &Captures| {
                let class = &caps[1];
                let attrs = DATA_TEXT_ATTR.replace_all(&caps[2], "");
                let mask = match class {
                    "ph-page" => self.page_mask.as_deref(),
                    _ => self.pages_mask.as_deref(),
                };
                let value = if class == "ph-page" { ordinal } else { total };
                match mask {
                    Some(m) => format!(
                        r#"<span class="{class}"{attrs} data-text="{}"></span>"#,
                        escape_html_attr(&format_with_mask(i64::from(value), m))
                    ),
                    None => format!(r#"<span class="{class}"{attrs}></span>"#),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressmark_core::RenderedPage;

    fn doc_with_pages(n: u32) -> PaginatedDocument {
        PaginatedDocument {
            pages: (1..=n)
                .map(|i| RenderedPage {
                    ordinal: i,
                    html: concat!(
                        r#"<header><span class="ph-page" data-mask="00"></span>"#,
                        r#" / <span class="ph-pages" data-mask="0000"></span></header>"#
                    )
                    .to_string(),
                })
                .collect(),
        }
    }

    fn registry(page: Option<&str>, pages: Option<&str>) -> MaskRegistry {
        let mut reg = MaskRegistry::new();
        reg.register(&MaskSet {
            page_mask: page.map(String::from),
            pages_mask: pages.map(String::from),
        });
        reg
    }

    #[test]
    fn register_only_overwrites_with_non_empty() {
        let mut reg = registry(Some("00"), Some("0000"));
        reg.register(&MaskSet {
            page_mask: None,
            pages_mask: Some(String::new()),
        });
        let masks = reg.masks();
        assert_eq!(masks.page_mask.as_deref(), Some("00"));
        assert_eq!(masks.pages_mask.as_deref(), Some("0000"));

        reg.register(&MaskSet {
            page_mask: Some("####".into()),
            pages_mask: None,
        });
        assert_eq!(reg.masks().page_mask.as_deref(), Some("####"));
    }

    #[test]
    fn fill_sets_per_page_ordinal_and_total() {
        let mut doc = doc_with_pages(3);
        registry(Some("00"), Some("0000")).fill(&mut doc);
        assert!(doc.pages[0].html.contains(r#"class="ph-page" data-mask="00" data-text="01""#));
        assert!(doc.pages[2].html.contains(r#"data-text="03""#));
        for page in &doc.pages {
            assert!(page.html.contains(r#"class="ph-pages" data-mask="0000" data-text="0003""#));
        }
    }

    #[test]
    fn every_page_shows_the_same_masked_total() {
        let mut doc = doc_with_pages(12);
        registry(None, Some("0000")).fill(&mut doc);
        for page in &doc.pages {
            assert!(page.html.contains(r#"data-text="0012""#), "{}", page.html);
        }
    }

    #[test]
    fn no_mask_clears_stale_data_text() {
        let mut doc = doc_with_pages(2);
        registry(Some("00"), Some("00")).fill(&mut doc);
        assert!(doc.pages[0].html.contains("data-text"));

        // A fresh registry with nothing registered strips the overrides so
        // the engine's default counters show through.
        MaskRegistry::new().fill(&mut doc);
        for page in &doc.pages {
            assert!(!page.html.contains("data-text"), "{}", page.html);
        }
    }

    #[test]
    fn fill_is_idempotent() {
        let mut doc = doc_with_pages(4);
        let reg = registry(Some("9999"), Some("####"));
        reg.fill(&mut doc);
        let first = doc.clone();
        reg.refresh(&mut doc);
        assert_eq!(doc, first);
    }

    #[test]
    fn masks_persist_across_repagination() {
        let reg = registry(Some("00"), None);
        let mut first = doc_with_pages(2);
        reg.fill(&mut first);
        // Content edits force a re-layout with a different page count; the
        // same registry fills the new document without re-registration.
        let mut second = doc_with_pages(5);
        reg.fill(&mut second);
        assert!(second.pages[4].html.contains(r#"data-text="05""#));
    }
}
