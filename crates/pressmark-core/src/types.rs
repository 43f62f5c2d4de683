// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Pressmark pipeline.
//
// Serde field names mirror the persisted preset record (camelCase) so that
// presets exported by older builds round-trip losslessly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version of the persisted preset record.
pub const SCHEMA_VERSION: u32 = 1;

/// Unique identifier for a preset.
///
/// Opaque string rather than a typed UUID: imported records may carry
/// foreign ids and normalization must accept them as-is. Freshly created
/// presets get a v4 UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetId(pub String);

impl PresetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PresetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PresetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PresetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Supported page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    /// User controls the physical size via extra CSS.
    Custom,
}

impl PageSize {
    /// CSS `@page size` keyword, or None for Custom.
    pub fn css_keyword(&self) -> Option<&'static str> {
        match self {
            Self::A4 => Some("A4"),
            Self::Letter => Some("Letter"),
            Self::Custom => None,
        }
    }

    /// Parse a stored keyword, falling back to the default for anything
    /// unrecognized.
    pub fn from_keyword(s: &str) -> Self {
        match s {
            "A4" => Self::A4,
            "Letter" => Self::Letter,
            "Custom" => Self::Custom,
            _ => Self::default(),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// CSS `@page size` orientation keyword.
    pub fn css_keyword(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    pub fn from_keyword(s: &str) -> Self {
        match s {
            "portrait" => Self::Portrait,
            "landscape" => Self::Landscape,
            _ => Self::default(),
        }
    }
}

/// Page margins as CSS measurement strings (e.g. "20mm").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: "20mm".into(),
            right: "18mm".into(),
            bottom: "20mm".into(),
            left: "18mm".into(),
        }
    }
}

/// Document configuration: title, page geometry, and extra styling.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocConfig {
    /// Document title, substituted for `{{TITLE}}` placeholders.
    pub title: String,
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margins: Margins,
    /// Extra stylesheet text injected into the output document.
    pub custom_css: String,
    /// Always true — retained for forward compatibility of the record.
    pub use_twemoji: bool,
}

impl DocConfig {
    pub fn new() -> Self {
        Self {
            use_twemoji: true,
            ..Default::default()
        }
    }
}

/// Whether header/footer source is authored as Markdown or raw HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderFooterMode {
    #[default]
    Md,
    Html,
}

/// Running header and footer content.
///
/// Both the Markdown and HTML pairs are carried regardless of `mode` so the
/// record round-trips without losing whichever pair is currently inactive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderFooter {
    pub mode: HeaderFooterMode,
    pub header_md: String,
    pub footer_md: String,
    pub header_html: String,
    pub footer_html: String,
    /// Always true — placeholder substitution is not user-switchable.
    pub placeholders: bool,
}

impl Default for HeaderFooter {
    fn default() -> Self {
        Self {
            mode: HeaderFooterMode::Md,
            header_md: String::new(),
            footer_md: String::new(),
            header_html: String::new(),
            footer_html: String::new(),
            placeholders: true,
        }
    }
}

/// A named, persisted bundle of document configuration and header/footer
/// content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: PresetId,
    pub schema_version: u32,
    pub name: String,
    pub doc_config: DocConfig,
    pub header_footer: HeaderFooter,
    pub updated_at: DateTime<Utc>,
}

/// Listing metadata for a stored preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetMeta {
    pub id: PresetId,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

/// Page-number masks discovered during a placeholder resolution pass.
///
/// At most one page mask and one pages mask per pass; when several
/// `{{PAGE:mask}}` tokens disagree, the first one encountered wins and the
/// rest render with its formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaskSet {
    pub page_mask: Option<String>,
    pub pages_mask: Option<String>,
}

impl MaskSet {
    /// Merge two mask sets, preferring `self` slot-by-slot (first-wins).
    pub fn or(self, other: MaskSet) -> MaskSet {
        MaskSet {
            page_mask: self.page_mask.or(other.page_mask),
            pages_mask: self.pages_mask.or(other.pages_mask),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page_mask.is_none() && self.pages_mask.is_none()
    }
}

/// A single physical page produced by a pagination engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// 1-based page number assigned by the engine.
    pub ordinal: u32,
    /// The page's HTML, including any cloned header/footer markers.
    pub html: String,
}

/// The complete page collection of one finished layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginatedDocument {
    pub pages: Vec<RenderedPage>,
}

impl PaginatedDocument {
    /// Total page count; an engine never produces fewer than one page.
    pub fn total_pages(&self) -> u32 {
        self.pages.len().max(1) as u32
    }
}
