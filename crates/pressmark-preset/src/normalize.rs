// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Defensive preset normalization, applied on every load and every save.
//
// Records from older builds, hand-edited exports, and foreign imports are
// all accepted: missing fields get their defaults, invalid enum values are
// coerced to the default, and the forced flags (schemaVersion, useTwemoji,
// placeholders) are overwritten. The only rejected input is a record that
// is not a JSON object at all.
//
// Must stay idempotent — normalizing an already-normalized record is a
// no-op.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use pressmark_core::error::{PressmarkError, Result};
use pressmark_core::{
    DocConfig, HeaderFooter, HeaderFooterMode, Margins, Orientation, PageSize, Preset, PresetId,
    SCHEMA_VERSION,
};

/// Name given to presets saved without one.
pub const DEFAULT_PRESET_NAME: &str = "Preset sem nome";

fn str_or<'a>(obj: &'a Map<String, Value>, key: &str, default: &'a str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Normalize the docConfig section of a record.
pub fn normalize_doc_config(value: Option<&Value>) -> DocConfig {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);
    let defaults = Margins::default();
    let margins_obj = obj.get("margins").and_then(Value::as_object);
    let side = |key: &str, default: &str| -> String {
        margins_obj
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    DocConfig {
        title: str_or(obj, "title", ""),
        page_size: obj
            .get("pageSize")
            .and_then(Value::as_str)
            .map(PageSize::from_keyword)
            .unwrap_or_default(),
        orientation: obj
            .get("orientation")
            .and_then(Value::as_str)
            .map(Orientation::from_keyword)
            .unwrap_or_default(),
        margins: Margins {
            top: side("top", &defaults.top),
            right: side("right", &defaults.right),
            bottom: side("bottom", &defaults.bottom),
            left: side("left", &defaults.left),
        },
        custom_css: str_or(obj, "customCss", ""),
        // Always true in this product; kept only for record compatibility.
        use_twemoji: true,
    }
}

/// Normalize the headerFooter section of a record.
pub fn normalize_header_footer(value: Option<&Value>) -> HeaderFooter {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);
    let mode = match obj.get("mode").and_then(Value::as_str) {
        Some("html") => HeaderFooterMode::Html,
        _ => HeaderFooterMode::Md,
    };

    HeaderFooter {
        mode,
        header_md: str_or(obj, "headerMd", ""),
        footer_md: str_or(obj, "footerMd", ""),
        header_html: str_or(obj, "headerHtml", ""),
        footer_html: str_or(obj, "footerHtml", ""),
        placeholders: true,
    }
}

/// Normalize a loose JSON record into a well-formed `Preset`.
///
/// Fails only when `value` is not an object. A blank or missing id gets a
/// fresh one, a blank name gets the default, an unparseable timestamp is
/// replaced by now.
pub fn normalize_preset(value: &Value) -> Result<Preset> {
    let obj = value
        .as_object()
        .ok_or_else(|| PressmarkError::InvalidPreset("record is not an object".into()))?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(PresetId::from)
        .unwrap_or_default();

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PRESET_NAME)
        .to_string();

    let updated_at = obj
        .get("updatedAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Ok(Preset {
        id,
        schema_version: SCHEMA_VERSION,
        name,
        doc_config: normalize_doc_config(obj.get("docConfig")),
        header_footer: normalize_header_footer(obj.get("headerFooter")),
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_gets_full_defaults() {
        let p = normalize_preset(&json!({})).expect("normalize");
        assert_eq!(p.schema_version, SCHEMA_VERSION);
        assert_eq!(p.name, DEFAULT_PRESET_NAME);
        assert!(!p.id.as_str().is_empty());
        assert_eq!(p.doc_config, DocConfig::new());
        assert_eq!(p.header_footer, HeaderFooter::default());
    }

    #[test]
    fn invalid_enums_coerce_to_defaults() {
        let p = normalize_preset(&json!({
            "docConfig": { "pageSize": "B5", "orientation": "diagonal" },
            "headerFooter": { "mode": "xml" }
        }))
        .expect("normalize");
        assert_eq!(p.doc_config.page_size, PageSize::A4);
        assert_eq!(p.doc_config.orientation, Orientation::Portrait);
        assert_eq!(p.header_footer.mode, HeaderFooterMode::Md);
    }

    #[test]
    fn partial_margins_merge_with_defaults() {
        let p = normalize_preset(&json!({
            "docConfig": { "margins": { "top": "30mm" } }
        }))
        .expect("normalize");
        assert_eq!(p.doc_config.margins.top, "30mm");
        assert_eq!(p.doc_config.margins.right, "18mm");
    }

    #[test]
    fn forced_flags_are_overwritten() {
        let p = normalize_preset(&json!({
            "schemaVersion": 99,
            "docConfig": { "useTwemoji": false },
            "headerFooter": { "placeholders": false }
        }))
        .expect("normalize");
        assert_eq!(p.schema_version, SCHEMA_VERSION);
        assert!(p.doc_config.use_twemoji);
        assert!(p.header_footer.placeholders);
    }

    #[test]
    fn blank_name_and_id_are_regenerated() {
        let p = normalize_preset(&json!({ "id": "  ", "name": "   " })).expect("normalize");
        assert_ne!(p.id.as_str().trim(), "");
        assert_eq!(p.name, DEFAULT_PRESET_NAME);
    }

    #[test]
    fn foreign_ids_are_kept_verbatim() {
        let p = normalize_preset(&json!({ "id": "legacy-preset-7" })).expect("normalize");
        assert_eq!(p.id.as_str(), "legacy-preset-7");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_preset(&json!({
            "name": " Quarterly Report ",
            "docConfig": { "title": "Q3", "pageSize": "Letter" },
            "headerFooter": { "mode": "html", "headerHtml": "<b>{{TITLE}}</b>" },
            "updatedAt": "2026-02-01T10:00:00+00:00"
        }))
        .expect("first pass");
        let twice =
            normalize_preset(&serde_json::to_value(&once).expect("serialize")).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn non_object_fails_loudly() {
        assert!(normalize_preset(&json!("just a string")).is_err());
        assert!(normalize_preset(&json!([1, 2, 3])).is_err());
        assert!(normalize_preset(&json!(null)).is_err());
    }
}
