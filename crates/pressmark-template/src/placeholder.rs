// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placeholder resolution: {{NAME}} / {{NAME:FORMAT}}.
//
// DATE/TIME/TITLE are substituted immediately; PAGE/PAGES become marker
// spans that the mask registry fills after pagination. Unrecognized names
// pass through verbatim so forward-compatible tokens never break a
// document.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::debug;

use pressmark_core::{DocConfig, MaskSet};
use pressmark_format::{case, date};

/// {{NAME[:FORMAT]}} — NAME is letters only, FORMAT is any run of non-`}`
/// characters. A colon with nothing but whitespace after it fails the
/// optional group, leaving the token to pass through unmatched.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z]+)\s*(?::\s*([^}]+?)\s*)?\}\}").expect("static regex")
});

/// Separator runs collapsed during case-mode normalization.
static MODE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("static regex"));

/// Outcome of one resolution pass over a single text.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub html: String,
    pub masks: MaskSet,
}

/// Outcome of resolving a header and footer together.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFooterResolution {
    pub header_html: String,
    pub footer_html: String,
    pub masks: MaskSet,
}

/// Normalize a {{TITLE:...}} format token to a case-transform mode.
///
/// Case-insensitive; whitespace/hyphen/underscore runs become a single
/// underscore, then the result goes through a fixed synonym table.
/// Unmatched tokens pass through unchanged — the transformer's own
/// space-join fallback handles them.
pub fn normalize_case_token(token: &str) -> String {
    let t = MODE_SEPARATORS
        .replace_all(token.trim(), "_")
        .to_lowercase();
    match t.as_str() {
        "upper" | "uppercase" => "upper",
        "lower" | "lowercase" => "lower",
        "camel" | "camelcase" => "camel",
        "pascal" | "pascalcase" => "pascal",
        "snake" | "snakecase" => "snake",
        "kebab" | "kebabcase" => "kebab",
        "screaming_snake" | "screamingsnakecase" => "scream_snake",
        "screaming_kebab" | "screamingkebabcase" => "scream_kebab",
        "train" | "traincase" => "train",
        "flat" | "flatcase" => "flat",
        "upper_flat" | "upperflatcase" => "upper_flat",
        "camel_snake" | "camelsnakecase" => "camel_snake",
        "pascal_snake" | "pascalsnakecase" => "pascal_snake",
        "screaming" | "screamingcase" | "screaming_words" => "scream_words",
        _ => return t,
    }
    .to_string()
}

/// Escape a string for use inside a double-quoted HTML attribute.
pub(crate) fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn marker_span(class: &str, mask: Option<&str>) -> String {
    match mask {
        Some(m) => format!(r#"<span class="{class}" data-mask="{}"></span>"#, escape_html_attr(m)),
        None => format!(r#"<span class="{class}"></span>"#),
    }
}

/// Resolve all placeholders in `text` against `config`, using `now` for
/// DATE/TIME.
///
/// PAGE/PAGES tokens become marker spans; the first mask seen for each of
/// them is recorded in the returned mask set, and later occurrences share
/// that first mask's formatting.
pub fn resolve(text: &str, config: &DocConfig, now: &NaiveDateTime) -> Resolution {
    let mut masks = MaskSet::default();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let whole = caps.get(0).expect("match");
        out.push_str(&text[last..whole.start()]);
        last = whole.end();

        let name = caps[1].to_ascii_uppercase();
        // Trimmed; a format of pure whitespace counts as absent.
        let fmt = caps
            .get(2)
            .map(|f| f.as_str().trim())
            .filter(|f| !f.is_empty());

        match name.as_str() {
            "DATE" => out.push_str(&date::format_date(now, fmt.unwrap_or("dd/mm/yyyy"))),
            "TIME" => out.push_str(&date::format_time(now, fmt.unwrap_or("HH:mm"))),
            "TITLE" => match fmt {
                None => out.push_str(&config.title),
                Some(f) => out.push_str(&case::transform(&config.title, &normalize_case_token(f))),
            },
            "PAGE" => {
                if let Some(mask) = fmt {
                    if masks.page_mask.is_none() {
                        masks.page_mask = Some(mask.to_string());
                    }
                }
                out.push_str(&marker_span("ph-page", fmt));
            }
            "PAGES" => {
                if let Some(mask) = fmt {
                    if masks.pages_mask.is_none() {
                        masks.pages_mask = Some(mask.to_string());
                    }
                }
                out.push_str(&marker_span("ph-pages", fmt));
            }
            // Unknown placeholder: leave the matched text untouched.
            _ => out.push_str(whole.as_str()),
        }
    }
    out.push_str(&text[last..]);

    if !masks.is_empty() {
        debug!(?masks, "page masks discovered during resolution");
    }
    Resolution { html: out, masks }
}

/// Resolve header and footer together and merge their masks.
///
/// The header is evaluated first, so when both declare a mask the header's
/// wins (first-wins, same rule as duplicates within one text).
pub fn resolve_header_footer(
    header: &str,
    footer: &str,
    config: &DocConfig,
    now: &NaiveDateTime,
) -> HeaderFooterResolution {
    let r1 = resolve(header, config, now);
    let r2 = resolve(footer, config, now);
    HeaderFooterResolution {
        header_html: r1.html,
        footer_html: r2.html,
        masks: r1.masks.or(r2.masks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .expect("valid date")
            .and_hms_opt(13, 5, 9)
            .expect("valid time")
    }

    fn config(title: &str) -> DocConfig {
        DocConfig {
            title: title.into(),
            ..DocConfig::new()
        }
    }

    #[test]
    fn date_and_time_defaults() {
        let r = resolve("{{DATE}} {{TIME}}", &config(""), &now());
        assert_eq!(r.html, "05/01/2024 13:05");
        assert!(r.masks.is_empty());
    }

    #[test]
    fn date_with_custom_pattern() {
        let r = resolve("{{DATE:ddd, d mmm yyyy}}", &config(""), &now());
        assert_eq!(r.html, "sex, 5 jan 2024");
    }

    #[test]
    fn title_without_format_is_raw() {
        let r = resolve("{{TITLE}}", &config("Relatório Anual"), &now());
        assert_eq!(r.html, "Relatório Anual");
    }

    #[test]
    fn title_with_case_mode() {
        let r = resolve("{{TITLE:upper}} - {{PAGE:00}}", &config("report"), &now());
        assert_eq!(
            r.html,
            r#"REPORT - <span class="ph-page" data-mask="00"></span>"#
        );
        assert_eq!(r.masks.page_mask.as_deref(), Some("00"));
        assert!(r.masks.pages_mask.is_none());
    }

    #[test]
    fn title_mode_synonyms_normalize() {
        let cfg = config("my big title");
        let r = resolve("{{TITLE:SCREAMING-KEBAB}}", &cfg, &now());
        assert_eq!(r.html, "MY-BIG-TITLE");
        let r = resolve("{{TITLE:UPPERCASE}}", &cfg, &now());
        assert_eq!(r.html, "MY BIG TITLE");
    }

    #[test]
    fn case_token_separators_collapse_to_underscore() {
        assert_eq!(normalize_case_token("SCREAMING KEBAB"), "scream_kebab");
        assert_eq!(normalize_case_token("screaming-kebab"), "scream_kebab");
        assert_eq!(normalize_case_token("PascalCase"), "pascal");
        // Unmapped tokens pass through for the transformer's fallback.
        assert_eq!(normalize_case_token("fancy mode"), "fancy_mode");
    }

    #[test]
    fn unknown_title_mode_falls_back_to_spaced_words() {
        let r = resolve("{{TITLE:fancy}}", &config("someTitle"), &now());
        assert_eq!(r.html, "some Title");
    }

    #[test]
    fn page_without_mask_is_a_bare_marker() {
        let r = resolve("p. {{PAGE}} / {{PAGES}}", &config(""), &now());
        assert_eq!(
            r.html,
            r#"p. <span class="ph-page"></span> / <span class="ph-pages"></span>"#
        );
        assert!(r.masks.is_empty());
    }

    #[test]
    fn first_page_mask_wins_within_one_text() {
        let r = resolve("{{PAGE:00}} {{PAGE:####}}", &config(""), &now());
        assert_eq!(r.masks.page_mask.as_deref(), Some("00"));
        // The later token still renders, carrying its own data-mask.
        assert!(r.html.contains("data-mask=\"####\""));
    }

    #[test]
    fn mask_attribute_is_escaped() {
        let r = resolve(r#"{{PAGES:<">}}"#, &config(""), &now());
        assert!(r.html.contains(r#"data-mask="&lt;&quot;""#));
    }

    #[test]
    fn unknown_name_passes_through_verbatim() {
        let r = resolve("{{AUTHOR}} and {{WHATEVER:x}}", &config(""), &now());
        assert_eq!(r.html, "{{AUTHOR}} and {{WHATEVER:x}}");
    }

    #[test]
    fn lowercase_names_are_recognized() {
        let r = resolve("{{date}}", &config(""), &now());
        assert_eq!(r.html, "05/01/2024");
    }

    #[test]
    fn malformed_tokens_pass_through() {
        let src = "{{}} {{TITLE";
        let r = resolve(src, &config("t"), &now());
        assert_eq!(r.html, src);
    }

    #[test]
    fn header_mask_wins_over_footer() {
        let hf = resolve_header_footer(
            "{{PAGE:00}}",
            "{{PAGE:###}} of {{PAGES:0000}}",
            &config(""),
            &now(),
        );
        assert_eq!(hf.masks.page_mask.as_deref(), Some("00"));
        assert_eq!(hf.masks.pages_mask.as_deref(), Some("0000"));
        assert!(hf.footer_html.contains("data-mask=\"###\""));
    }
}
