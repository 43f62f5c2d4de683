// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry CSS generated from a DocConfig.
//
// The @page rule pins physical size and orientation and routes the running
// header/footer elements into the page margin boxes. Margins are exposed as
// CSS custom properties so the print stylesheet can consume them wherever
// it needs. For Custom page size no `size` declaration is emitted — the
// user controls it through their extra CSS.

use pressmark_core::{DocConfig, Margins};

/// Margin-box wiring shared by every page size.
const RUNNING_REGIONS: &str = "  @top-left { content: element(hf-header); }\n  @bottom-left { content: element(hf-footer); }\n";

/// Marks the header/footer elements as running elements pulled into the
/// margin boxes above.
const RUNNING_POSITIONS: &str = "#hf-header { position: running(hf-header); }\n#hf-footer { position: running(hf-footer); }\n";

/// Dynamic `@page` rule for the configured size and orientation.
pub fn page_css(config: &DocConfig) -> String {
    match config.page_size.css_keyword() {
        Some(size) => format!(
            "@page {{\n  size: {size} {};\n{RUNNING_REGIONS}}}\n{RUNNING_POSITIONS}",
            config.orientation.css_keyword()
        ),
        None => format!("@page {{\n{RUNNING_REGIONS}}}\n{RUNNING_POSITIONS}"),
    }
}

/// Margins as CSS custom properties on the document root.
pub fn margin_css(margins: &Margins) -> String {
    format!(
        ":root {{\n  --page-margin-top: {};\n  --page-margin-right: {};\n  --page-margin-bottom: {};\n  --page-margin-left: {};\n}}\n",
        margins.top, margins.right, margins.bottom, margins.left
    )
}

/// Full stylesheet for a document: geometry, margins, then the user's
/// extra CSS last so it can override everything.
pub fn stylesheet(config: &DocConfig) -> String {
    let mut css = page_css(config);
    css.push_str(&margin_css(&config.margins));
    if !config.custom_css.is_empty() {
        css.push_str(&config.custom_css);
        if !config.custom_css.ends_with('\n') {
            css.push('\n');
        }
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressmark_core::{Orientation, PageSize};

    #[test]
    fn a4_portrait_rule() {
        let css = page_css(&DocConfig::new());
        assert!(css.contains("size: A4 portrait;"));
        assert!(css.contains("element(hf-header)"));
        assert!(css.contains("running(hf-footer)"));
    }

    #[test]
    fn letter_landscape_rule() {
        let cfg = DocConfig {
            page_size: PageSize::Letter,
            orientation: Orientation::Landscape,
            ..DocConfig::new()
        };
        assert!(page_css(&cfg).contains("size: Letter landscape;"));
    }

    #[test]
    fn custom_size_omits_size_declaration() {
        let cfg = DocConfig {
            page_size: PageSize::Custom,
            ..DocConfig::new()
        };
        let css = page_css(&cfg);
        assert!(!css.contains("size:"));
        assert!(css.contains("@page {"));
    }

    #[test]
    fn margins_become_custom_properties() {
        let css = margin_css(&Margins::default());
        assert!(css.contains("--page-margin-top: 20mm;"));
        assert!(css.contains("--page-margin-left: 18mm;"));
    }

    #[test]
    fn custom_css_comes_last() {
        let cfg = DocConfig {
            custom_css: "h1 { color: red }".into(),
            ..DocConfig::new()
        };
        let css = stylesheet(&cfg);
        assert!(css.trim_end().ends_with("h1 { color: red }"));
    }
}
