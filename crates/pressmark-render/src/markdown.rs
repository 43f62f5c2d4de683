// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use pressmark_core::error::Result;
use pulldown_cmark::{Options, Parser, html};

use crate::traits::MarkdownRenderer;

/// CommonMark renderer with the table and strikethrough extensions
/// enabled, matching what document bodies and headers expect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownRenderer;

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}
