// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pressmark — rendering orchestration.
//
// The Markdown renderer, HTML sanitizer, and pagination engine are external
// collaborators behind trait seams; this crate threads one mask registry
// through resolve → paginate → fill and guards the pagination boundary with
// a bounded timeout.

pub mod session;
pub mod split;
pub mod traits;

#[cfg(feature = "markdown")]
pub mod markdown;

#[cfg(feature = "markdown")]
pub use markdown::PulldownRenderer;
pub use session::RenderSession;
pub use split::SplitPaginator;
pub use traits::{
    HtmlSanitizer, MarkdownRenderer, NoopSanitizer, PaginationEngine, PaginationJob,
    RawHtmlRenderer,
};
