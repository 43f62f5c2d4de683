// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pressmark — placeholder resolution and pagination-aware substitution.
//
// Substitution is split in two phases because only the pagination engine
// knows true page numbers: the resolver inlines everything it can resolve
// immediately (DATE/TIME/TITLE) and emits marker spans for PAGE/PAGES; the
// mask registry back-fills those markers per physical page once the
// engine's layout pass has completed.

pub mod geometry;
pub mod hooks;
pub mod placeholder;

pub use hooks::{MASK_STYLE_OVERRIDE, MaskRegistry};
pub use placeholder::{HeaderFooterResolution, Resolution, resolve, resolve_header_footer};
