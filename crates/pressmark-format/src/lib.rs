// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pressmark — pure formatters backing placeholder substitution.
//
// Everything in this crate is a synchronous, side-effect-free function that
// never fails on user-authored input: unknown case modes fall back to
// space-joined words, and mask characters degrade per-character.

pub mod case;
pub mod date;
pub mod number;

pub use case::transform;
pub use date::{format_date, format_time};
pub use number::format_with_mask;
