// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pressmark — preset persistence with schema versioning and defensive
// normalization.

pub mod normalize;
pub mod store;

pub use normalize::normalize_preset;
pub use store::PresetStore;
