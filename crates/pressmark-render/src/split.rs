// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// A deterministic pagination engine that splits the body into fixed-size
// groups of top-level blocks and clones the running header/footer into
// every page.
//
// This is an approximation by block count, not measured geometry — real
// layout engines are external. It exists so the pipeline (marker cloning,
// ordinal assignment, mask filling) can run end to end in tests and the
// CLI without a browser-grade engine.

use pressmark_core::error::Result;
use pressmark_core::{PaginatedDocument, RenderedPage};
use tracing::debug;

use crate::traits::{PaginationEngine, PaginationJob};

/// Block-count pagination engine.
#[derive(Debug, Clone, Copy)]
pub struct SplitPaginator {
    /// Top-level HTML blocks per page.
    pub blocks_per_page: usize,
}

impl Default for SplitPaginator {
    fn default() -> Self {
        Self { blocks_per_page: 12 }
    }
}

impl SplitPaginator {
    pub fn new(blocks_per_page: usize) -> Self {
        Self {
            blocks_per_page: blocks_per_page.max(1),
        }
    }

    /// Body HTML as one string per top-level block. Renderers emit one
    /// block element per line, so lines are the block boundaries here.
    fn blocks(body_html: &str) -> Vec<&str> {
        body_html
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

impl PaginationEngine for SplitPaginator {
    async fn paginate(&self, job: &PaginationJob) -> Result<PaginatedDocument> {
        let blocks = Self::blocks(&job.body_html);
        let chunks: Vec<&[&str]> = if blocks.is_empty() {
            vec![&[] as &[&str]]
        } else {
            blocks.chunks(self.blocks_per_page).collect()
        };

        let pages = chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| RenderedPage {
                ordinal: idx as u32 + 1,
                html: format!(
                    "<section class=\"page\" data-page-number=\"{}\">{}<main>{}</main>{}</section>",
                    idx + 1,
                    job.header_html,
                    chunk.join("\n"),
                    job.footer_html,
                ),
            })
            .collect::<Vec<_>>();

        debug!(pages = pages.len(), "block-count pagination complete");
        Ok(PaginatedDocument { pages })
    }
}
