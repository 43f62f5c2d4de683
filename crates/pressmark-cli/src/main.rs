// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pressmark — Markdown to paginated, print-ready HTML
//
// Entry point. Initialises logging, loads an optional preset, renders the
// input through the built-in block-count paginator, and writes one HTML
// document with the resolved running headers/footers on every page.

use std::path::PathBuf;

use clap::Parser;
use pressmark_core::error::Result;
use pressmark_core::{DocConfig, HeaderFooter, HeaderFooterMode};
use pressmark_preset::normalize_preset;
use pressmark_render::{PulldownRenderer, RenderSession, SplitPaginator};
use pressmark_template::{MASK_STYLE_OVERRIDE, geometry};

#[derive(Debug, Parser)]
#[command(name = "pressmark", version, about = "Markdown to paginated, print-ready HTML")]
struct Args {
    /// Input Markdown file.
    input: PathBuf,

    /// Output HTML file. Writes to stdout when omitted.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Document title, drives {{TITLE}} placeholders.
    #[arg(long)]
    title: Option<String>,

    /// Preset record (JSON file). Normalised before use; flags below
    /// override its values.
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Running header, Markdown with placeholders.
    #[arg(long)]
    header: Option<String>,

    /// Running footer, Markdown with placeholders.
    #[arg(long)]
    footer: Option<String>,

    /// Top-level blocks per page for the built-in paginator.
    #[arg(long, default_value_t = 12)]
    blocks_per_page: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Args::parse()).await {
        tracing::error!(error = %e, "pressmark failed");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let markdown = std::fs::read_to_string(&args.input)?;

    let (mut config, mut header_footer) = match &args.preset {
        Some(path) => {
            let record: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            let preset = normalize_preset(&record)?;
            tracing::info!(preset = %preset.name, "preset loaded");
            (preset.doc_config, preset.header_footer)
        }
        None => (DocConfig::new(), HeaderFooter::default()),
    };

    if let Some(title) = args.title {
        config.title = title;
    }
    if let Some(header) = args.header {
        header_footer.mode = HeaderFooterMode::Md;
        header_footer.header_md = header;
    }
    if let Some(footer) = args.footer {
        header_footer.mode = HeaderFooterMode::Md;
        header_footer.footer_md = footer;
    }

    let stylesheet = format!("{}{}", geometry::stylesheet(&config), MASK_STYLE_OVERRIDE);

    let mut session = RenderSession::new(
        config,
        header_footer,
        PulldownRenderer,
        SplitPaginator::new(args.blocks_per_page),
    );

    let doc = session.render(&markdown).await?;
    tracing::info!(pages = doc.total_pages(), "document paginated");

    let html = assemble(session.config(), &stylesheet, &doc);
    match &args.out {
        Some(path) => {
            std::fs::write(path, html)?;
            tracing::info!(out = %path.display(), "document written");
        }
        None => print!("{html}"),
    }

    Ok(())
}

/// Wraps the rendered pages in a standalone HTML document.
fn assemble(
    config: &DocConfig,
    stylesheet: &str,
    doc: &pressmark_core::PaginatedDocument,
) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_text(&config.title)));
    out.push_str(&format!("<style>\n{stylesheet}</style>\n</head>\n<body>\n"));
    for page in &doc.pages {
        out.push_str(&page.html);
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
