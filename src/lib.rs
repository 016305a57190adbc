pub mod chart;
pub mod collector;
pub mod config;
pub mod document;
pub mod error;
pub mod frequency;
mod glyphs;
pub mod lexer;
pub mod output;
pub mod rank;

pub use chart::BarChart;
pub use config::{Args, Config, OutputFormat};
pub use document::Document;
pub use error::{Result, ZipfError};
pub use frequency::FrequencyTable;
pub use rank::{RankedList, WordOccurrence};

use std::io::Write;
use std::time::Instant;
use tracing::info;

/// What a finished run saw and produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub unique_words: usize,
    pub total_tokens: u64,
    pub top: Vec<WordOccurrence>,
}

/// Collect, count, rank, then chart and/or print the top words.
///
/// Ranked text goes to `out` only when `config.cli_out` is set.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<Summary> {
    let started = Instant::now();
    let documents = collector::collect_files(config)?;
    let table = FrequencyTable::from_documents(&documents);
    info!("found {} unique tokens", table.len());
    info!("found {} total tokens", table.total_tokens());
    let total_tokens = table.total_tokens();
    let ranked = RankedList::from_table(table);
    info!("Read all the books in {:.2?}", started.elapsed());

    let top = ranked.top(config.top_count);
    if top.len() < config.top_count {
        info!(
            "only {} distinct words, showing fewer than the requested {}",
            top.len(),
            config.top_count
        );
    }

    if !config.no_graph {
        let png = BarChart::from_occurrences(top)?.render_png()?;
        output::write_graph(&config.graph_path, &png)?;
        info!("wrote graph to {}", config.graph_path.display());
    }

    if config.cli_out {
        output::write_results(out, top, config.format)?;
    }

    Ok(Summary {
        files: documents.len(),
        unique_words: ranked.len(),
        total_tokens,
        top: top.to_vec(),
    })
}
