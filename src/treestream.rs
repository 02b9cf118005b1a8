//! Treestream extraction: read sources, select trees, write one per line.

mod assembler;
mod names;
mod sampling;
mod source;

pub use assembler::{AssembledFile, assemble};
pub use names::{NO_NAME, resolve_names};
pub use sampling::{SampleWindow, burnin_offset};
pub use source::InputSource;

use crate::parsers::newick::{parse_newick, write_newick};
use crate::parsers::nexus::{FileFormat, NexusError};
use log::{debug, trace};
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Nexus(#[from] NexusError),
    #[error("Invalid configuration: {0}.")]
    InvalidConfig(String),
    #[error("{source_name}: {error}")]
    InSource {
        source_name: String,
        #[source]
        error: Box<StreamError>,
    },
}

impl StreamError {
    /// True when the output side went away (e.g. `treecat f.nex | head`).
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            StreamError::Io(err) => err.kind() == io::ErrorKind::BrokenPipe,
            StreamError::InSource { error, .. } => error.is_broken_pipe(),
            _ => false,
        }
    }
}

pub type StreamResult<T> = Result<T, StreamError>;

/// Burn-in and subsample settings applied to every source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatConfig {
    burnin_percent: u8,
    subsample: NonZeroUsize,
}

impl Default for CatConfig {
    fn default() -> Self {
        Self { burnin_percent: 0, subsample: NonZeroUsize::MIN }
    }
}

impl CatConfig {
    pub const MAX_BURNIN_PERCENT: u8 = 100;

    /// Builds a configuration from raw command-line integers.
    ///
    /// `burnin` must lie in `0..=100` and `subsample` must be at least 1.
    pub fn new(burnin: i64, subsample: i64) -> StreamResult<Self> {
        let burnin_percent = u8::try_from(burnin)
            .ok()
            .filter(|&b| b <= Self::MAX_BURNIN_PERCENT)
            .ok_or_else(|| {
                StreamError::InvalidConfig(format!(
                    "burnin must be between 0 and {}, got {burnin}",
                    Self::MAX_BURNIN_PERCENT
                ))
            })?;

        let subsample = usize::try_from(subsample)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                StreamError::InvalidConfig(format!(
                    "subsample must be a positive integer, got {subsample}"
                ))
            })?;

        Ok(Self { burnin_percent, subsample })
    }

    pub fn burnin_percent(&self) -> u8 {
        self.burnin_percent
    }

    pub fn subsample(&self) -> NonZeroUsize {
        self.subsample
    }
}

/// Counts gathered while processing one source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatSummary {
    pub format: FileFormat,
    pub fragments: usize,
    pub selected: usize,
    pub written: usize,
    /// Selected fragments the NEWICK parser rejected.
    pub skipped: usize,
    /// Nodes renamed through the translate table.
    pub renamed: usize,
}

/// Processes a single source: extract fragments, apply burn-in and
/// subsampling, then parse and write each selected tree.
///
/// Fragments that fail to parse are dropped without an error. Names are
/// translated only for NEXUS input with a non-empty translate table.
/// Nothing is written until the whole source has been read.
pub fn cat_file<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &CatConfig,
) -> StreamResult<CatSummary> {
    let assembled = assemble(reader)?;

    let window = SampleWindow::new(
        assembled.fragments.len(),
        config.burnin_percent(),
        config.subsample(),
    );

    let translate = assembled.format == FileFormat::Nexus
        && !assembled.translate_table.is_empty();

    let mut summary = CatSummary {
        format: assembled.format,
        fragments: assembled.fragments.len(),
        ..CatSummary::default()
    };

    for fragment in window.select(&assembled.fragments) {
        summary.selected += 1;

        let mut tree = match parse_newick(fragment) {
            Ok(tree) => tree,
            Err(err) => {
                trace!("Skipping fragment {fragment:?}: {err}");
                summary.skipped += 1;
                continue;
            }
        };

        if translate {
            summary.renamed +=
                resolve_names(&mut tree, &assembled.translate_table);
        }

        writeln!(writer, "{}", write_newick(&tree))?;
        summary.written += 1;
    }

    writer.flush()?;

    debug!(
        "Burn-in offset: {}, stride: {}, selected: {}, written: {}, skipped: {}.",
        window.offset(),
        window.stride(),
        summary.selected,
        summary.written,
        summary.skipped
    );

    Ok(summary)
}

/// Processes every source in order into one treestream on `writer`.
///
/// Each source gets its own burn-in and subsample window. The first error
/// stops the run and names the source it came from.
pub fn cat_sources<W: Write>(
    sources: &[InputSource],
    writer: &mut W,
    config: &CatConfig,
) -> StreamResult<Vec<CatSummary>> {
    let mut summaries: Vec<CatSummary> = Vec::with_capacity(sources.len());

    for source in sources {
        debug!("Reading {source}.");
        let summary = source
            .open()
            .map_err(StreamError::from)
            .and_then(|reader| cat_file(reader, writer, config))
            .map_err(|error| StreamError::InSource {
                source_name: source.to_string(),
                error: Box::new(error),
            })?;
        summaries.push(summary);
    }

    Ok(summaries)
}
