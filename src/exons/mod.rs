//! Exon relabeling from collapsed interval sets.
//!
//! Coding exons are intersected with UTR exons and merged upstream
//! (`bedtools intersect | bedtools merge -nms -scores collapse`), leaving two
//! files: merged exons overlapping a UTR and merged exons that do not. This
//! module folds both into one BED5 file whose names read `gene|label|index`.
//! Intervals with a UTR member are dropped.

mod collapsed;

pub use collapsed::{CollapsedExon, CODING, COLLAPSED_FIELDS, UTR};

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{OrthoError, Result};

/// Which upstream file a collapsed exon came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExonSource {
    /// Exons overlapping an annotated UTR.
    Utr,
    /// Exons without UTR overlap.
    NonUtr,
}

/// Label written into the BED name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExonLabel {
    /// At least one coding member.
    Coding,
    /// UTR-overlapping without coding members.
    Utr,
    /// Neither coding nor UTR-overlapping.
    Other,
}

impl ExonLabel {
    /// One-letter code used in the output.
    pub fn code(self) -> char {
        match self {
            ExonLabel::Coding => 'c',
            ExonLabel::Utr => 'u',
            ExonLabel::Other => 'o',
        }
    }

    /// Label for an exon from `source`, or `None` when it must be dropped.
    pub fn for_exon(exon: &CollapsedExon, source: ExonSource) -> Option<Self> {
        if exon.has_type(UTR) {
            return None;
        }
        Some(match (exon.has_type(CODING), source) {
            (true, _) => ExonLabel::Coding,
            (false, ExonSource::Utr) => ExonLabel::Utr,
            (false, ExonSource::NonUtr) => ExonLabel::Other,
        })
    }
}

impl fmt::Display for ExonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Paths of the two collapsed exon files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonInputs {
    /// Merged exons overlapping UTRs.
    pub utr: PathBuf,
    /// Merged exons without UTR overlap.
    pub non_utr: PathBuf,
}

/// Counters reported after relabeling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RelabelStats {
    /// Rows read across both inputs.
    pub rows_read: usize,
    /// Rows dropped for having a UTR member.
    pub dropped: usize,
    /// Coding exons written.
    pub coding: usize,
    /// UTR exons written.
    pub utr: usize,
    /// Other exons written.
    pub other: usize,
}

impl RelabelStats {
    /// Total BED lines written.
    pub fn written(&self) -> usize {
        self.coding + self.utr + self.other
    }
}

/// Streams collapsed exon files into one BED5 output.
///
/// The index in each name is shared across every input fed to the same
/// relabeler and only advances on written lines.
#[derive(Debug)]
pub struct ExonRelabeler {
    next_index: usize,
    stats: RelabelStats,
}

impl ExonRelabeler {
    /// Relabeler starting at index 1.
    pub fn new() -> Self {
        Self {
            next_index: 1,
            stats: RelabelStats::default(),
        }
    }

    /// Relabel every row of `reader`. `origin` names the input in errors.
    pub fn relabel<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        source: ExonSource,
        origin: &Path,
        writer: &mut W,
    ) -> Result<()> {
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| OrthoError::io(origin, err))?;
            if line.trim().is_empty() {
                continue;
            }
            self.stats.rows_read += 1;

            let exon = CollapsedExon::parse(&line, origin, idx + 1)?;
            let Some(label) = ExonLabel::for_exon(&exon, source) else {
                self.stats.dropped += 1;
                continue;
            };

            writeln!(
                writer,
                "{}\t{}\t{}\t{}|{}|{}\t0",
                exon.chrom,
                exon.start,
                exon.end,
                exon.gene_id(),
                label,
                self.next_index
            )?;
            self.next_index += 1;
            match label {
                ExonLabel::Coding => self.stats.coding += 1,
                ExonLabel::Utr => self.stats.utr += 1,
                ExonLabel::Other => self.stats.other += 1,
            }
        }
        debug!(?source, path = %origin.display(), "relabeled collapsed exons");
        Ok(())
    }

    /// Counters so far.
    pub fn stats(&self) -> RelabelStats {
        self.stats
    }
}

impl Default for ExonRelabeler {
    fn default() -> Self {
        Self::new()
    }
}

/// Relabel the UTR file, then the non-UTR file, into `output`.
pub fn relabel_exons(inputs: &ExonInputs, output: &Path) -> Result<RelabelStats> {
    let mut writer =
        BufWriter::new(File::create(output).map_err(|err| OrthoError::io(output, err))?);
    let mut relabeler = ExonRelabeler::new();

    for (path, source) in [
        (&inputs.utr, ExonSource::Utr),
        (&inputs.non_utr, ExonSource::NonUtr),
    ] {
        let reader = BufReader::new(File::open(path).map_err(|err| OrthoError::io(path, err))?);
        relabeler
            .relabel(reader, source, path, &mut writer)
            .map_err(|err| match err {
                OrthoError::Stream(source) => OrthoError::io(output, source),
                other => other,
            })?;
    }
    writer.flush().map_err(|err| OrthoError::io(output, err))?;

    let stats = relabeler.stats();
    info!(
        written = stats.written(),
        dropped = stats.dropped,
        "wrote labeled exons to {}",
        output.display()
    );
    Ok(stats)
}
