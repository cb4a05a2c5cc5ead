//! # Ortholog Cluster Ages and Exon Labels
//!
//! Data-munging tools for a comparative-genomics study.
//!
//! ## Cluster ages
//!
//! Each input row is one ortholog cluster: a tab-separated list of gene
//! identifiers. Identifiers are assigned to species groups through a
//! [`SpeciesTable`], and the resulting [`ClusterRecord`] is labeled by an
//! ordered rule table ([`AGE_RULES`]):
//!
//! 1. **therian**: outgroup present together with both mid-tier species or
//!    with the whole tail
//! 2. **eutherian**: outgroup absent, mid tier and tail broadly present
//! 3. **rodents**: only the mid tier (mouse, rat) present
//! 4. **primates**: only the tail (rhesus, human) present
//! 5. otherwise the name of the first species group with members
//!
//! ## Exon labels
//!
//! [`exons`] relabels the collapsed exon sets written by `bedtools merge`
//! into a single BED5 file tagged coding / UTR / other.
//!
//! ## Usage Example
//!
//! ```
//! use orthoage::{classify, ClusterRecord, SpeciesTable, AgeLabel};
//!
//! let table = SpeciesTable::ensembl();
//! let record = ClusterRecord::from_row("ENSMODG001\tENSMUSG002\tENSRNOG003", &table);
//! assert_eq!(classify(&record), Some(AgeLabel::Therian));
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod species;    // Species group table and identifier matchers
pub mod ortholog;   // Cluster records, age rules and the summary pipeline
pub mod exons;      // Collapsed exon relabeling

// Re-exports for convenience
pub use species::{SpeciesEntry, SpeciesPreset, SpeciesTable};
pub use ortholog::{
    classify, classify_clusters, read_clusters, render_summaries, run_age_pipeline,
    write_summaries, AgeLabel, AgeRule, Cluster, ClusterId, ClusterRecord, ClusterSummary,
    PipelineStats, SpeciesGroup, AGE_RULES,
};
pub use exons::{
    relabel_exons, CollapsedExon, ExonInputs, ExonLabel, ExonRelabeler, ExonSource, RelabelStats,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the library components
#[derive(Error, Debug)]
pub enum OrthoError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error on an anonymous reader or writer
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// Species table violates its construction rules
    #[error("Invalid species table: {0}")]
    InvalidSpeciesTable(String),

    /// A collapsed exon row could not be split into its fields
    #[error(
        "Malformed exon row at {}:{line}: expected {expected} tab-separated fields, found {found}",
        .path.display()
    )]
    MalformedExonRow {
        /// Source file of the row
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Number of fields required
        expected: usize,
        /// Number of fields present
        found: usize,
    },
}

impl OrthoError {
    /// Attach a path to a raw I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, OrthoError>;
