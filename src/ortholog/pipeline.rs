use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::{classify, AgeLabel, ClusterRecord};
use crate::species::SpeciesTable;
use crate::{OrthoError, Result};

/// Sequential cluster number, rendered as `orthoCl-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClusterId(pub u64);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "orthoCl-{}", self.0)
    }
}

/// A parsed input row and the id it was assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cluster {
    /// Row number, starting at 1.
    pub id: ClusterId,
    /// Genes split by species.
    pub record: ClusterRecord,
}

/// One output line of the age table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClusterSummary {
    /// Cluster id.
    pub id: ClusterId,
    /// Genes per species joined by `|`, `-` when absent.
    pub rnas: Vec<String>,
    /// Gene count per species.
    pub counts: Vec<usize>,
    /// Assigned age.
    pub age: AgeLabel,
}

impl ClusterSummary {
    /// Summarize a cluster; `None` when it has no genes.
    pub fn from_cluster(cluster: &Cluster) -> Option<Self> {
        let age = classify(&cluster.record)?;
        Some(Self {
            id: cluster.id,
            rnas: cluster.record.rendered_genes(),
            counts: cluster.record.counts(),
            age,
        })
    }
}

/// Every value is its own tab-separated field:
/// `id, rnas..., counts..., age`.
impl fmt::Display for ClusterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        for rna in &self.rnas {
            write!(f, "\t{rna}")?;
        }
        for count in &self.counts {
            write!(f, "\t{count}")?;
        }
        write!(f, "\t{}", self.age)
    }
}

/// Counters reported after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PipelineStats {
    /// Input rows read (ids assigned).
    pub rows_read: usize,
    /// Summary lines written.
    pub clusters_written: usize,
    /// Rows without any recognized gene.
    pub rows_skipped: usize,
    /// Written clusters per age label.
    pub ages: BTreeMap<String, usize>,
}

/// Read every row of `reader` into a cluster.
///
/// Ids are assigned per line, blank lines included, before any filtering.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_clusters<R: BufRead>(mut reader: R, table: &SpeciesTable) -> Result<Vec<Cluster>> {
    let mut clusters = Vec::new();
    let mut next_id = 0u64;
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        next_id += 1;
        let line = String::from_utf8_lossy(&buffer);
        clusters.push(Cluster {
            id: ClusterId(next_id),
            record: ClusterRecord::from_row(&line, table),
        });
    }

    debug!(rows = clusters.len(), "parsed cluster rows");
    Ok(clusters)
}

/// Summaries for every cluster with at least one gene, in input order.
pub fn classify_clusters(clusters: &[Cluster]) -> Vec<ClusterSummary> {
    clusters.iter().filter_map(ClusterSummary::from_cluster).collect()
}

/// Write the age table for `clusters`.
pub fn write_summaries<W: Write>(writer: &mut W, clusters: &[Cluster]) -> Result<PipelineStats> {
    let mut stats = PipelineStats {
        rows_read: clusters.len(),
        ..PipelineStats::default()
    };

    for cluster in clusters {
        let Some(summary) = ClusterSummary::from_cluster(cluster) else {
            debug!(id = %cluster.id, "no recognized genes, skipping");
            stats.rows_skipped += 1;
            continue;
        };
        writeln!(writer, "{summary}")?;
        stats.clusters_written += 1;
        *stats.ages.entry(summary.age.to_string()).or_default() += 1;
    }

    writer.flush()?;
    Ok(stats)
}

/// Render the age table into a string (useful for tests and snapshots).
pub fn render_summaries(clusters: &[Cluster]) -> Result<String> {
    let mut buffer = Vec::new();
    write_summaries(&mut buffer, clusters)?;
    String::from_utf8(buffer).map_err(|err| {
        OrthoError::Stream(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

/// Classify every cluster of `input` and write the age table to `output`.
///
/// The whole input is read before the output file is created.
pub fn run_age_pipeline(input: &Path, output: &Path, table: &SpeciesTable) -> Result<PipelineStats> {
    let reader = BufReader::new(File::open(input).map_err(|err| OrthoError::io(input, err))?);
    let clusters = read_clusters(reader, table).map_err(|err| match err {
        OrthoError::Stream(source) => OrthoError::io(input, source),
        other => other,
    })?;

    let mut writer =
        BufWriter::new(File::create(output).map_err(|err| OrthoError::io(output, err))?);
    let stats = write_summaries(&mut writer, &clusters).map_err(|err| match err {
        OrthoError::Stream(source) => OrthoError::io(output, source),
        other => other,
    })?;

    info!(
        rows = stats.rows_read,
        written = stats.clusters_written,
        skipped = stats.rows_skipped,
        "wrote cluster ages to {}",
        output.display()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn clusters(input: &str) -> Vec<Cluster> {
        read_clusters(Cursor::new(input), &SpeciesTable::ensembl()).unwrap()
    }

    #[test]
    fn test_cluster_id_format() {
        assert_eq!(ClusterId(1).to_string(), "orthoCl-1");
        assert_eq!(ClusterId(1042).to_string(), "orthoCl-1042");
    }

    #[test]
    fn test_summary_line() {
        let parsed = clusters("ENSMODG001\tENSMUSG002\tENSRNOG003\n");
        let rendered = render_summaries(&parsed).unwrap();
        assert_eq!(
            rendered,
            "orthoCl-1\tENSMODG001\tENSMUSG002\tENSRNOG003\t-\t-\t1\t1\t1\t0\t0\ttherian\n"
        );
    }

    #[test]
    fn test_ids_are_consumed_by_skipped_rows() {
        let parsed = clusters("nothing here\n\nENSMUSG1\tENSRNOG1\n");
        assert_eq!(parsed.len(), 3);

        let summaries = classify_clusters(&parsed);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, ClusterId(3));
        assert_eq!(summaries[0].age, AgeLabel::Rodents);
    }

    #[test]
    fn test_stats() {
        let parsed = clusters("ENSMUSG1\tENSRNOG1\nfoo\nENSMMUG1\tENSG1\nENSMUSG2\tENSRNOG2\n");
        let mut sink = Vec::new();
        let stats = write_summaries(&mut sink, &parsed).unwrap();
        assert_eq!(stats.rows_read, 4);
        assert_eq!(stats.clusters_written, 3);
        assert_eq!(stats.rows_skipped, 1);
        assert_eq!(stats.ages.get("rodents"), Some(&2));
        assert_eq!(stats.ages.get("primates"), Some(&1));
    }

    #[test]
    fn test_last_line_without_newline() {
        let parsed = clusters("ENSG1\nENSG2");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].record.groups()[4].genes, vec!["ENSG2"]);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let bytes: &[u8] = b"ENSG1\t\xff\xfe\n";
        let parsed = read_clusters(Cursor::new(bytes), &SpeciesTable::ensembl()).unwrap();
        assert_eq!(parsed[0].record.counts(), vec![0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_empty_input() {
        let parsed = clusters("");
        assert!(parsed.is_empty());
        assert_eq!(render_summaries(&parsed).unwrap(), "");
    }
}
