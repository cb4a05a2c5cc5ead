use std::path::Path;

use crate::{OrthoError, Result};

/// Fields in a `bedtools merge -nms -scores collapse` row.
pub const COLLAPSED_FIELDS: usize = 5;

/// Type code of coding exons.
pub const CODING: &str = "c";
/// Type code of UTR exons.
pub const UTR: &str = "u";

/// Merged exon interval with the names and type codes of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollapsedExon {
    /// Chromosome.
    pub chrom: String,
    /// Start coordinate, as written.
    pub start: String,
    /// End coordinate, as written.
    pub end: String,
    /// Member exon names (`gene|...`).
    pub names: Vec<String>,
    /// Member type codes, deduplicated in first-seen order.
    pub types: Vec<String>,
}

impl CollapsedExon {
    /// Parse one row. `origin` and `line` only feed error messages.
    pub fn parse(row: &str, origin: &Path, line: usize) -> Result<Self> {
        let fields: Vec<&str> = row.trim().split('\t').collect();
        if fields.len() < COLLAPSED_FIELDS {
            return Err(OrthoError::MalformedExonRow {
                path: origin.to_path_buf(),
                line,
                expected: COLLAPSED_FIELDS,
                found: fields.len(),
            });
        }

        let mut types: Vec<String> = Vec::new();
        for code in fields[4].split(',') {
            if !types.iter().any(|seen| seen == code) {
                types.push(code.to_string());
            }
        }

        Ok(Self {
            chrom: fields[0].to_string(),
            start: fields[1].to_string(),
            end: fields[2].to_string(),
            names: fields[3].split(';').map(str::to_string).collect(),
            types,
        })
    }

    /// Whether any member carries the type code.
    pub fn has_type(&self, code: &str) -> bool {
        self.types.iter().any(|t| t == code)
    }

    /// Distinct gene ids of the members, in order, joined by `;`.
    ///
    /// A member's gene id is its name up to the first `|`.
    pub fn gene_id(&self) -> String {
        let mut genes: Vec<&str> = Vec::new();
        for name in &self.names {
            let gene = name.split('|').next().unwrap_or(name.as_str());
            if !genes.contains(&gene) {
                genes.push(gene);
            }
        }
        genes.join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_merged_row() {
        let exon = CollapsedExon::parse(
            "chr1\t100\t250\tG1|T1|e2;G1|T2|e2;G2|T9|e1\tc,o,c\n",
            Path::new("utr.txt"),
            1,
        )
        .unwrap();
        assert_eq!(exon.chrom, "chr1");
        assert_eq!(exon.start, "100");
        assert_eq!(exon.end, "250");
        assert_eq!(exon.names.len(), 3);
        assert_eq!(exon.types, vec!["c", "o"]);
        assert_eq!(exon.gene_id(), "G1;G2");
        assert!(exon.has_type(CODING));
        assert!(!exon.has_type(UTR));
    }

    #[test]
    fn test_type_codes_match_exactly() {
        let exon = CollapsedExon::parse("chr2\t1\t2\tG\tuc", Path::new("x"), 1).unwrap();
        assert!(!exon.has_type(UTR));
        assert!(!exon.has_type(CODING));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let err = CollapsedExon::parse("chr1\t100\t250", Path::new("utr.txt"), 7).unwrap_err();
        match err {
            OrthoError::MalformedExonRow { line, found, .. } => {
                assert_eq!(line, 7);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
