use std::sync::Arc;

use crate::species::SpeciesTable;

/// Placeholder rendered for a species with no members in a cluster.
pub const ABSENT: &str = "-";

/// Genes of one species inside a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpeciesGroup {
    /// Species group name.
    pub name: Arc<str>,
    /// Gene identifiers in the order they appeared in the row.
    pub genes: Vec<String>,
}

impl SpeciesGroup {
    /// Construct a new group.
    pub fn new(name: impl Into<Arc<str>>, genes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            genes,
        }
    }

    /// Number of genes from this species.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the species is absent from the cluster.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Genes joined by `|`, or `-` when absent.
    pub fn render(&self) -> String {
        if self.genes.is_empty() {
            ABSENT.to_string()
        } else {
            self.genes.join("|")
        }
    }
}

/// One ortholog cluster split into species groups, in species table order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClusterRecord {
    groups: Vec<SpeciesGroup>,
}

impl ClusterRecord {
    /// Split a tab-separated row of gene identifiers into species groups.
    ///
    /// Every table entry yields a group, empty when nothing matched. A token
    /// matching several entries lands in each of them.
    pub fn from_row(line: &str, table: &SpeciesTable) -> Self {
        let tokens: Vec<&str> = line
            .trim()
            .split('\t')
            .filter(|token| !token.is_empty())
            .collect();

        let groups = table
            .entries()
            .iter()
            .map(|entry| {
                let genes = tokens
                    .iter()
                    .filter(|token| entry.matches(token))
                    .map(|token| token.to_string())
                    .collect();
                SpeciesGroup::new(Arc::clone(&entry.name), genes)
            })
            .collect();

        Self { groups }
    }

    /// Build a record from groups already in species order.
    pub fn from_groups(groups: Vec<SpeciesGroup>) -> Self {
        Self { groups }
    }

    /// Groups in species order.
    pub fn groups(&self) -> &[SpeciesGroup] {
        &self.groups
    }

    /// True when no species has any gene in this cluster.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(SpeciesGroup::is_empty)
    }

    /// Presence flag per species, in species order.
    pub fn presence(&self) -> Vec<bool> {
        self.groups.iter().map(|group| !group.is_empty()).collect()
    }

    /// First species (in table order) with at least one gene.
    pub fn first_present(&self) -> Option<&SpeciesGroup> {
        self.groups.iter().find(|group| !group.is_empty())
    }

    /// Rendered gene lists, one per species.
    pub fn rendered_genes(&self) -> Vec<String> {
        self.groups.iter().map(SpeciesGroup::render).collect()
    }

    /// Gene counts, one per species.
    pub fn counts(&self) -> Vec<usize> {
        self.groups.iter().map(SpeciesGroup::len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_is_split_in_table_order() {
        let table = SpeciesTable::ensembl();
        let record = ClusterRecord::from_row("ENSG01\tENSMODG01\tENSMUSG01\tENSMUSG02", &table);

        let names: Vec<_> = record.groups().iter().map(|g| g.name.as_ref()).collect();
        assert_eq!(names, ["opossum", "mouse", "rat", "rhesus", "human"]);
        assert_eq!(record.counts(), vec![1, 2, 0, 0, 1]);
        assert_eq!(record.groups()[1].genes, vec!["ENSMUSG01", "ENSMUSG02"]);
    }

    #[test]
    fn test_unmatched_row_is_empty() {
        let table = SpeciesTable::ensembl();
        let record = ClusterRecord::from_row("foo\tbar", &table);
        assert_eq!(record.groups().len(), 5);
        assert!(record.is_empty());
        assert!(record.first_present().is_none());

        assert!(ClusterRecord::from_row("", &table).is_empty());
    }

    #[test]
    fn test_surrounding_whitespace_is_stripped() {
        let table = SpeciesTable::ensembl();
        let record = ClusterRecord::from_row("  ENSRNOG7\tENSMMUG9 \r\n", &table);
        assert_eq!(record.groups()[2].genes, vec!["ENSRNOG7"]);
        assert_eq!(record.groups()[3].genes, vec!["ENSMMUG9"]);
    }

    #[test]
    fn test_rendering() {
        let table = SpeciesTable::ensembl();
        let record = ClusterRecord::from_row("ENSMUSG1\tENSMUSG2\tENSG3", &table);
        assert_eq!(record.rendered_genes(), vec!["-", "ENSMUSG1|ENSMUSG2", "-", "-", "ENSG3"]);
        assert_eq!(record.presence(), vec![false, true, false, false, true]);
        assert_eq!(record.first_present().map(|g| g.name.as_ref()), Some("mouse"));
    }

    #[test]
    fn test_overlapping_fragments_are_not_deduplicated() {
        let table = SpeciesTable::new(vec![
            crate::SpeciesEntry::new("a", "X"),
            crate::SpeciesEntry::new("b", "XY"),
            crate::SpeciesEntry::new("c", "Z"),
        ])
        .unwrap();
        let record = ClusterRecord::from_row("XY1", &table);
        assert_eq!(record.counts(), vec![1, 1, 0]);
    }
}
