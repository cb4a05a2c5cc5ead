//! Species groups and the identifier fragments that select their genes.
//!
//! A [`SpeciesTable`] is an ordered list of species groups. Order matters:
//! position 0 is the outgroup, positions 1 and 2 form the mid tier and every
//! later position belongs to the tail. The age rules only look at positions.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use clap::ValueEnum;

use crate::{OrthoError, Result};

/// Smallest table the age rules can evaluate: outgroup plus two mid-tier groups.
pub const MIN_SPECIES: usize = 3;

/// One species group and the identifier fragment its genes carry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpeciesEntry {
    /// Group name, also used as the fallback age label.
    pub name: Arc<str>,
    /// Literal fragment tested by substring containment.
    pub fragment: String,
}

impl SpeciesEntry {
    /// Construct a new entry.
    pub fn new(name: impl Into<Arc<str>>, fragment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fragment: fragment.into(),
        }
    }

    /// Whether `token` belongs to this species.
    pub fn matches(&self, token: &str) -> bool {
        token.contains(self.fragment.as_str())
    }
}

/// Parses `NAME=FRAGMENT`.
impl FromStr for SpeciesEntry {
    type Err = OrthoError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, fragment) = s.split_once('=').ok_or_else(|| {
            OrthoError::InvalidSpeciesTable(format!("expected NAME=FRAGMENT, got '{s}'"))
        })?;
        let (name, fragment) = (name.trim(), fragment.trim());
        if name.is_empty() {
            return Err(OrthoError::InvalidSpeciesTable(format!(
                "empty species name in '{s}'"
            )));
        }
        Ok(Self::new(name, fragment))
    }
}

impl fmt::Display for SpeciesEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.fragment)
    }
}

/// Built-in identifier conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SpeciesPreset {
    /// Ensembl gene ids (ENSMODG, ENSMUSG, ENSRNOG, ENSMMUG, ENSG)
    #[default]
    Ensembl,
    /// Circular RNA ids (mdCircRNA, mmCircRNA, rnCircRNA, rmCircRNA, hsCircRNA)
    Circrna,
}

/// Ordered species groups.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpeciesTable {
    entries: Vec<SpeciesEntry>,
}

impl SpeciesTable {
    /// Build a table from entries in declared order.
    ///
    /// Requires at least [`MIN_SPECIES`] entries, unique names and non-empty
    /// fragments. An empty fragment would match every token.
    pub fn new(entries: Vec<SpeciesEntry>) -> Result<Self> {
        if entries.len() < MIN_SPECIES {
            return Err(OrthoError::InvalidSpeciesTable(format!(
                "need at least {MIN_SPECIES} species groups, got {}",
                entries.len()
            )));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.fragment.is_empty() {
                return Err(OrthoError::InvalidSpeciesTable(format!(
                    "species '{}' has an empty identifier fragment",
                    entry.name
                )));
            }
            if entries[..i].iter().any(|prev| prev.name == entry.name) {
                return Err(OrthoError::InvalidSpeciesTable(format!(
                    "species '{}' declared twice",
                    entry.name
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Opossum outgroup, rodents, then primates, keyed on Ensembl gene ids.
    pub fn ensembl() -> Self {
        Self::from_pairs(&[
            ("opossum", "ENSMODG"),
            ("mouse", "ENSMUSG"),
            ("rat", "ENSRNOG"),
            ("rhesus", "ENSMMUG"),
            ("human", "ENSG"),
        ])
    }

    /// Same species order, keyed on circular RNA identifiers.
    pub fn circrna() -> Self {
        Self::from_pairs(&[
            ("opossum", "mdCircRNA"),
            ("mouse", "mmCircRNA"),
            ("rat", "rnCircRNA"),
            ("rhesus", "rmCircRNA"),
            ("human", "hsCircRNA"),
        ])
    }

    /// Table for a built-in preset.
    pub fn preset(preset: SpeciesPreset) -> Self {
        match preset {
            SpeciesPreset::Ensembl => Self::ensembl(),
            SpeciesPreset::Circrna => Self::circrna(),
        }
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|&(name, fragment)| SpeciesEntry::new(name, fragment))
                .collect(),
        }
    }

    /// Entries in declared order.
    pub fn entries(&self) -> &[SpeciesEntry] {
        &self.entries
    }

    /// Number of species groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Group names in declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_ref())
    }
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self::ensembl()
    }
}
