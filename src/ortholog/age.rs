//! Evolutionary age of a cluster from its species presence pattern.
//!
//! Presence flags are read positionally:
//! - position 0: outgroup (opossum)
//! - positions 1..3: mid tier (mouse, rat)
//! - positions 3..: tail (rhesus, human, and any further species)
//!
//! `all` over an empty tail holds and `any` over an empty tail does not.

use std::fmt;
use std::sync::Arc;

use super::ClusterRecord;
use crate::species::MIN_SPECIES;

/// Age assigned to a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AgeLabel {
    /// Shared by the outgroup and the eutherian species.
    Therian,
    /// Shared across rodents and primates without the outgroup.
    Eutherian,
    /// Mouse and rat only.
    Rodents,
    /// Primates only.
    Primates,
    /// No rule matched: the first species group with members.
    Lineage(Arc<str>),
}

impl AgeLabel {
    /// Label as written to the output table.
    pub fn as_str(&self) -> &str {
        match self {
            AgeLabel::Therian => "therian",
            AgeLabel::Eutherian => "eutherian",
            AgeLabel::Rodents => "rodents",
            AgeLabel::Primates => "primates",
            AgeLabel::Lineage(name) => name.as_ref(),
        }
    }
}

impl fmt::Display for AgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate over presence flags paired with the label it assigns.
#[derive(Debug)]
pub struct AgeRule {
    /// Label assigned when the predicate holds.
    pub label: AgeLabel,
    // indexes positions 0..3 unchecked; callers guarantee MIN_SPECIES flags
    applies: fn(&[bool]) -> bool,
}

impl AgeRule {
    /// Whether the rule holds for `record`.
    ///
    /// Records with fewer than [`MIN_SPECIES`] groups match no rule.
    pub fn matches(&self, record: &ClusterRecord) -> bool {
        let flags = record.presence();
        flags.len() >= MIN_SPECIES && (self.applies)(&flags)
    }
}

/// Age rules in priority order; the first match wins.
pub static AGE_RULES: [AgeRule; 4] = [
    AgeRule {
        label: AgeLabel::Therian,
        applies: is_therian,
    },
    AgeRule {
        label: AgeLabel::Eutherian,
        applies: is_eutherian,
    },
    AgeRule {
        label: AgeLabel::Rodents,
        applies: is_rodents,
    },
    AgeRule {
        label: AgeLabel::Primates,
        applies: is_primates,
    },
];

fn all(flags: &[bool]) -> bool {
    flags.iter().all(|&present| present)
}

fn any(flags: &[bool]) -> bool {
    flags.iter().any(|&present| present)
}

fn mid(flags: &[bool]) -> &[bool] {
    &flags[1..3]
}

fn tail(flags: &[bool]) -> &[bool] {
    &flags[3..]
}

fn is_therian(flags: &[bool]) -> bool {
    flags[0] && (all(mid(flags)) || all(tail(flags)))
}

fn is_eutherian(flags: &[bool]) -> bool {
    !flags[0]
        && ((all(mid(flags)) && any(tail(flags))) || (any(mid(flags)) && all(tail(flags))))
}

fn is_rodents(flags: &[bool]) -> bool {
    !flags[0] && all(mid(flags)) && !any(tail(flags))
}

fn is_primates(flags: &[bool]) -> bool {
    !any(&flags[..3]) && all(tail(flags))
}

/// Classify a cluster.
///
/// Returns `None` for a record with no genes at all (or one shorter than
/// [`MIN_SPECIES`] groups); such records carry no age.
pub fn classify(record: &ClusterRecord) -> Option<AgeLabel> {
    let flags = record.presence();
    if flags.len() < MIN_SPECIES || !any(&flags) {
        return None;
    }

    AGE_RULES
        .iter()
        .find(|rule| (rule.applies)(&flags))
        .map(|rule| rule.label.clone())
        .or_else(|| {
            record
                .first_present()
                .map(|group| AgeLabel::Lineage(Arc::clone(&group.name)))
        })
}
