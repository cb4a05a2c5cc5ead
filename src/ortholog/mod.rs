//! Ortholog cluster ages.
//!
//! Rows of gene identifiers become [`ClusterRecord`]s, are labeled by the
//! age rules and written back as a tab-separated age table.

mod age;
mod pipeline;
mod record;

pub use age::{classify, AgeLabel, AgeRule, AGE_RULES};
pub use pipeline::{
    classify_clusters, read_clusters, render_summaries, run_age_pipeline, write_summaries,
    Cluster, ClusterId, ClusterSummary, PipelineStats,
};
pub use record::{ClusterRecord, SpeciesGroup, ABSENT};
