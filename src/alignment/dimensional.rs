//! Topic and time slices of the alignment statistics.
//!
//! Every aggregator partitions the matrix first and then runs the ordinary
//! calculators on each partition, so a partition's numbers never depend on
//! resolutions outside it.

use crate::alignment::cohesion::{agreement_variance, group_summaries};
use crate::alignment::majority::summarize_majority_alignment;
use crate::alignment::pairwise::pairwise_percentages;
use crate::alignment::{AgreementSpread, MajorityAlignmentSummary, mean, require_members};
use crate::error::Result;
use crate::models::{ResolutionMeta, VoteMatrix};
use log::debug;
use serde::Serialize;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicAgreementRow {
    pub topic: String,
    pub total_resolutions: usize,
    pub agreement_resolutions: usize,
    pub agreement_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyUnanimityRow {
    pub year: i32,
    pub total_resolutions: usize,
    pub unanimous_resolutions: usize,
    pub unanimity_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergenceRow<K> {
    pub key: K,
    #[serde(flatten)]
    pub spread: AgreementSpread,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionSummary<K> {
    pub key: K,
    pub total_resolutions: usize,
    pub majority: MajorityAlignmentSummary,
    pub agreement_variance: Option<f64>,
    pub mean_cohesion_pct: Option<f64>,
}

pub fn topic_key(meta: &ResolutionMeta) -> Option<String> {
    meta.topic.clone()
}

pub fn year_key(meta: &ResolutionMeta) -> Option<i32> {
    meta.year()
}

fn partitions<K, F>(matrix: &VoteMatrix, key: F, label: &str) -> Vec<(K, VoteMatrix)>
where
    K: Eq + Hash + Clone,
    F: Fn(&ResolutionMeta) -> Option<K>,
{
    let parts = matrix.partition_by(key);
    // Rows without a key fall out of every partition
    let covered: usize = parts.iter().map(|(_, m)| m.resolution_count()).sum();
    if covered < matrix.resolution_count() {
        debug!(
            "{} resolutions have no {} and were left out",
            matrix.resolution_count() - covered,
            label
        );
    }
    parts
}

/// Per topic: how often at least two group members cast the plurality vote.
/// Sorted by agreement percentage, highest first.
pub fn alignment_by_topic(matrix: &VoteMatrix, group: &[String]) -> Result<Vec<TopicAgreementRow>> {
    require_members(group)?;

    let mut rows = Vec::new();
    for (topic, part) in partitions(matrix, topic_key, "topic") {
        let summaries = group_summaries(&part, group)?;
        let total_resolutions = part.resolution_count();
        let agreement_resolutions = summaries.iter().filter(|s| s.reached_agreement()).count();
        rows.push(TopicAgreementRow {
            topic,
            total_resolutions,
            agreement_resolutions,
            // Partitions are never empty
            agreement_pct: 100.0 * agreement_resolutions as f64 / total_resolutions as f64,
        });
    }

    // Stable, so tied topics keep first-appearance order
    rows.sort_by(|a, b| b.agreement_pct.total_cmp(&a.agreement_pct));
    Ok(rows)
}

/// Per year, ascending: how often every participating member voted alike.
pub fn yearly_unanimity(matrix: &VoteMatrix, group: &[String]) -> Result<Vec<YearlyUnanimityRow>> {
    require_members(group)?;

    let mut rows = Vec::new();
    for (year, part) in partitions(matrix, year_key, "date") {
        let summaries = group_summaries(&part, group)?;
        let total_resolutions = part.resolution_count();
        let unanimous_resolutions = summaries.iter().filter(|s| s.is_unanimous()).count();
        rows.push(YearlyUnanimityRow {
            year,
            total_resolutions,
            unanimous_resolutions,
            unanimity_pct: 100.0 * unanimous_resolutions as f64 / total_resolutions as f64,
        });
    }

    rows.sort_by_key(|row| row.year);
    Ok(rows)
}

/// Spread of pairwise agreement among `countries` within each partition.
/// Partitions where no pair has a comparable resolution are omitted.
pub fn divergence_by<K, F>(
    matrix: &VoteMatrix,
    countries: &[String],
    key: F,
) -> Result<Vec<DivergenceRow<K>>>
where
    K: Eq + Hash + Clone,
    F: Fn(&ResolutionMeta) -> Option<K>,
{
    require_members(countries)?;

    let mut rows = Vec::new();
    for (k, part) in partitions(matrix, key, "partition key") {
        // Pairs without comparable votes are already dropped here
        let agreements = pairwise_percentages(&part, countries);
        match AgreementSpread::from_values(&agreements) {
            Some(spread) => rows.push(DivergenceRow { key: k, spread }),
            None => debug!("Partition skipped: no pair has comparable votes"),
        }
    }
    Ok(rows)
}

pub fn divergence_by_topic(
    matrix: &VoteMatrix,
    countries: &[String],
) -> Result<Vec<DivergenceRow<String>>> {
    divergence_by(matrix, countries, topic_key)
}

pub fn divergence_by_year(matrix: &VoteMatrix, countries: &[String]) -> Result<Vec<DivergenceRow<i32>>> {
    let mut rows = divergence_by(matrix, countries, year_key)?;
    rows.sort_by_key(|row| row.key);
    Ok(rows)
}

/// Re-runs the majority, variance and cohesion calculations per partition.
pub fn summarize_partitions<K, F>(
    matrix: &VoteMatrix,
    group: &[String],
    key: F,
) -> Result<Vec<PartitionSummary<K>>>
where
    K: Eq + Hash + Clone,
    F: Fn(&ResolutionMeta) -> Option<K>,
{
    require_members(group)?;

    let mut rows = Vec::new();
    for (k, part) in partitions(matrix, key, "partition key") {
        // Mean over resolutions where cohesion is defined
        let cohesion: Vec<f64> = group_summaries(&part, group)?
            .iter()
            .filter_map(|s| s.cohesion_pct())
            .collect();
        rows.push(PartitionSummary {
            key: k,
            total_resolutions: part.resolution_count(),
            majority: summarize_majority_alignment(&part, group)?,
            agreement_variance: agreement_variance(&part, group)?,
            mean_cohesion_pct: mean(&cohesion),
        });
    }
    Ok(rows)
}
