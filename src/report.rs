use crate::alignment::coalition::{
    CoalitionSummary, GroupComparisonSummary, coalition_summary, compare_groups, comparison_summary,
};
use crate::alignment::cohesion::agreement_variance;
use crate::alignment::dimensional::{
    DivergenceRow, PartitionSummary, TopicAgreementRow, YearlyUnanimityRow, alignment_by_topic,
    divergence_by_topic, divergence_by_year, summarize_partitions, topic_key, year_key,
    yearly_unanimity,
};
use crate::alignment::majority::summarize_majority_alignment;
use crate::alignment::pairwise::dyadic_alignment;
use crate::alignment::{AlignmentResult, MajorityAlignmentSummary};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::VoteMatrix;
use log::info;
use serde::Serialize;

/// Everything the reporting layer consumes for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub group: Vec<String>,
    pub reference_group: Vec<String>,
    pub total_resolutions: usize,
    pub dyadic_alignment: Vec<AlignmentResult>,
    pub agreement_variance: Option<f64>,
    pub majority_alignment: MajorityAlignmentSummary,
    pub coalition: CoalitionSummary,
    pub reference_comparison: GroupComparisonSummary,
    pub topic_agreement: Vec<TopicAgreementRow>,
    pub yearly_unanimity: Vec<YearlyUnanimityRow>,
    pub divergence_by_topic: Vec<DivergenceRow<String>>,
    pub divergence_by_year: Vec<DivergenceRow<i32>>,
    pub yearly_summary: Vec<PartitionSummary<i32>>,
    pub topic_summary: Vec<PartitionSummary<String>>,
}

impl AnalysisReport {
    pub fn build(matrix: &VoteMatrix, config: &AnalysisConfig) -> Result<Self> {
        let group = &config.group;
        info!(
            "Building alignment report for {} members over {} resolutions",
            group.len(),
            matrix.resolution_count()
        );

        let comparisons = compare_groups(matrix, group, &config.reference_group)?;
        let mut yearly_summary = summarize_partitions(matrix, group, year_key)?;
        yearly_summary.sort_by_key(|row| row.key);
        // Topics stay in order of first appearance
        let topic_summary = summarize_partitions(matrix, group, topic_key)?;

        Ok(Self {
            group: group.clone(),
            reference_group: config.reference_group.clone(),
            total_resolutions: matrix.resolution_count(),
            dyadic_alignment: dyadic_alignment(matrix, group),
            agreement_variance: agreement_variance(matrix, group)?,
            majority_alignment: summarize_majority_alignment(matrix, group)?,
            coalition: coalition_summary(matrix, group)?,
            reference_comparison: comparison_summary(&comparisons),
            topic_agreement: alignment_by_topic(matrix, group)?,
            yearly_unanimity: yearly_unanimity(matrix, group)?,
            divergence_by_topic: divergence_by_topic(matrix, group)?,
            divergence_by_year: divergence_by_year(matrix, group)?,
            yearly_summary,
            topic_summary,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
