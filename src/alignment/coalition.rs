use crate::alignment::cohesion::group_summaries;
use crate::alignment::{percentage, require_members};
use crate::error::Result;
use crate::models::{Vote, VoteMatrix};
use serde::Serialize;
use std::collections::BTreeMap;

/// How often a group voted as a bloc, broken down by bloc size
/// (2-way, 3-way, ... agreement on the plurality vote).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoalitionSummary {
    pub total_resolutions: usize,
    pub agreement_resolutions: usize,
    pub resolutions_by_support: BTreeMap<usize, usize>,
    pub pct_by_support: BTreeMap<usize, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparisonRecord {
    pub resolution_id: String,
    pub group_a_vote: Option<Vote>,
    pub group_b_vote: Option<Vote>,
    pub same_position: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparisonSummary {
    pub resolutions_compared: usize,
    pub same_position_count: usize,
    pub same_position_pct: Option<f64>,
}

pub fn coalition_summary(matrix: &VoteMatrix, group: &[String]) -> Result<CoalitionSummary> {
    let summaries = group_summaries(matrix, group)?;

    // Keyed by bloc size, ascending
    let mut resolutions_by_support: BTreeMap<usize, usize> = BTreeMap::new();
    for summary in summaries.iter().filter(|s| s.reached_agreement()) {
        if let Some(support) = summary.support_count {
            *resolutions_by_support.entry(support).or_insert(0) += 1;
        }
    }

    let agreement_resolutions: usize = resolutions_by_support.values().sum();
    // Shares of agreeing resolutions, not of all resolutions
    let pct_by_support = resolutions_by_support
        .iter()
        .filter_map(|(&support, &n)| percentage(n, agreement_resolutions).map(|pct| (support, pct)))
        .collect();

    Ok(CoalitionSummary {
        total_resolutions: matrix.resolution_count(),
        agreement_resolutions,
        resolutions_by_support,
        pct_by_support,
    })
}

/// Lines two groups up resolution by resolution. They share a position only
/// when both reached internal agreement on the same vote.
pub fn compare_groups(
    matrix: &VoteMatrix,
    group_a: &[String],
    group_b: &[String],
) -> Result<Vec<GroupComparisonRecord>> {
    require_members(group_a)?;
    require_members(group_b)?;

    let a = group_summaries(matrix, group_a)?;
    let b = group_summaries(matrix, group_b)?;

    // Both lists follow matrix row order
    Ok(a.into_iter()
        .zip(b)
        .map(|(a, b)| {
            let same_position = a.reached_agreement()
                && b.reached_agreement()
                && a.group_vote == b.group_vote;
            GroupComparisonRecord {
                resolution_id: a.resolution_id,
                group_a_vote: a.group_vote,
                group_b_vote: b.group_vote,
                same_position,
            }
        })
        .collect())
}

pub fn comparison_summary(records: &[GroupComparisonRecord]) -> GroupComparisonSummary {
    // Both groups need a position for the row to count
    let compared: Vec<&GroupComparisonRecord> = records
        .iter()
        .filter(|r| r.group_a_vote.is_some() && r.group_b_vote.is_some())
        .collect();
    let same_position_count = compared.iter().filter(|r| r.same_position).count();

    GroupComparisonSummary {
        resolutions_compared: compared.len(),
        same_position_count,
        same_position_pct: percentage(same_position_count, compared.len()),
    }
}
