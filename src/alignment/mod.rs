pub mod coalition;
pub mod cohesion;
pub mod dimensional;
pub mod majority;
pub mod pairwise;

use crate::error::{AlignmentError, Result};
use crate::models::Vote;
use serde::Serialize;

// Agreement between two voters over their comparable resolutions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentResult {
    pub voter_a: String,
    pub voter_b: String,
    pub agreement_count: usize,
    pub comparable_count: usize,
    pub agreement_pct: Option<f64>, // None when the pair never voted together
}

// A group's position on one resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupVoteSummary {
    pub resolution_id: String,
    pub member_votes: Vec<(String, Vote)>,
    pub group_vote: Option<Vote>,
    pub support_count: Option<usize>,
}

impl GroupVoteSummary {
    pub fn cohesion_pct(&self) -> Option<f64> {
        let support = self.support_count?;
        percentage(support, self.member_votes.len())
    }

    // At least two members cast the plurality vote
    pub fn reached_agreement(&self) -> bool {
        self.support_count.is_some_and(|n| n >= 2)
    }

    // Every participating member cast the same vote
    pub fn is_unanimous(&self) -> bool {
        self.support_count
            .is_some_and(|n| n == self.member_votes.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorityAlignmentRecord {
    pub resolution_id: String,
    pub overall_majority_vote: Option<Vote>,
    pub group_vote: Option<Vote>,
    pub aligned: bool,
}

impl MajorityAlignmentRecord {
    // The flag only means something when the group had a position
    pub fn is_evaluable(&self) -> bool {
        self.group_vote.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorityAlignmentSummary {
    pub total_resolutions_considered: usize,
    pub aligned_count: usize,
    pub alignment_pct: Option<f64>,
}

/// Mean, spread and range of a set of pairwise agreement percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementSpread {
    pub pair_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl AgreementSpread {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let variance = population_variance(values)?;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            pair_count: values.len(),
            mean: mean(values)?,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

pub(crate) fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(100.0 * part as f64 / whole as f64)
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

pub(crate) fn require_members(group: &[String]) -> Result<()> {
    if group.is_empty() {
        return Err(AlignmentError::EmptyGroup);
    }
    Ok(())
}
