use crate::alignment::cohesion::{group_vote_summary, plurality};
use crate::alignment::{
    MajorityAlignmentRecord, MajorityAlignmentSummary, percentage, require_members,
};
use crate::error::Result;
use crate::models::{Vote, VoteMatrix};
use log::debug;

/// Most frequent vote among everyone who voted on the resolution at `row`.
///
/// When counts tie, the vote that appears first in the input rows for that
/// resolution wins. That order is an artifact of how the data was supplied,
/// not a statistical rule. Undefined when nobody voted or `row` is out of range.
pub fn overall_majority(matrix: &VoteMatrix, row: usize) -> Option<Vote> {
    let votes: Vec<Vote> = matrix.cast_votes_in_row_order(row).collect();
    plurality(&votes).map(|(vote, _)| vote)
}

pub fn majority_alignment(
    matrix: &VoteMatrix,
    group: &[String],
) -> Result<Vec<MajorityAlignmentRecord>> {
    require_members(group)?;

    let records: Vec<MajorityAlignmentRecord> = (0..matrix.resolution_count())
        .map(|row| {
            // Majority over every voter, group position over members only
            let overall_majority_vote = overall_majority(matrix, row);
            let summary = group_vote_summary(matrix, row, group);
            let aligned = match (summary.group_vote, overall_majority_vote) {
                (Some(g), Some(m)) => g == m,
                _ => false,
            };
            MajorityAlignmentRecord {
                resolution_id: summary.resolution_id,
                overall_majority_vote,
                group_vote: summary.group_vote,
                aligned,
            }
        })
        .collect();

    debug!(
        "Evaluated majority alignment on {} resolutions, {} with a group position",
        records.len(),
        records.iter().filter(|r| r.is_evaluable()).count()
    );

    Ok(records)
}

// Resolutions without a group position are left out rather than counted as misaligned
pub fn alignment_summary(records: &[MajorityAlignmentRecord]) -> MajorityAlignmentSummary {
    // Only resolutions where the group had a position
    let considered: Vec<&MajorityAlignmentRecord> =
        records.iter().filter(|r| r.is_evaluable()).collect();
    let aligned_count = considered.iter().filter(|r| r.aligned).count();

    MajorityAlignmentSummary {
        total_resolutions_considered: considered.len(),
        aligned_count,
        alignment_pct: percentage(aligned_count, considered.len()),
    }
}

pub fn summarize_majority_alignment(
    matrix: &VoteMatrix,
    group: &[String],
) -> Result<MajorityAlignmentSummary> {
    let records = majority_alignment(matrix, group)?;
    Ok(alignment_summary(&records))
}
