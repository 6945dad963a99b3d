use crate::alignment::pairwise::pairwise_percentages;
use crate::alignment::{GroupVoteSummary, percentage, population_variance, require_members};
use crate::error::Result;
use crate::models::{Vote, VoteMatrix};
use log::debug;

/// Most frequent cast vote and its count. `Absent` codes are ignored. Ties
/// go to whichever vote was seen first, so the result depends on the order
/// `votes` is supplied in.
pub fn plurality(votes: &[Vote]) -> Option<(Vote, usize)> {
    // Insertion-ordered tally keeps the first-seen tie-break explicit
    let mut counts: Vec<(Vote, usize)> = Vec::with_capacity(4);
    for vote in votes.iter().filter(|v| v.is_cast()) {
        match counts.iter_mut().find(|(v, _)| v == vote) {
            Some((_, n)) => *n += 1,
            None => counts.push((*vote, 1)),
        }
    }

    // Strictly greater, so an equal count never displaces an earlier vote
    let mut best: Option<(Vote, usize)> = None;
    for (vote, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((vote, n));
        }
    }
    best
}

/// Cohesion of one resolution: the share of participating members that cast
/// the plurality vote. Undefined below two participants.
pub fn cohesion_pct(votes: &[Vote]) -> Option<f64> {
    // Only cast votes are participants
    let cast: Vec<Vote> = votes.iter().copied().filter(|v| v.is_cast()).collect();
    if cast.len() < 2 {
        return None;
    }
    let (_, support) = plurality(&cast)?;
    percentage(support, cast.len())
}

pub fn summarize(resolution_id: &str, member_votes: Vec<(String, Vote)>) -> GroupVoteSummary {
    // Drop members who did not vote
    let member_votes: Vec<(String, Vote)> = member_votes
        .into_iter()
        .filter(|(_, vote)| vote.is_cast())
        .collect();

    // A lone voter is not a group position
    let (group_vote, support_count) = if member_votes.len() < 2 {
        (None, None)
    } else {
        let votes: Vec<Vote> = member_votes.iter().map(|(_, v)| *v).collect();
        match plurality(&votes) {
            Some((vote, n)) => (Some(vote), Some(n)),
            None => (None, None),
        }
    };

    GroupVoteSummary {
        resolution_id: resolution_id.to_string(),
        member_votes,
        group_vote,
        support_count,
    }
}

// Members are read in the order given, which fixes the tie-break.
// Callers pass a row index below `matrix.resolution_count()`.
pub(crate) fn group_vote_summary(
    matrix: &VoteMatrix,
    row: usize,
    group: &[String],
) -> GroupVoteSummary {
    let member_votes = group
        .iter()
        .filter_map(|member| matrix.cell(row, member).map(|v| (member.clone(), v)))
        .collect();
    summarize(&matrix.resolutions()[row].resolution_id, member_votes)
}

pub fn group_summaries(matrix: &VoteMatrix, group: &[String]) -> Result<Vec<GroupVoteSummary>> {
    require_members(group)?;

    // Missing members read as never voting
    for member in group {
        if !matrix.has_voter(member) {
            debug!("Group member {} has no votes in this dataset", member);
        }
    }

    Ok((0..matrix.resolution_count())
        .map(|row| group_vote_summary(matrix, row, group))
        .collect())
}

/// Population variance of the pairwise agreement percentages among members.
/// Undefined for groups under two members or when no pair ever overlaps.
pub fn agreement_variance(matrix: &VoteMatrix, group: &[String]) -> Result<Option<f64>> {
    require_members(group)?;
    if group.len() < 2 {
        return Ok(None);
    }

    let agreements = pairwise_percentages(matrix, group);
    Ok(population_variance(&agreements))
}
