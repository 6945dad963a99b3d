use crate::alignment::{AlignmentResult, percentage};
use crate::error::{AlignmentError, Result};
use crate::models::{Vote, VoteMatrix};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Agreement between two voters over aligned vote sequences.
///
/// Only resolutions where both voters cast a vote are comparable; a missing
/// vote on either side drops the resolution from numerator and denominator.
pub fn agreement(
    voter_a: &str,
    votes_a: &[Option<Vote>],
    voter_b: &str,
    votes_b: &[Option<Vote>],
) -> Result<AlignmentResult> {
    if votes_a.len() != votes_b.len() {
        return Err(AlignmentError::LengthMismatch {
            left: votes_a.len(),
            right: votes_b.len(),
        });
    }

    Ok(tally(voter_a, votes_a, voter_b, votes_b))
}

pub fn pair_agreement(matrix: &VoteMatrix, voter_a: &str, voter_b: &str) -> AlignmentResult {
    // Columns of one matrix always share its row count
    tally(voter_a, &matrix.column(voter_a), voter_b, &matrix.column(voter_b))
}

fn tally(
    voter_a: &str,
    votes_a: &[Option<Vote>],
    voter_b: &str,
    votes_b: &[Option<Vote>],
) -> AlignmentResult {
    let mut agreement_count = 0;
    let mut comparable_count = 0;

    for (a, b) in votes_a.iter().zip(votes_b) {
        // Absent codes never reach a matrix column, but raw sequences may hold them
        if let (Some(a), Some(b)) = (a, b) {
            if a.is_cast() && b.is_cast() {
                comparable_count += 1;
                if a == b {
                    agreement_count += 1;
                }
            }
        }
    }

    AlignmentResult {
        voter_a: voter_a.to_string(),
        voter_b: voter_b.to_string(),
        agreement_count,
        comparable_count,
        agreement_pct: percentage(agreement_count, comparable_count),
    }
}

/// Overlap of the vote categories two voters have used, ignoring which
/// resolution they were cast on. Returns a fraction in `[0, 1]`; undefined
/// when either side cast no vote. `Absent` is not a category.
pub fn jaccard_similarity(votes_a: &[Vote], votes_b: &[Vote]) -> Option<f64> {
    let set_a: HashSet<Vote> = votes_a.iter().copied().filter(|v| v.is_cast()).collect();
    let set_b: HashSet<Vote> = votes_b.iter().copied().filter(|v| v.is_cast()).collect();
    if set_a.is_empty() || set_b.is_empty() {
        return None;
    }

    // Both sets are non-empty, so the union is too
    let union = set_a.union(&set_b).count();
    let intersection = set_a.intersection(&set_b).count();

    Some(intersection as f64 / union as f64)
}

/// Every unordered pair drawn from `countries`, in supplied order.
pub fn all_pairs(matrix: &VoteMatrix, countries: &[String]) -> Vec<AlignmentResult> {
    let mut results = Vec::new();
    // Each pair once, a before b
    for (i, a) in countries.iter().enumerate() {
        for b in &countries[i + 1..] {
            results.push(pair_agreement(matrix, a, b));
        }
    }
    results
}

// Defined percentages of all pairs; pairs with no comparable votes are skipped
pub fn pairwise_percentages(matrix: &VoteMatrix, countries: &[String]) -> Vec<f64> {
    all_pairs(matrix, countries)
        .into_iter()
        .filter_map(|r| r.agreement_pct)
        .collect()
}

/// Pairwise alignment table sorted by agreement, highest first. Pairs that
/// never voted together sort last.
pub fn dyadic_alignment(matrix: &VoteMatrix, countries: &[String]) -> Vec<AlignmentResult> {
    let mut results = all_pairs(matrix, countries);
    // Stable sort: equal percentages keep pair order
    results.sort_by(|x, y| match (x.agreement_pct, y.agreement_pct) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    results
}
