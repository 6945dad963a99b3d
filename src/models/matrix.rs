use crate::error::{AlignmentError, Result};
use crate::models::{Vote, VoteRecord};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionMeta {
    pub resolution_id: String,
    pub date: Option<NaiveDate>,
    pub topic: Option<String>,
}

impl ResolutionMeta {
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }
}

/// Resolutions as rows, voters as columns. A cell is `None` when the voter
/// has no cast vote on that resolution.
///
/// Each row also remembers the order in which votes appeared in the input,
/// which is what the overall-majority tie-break is defined against.
#[derive(Debug, Clone)]
pub struct VoteMatrix {
    resolutions: Vec<ResolutionMeta>,
    voters: Vec<String>,
    voter_index: HashMap<String, usize>,
    cells: Vec<Vec<Option<Vote>>>,
    row_order: Vec<Vec<usize>>,
}

impl VoteMatrix {
    pub fn from_records(records: &[VoteRecord]) -> Result<Self> {
        let mut resolutions: Vec<ResolutionMeta> = Vec::new();
        let mut resolution_index: HashMap<&str, usize> = HashMap::new();
        let mut voters: Vec<String> = Vec::new();
        let mut voter_index: HashMap<String, usize> = HashMap::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut entries: Vec<(usize, usize, Vote)> = Vec::with_capacity(records.len());

        for record in records {
            let row = match resolution_index.get(record.resolution_id.as_str()) {
                Some(&row) => {
                    // Later rows may carry metadata the first one lacked
                    let meta = &mut resolutions[row];
                    if meta.date.is_none() {
                        meta.date = record.date;
                    }
                    if meta.topic.is_none() {
                        meta.topic = record.topic.clone();
                    }
                    row
                }
                None => {
                    resolutions.push(ResolutionMeta {
                        resolution_id: record.resolution_id.clone(),
                        date: record.date,
                        topic: record.topic.clone(),
                    });
                    resolution_index.insert(record.resolution_id.as_str(), resolutions.len() - 1);
                    resolutions.len() - 1
                }
            };

            let col = match voter_index.get(&record.voter) {
                Some(&col) => col,
                None => {
                    voters.push(record.voter.clone());
                    voter_index.insert(record.voter.clone(), voters.len() - 1);
                    voters.len() - 1
                }
            };

            // Absent records count toward duplicates too
            if !seen.insert((row, col)) {
                return Err(AlignmentError::DuplicateVote {
                    resolution_id: record.resolution_id.clone(),
                    voter: record.voter.clone(),
                });
            }
            entries.push((row, col, record.vote));
        }

        // Column count is only known once every record has been seen
        let mut cells = vec![vec![None; voters.len()]; resolutions.len()];
        let mut row_order = vec![Vec::new(); resolutions.len()];
        for (row, col, vote) in entries {
            if vote.is_cast() {
                cells[row][col] = Some(vote);
                row_order[row].push(col);
            }
        }

        Ok(Self {
            resolutions,
            voters,
            voter_index,
            cells,
            row_order,
        })
    }

    pub fn resolution_count(&self) -> usize {
        self.resolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }

    pub fn resolutions(&self) -> &[ResolutionMeta] {
        &self.resolutions
    }

    pub fn voters(&self) -> &[String] {
        &self.voters
    }

    pub fn has_voter(&self, voter: &str) -> bool {
        self.voter_index.contains_key(voter)
    }

    pub fn cell(&self, row: usize, voter: &str) -> Option<Vote> {
        let col = *self.voter_index.get(voter)?;
        self.cells.get(row)?.get(col).copied().flatten()
    }

    // Unknown voters read as a column that never voted
    pub fn column(&self, voter: &str) -> Vec<Option<Vote>> {
        match self.voter_index.get(voter) {
            Some(&col) => self.cells.iter().map(|row| row[col]).collect(),
            None => vec![None; self.resolutions.len()],
        }
    }

    // Out-of-range rows yield no votes
    pub fn cast_votes_in_row_order(&self, row: usize) -> impl Iterator<Item = Vote> + '_ {
        let cells = self.cells.get(row);
        self.row_order
            .get(row)
            .into_iter()
            .flatten()
            .filter_map(move |&col| cells.and_then(|c| c[col]))
    }

    /// Builds a new matrix over the given rows, keeping every voter column.
    /// Row indices past the end are skipped.
    pub fn select(&self, rows: &[usize]) -> VoteMatrix {
        let rows: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&r| r < self.resolutions.len())
            .collect();
        VoteMatrix {
            resolutions: rows.iter().map(|&r| self.resolutions[r].clone()).collect(),
            voters: self.voters.clone(),
            voter_index: self.voter_index.clone(),
            cells: rows.iter().map(|&r| self.cells[r].clone()).collect(),
            row_order: rows.iter().map(|&r| self.row_order[r].clone()).collect(),
        }
    }

    /// Splits the matrix by a key derived from each resolution. Partitions come
    /// back in order of first appearance; rows without a key are dropped.
    pub fn partition_by<K, F>(&self, key: F) -> Vec<(K, VoteMatrix)>
    where
        K: Eq + Hash + Clone,
        F: Fn(&ResolutionMeta) -> Option<K>,
    {
        let mut order: Vec<K> = Vec::new();
        let mut groups: HashMap<K, Vec<usize>> = HashMap::new();

        for (row, meta) in self.resolutions.iter().enumerate() {
            // First sighting of a key fixes its output position
            if let Some(k) = key(meta) {
                groups
                    .entry(k.clone())
                    .or_insert_with(|| {
                        order.push(k);
                        Vec::new()
                    })
                    .push(row);
            }
        }

        order
            .into_iter()
            .filter_map(|k| {
                let rows = groups.remove(&k)?;
                let matrix = self.select(&rows);
                Some((k, matrix))
            })
            .collect()
    }
}
