//! CSV ingestion of roll-call records.
//!
//! Produces normalised [`VoteRecord`]s for the alignment engine: trimmed voter
//! names with historic aliases resolved, parsed dates, and canonical votes.

use crate::error::{AlignmentError, Result};
use crate::models::{Vote, VoteRecord};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

// Former member states recorded under their successor's name
const VOTER_ALIASES: &[(&str, &str)] = &[("USSR", "RUSSIAN FEDERATION")];

/// Names of the input columns. Defaults follow the UN General Assembly
/// voting dataset export.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub resolution: String,
    pub voter: String,
    pub vote: String,
    pub date: Option<String>,
    pub topic: Option<String>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            resolution: "undl_id".to_string(),
            voter: "ms_name".to_string(),
            vote: "ms_vote".to_string(),
            date: Some("date".to_string()),
            topic: Some("topic".to_string()),
        }
    }
}

impl ColumnMap {
    /// Parses `resolution,voter,vote[,date[,topic]]`.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        if parts.len() < 3 || parts.len() > 5 || parts[..3].iter().any(|p| p.is_empty()) {
            return None;
        }
        let optional = |i: usize| {
            parts
                .get(i)
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string())
        };
        Some(Self {
            resolution: parts[0].to_string(),
            voter: parts[1].to_string(),
            vote: parts[2].to_string(),
            date: optional(3),
            topic: optional(4),
        })
    }
}

pub fn load_records(path: &Path, columns: &ColumnMap) -> Result<Vec<VoteRecord>> {
    let file = File::open(path).map_err(|source| AlignmentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records(file, columns)?;
    info!("Loaded {} vote records from {}", records.len(), path.display());

    for (resolution_id, voter) in duplicate_votes(&records) {
        warn!("Duplicate vote for {} on resolution {}", voter, resolution_id);
    }

    Ok(records)
}

pub fn read_records<R: Read>(reader: R, columns: &ColumnMap) -> Result<Vec<VoteRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let required = |name: &str| {
        position(name).ok_or_else(|| AlignmentError::SchemaMismatch {
            column: name.to_string(),
        })
    };

    // Schema is checked up front so no row is parsed against a bad header
    let resolution_idx = required(&columns.resolution)?;
    let voter_idx = required(&columns.voter)?;
    let vote_idx = required(&columns.vote)?;
    let date_idx = columns.date.as_deref().and_then(position);
    let topic_idx = columns.topic.as_deref().and_then(position);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let vote: Vote = field(vote_idx).parse()?;
        let date = date_idx.and_then(|idx| {
            let raw = field(idx);
            let parsed = parse_date(raw);
            if parsed.is_none() && !raw.is_empty() {
                warn!("Unparsable date {:?} on resolution {}", raw, field(resolution_idx));
            }
            parsed
        });
        let topic = topic_idx
            .map(field)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        records.push(VoteRecord {
            resolution_id: field(resolution_idx).to_string(),
            voter: normalize_voter(field(voter_idx)),
            vote,
            date,
            topic,
        });
    }

    Ok(records)
}

pub fn normalize_voter(raw: &str) -> String {
    let name = WHITESPACE.replace_all(raw.trim(), " ");
    VOTER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.into_owned())
}

// Accepts YYYY-MM-DD with anything trailing, e.g. a time of day
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(raw.trim())?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Keeps records dated within `start_year..=end_year`. Undated records are dropped.
pub fn filter_by_period(records: &[VoteRecord], start_year: i32, end_year: i32) -> Vec<VoteRecord> {
    records
        .iter()
        .filter(|r| r.year().is_some_and(|y| y >= start_year && y <= end_year))
        .cloned()
        .collect()
}

/// `(resolution_id, voter)` pairs that occur more than once, in input order.
pub fn duplicate_votes(records: &[VoteRecord]) -> Vec<(String, String)> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut duplicates = Vec::new();
    for record in records {
        if !seen.insert((record.resolution_id.as_str(), record.voter.as_str())) {
            duplicates.push((record.resolution_id.clone(), record.voter.clone()));
        }
    }
    duplicates
}
