mod matrix;

pub use matrix::{ResolutionMeta, VoteMatrix};

use crate::error::AlignmentError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vote {
    Yes,
    No,
    Abstain,
    Absent,
}

impl Vote {
    // Absent is a recorded code for "did not vote", so it never participates
    pub fn is_cast(self) -> bool {
        !matches!(self, Vote::Absent)
    }

    pub fn code(self) -> &'static str {
        match self {
            Vote::Yes => "Y",
            Vote::No => "N",
            Vote::Abstain => "A",
            Vote::Absent => "X",
        }
    }
}

impl FromStr for Vote {
    type Err = AlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" => Ok(Vote::Yes),
            "N" | "NO" => Ok(Vote::No),
            "A" | "ABSTAIN" | "ABSTENTION" => Ok(Vote::Abstain),
            "" | "X" | "ABSENT" | "NON-VOTING" => Ok(Vote::Absent),
            _ => Err(AlignmentError::InvalidVoteValue {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub resolution_id: String,
    pub voter: String,
    pub vote: Vote,
    pub date: Option<NaiveDate>,
    pub topic: Option<String>,
}

impl VoteRecord {
    pub fn new(resolution_id: impl Into<String>, voter: impl Into<String>, vote: Vote) -> Self {
        Self {
            resolution_id: resolution_id.into(),
            voter: voter.into(),
            vote,
            date: None,
            topic: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }
}
