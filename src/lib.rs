//! Voting-alignment statistics over roll-call records.
//!
//! Raw `(resolution, voter, vote)` records are pivoted into a [`VoteMatrix`],
//! which the calculators in [`alignment`] turn into pairwise agreement,
//! group cohesion, majority alignment and per-topic / per-year summaries.
//! Every operation is a pure function of its inputs.

pub mod alignment;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;

pub use alignment::{
    AgreementSpread, AlignmentResult, GroupVoteSummary, MajorityAlignmentRecord,
    MajorityAlignmentSummary,
};
pub use config::{AnalysisConfig, CRINK_COUNTRIES, WESTERN_COUNTRIES};
pub use error::{AlignmentError, Result};
pub use models::{ResolutionMeta, Vote, VoteMatrix, VoteRecord};
pub use report::AnalysisReport;
