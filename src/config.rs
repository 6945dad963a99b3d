use crate::ingest::ColumnMap;
use log::warn;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_VOTES_FILE: &str = "data/processed/UNGA_voting_records_filtered.csv";

// China, Russia, Iran, North Korea
pub const CRINK_COUNTRIES: &[&str] = &[
    "CHINA",
    "RUSSIAN FEDERATION",
    "IRAN (ISLAMIC REPUBLIC OF)",
    "DEMOCRATIC PEOPLE'S REPUBLIC OF KOREA",
];

pub const WESTERN_COUNTRIES: &[&str] = &["UNITED STATES", "GERMANY", "FRANCE", "UNITED KINGDOM"];

pub fn default_group() -> Vec<String> {
    CRINK_COUNTRIES.iter().map(|s| s.to_string()).collect()
}

pub fn default_reference_group() -> Vec<String> {
    WESTERN_COUNTRIES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub votes_file: PathBuf,
    pub group: Vec<String>,
    pub reference_group: Vec<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub columns: ColumnMap,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            votes_file: PathBuf::from(DEFAULT_VOTES_FILE),
            group: default_group(),
            reference_group: default_reference_group(),
            start_year: None,
            end_year: None,
            columns: ColumnMap::default(),
        }
    }
}

impl AnalysisConfig {
    // Reads the process environment; call dotenvy first to pick up .env
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let votes_file = lookup("VOTES_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.votes_file);
        let group = lookup("GROUP")
            .and_then(|raw| parse_list(&raw))
            .unwrap_or(defaults.group);
        let reference_group = lookup("REFERENCE_GROUP")
            .and_then(|raw| parse_list(&raw))
            .unwrap_or(defaults.reference_group);
        let columns = lookup("VOTE_COLUMNS")
            .and_then(|raw| {
                let parsed = ColumnMap::parse(&raw);
                if parsed.is_none() {
                    warn!("Ignoring malformed VOTE_COLUMNS value: {}", raw);
                }
                parsed
            })
            .unwrap_or(defaults.columns);

        Self {
            votes_file,
            group,
            reference_group,
            start_year: parse_year(&lookup, "START_YEAR"),
            end_year: parse_year(&lookup, "END_YEAR"),
            columns,
        }
    }
}

fn parse_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

fn parse_year<F>(lookup: &F, key: &str) -> Option<i32>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<i32>() {
        Ok(year) => Some(year),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_crink_group() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.group.len(), 4);
        assert_eq!(config.group[1], "RUSSIAN FEDERATION");
        assert_eq!(config.reference_group[0], "UNITED STATES");
        // Full names as they appear in the vote data
        assert!(config.group.iter().all(|name| name.len() > 3));
    }

    #[test]
    fn reads_overrides() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[
            ("VOTES_FILE", "votes.csv"),
            ("GROUP", " CUBA , VENEZUELA,, "),
            ("START_YEAR", "2000"),
            ("END_YEAR", "soon"),
            ("VOTE_COLUMNS", "undl_id,ms_name,ms_vote,date,subject"),
        ]));
        assert_eq!(config.votes_file, PathBuf::from("votes.csv"));
        assert_eq!(config.group, vec!["CUBA".to_string(), "VENEZUELA".to_string()]);
        assert_eq!(config.start_year, Some(2000));
        assert_eq!(config.end_year, None);
        assert_eq!(config.columns.topic.as_deref(), Some("subject"));
    }

    #[test]
    fn blank_group_falls_back_to_default() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[("GROUP", " , ")]));
        assert_eq!(config.group, default_group());
    }
}
