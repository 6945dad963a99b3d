use chrono::NaiveDate;
use vote_alignment::alignment::cohesion::{agreement_variance, cohesion_pct, summarize};
use vote_alignment::alignment::dimensional::{divergence_by_year, summarize_partitions, year_key};
use vote_alignment::alignment::majority::majority_alignment;
use vote_alignment::alignment::pairwise::{agreement, all_pairs, pair_agreement};
use vote_alignment::ingest::{ColumnMap, read_records};
use vote_alignment::{AnalysisConfig, AnalysisReport, Vote, VoteMatrix, VoteRecord};
use Vote::*;

fn members(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// Small deterministic dataset: 12 resolutions over 3 years, 5 voters
fn sample_records() -> Vec<VoteRecord> {
    let voters = ["CHINA", "RUSSIAN FEDERATION", "IRAN", "FRANCE", "BRAZIL"];
    let pattern = [Yes, No, Abstain, Yes, Yes, No, Absent];
    let mut records = Vec::new();
    for r in 0..12usize {
        let date = NaiveDate::from_ymd_opt(2019 + (r % 3) as i32, 1 + (r % 12) as u32, 10).unwrap();
        let topic = if r % 2 == 0 { "Disarmament" } else { "Human rights" };
        for (v, voter) in voters.iter().enumerate() {
            let vote = pattern[(r * 3 + v * 5 + r * v) % pattern.len()];
            records.push(
                VoteRecord::new(format!("A/RES/{r}"), *voter, vote)
                    .with_date(date)
                    .with_topic(topic),
            );
        }
    }
    records
}

#[test]
fn scenario_two_of_three_agree() {
    let a = [Some(Yes), Some(Yes), Some(No)];
    let b = [Some(Yes), Some(No), Some(No)];
    let result = agreement("A", &a, "B", &b).unwrap();
    assert_eq!(result.agreement_count, 2);
    assert_eq!(result.comparable_count, 3);
    assert!((result.agreement_pct.unwrap() - 66.67).abs() < 0.01);
}

#[test]
fn scenario_group_cohesion() {
    let votes = vec![
        ("A".to_string(), Yes),
        ("B".to_string(), Yes),
        ("C".to_string(), No),
    ];
    let summary = summarize("R1", votes);
    assert_eq!(summary.group_vote, Some(Yes));
    assert_eq!(summary.support_count, Some(2));
    assert!((summary.cohesion_pct().unwrap() - 66.67).abs() < 0.01);

    let lone = summarize("R1", vec![("A".to_string(), Yes)]);
    assert_eq!(lone.cohesion_pct(), None);
    assert_eq!(cohesion_pct(&[Yes]), None);
}

#[test]
fn scenario_group_outvoted_by_majority() {
    let records: Vec<VoteRecord> = [("A", Yes), ("B", Yes), ("C", No), ("D", No), ("E", No)]
        .iter()
        .map(|(voter, vote)| VoteRecord::new("R1", *voter, *vote))
        .collect();
    let matrix = VoteMatrix::from_records(&records).unwrap();
    let result = majority_alignment(&matrix, &members(&["A", "B"])).unwrap();
    assert_eq!(result[0].overall_majority_vote, Some(No));
    assert_eq!(result[0].group_vote, Some(Yes));
    assert!(!result[0].aligned);
}

#[test]
fn scenario_year_without_comparable_votes_is_omitted() {
    let d = |y| NaiveDate::from_ymd_opt(y, 5, 5).unwrap();
    let records = vec![
        VoteRecord::new("R1", "A", Yes).with_date(d(2019)),
        VoteRecord::new("R1", "B", Yes).with_date(d(2019)),
        VoteRecord::new("R2", "A", Yes).with_date(d(2020)),
        VoteRecord::new("R2", "B", Absent).with_date(d(2020)),
        VoteRecord::new("R3", "A", No).with_date(d(2021)),
        VoteRecord::new("R3", "B", Yes).with_date(d(2021)),
    ];
    let matrix = VoteMatrix::from_records(&records).unwrap();
    let rows = divergence_by_year(&matrix, &members(&["A", "B"])).unwrap();
    let years: Vec<i32> = rows.iter().map(|r| r.key).collect();
    assert_eq!(years, vec![2019, 2021]);
}

#[test]
fn agreement_is_symmetric_for_every_pair() {
    let matrix = VoteMatrix::from_records(&sample_records()).unwrap();
    let voters = matrix.voters().to_vec();
    for a in &voters {
        for b in &voters {
            let ab = pair_agreement(&matrix, a, b);
            let ba = pair_agreement(&matrix, b, a);
            assert_eq!(ab.agreement_count, ba.agreement_count);
            assert_eq!(ab.comparable_count, ba.comparable_count);
            assert_eq!(ab.agreement_pct, ba.agreement_pct);
        }
    }
}

#[test]
fn percentages_stay_in_range() {
    let matrix = VoteMatrix::from_records(&sample_records()).unwrap();
    for result in all_pairs(&matrix, matrix.voters()) {
        match result.agreement_pct {
            Some(pct) => assert!((0.0..=100.0).contains(&pct)),
            None => assert_eq!(result.comparable_count, 0),
        }
    }

    let group = members(&["CHINA", "RUSSIAN FEDERATION", "IRAN"]);
    for row in summarize_partitions(&matrix, &group, year_key).unwrap() {
        if let Some(pct) = row.majority.alignment_pct {
            assert!((0.0..=100.0).contains(&pct));
        }
        if let Some(pct) = row.mean_cohesion_pct {
            assert!((0.0..=100.0).contains(&pct));
        }
    }
}

#[test]
fn adding_an_agreeing_resolution_never_lowers_agreement() {
    let mut a = vec![Some(Yes), Some(No), Some(Abstain), None, Some(Yes)];
    let mut b = vec![Some(No), Some(No), Some(Yes), Some(Yes), Some(Yes)];
    let mut previous = agreement("A", &a, "B", &b).unwrap().agreement_pct.unwrap();

    for vote in [Yes, No, Abstain] {
        a.push(Some(vote));
        b.push(Some(vote));
        let next = agreement("A", &a, "B", &b).unwrap().agreement_pct.unwrap();
        assert!(next >= previous);
        previous = next;
    }
}

#[test]
fn one_sided_absence_changes_nothing() {
    let a = vec![Some(Yes), Some(No), Some(No)];
    let b = vec![Some(Yes), Some(Yes), Some(No)];
    let before = agreement("A", &a, "B", &b).unwrap();

    let mut a2 = a.clone();
    let mut b2 = b.clone();
    a2.push(None);
    b2.push(Some(No));
    a2.push(Some(Absent));
    b2.push(Some(Yes));
    let after = agreement("A", &a2, "B", &b2).unwrap();

    assert_eq!(before.agreement_count, after.agreement_count);
    assert_eq!(before.comparable_count, after.comparable_count);
    assert_eq!(before.agreement_pct, after.agreement_pct);
}

#[test]
fn recomputation_is_identical() {
    let records = sample_records();
    let config = AnalysisConfig {
        group: members(&["CHINA", "RUSSIAN FEDERATION", "IRAN"]),
        reference_group: members(&["FRANCE", "BRAZIL"]),
        ..AnalysisConfig::default()
    };

    let first = AnalysisReport::build(&VoteMatrix::from_records(&records).unwrap(), &config).unwrap();
    let second = AnalysisReport::build(&VoteMatrix::from_records(&records).unwrap(), &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    let matrix = VoteMatrix::from_records(&records).unwrap();
    assert_eq!(
        agreement_variance(&matrix, &config.group).unwrap(),
        agreement_variance(&matrix, &config.group).unwrap()
    );
}

#[test]
fn csv_to_report() {
    let csv = "\
undl_id,ms_name,ms_vote,date,topic
R1,CHINA,Y,2020-10-01,Security
R1,RUSSIAN FEDERATION,Y,2020-10-01,Security
R1,UNITED STATES,N,2020-10-01,Security
R1,FRANCE,N,2020-10-01,Security
R1,BRAZIL,Y,2020-10-01,Security
R2,CHINA,A,2021-03-01,Rights
R2,USSR,N,2021-03-01,Rights
R2,UNITED STATES,Y,2021-03-01,Rights
R2,FRANCE,Y,2021-03-01,Rights
R2,BRAZIL,Y,2021-03-01,Rights
";
    let records = read_records(csv.as_bytes(), &ColumnMap::default()).unwrap();
    let matrix = VoteMatrix::from_records(&records).unwrap();
    let report = AnalysisReport::build(&matrix, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.total_resolutions, 2);
    // CHINA and RUSSIAN FEDERATION agree on R1 only
    let pair = report
        .dyadic_alignment
        .iter()
        .find(|r| r.voter_a == "CHINA" && r.voter_b == "RUSSIAN FEDERATION")
        .unwrap();
    assert_eq!(pair.agreement_pct, Some(50.0));
    assert_eq!(report.majority_alignment.total_resolutions_considered, 2);
    assert_eq!(report.majority_alignment.aligned_count, 1);
    assert_eq!(report.yearly_unanimity.len(), 2);
    assert_eq!(report.reference_comparison.same_position_count, 0);
}
