mod common;

use std::collections::BTreeMap;

use common::{Fixture, registry};
use mentara_instruments::Registry;
use mentara_instruments::scorer::{calculate_detailed_result, calculate_detailed_results};
use mentara_instruments::scoring::{
    Interpretation, ScoreMapping, ScoreStrategy, ScoringConfig, SeverityBand, ToolResult,
    UNANSWERED,
};

fn bands(list: &[(i32, i32, &str)]) -> Vec<SeverityBand> {
    list.iter()
        .map(|&(min, max, label)| SeverityBand::new(min, max, label))
        .collect()
}

fn tiny_from_score(score: i32) -> Option<String> {
    (score < 10).then(|| "tiny".to_string())
}

fn always_three(_: &[i32]) -> i32 {
    3
}

fn ten_per_answer(answers: &[i32]) -> i32 {
    answers.len() as i32 * 10
}

fn from_answers(answers: &[i32]) -> String {
    format!("{} answers", answers.len())
}

#[test]
fn phobia_all_zero_is_minimal() {
    let result = calculate_detailed_result(&Registry::standard(), "phobia", &[0; 15]);
    assert_eq!(result.score, 0);
    assert_eq!(result.severity, "Minimal Phobia");
    assert_eq!(result.percentage, 0.0);
}

#[test]
fn unknown_questionnaire_is_degraded() {
    let result = calculate_detailed_result(&Registry::standard(), "not_a_tool", &[1, 2, 3]);
    assert_eq!(
        result,
        ToolResult {
            name: "not_a_tool".to_string(),
            score: 0,
            severity: "Unknown".to_string(),
            percentage: 0.0,
            subscales: None,
        }
    );
}

#[test]
fn batch_scoring_survives_unknown_ids() {
    let mut answers = BTreeMap::new();
    answers.insert("depression".to_string(), vec![3; 9]);
    answers.insert("mystery".to_string(), vec![1]);

    let results = calculate_detailed_results(&Registry::standard(), &answers);
    assert_eq!(results["depression"].score, 27);
    assert_eq!(results["depression"].severity, "Severe");
    assert_eq!(results["mystery"].severity, "Unknown");
}

#[test]
fn raw_sum_falls_back_to_percentage_tiers() {
    let reg = registry(vec![Fixture::new("raw", 4, 5, ScoringConfig::default())]);

    let full = calculate_detailed_result(&reg, "raw", &[4, 4, 4, 4]);
    assert_eq!(full.score, 16);
    assert_eq!(full.percentage, 100.0);
    assert_eq!(full.severity, "Significant Impact");

    let moderate = calculate_detailed_result(&reg, "raw", &[2, 2, 2, 0]);
    assert_eq!(moderate.percentage, 37.5);
    assert_eq!(moderate.severity, "Moderate Impact");

    let low = calculate_detailed_result(&reg, "raw", &[2, 2, 0, 0]);
    assert_eq!(low.percentage, 25.0);
    assert_eq!(low.severity, "Low Impact");
}

#[test]
fn mapping_drives_total_and_maximum() {
    let scoring = ScoringConfig {
        strategy: ScoreStrategy::MappedSum(ScoreMapping::from_pairs(&[(0, 0), (1, 5)])),
        ..Default::default()
    };
    let reg = registry(vec![Fixture::new("mapped", 2, 3, scoring)]);

    // Answer 2 has no mapped value and scores 0.
    let result = calculate_detailed_result(&reg, "mapped", &[1, 2]);
    assert_eq!(result.score, 5);
    assert_eq!(result.percentage, 50.0);
}

#[test]
fn unanswered_questions_are_excluded_from_maximum() {
    let reg = registry(vec![Fixture::new("raw", 4, 5, ScoringConfig::default())]);
    let result = calculate_detailed_result(&reg, "raw", &[4, UNANSWERED, UNANSWERED, 4]);
    assert_eq!(result.score, 8);
    assert_eq!(result.percentage, 100.0);
}

#[test]
fn questions_without_options_count_four_points() {
    let reg = registry(vec![Fixture::new("bare", 1, 0, ScoringConfig::default())]);
    let result = calculate_detailed_result(&reg, "bare", &[2]);
    assert_eq!(result.percentage, 50.0);
}

#[test]
fn all_unanswered_does_not_divide_by_zero() {
    let banded = ScoringConfig {
        severity_bands: bands(&[(0, 0, "None"), (1, 10, "Some")]),
        ..Default::default()
    };
    let reg = registry(vec![
        Fixture::new("banded", 4, 5, banded),
        Fixture::new("plain", 4, 5, ScoringConfig::default()),
    ]);

    let result = calculate_detailed_result(&reg, "banded", &[UNANSWERED; 4]);
    assert_eq!(result.score, 0);
    assert_eq!(result.percentage, 0.0);
    assert_eq!(result.severity, "None");

    let result = calculate_detailed_result(&reg, "plain", &[UNANSWERED; 4]);
    assert_eq!(result.percentage, 0.0);
    assert_eq!(result.severity, "Low Impact");
}

#[test]
fn custom_score_overrides_sum() {
    let scoring = ScoringConfig {
        strategy: ScoreStrategy::Custom {
            mapping: None,
            score_fn: always_three,
        },
        ..Default::default()
    };
    let reg = registry(vec![Fixture::new("custom", 3, 5, scoring)]);
    let result = calculate_detailed_result(&reg, "custom", &[4, 4, 4]);
    assert_eq!(result.score, 3);
    assert_eq!(result.percentage, 25.0);
}

#[test]
fn score_label_falls_through_to_bands() {
    let scoring = ScoringConfig {
        strategy: ScoreStrategy::Custom {
            mapping: None,
            score_fn: ten_per_answer,
        },
        interpretation: Interpretation::FromScore(tiny_from_score),
        severity_bands: bands(&[(0, 100, "Banded")]),
        ..Default::default()
    };
    let reg = registry(vec![Fixture::new("layered", 3, 5, scoring)]);

    // 0 answers -> 0 -> labelled by the score function.
    assert_eq!(calculate_detailed_result(&reg, "layered", &[]).severity, "tiny");
    // 2 answers -> 20 -> score function declines, band applies.
    assert_eq!(
        calculate_detailed_result(&reg, "layered", &[0, 0]).severity,
        "Banded"
    );
}

#[test]
fn answer_label_beats_everything() {
    let scoring = ScoringConfig {
        interpretation: Interpretation::FromAnswers(from_answers),
        severity_bands: bands(&[(0, 100, "Banded")]),
        ..Default::default()
    };
    let reg = registry(vec![Fixture::new("answers", 3, 5, scoring)]);
    let result = calculate_detailed_result(&reg, "answers", &[1, 1, 1]);
    assert_eq!(result.severity, "3 answers");
    assert_eq!(result.score, 3);
}

#[test]
fn scoring_is_deterministic() {
    let reg = Registry::standard();
    let answers = [2, 1, 0, 3, 2, 1, 0, 3, 2];
    let first = calculate_detailed_result(&reg, "depression", &answers);
    for _ in 0..10 {
        assert_eq!(calculate_detailed_result(&reg, "depression", &answers), first);
    }
}

#[test]
fn tool_result_wire_format() {
    let result = calculate_detailed_result(&Registry::standard(), "anxiety", &[1; 7]);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["name"], "Anxiety");
    assert_eq!(value["score"], 7);
    assert_eq!(value["severity"], "Mild");
    assert!(value.get("subscales").is_none());
}
