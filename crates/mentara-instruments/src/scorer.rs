//! Per-questionnaire scoring and severity interpretation.
//!
//! The total starts as a sum over answered questions, mapped through the
//! questionnaire's score mapping when it has one. A custom score function
//! replaces that total outright. The label is resolved in order: a label
//! computed from the answers, a label computed from the score (unless it
//! declines), the first matching severity band, then percentage tiers.

use std::collections::BTreeMap;

use crate::scoring::{
    DEFAULT_MAX_OPTION, Interpretation, ScoreMapping, ScoreStrategy, ScoringConfig, SeverityBand,
    ToolResult, UNANSWERED, saturating_sum,
};
use crate::{Questionnaire, Registry};

/// Score one questionnaire by id. Unknown ids yield [`ToolResult::unknown`].
pub fn calculate_detailed_result(registry: &Registry, id: &str, answers: &[i32]) -> ToolResult {
    match registry.get(id) {
        Some(questionnaire) => score_questionnaire(questionnaire, answers),
        None => {
            tracing::warn!(questionnaire = id, "scoring unknown questionnaire as Unknown");
            ToolResult::unknown(id)
        }
    }
}

/// Score every questionnaire in `answers`, keyed as given. One tool's
/// degraded result never affects the others.
pub fn calculate_detailed_results(
    registry: &Registry,
    answers: &BTreeMap<String, Vec<i32>>,
) -> BTreeMap<String, ToolResult> {
    answers
        .iter()
        .map(|(id, raw)| (id.clone(), calculate_detailed_result(registry, id, raw)))
        .collect()
}

/// Severity label per questionnaire.
pub fn severity_levels(results: &BTreeMap<String, ToolResult>) -> BTreeMap<String, String> {
    results
        .iter()
        .map(|(id, result)| (id.clone(), result.severity.clone()))
        .collect()
}

pub fn score_questionnaire(questionnaire: &dyn Questionnaire, answers: &[i32]) -> ToolResult {
    let scoring = questionnaire.scoring();
    let questions = questionnaire.questions();
    let mapping = scoring.strategy.mapping();

    let mut total: i32 = 0;
    let mut max_possible: i32 = 0;
    for (index, &answer) in answers.iter().enumerate() {
        if answer == UNANSWERED {
            continue;
        }
        total = total.saturating_add(points(mapping, answer));
        max_possible = max_possible.saturating_add(match mapping {
            Some(mapping) => mapping.max_value(),
            None => questions
                .get(index)
                .map_or(DEFAULT_MAX_OPTION, |q| q.max_option()),
        });
    }

    if let ScoreStrategy::Custom { score_fn, .. } = &scoring.strategy {
        total = score_fn(answers);
    }

    let percentage = if max_possible == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(max_possible) * 100.0
    };

    let subscales = (!scoring.subscales.is_empty()).then(|| subscale_scores(scoring, answers));

    ToolResult {
        name: questionnaire.title().to_string(),
        score: total,
        severity: interpret(scoring, answers, total, percentage),
        percentage,
        subscales,
    }
}

/// First band containing `score`.
pub fn severity_band(bands: &[SeverityBand], score: i32) -> Option<&SeverityBand> {
    bands.iter().find(|band| band.contains(score))
}

/// Label used when nothing more specific applies.
pub fn percentage_tier(percentage: f64) -> &'static str {
    if percentage > 75.0 {
        "Significant Impact"
    } else if percentage > 35.0 {
        "Moderate Impact"
    } else {
        "Low Impact"
    }
}

fn points(mapping: Option<&ScoreMapping>, answer: i32) -> i32 {
    match mapping {
        Some(mapping) => mapping.value(answer),
        None => answer,
    }
}

fn interpret(scoring: &ScoringConfig, answers: &[i32], score: i32, percentage: f64) -> String {
    match &scoring.interpretation {
        Interpretation::FromAnswers(label_fn) => return label_fn(answers),
        Interpretation::FromScore(label_fn) => {
            if let Some(label) = label_fn(score) {
                return label;
            }
        }
        Interpretation::SeverityBands => {}
    }

    match severity_band(&scoring.severity_bands, score) {
        Some(band) => band.label.clone(),
        None => percentage_tier(percentage).to_string(),
    }
}

fn subscale_scores(scoring: &ScoringConfig, answers: &[i32]) -> BTreeMap<String, i32> {
    let mapping = scoring.strategy.mapping();
    scoring
        .subscales
        .iter()
        .map(|subscale| {
            let sum = saturating_sum(
                answers
                    .iter()
                    .enumerate()
                    .filter(|&(i, &a)| subscale.items.contains(&i) && a != UNANSWERED)
                    .map(|(_, &a)| points(mapping, a)),
            );
            (subscale.id.clone(), sum)
        })
        .collect()
}
