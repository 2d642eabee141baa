use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Raw answer value for a question the client has not answered.
pub const UNANSWERED: i32 = -1;

/// Highest option value assumed for a question that lists no options.
pub const DEFAULT_MAX_OPTION: i32 = 4;

/// A single question: its text and the ordered option labels. The raw
/// answer is the index of the chosen label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    /// Highest valid raw answer for this question.
    pub fn max_option(&self) -> i32 {
        match self.options.len() {
            0 => DEFAULT_MAX_OPTION,
            n => n as i32 - 1,
        }
    }
}

/// An inclusive score range and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityBand {
    pub min: i32,
    pub max: i32,
    pub label: String,
}

impl SeverityBand {
    pub fn new(min: i32, max: i32, label: &str) -> Self {
        Self {
            min,
            max,
            label: label.to_string(),
        }
    }

    pub fn contains(&self, score: i32) -> bool {
        self.min <= score && score <= self.max
    }
}

/// Raw answer index to point value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreMapping(BTreeMap<i32, i32>);

impl ScoreMapping {
    /// Maps every index in `0..=max` to itself.
    pub fn identity(max: i32) -> Self {
        Self((0..=max).map(|v| (v, v)).collect())
    }

    pub fn from_pairs(pairs: &[(i32, i32)]) -> Self {
        Self(pairs.iter().copied().collect())
    }

    /// Points for a raw answer. Answers outside the mapping are worth 0.
    pub fn value(&self, answer: i32) -> i32 {
        self.0.get(&answer).copied().unwrap_or(0)
    }

    /// Largest point value any answer can earn.
    pub fn max_value(&self) -> i32 {
        self.0.values().copied().max().unwrap_or(0)
    }
}

/// How a questionnaire's total score is computed.
#[derive(Debug, Clone, Default)]
pub enum ScoreStrategy {
    /// Sum of raw answer indices.
    #[default]
    RawSum,
    /// Sum of mapped point values.
    MappedSum(ScoreMapping),
    /// A dedicated function replaces the summed total. The mapping, when
    /// present, still defines the maximum possible score.
    Custom {
        mapping: Option<ScoreMapping>,
        score_fn: fn(&[i32]) -> i32,
    },
}

impl ScoreStrategy {
    pub fn mapping(&self) -> Option<&ScoreMapping> {
        match self {
            Self::RawSum => None,
            Self::MappedSum(mapping) => Some(mapping),
            Self::Custom { mapping, .. } => mapping.as_ref(),
        }
    }
}

/// How a severity label is derived before falling back to severity bands.
#[derive(Debug, Clone, Default)]
pub enum Interpretation {
    /// Severity bands, then percentage tiers.
    #[default]
    SeverityBands,
    /// The label is computed from the raw answers alone.
    FromAnswers(fn(&[i32]) -> String),
    /// The label is computed from the total score; `None` falls through to
    /// the severity bands.
    FromScore(fn(i32) -> Option<String>),
}

/// A named group of items scored separately, e.g. a burnout dimension.
#[derive(Debug, Clone)]
pub struct SubscaleDefinition {
    pub id: String,
    pub name: String,
    pub items: Range<usize>,
}

impl SubscaleDefinition {
    pub fn new(id: &str, name: &str, items: Range<usize>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            items,
        }
    }
}

/// Whether a questionnaire reports only a total or also subscale scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoringGranularity {
    TotalOnly,
    Subscales,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub strategy: ScoreStrategy,
    pub interpretation: Interpretation,
    /// Checked in order; the first band containing the score wins.
    pub severity_bands: Vec<SeverityBand>,
    pub subscales: Vec<SubscaleDefinition>,
}

impl ScoringConfig {
    pub fn granularity(&self) -> ScoringGranularity {
        if self.subscales.is_empty() {
            ScoringGranularity::TotalOnly
        } else {
            ScoringGranularity::Subscales
        }
    }
}

/// The scored outcome for one questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ToolResult {
    pub name: String,
    pub score: i32,
    pub severity: String,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub subscales: Option<BTreeMap<String, i32>>,
}

impl ToolResult {
    /// The degraded result for a questionnaire missing from the registry.
    pub fn unknown(id: &str) -> Self {
        Self {
            name: id.to_string(),
            score: 0,
            severity: "Unknown".to_string(),
            percentage: 0.0,
            subscales: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub questionnaire_id: String,
    pub question_index: usize,
    pub value: i32,
    pub message: String,
}

/// Sum of the answered values in `items`, ignoring indices past the end.
pub fn sum_answered(answers: &[i32], items: Range<usize>) -> i32 {
    answers
        .iter()
        .skip(items.start)
        .take(items.end.saturating_sub(items.start))
        .filter(|&&a| a != UNANSWERED)
        .fold(0i32, |total, &a| total.saturating_add(a))
}

/// Sum that clamps at the `i32` bounds instead of overflowing.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = i32>) -> i32 {
    values.into_iter().fold(0, i32::saturating_add)
}
