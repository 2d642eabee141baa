use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{YES_NO, bands, questions, reverse_scored_sum};
use crate::scoring::{Question, ScoreMapping, ScoreStrategy, ScoringConfig};

/// DAST-10: Drug Abuse Screening Test.
/// 10 yes/no items; "no" scores on items 4 and 5. Total 0–10.
pub struct Dast10;

const REVERSED: [usize; 2] = [3, 4];

fn score(answers: &[i32]) -> i32 {
    reverse_scored_sum(answers, &REVERSED, 1)
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Used drugs other than for medical reasons?",
            "Abused prescription drugs?",
            "Used more than one drug at a time?",
            "Can you get through the week without using drugs?",
            "Are you always able to stop using drugs when you want to?",
            "Had blackouts or flashbacks as a result of drug use?",
            "Ever felt bad or guilty about your drug use?",
            "Does your spouse/partner complain about your drug use?",
            "Neglected your family because of drug use?",
            "Engaged in illegal activities to obtain drugs?",
        ],
        &YES_NO,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    strategy: ScoreStrategy::Custom {
        mapping: Some(ScoreMapping::identity(1)),
        score_fn: score,
    },
    severity_bands: bands(&[
        (0, 0, "No Problems"),
        (1, 2, "Low Level"),
        (3, 5, "Moderate Level"),
        (6, 8, "Substantial Level"),
        (9, 10, "Severe Level"),
    ]),
    ..Default::default()
});

impl Questionnaire for Dast10 {
    fn id(&self) -> &str {
        "drug_abuse"
    }

    fn title(&self) -> &str {
        "Drug Abuse"
    }

    fn short_name(&self) -> &str {
        "DAST-10"
    }

    fn description(&self) -> &str {
        "Drug Abuse Screening Test"
    }

    fn prefix(&self) -> &str {
        "In the past 12 months, have you..."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
