use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{FREQUENCY, bands, questions, reverse_scored_sum};
use crate::scoring::{Question, ScoreMapping, ScoreStrategy, ScoringConfig};

/// PSS-10: Perceived Stress Scale.
/// 10 items rated 0–4; items 4, 5, 7 and 8 are positively worded and
/// reverse-scored. Total 0–40.
pub struct Pss;

const REVERSED: [usize; 4] = [3, 4, 6, 7];

fn score(answers: &[i32]) -> i32 {
    reverse_scored_sum(answers, &REVERSED, 4)
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Been upset because of something that happened unexpectedly?",
            "Felt unable to control important things in your life?",
            "Felt nervous and stressed?",
            "Felt confident about ability to handle personal problems?",
            "Felt things were going your way?",
            "Found that you could not cope with all things to do?",
            "Been able to control irritations in your life?",
            "Felt that you were on top of things?",
            "Been angered because of things outside your control?",
            "Felt difficulties were piling up so high you could not overcome them?",
        ],
        &FREQUENCY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    strategy: ScoreStrategy::Custom {
        mapping: Some(ScoreMapping::identity(4)),
        score_fn: score,
    },
    severity_bands: bands(&[
        (0, 13, "Low Stress"),
        (14, 26, "Moderate Stress"),
        (27, 40, "High Stress"),
    ]),
    ..Default::default()
});

impl Questionnaire for Pss {
    fn id(&self) -> &str {
        "stress"
    }

    fn title(&self) -> &str {
        "Stress"
    }

    fn short_name(&self) -> &str {
        "PSS"
    }

    fn description(&self) -> &str {
        "Perceived Stress Scale"
    }

    fn prefix(&self) -> &str {
        "In the last month, how often have you..."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
