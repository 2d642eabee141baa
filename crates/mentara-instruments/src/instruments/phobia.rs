use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{bands, questions};
use crate::scoring::{Interpretation, Question, ScoreMapping, ScoreStrategy, ScoringConfig};

/// Specific phobia screen.
///
/// 15 items rated 0–3. Total 0–45. Only a total score is reported; the
/// label comes from the score, with the severity bands as a fallback for
/// totals outside the scored range.
pub struct PhobiaScale;

const FEAR: [&str; 4] = ["Not at all", "Mildly", "Moderately", "Severely"];

fn label(score: i32) -> Option<String> {
    let label = match score {
        0..=12 => "Minimal Phobia",
        13..=24 => "Mild Phobia",
        25..=36 => "Moderate Phobia",
        37..=45 => "Severe Phobia",
        _ => return None,
    };
    Some(label.to_string())
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Heights, such as balconies, bridges or tall buildings",
            "Flying in an aeroplane",
            "Enclosed spaces such as lifts or small rooms",
            "Dogs, cats or other animals",
            "Insects or spiders",
            "Snakes",
            "Storms, thunder or lightning",
            "Deep water or swimming",
            "Blood or watching medical procedures",
            "Injections or needles",
            "Visiting the dentist",
            "Driving or being a passenger in a car",
            "Crowded places such as shops or public transport",
            "Being far from home alone",
            "Choking, vomiting or becoming ill",
        ],
        &FEAR,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    strategy: ScoreStrategy::MappedSum(ScoreMapping::identity(3)),
    interpretation: Interpretation::FromScore(label),
    severity_bands: bands(&[
        (0, 12, "Minimal"),
        (13, 24, "Mild"),
        (25, 36, "Moderate"),
        (37, 45, "Severe"),
    ]),
    ..Default::default()
});

impl Questionnaire for PhobiaScale {
    fn id(&self) -> &str {
        "phobia"
    }

    fn title(&self) -> &str {
        "Phobia"
    }

    fn short_name(&self) -> &str {
        "PHOBIA"
    }

    fn description(&self) -> &str {
        "Specific phobia screen covering common feared objects and situations"
    }

    fn prefix(&self) -> &str {
        "How much do you fear or avoid the following?"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
