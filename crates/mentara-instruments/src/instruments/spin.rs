use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{INTENSITY, bands, questions};
use crate::scoring::{Question, ScoringConfig};

/// SPIN: Social Phobia Inventory.
/// 17 items rated 0–4. Total 0–68.
pub struct Spin;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Afraid of people in authority",
            "Bothered by blushing in front of people",
            "Parties and social events scare you",
            "Avoid talking to people you don't know",
            "Being criticized scares you a lot",
            "Avoid doing things or speaking to people for fear of embarrassment",
            "Sweating in front of people causes distress",
            "Avoid going to parties",
            "Avoid activities in which you are the center of attention",
            "Talking to strangers scares you",
            "Avoid having to give speeches",
            "Would do anything to avoid being criticized",
            "Heart palpitations bother you when around people",
            "Afraid of doing things when people might be watching",
            "Being embarrassed or looking stupid is your worst fear",
            "Avoid speaking to anyone in authority",
            "Trembling or shaking in front of others is distressing",
        ],
        &INTENSITY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    severity_bands: bands(&[
        (0, 33, "Below Threshold"),
        (34, 42, "Social anxiety specific (Potential Social Phobia)"),
        (43, 80, "Generalized Social Interaction Anxiety"),
    ]),
    ..Default::default()
});

impl Questionnaire for Spin {
    fn id(&self) -> &str {
        "social_anxiety"
    }

    fn title(&self) -> &str {
        "Social anxiety"
    }

    fn short_name(&self) -> &str {
        "SPIN"
    }

    fn description(&self) -> &str {
        "Social Phobia Inventory"
    }

    fn prefix(&self) -> &str {
        "Over the past week, how much have you been bothered by the following?"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
