use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{FREQUENCY, bands, questions};
use crate::scoring::{Question, ScoringConfig};

/// AUDIT: Alcohol Use Disorders Identification Test.
/// 10 items rated 0–4. Total 0–40.
pub struct Audit;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "How often do you have a drink containing alcohol?",
            "How many standard drinks do you have on a typical day?",
            "How often do you have six or more drinks on one occasion?",
            "Unable to stop drinking once you started?",
            "Failed to do what was normally expected due to drinking?",
            "Needed a drink in the morning to get yourself going?",
            "Had a feeling of guilt or remorse after drinking?",
            "Unable to remember what happened the night before?",
            "Have you or someone else been injured as a result of drinking?",
            "Has someone suggested you cut down on drinking?",
        ],
        &FREQUENCY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    severity_bands: bands(&[
        (0, 7, "Low Risk"),
        (8, 15, "Hazardous"),
        (16, 19, "Harmful"),
        (20, 40, "Dependent"),
    ]),
    ..Default::default()
});

impl Questionnaire for Audit {
    fn id(&self) -> &str {
        "alcohol"
    }

    fn title(&self) -> &str {
        "Substance or Alcohol Use Issues"
    }

    fn short_name(&self) -> &str {
        "AUDIT"
    }

    fn description(&self) -> &str {
        "Alcohol Use Disorders Identification Test"
    }

    fn prefix(&self) -> &str {
        "In the past year..."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
