use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{FREQUENCY, bands, questions};
use crate::scoring::{Question, ScoringConfig};

/// PDSS: Panic Disorder Severity Scale.
/// 7 items rated 0–4. Total 0–28.
pub struct Pdss;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Experienced panic attacks or sudden rushes of intense fear or discomfort?",
            "How distressing were the panic attacks?",
            "How afraid were you of having another panic attack?",
            "Avoided situations or changed your lifestyle because of panic?",
            "Avoided physical sensations like rapid heartbeat because of panic?",
            "How much did panic attacks interfere with work or responsibilities?",
            "How much did panic attacks interfere with social life?",
        ],
        &FREQUENCY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    severity_bands: bands(&[
        (0, 7, "Minimal"),
        (8, 10, "Mild"),
        (11, 15, "Moderate"),
        (16, 28, "Severe"),
    ]),
    ..Default::default()
});

impl Questionnaire for Pdss {
    fn id(&self) -> &str {
        "panic"
    }

    fn title(&self) -> &str {
        "Panic"
    }

    fn short_name(&self) -> &str {
        "PDSS"
    }

    fn description(&self) -> &str {
        "Panic Disorder Severity Scale"
    }

    fn prefix(&self) -> &str {
        "During the past week..."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
