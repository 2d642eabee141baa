use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{bands, questions};
use crate::scoring::{Question, ScoringConfig};

/// ISI: Insomnia Severity Index.
/// 7 items rated 0–4. Total 0–28.
pub struct Isi;

const SEVERITY: [&str; 5] = ["None", "Mild", "Moderate", "Severe", "Very severe"];

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Difficulty falling asleep",
            "Difficulty staying asleep",
            "Problems waking up too early",
            "How dissatisfied are you with your current sleep pattern?",
            "How noticeable to others is your sleep problem?",
            "How worried are you about your current sleep problem?",
            "How much is your sleep problem interfering with daily functioning?",
        ],
        &SEVERITY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    severity_bands: bands(&[
        (0, 7, "No Insomnia"),
        (8, 14, "Subthreshold Insomnia"),
        (15, 21, "Moderate Insomnia"),
        (22, 28, "Severe Insomnia"),
    ]),
    ..Default::default()
});

impl Questionnaire for Isi {
    fn id(&self) -> &str {
        "insomnia"
    }

    fn title(&self) -> &str {
        "Insomnia"
    }

    fn short_name(&self) -> &str {
        "ISI"
    }

    fn description(&self) -> &str {
        "Insomnia Severity Index"
    }

    fn prefix(&self) -> &str {
        "Please rate the current (last 2 weeks) severity of your sleep problems."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
