use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{PAST_TWO_WEEKS, bands, questions};
use crate::scoring::{Question, ScoreMapping, ScoreStrategy, ScoringConfig};

/// PHQ-9: Patient Health Questionnaire.
/// 9 items rated 0–3. Total 0–27.
pub struct Phq9;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Little interest or pleasure in doing things",
            "Feeling down, depressed, or hopeless",
            "Trouble falling or staying asleep, or sleeping too much",
            "Feeling tired or having little energy",
            "Poor appetite or overeating",
            "Feeling bad about yourself or that you are a failure",
            "Trouble concentrating on things like reading or watching TV",
            "Moving or speaking slowly, or being fidgety or restless",
            "Thoughts that you would be better off dead or hurting yourself",
        ],
        &PAST_TWO_WEEKS,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    strategy: ScoreStrategy::MappedSum(ScoreMapping::identity(3)),
    severity_bands: bands(&[
        (0, 4, "Minimal"),
        (5, 9, "Mild"),
        (10, 14, "Moderate"),
        (15, 19, "Moderately Severe"),
        (20, 27, "Severe"),
    ]),
    ..Default::default()
});

impl Questionnaire for Phq9 {
    fn id(&self) -> &str {
        "depression"
    }

    fn title(&self) -> &str {
        "Depression"
    }

    fn short_name(&self) -> &str {
        "PHQ-9"
    }

    fn description(&self) -> &str {
        "Patient Health Questionnaire assessing depressive symptoms"
    }

    fn prefix(&self) -> &str {
        "Over the last 2 weeks, how often have you been bothered by the following?"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
