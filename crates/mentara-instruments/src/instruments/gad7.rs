use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{PAST_TWO_WEEKS, bands, questions};
use crate::scoring::{Question, ScoreMapping, ScoreStrategy, ScoringConfig};

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items rated 0–3. Total 0–21.
pub struct Gad7;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Feeling nervous, anxious, or on edge",
            "Not being able to stop or control worrying",
            "Worrying too much about different things",
            "Trouble relaxing",
            "Being so restless that it's hard to sit still",
            "Becoming easily annoyed or irritable",
            "Feeling afraid as if something awful might happen",
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
        (15, 21, "Severe"),
    ]),
    ..Default::default()
});

impl Questionnaire for Gad7 {
    fn id(&self) -> &str {
        "anxiety"
    }

    fn title(&self) -> &str {
        "Anxiety"
    }

    fn short_name(&self) -> &str {
        "GAD-7"
    }

    fn description(&self) -> &str {
        "Generalized Anxiety Disorder 7-item scale"
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
