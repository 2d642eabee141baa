use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{FREQUENCY, bands, questions};
use crate::scoring::{Question, ScoringConfig};

/// BES: Binge Eating Scale.
/// 16 items rated 0–4. Total 0–64.
pub struct Bes;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Eat large amounts of food when not physically hungry",
            "Eat much more rapidly than normal during binges",
            "Eat until feeling uncomfortably full",
            "Eat alone because embarrassed by how much eating",
            "Feel disgusted, depressed, or guilty after overeating",
            "Feel distressed about binge eating",
            "Preoccupied with thoughts of food",
            "Try to diet or restrict food to control weight",
            "Feel out of control when eating",
            "Eat to escape worries or troubles",
            "Think about body shape and weight throughout the day",
            "Feel that eating is the only pleasure in life",
            "Hide food or eating from others",
            "Feel afraid of not being able to stop eating",
            "Feel that life is dominated by conflict about eating",
            "Use vomiting, laxatives, or excessive exercise to control weight",
        ],
        &FREQUENCY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    severity_bands: bands(&[
        (0, 17, "Minimal/No Binge Eating"),
        (18, 26, "Mild to moderate binge eating"),
        (27, 64, "Severe binge eating"),
    ]),
    ..Default::default()
});

impl Questionnaire for Bes {
    fn id(&self) -> &str {
        "binge_eating"
    }

    fn title(&self) -> &str {
        "Binge eating / Eating disorders"
    }

    fn short_name(&self) -> &str {
        "BES"
    }

    fn description(&self) -> &str {
        "Binge Eating Scale for eating disorder symptoms"
    }

    fn prefix(&self) -> &str {
        "How often do the following describe you?"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
