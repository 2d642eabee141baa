use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{bands, questions};
use crate::scoring::{Question, ScoringConfig};

/// OCI-R: Obsessive-Compulsive Inventory, Revised.
/// 18 items rated 0–4. Total 0–72; 21 and above is the clinical cutoff.
pub struct OciR;

const DISTRESS: [&str; 5] = ["Not at all", "A little", "Moderately", "A lot", "Extremely"];

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Unpleasant thoughts come into your mind against your will",
            "Check things more often than necessary",
            "Get upset if objects are not arranged properly",
            "Feel compelled to count while doing things",
            "Difficulty making decisions",
            "Feel you have to wash or clean excessively",
            "Check that you did not harm anyone",
            "Worried that things are not in the right place",
            "Feel need to repeat certain numbers",
            "Difficulty finishing things because can't get them right",
            "Bothered by contamination worries",
            "Check that you did not make a mistake",
            "Concerned about orderliness or symmetry",
            "Feel need to do things over and over",
            "Need to collect certain things",
            "Wash yourself or household items excessively",
            "Repeatedly check doors, windows, drawers, etc.",
            "Get upset if others change the way you arrange things",
        ],
        &DISTRESS,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    severity_bands: bands(&[(0, 20, "Below Threshold"), (21, 72, "Clinical Range")]),
    ..Default::default()
});

impl Questionnaire for OciR {
    fn id(&self) -> &str {
        "ocd"
    }

    fn title(&self) -> &str {
        "Obsessive compulsive disorder (OCD)"
    }

    fn short_name(&self) -> &str {
        "OCI-R"
    }

    fn description(&self) -> &str {
        "Obsessive-Compulsive Inventory-Revised"
    }

    fn prefix(&self) -> &str {
        "How much has this experience distressed or bothered you during the past month?"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
