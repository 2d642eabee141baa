use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{INTENSITY, bands, questions};
use crate::scoring::{Question, ScoringConfig};

/// PCL-5: PTSD Checklist for DSM-5.
/// 20 items rated 0–4. Total 0–80; 33 and above suggests probable PTSD.
pub struct Pcl5;

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Repeated, disturbing memories, thoughts, or images of stressful experience?",
            "Repeated, disturbing dreams of stressful experience?",
            "Suddenly feeling or acting as if stressful experience were happening again?",
            "Feeling very upset when reminded of stressful experience?",
            "Physical reactions when reminded of stressful experience?",
            "Avoid thinking or talking about stressful experience?",
            "Avoid activities or situations that remind you of experience?",
            "Trouble remembering important parts of stressful experience?",
            "Loss of interest in activities you used to enjoy?",
            "Feeling distant or cut off from other people?",
            "Feeling emotionally numb or unable to have loving feelings?",
            "Feeling as if your future will be cut short?",
            "Trouble falling or staying asleep?",
            "Feeling irritable or having angry outbursts?",
            "Having difficulty concentrating?",
            "Being \"super alert\" or watchful or on guard?",
            "Feeling jumpy or easily startled?",
            "Being reckless or self-destructive?",
            "Feeling guilty or blaming yourself?",
            "Feeling ashamed or having negative beliefs about yourself?",
        ],
        &INTENSITY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    severity_bands: bands(&[(0, 32, "Below Threshold"), (33, 80, "Probable PTSD")]),
    ..Default::default()
});

impl Questionnaire for Pcl5 {
    fn id(&self) -> &str {
        "ptsd"
    }

    fn title(&self) -> &str {
        "Post-traumatic stress disorder (PTSD)"
    }

    fn short_name(&self) -> &str {
        "PCL-5"
    }

    fn description(&self) -> &str {
        "PTSD Checklist for DSM-5"
    }

    fn prefix(&self) -> &str {
        "In the past month, how much were you bothered by..."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
