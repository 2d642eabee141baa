use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{FREQUENCY, bands, questions};
use crate::scorer::severity_band;
use crate::scoring::{Interpretation, Question, ScoringConfig, SeverityBand, sum_answered};

/// ASRS v1.1: Adult ADHD Self-Report Scale.
///
/// 18 items rated 0–4. Part A (items 1–6) is the screener: an answer in
/// the shaded range counts toward the screen, and four or more shaded
/// answers make it positive. A negative screen falls back to the total
/// score bands.
pub struct Asrs;

pub const SCREEN_POSITIVE: &str = "Highly Consistent with Adult ADHD (Screen Positive)";
pub const SCREEN_NEGATIVE: &str = "Below Clinical Screening Threshold";

/// Lowest shaded answer for each Part A item.
const PART_A_SHADED_FROM: [i32; 6] = [2, 2, 2, 3, 3, 3];

static BANDS: LazyLock<Vec<SeverityBand>> = LazyLock::new(|| {
    bands(&[
        (0, 30, "Low"),
        (31, 39, "Mild to Moderate"),
        (40, 49, "High"),
        (50, 72, "Very High"),
    ])
});

fn screen(answers: &[i32]) -> String {
    let shaded = PART_A_SHADED_FROM
        .iter()
        .zip(answers)
        .filter(|&(&from, &answer)| (from..=4).contains(&answer))
        .count();
    if shaded >= 4 {
        return SCREEN_POSITIVE.to_string();
    }

    let total = sum_answered(answers, 0..answers.len());
    severity_band(&BANDS, total)
        .map(|band| band.label.clone())
        .unwrap_or_else(|| SCREEN_NEGATIVE.to_string())
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Trouble wrapping up final details of a project",
            "Difficulty getting things in order",
            "Problems remembering appointments or obligations",
            "Avoid or delay getting started on tasks requiring concentration",
            "Fidget or squirm when sitting for long time",
            "Feel overly active or compelled to do things",
            "Make careless mistakes when working on tasks",
            "Difficulty keeping attention during tasks or activities",
            "Difficulty concentrating on conversations",
            "Misplace or have difficulty finding things",
            "Distracted by activity or noise around you",
            "Leave your seat in meetings or situations",
            "Feel restless or fidgety",
            "Difficulty unwinding and relaxing",
            "Talk too much in social situations",
            "Finish other people's sentences",
            "Difficulty waiting your turn",
            "Interrupt others when they are busy",
        ],
        &FREQUENCY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    interpretation: Interpretation::FromAnswers(screen),
    severity_bands: BANDS.clone(),
    ..Default::default()
});

impl Questionnaire for Asrs {
    fn id(&self) -> &str {
        "adhd"
    }

    fn title(&self) -> &str {
        "ADD / ADHD"
    }

    fn short_name(&self) -> &str {
        "ASRS"
    }

    fn description(&self) -> &str {
        "Adult ADHD Self-Report Scale for attention deficit and hyperactivity symptoms"
    }

    fn prefix(&self) -> &str {
        "Over the past 6 months, how often have you..."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
