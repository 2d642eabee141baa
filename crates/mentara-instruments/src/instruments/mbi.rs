use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{bands, questions};
use crate::scoring::{Interpretation, Question, ScoringConfig, SubscaleDefinition, sum_answered};

/// MBI: Maslach Burnout Inventory.
///
/// 22 items rated 0–6, scored as three dimensions:
/// emotional exhaustion (items 1–7), depersonalization (items 8–14) and
/// personal accomplishment (items 15–22). The total is the sum of all
/// three; the label reports each dimension's level.
pub struct Mbi;

const FREQUENCY: [&str; 7] = [
    "Never",
    "A few times a year or less",
    "Once a month or less",
    "A few times a month",
    "Once a week",
    "A few times a week",
    "Every day",
];

const EXHAUSTION: std::ops::Range<usize> = 0..7;
const DEPERSONALIZATION: std::ops::Range<usize> = 7..14;
const ACCOMPLISHMENT: std::ops::Range<usize> = 14..22;

fn profile(answers: &[i32]) -> String {
    let ee = sum_answered(answers, EXHAUSTION);
    let dp = sum_answered(answers, DEPERSONALIZATION);
    let pa = sum_answered(answers, ACCOMPLISHMENT);

    let ee_level = match ee {
        ..=16 => "Low",
        17..=26 => "Moderate",
        _ => "High",
    };
    let dp_level = match dp {
        ..=6 => "Low",
        7..=12 => "Moderate",
        _ => "High",
    };
    let pa_level = match pa {
        39.. => "High Accomplishment",
        32..=38 => "Moderate",
        _ => "Low Accomplishment",
    };

    format!("EE: {ee_level}, DP: {dp_level}, PA: {pa_level}")
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    questions(
        &[
            "Feel emotionally drained from your work",
            "Feel used up at the end of the workday",
            "Feel fatigued when you get up in the morning",
            "Working with people all day is strain for you",
            "Feel burned out from your work",
            "Feel frustrated by your job",
            "Feel you're working too hard on your job",
            "Working directly with people puts too much stress on you",
            "Feel like you're at the end of your rope",
            "Treat some people as if they were impersonal objects",
            "Become more callous toward people",
            "Worry that this job is hardening you emotionally",
            "Don't really care what happens to some people",
            "Feel others blame you for some of their problems",
            "Deal effectively with problems of others",
            "Feel you're positively influencing others' lives",
            "Can easily understand how others feel",
            "Deal effectively with others' problems",
            "Feel energized by working closely with others",
            "Accomplished many worthwhile things in this job",
            "Feel exhilarated after working closely with others",
            "Created a relaxed atmosphere with others",
        ],
        &FREQUENCY,
    )
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    interpretation: Interpretation::FromAnswers(profile),
    severity_bands: bands(&[(0, 132, "MBI Scale")]),
    subscales: vec![
        SubscaleDefinition::new("EE", "Emotional Exhaustion", EXHAUSTION),
        SubscaleDefinition::new("DP", "Depersonalization", DEPERSONALIZATION),
        SubscaleDefinition::new("PA", "Personal Accomplishment", ACCOMPLISHMENT),
    ],
    ..Default::default()
});

impl Questionnaire for Mbi {
    fn id(&self) -> &str {
        "burnout"
    }

    fn title(&self) -> &str {
        "Burnout"
    }

    fn short_name(&self) -> &str {
        "MBI"
    }

    fn description(&self) -> &str {
        "Maslach Burnout Inventory"
    }

    fn prefix(&self) -> &str {
        "How often do you feel this way about your work?"
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
