use std::sync::LazyLock;

use crate::Questionnaire;
use crate::instruments::{YES_NO, bands, questions};
use crate::scoring::{Question, ScoreStrategy, ScoringConfig};

/// MDQ: Mood Disorder Questionnaire.
///
/// 13 yes/no symptom items, one yes/no clustering item and one impairment
/// item. The screen is positive (score 1) only when all three criteria
/// hold: at least 7 symptoms, symptoms co-occurring, and moderate or
/// serious impairment.
pub struct Mdq;

const SYMPTOM_ITEMS: usize = 13;
const CLUSTERING_ITEM: usize = 13;
const IMPAIRMENT_ITEM: usize = 14;

const IMPAIRMENT: [&str; 4] = [
    "No problem",
    "Minor problem",
    "Moderate problem",
    "Serious problem",
];

fn screen(answers: &[i32]) -> i32 {
    let symptoms = answers
        .iter()
        .take(SYMPTOM_ITEMS)
        .filter(|&&a| a == 1)
        .count();
    let clustered = answers.get(CLUSTERING_ITEM) == Some(&1);
    let impaired = answers.get(IMPAIRMENT_ITEM).is_some_and(|&a| a >= 2);
    i32::from(symptoms >= 7 && clustered && impaired)
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let mut list = questions(
        &[
            "Feel so good or hyper that others thought you were not your normal self?",
            "So irritable that you shouted at people or started fights?",
            "Feel much more self-confident than usual?",
            "Get much less sleep than usual and not miss it?",
            "Much more talkative or spoke faster than usual?",
            "Thoughts raced through your head?",
            "So easily distracted that any interruption could derail you?",
            "Much more energy than usual?",
            "Much more active or did many more things than usual?",
            "Much more social or outgoing than usual?",
            "Much more interested in sex than usual?",
            "Did things that were unusual or that others might think risky?",
            "Spending money got you or your family in trouble?",
            "Have several of these symptoms happened at the same time?",
        ],
        &YES_NO,
    );
    list.extend(questions(
        &["How much of a problem did any of these cause you?"],
        &IMPAIRMENT,
    ));
    list
});

static SCORING: LazyLock<ScoringConfig> = LazyLock::new(|| ScoringConfig {
    strategy: ScoreStrategy::Custom {
        mapping: None,
        score_fn: screen,
    },
    severity_bands: bands(&[
        (0, 0, "Negative Screen"),
        (1, 1, "Positive Bipolar Screen (All 3 Criteria Met)"),
    ]),
    ..Default::default()
});

impl Questionnaire for Mdq {
    fn id(&self) -> &str {
        "bipolar"
    }

    fn title(&self) -> &str {
        "Bipolar disorder (BD)"
    }

    fn short_name(&self) -> &str {
        "MDQ"
    }

    fn description(&self) -> &str {
        "Mood Disorder Questionnaire for bipolar symptoms"
    }

    fn prefix(&self) -> &str {
        "Has there ever been a period of time when you were not your usual self and you..."
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn scoring(&self) -> &ScoringConfig {
        &SCORING
    }
}
