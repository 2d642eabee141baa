#![allow(dead_code)]

use std::sync::Arc;

use mentara_instruments::scoring::{Question, ScoringConfig};
use mentara_instruments::{Questionnaire, Registry};

/// A questionnaire assembled at runtime for exercising the engine.
pub struct Fixture {
    pub id: String,
    pub questions: Vec<Question>,
    pub scoring: ScoringConfig,
}

impl Fixture {
    pub fn new(id: &str, question_count: usize, option_count: usize, scoring: ScoringConfig) -> Self {
        let questions = (0..question_count)
            .map(|i| Question {
                text: format!("{id} question {i}"),
                options: (0..option_count).map(|o| format!("option {o}")).collect(),
            })
            .collect();
        Self {
            id: id.to_string(),
            questions,
            scoring,
        }
    }
}

impl Questionnaire for Fixture {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.id
    }

    fn short_name(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        ""
    }

    fn prefix(&self) -> &str {
        "prefix"
    }

    fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }
}

pub fn registry(fixtures: Vec<Fixture>) -> Registry {
    Registry::new(
        fixtures
            .into_iter()
            .map(|f| Arc::new(f) as Arc<dyn Questionnaire>)
            .collect(),
    )
}
