use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::UNANSWERED;
use crate::shuffle::seeded_shuffle;
use crate::{Questionnaire, Registry};

/// One question in the shuffled, multi-questionnaire list shown to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FlatQuestion {
    /// Position in the shuffled list; flat answers are indexed by this.
    pub position: usize,
    /// Index of the question within its questionnaire.
    pub original_index: usize,
    pub questionnaire_id: String,
    pub prefix: String,
    pub question: String,
    pub options: Vec<String>,
}

/// Flatten the selected questionnaires in order and shuffle with `seed`.
///
/// Unknown ids are skipped and repeated ids count once, so the result is
/// always a bijection between `(questionnaire, index)` pairs and positions.
/// The same `(ids, seed)` always produces the same list.
pub fn assemble_questions<S: AsRef<str>>(
    registry: &Registry,
    ids: &[S],
    seed: &str,
) -> Vec<FlatQuestion> {
    let mut flat = Vec::new();
    for questionnaire in selected(registry, ids) {
        for (original_index, question) in questionnaire.questions().iter().enumerate() {
            flat.push(FlatQuestion {
                position: 0,
                original_index,
                questionnaire_id: questionnaire.id().to_string(),
                prefix: questionnaire.prefix().to_string(),
                question: question.text.clone(),
                options: question.options.clone(),
            });
        }
    }

    let mut shuffled = seeded_shuffle(flat, seed);
    for (position, question) in shuffled.iter_mut().enumerate() {
        question.position = position;
    }
    shuffled
}

/// Route flat answers back to per-questionnaire raw answer arrays.
///
/// Rebuilds the order with [`assemble_questions`]; positions without an
/// answer stay [`UNANSWERED`]. Answers beyond the assembled list are
/// ignored.
pub fn regroup_answers<S: AsRef<str>>(
    registry: &Registry,
    ids: &[S],
    seed: &str,
    flat_answers: &[i32],
) -> BTreeMap<String, Vec<i32>> {
    let mut grouped: BTreeMap<String, Vec<i32>> = selected(registry, ids)
        .into_iter()
        .map(|q| (q.id().to_string(), vec![UNANSWERED; q.questions().len()]))
        .collect();

    for question in assemble_questions(registry, ids, seed) {
        let answer = flat_answers
            .get(question.position)
            .copied()
            .unwrap_or(UNANSWERED);
        if let Some(slot) = grouped
            .get_mut(&question.questionnaire_id)
            .and_then(|answers| answers.get_mut(question.original_index))
        {
            *slot = answer;
        }
    }
    grouped
}

fn selected<'a, S: AsRef<str>>(registry: &'a Registry, ids: &[S]) -> Vec<&'a dyn Questionnaire> {
    let mut selected: Vec<&dyn Questionnaire> = Vec::new();
    for id in ids {
        let id = id.as_ref();
        match registry.get(id) {
            Some(q) if selected.iter().any(|s| s.id() == q.id()) => {}
            Some(q) => selected.push(q),
            None => tracing::warn!(questionnaire = id, "skipping unknown questionnaire"),
        }
    }
    selected
}
