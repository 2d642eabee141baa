//! mentara-instruments
//!
//! Clinical screening questionnaires and the pre-assessment engine built
//! on them. Pure logic with no I/O: question definitions, the seeded
//! shuffle, flattened question assembly, scoring and severity
//! interpretation, and questionnaire selection from conversation text.

pub mod assembly;
pub mod error;
pub mod instruments;
pub mod scorer;
pub mod scoring;
pub mod selection;
pub mod shuffle;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use error::InstrumentError;
use scoring::{Question, ScoringConfig, ScoringGranularity, SeverityBand, ValidationError};

/// Trait implemented by each screening questionnaire.
pub trait Questionnaire: Send + Sync {
    /// Unique identifier (e.g., "depression", "social_anxiety").
    fn id(&self) -> &str;

    /// Human-readable title (e.g., "Depression").
    fn title(&self) -> &str;

    /// Name of the published instrument (e.g., "PHQ-9").
    fn short_name(&self) -> &str;

    fn description(&self) -> &str;

    /// Lead-in shown before each question (e.g., "Over the last 2 weeks...").
    fn prefix(&self) -> &str;

    fn questions(&self) -> &[Question];

    fn scoring(&self) -> &ScoringConfig;

    /// Validate raw answers: each must be `-1` or a valid option index, and
    /// there may not be more answers than questions.
    fn validate_answers(&self, answers: &[i32]) -> Vec<ValidationError> {
        let questions = self.questions();
        let mut errors = Vec::new();
        for (index, &value) in answers.iter().enumerate() {
            let message = match questions.get(index) {
                None => format!(
                    "{}: answer {} has no matching question ({} questions)",
                    self.title(),
                    index + 1,
                    questions.len(),
                ),
                Some(question) if value != scoring::UNANSWERED
                    && !(0..=question.max_option()).contains(&value) =>
                {
                    format!(
                        "{}: question {} answer {} is outside [0, {}]",
                        self.title(),
                        index + 1,
                        value,
                        question.max_option(),
                    )
                }
                Some(_) => continue,
            };
            errors.push(ValidationError {
                questionnaire_id: self.id().to_string(),
                question_index: index,
                value,
                message,
            });
        }
        errors
    }

    /// [`validate_answers`](Self::validate_answers), failing on the first
    /// problem.
    fn check_answers(&self, answers: &[i32]) -> Result<(), InstrumentError> {
        match self.validate_answers(answers).into_iter().next() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }

    fn granularity(&self) -> ScoringGranularity {
        self.scoring().granularity()
    }

    /// Catalogue entry for clients rendering the questionnaire.
    fn summary(&self) -> QuestionnaireSummary {
        QuestionnaireSummary {
            id: self.id().to_string(),
            title: self.title().to_string(),
            short_name: self.short_name().to_string(),
            description: self.description().to_string(),
            prefix: self.prefix().to_string(),
            granularity: self.granularity(),
            severity_bands: self.scoring().severity_bands.clone(),
            questions: self.questions().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionnaireSummary {
    pub id: String,
    pub title: String,
    pub short_name: String,
    pub description: String,
    pub prefix: String,
    pub granularity: ScoringGranularity,
    pub severity_bands: Vec<SeverityBand>,
    pub questions: Vec<Question>,
}

/// Return all built-in questionnaires, in catalogue order.
pub fn all_questionnaires() -> Vec<Arc<dyn Questionnaire>> {
    vec![
        Arc::new(instruments::pss::Pss),
        Arc::new(instruments::gad7::Gad7),
        Arc::new(instruments::phq9::Phq9),
        Arc::new(instruments::dast10::Dast10),
        Arc::new(instruments::isi::Isi),
        Arc::new(instruments::pdss::Pdss),
        Arc::new(instruments::mdq::Mdq),
        Arc::new(instruments::oci_r::OciR),
        Arc::new(instruments::pcl5::Pcl5),
        Arc::new(instruments::spin::Spin),
        Arc::new(instruments::phobia::PhobiaScale),
        Arc::new(instruments::mbi::Mbi),
        Arc::new(instruments::bes::Bes),
        Arc::new(instruments::asrs::Asrs),
        Arc::new(instruments::audit::Audit),
    ]
}

/// The set of questionnaires available to an assessment.
///
/// Built once at startup and shared; tests build their own from custom
/// questionnaire implementations.
#[derive(Clone)]
pub struct Registry {
    questionnaires: Vec<Arc<dyn Questionnaire>>,
}

impl Registry {
    pub fn new(questionnaires: Vec<Arc<dyn Questionnaire>>) -> Self {
        Self { questionnaires }
    }

    pub fn standard() -> Self {
        Self::new(all_questionnaires())
    }

    /// Look up a questionnaire by id, or case-insensitively by title or
    /// short name.
    pub fn get(&self, id: &str) -> Option<&dyn Questionnaire> {
        self.questionnaires
            .iter()
            .find(|q| {
                q.id() == id
                    || q.title().eq_ignore_ascii_case(id)
                    || q.short_name().eq_ignore_ascii_case(id)
            })
            .map(|q| q.as_ref())
    }

    pub fn require(&self, id: &str) -> Result<&dyn Questionnaire, InstrumentError> {
        self.get(id)
            .ok_or_else(|| InstrumentError::UnknownQuestionnaire(id.to_string()))
    }

    /// Resolve a selection strictly: every id must exist and none may
    /// repeat.
    pub fn resolve<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Vec<&dyn Questionnaire>, InstrumentError> {
        let mut resolved: Vec<&dyn Questionnaire> = Vec::with_capacity(ids.len());
        for id in ids {
            let questionnaire = self.require(id.as_ref())?;
            if resolved.iter().any(|q| q.id() == questionnaire.id()) {
                return Err(InstrumentError::DuplicateQuestionnaire(
                    questionnaire.id().to_string(),
                ));
            }
            resolved.push(questionnaire);
        }
        Ok(resolved)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Questionnaire> {
        self.questionnaires.iter().map(|q| q.as_ref())
    }

    pub fn len(&self) -> usize {
        self.questionnaires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questionnaires.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
