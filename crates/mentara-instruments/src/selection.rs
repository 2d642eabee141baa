//! Questionnaire selection from conversation text.
//!
//! Keyword matches over the client's own messages suggest questionnaires;
//! suggestions from another source (e.g. the AI service) can be merged in.
//! Urgency is graded from crisis language and the strength of the matches.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Suggestion {
    pub questionnaire_id: String,
    /// 1–10, higher is more relevant.
    pub priority: u8,
    pub reasoning: String,
    /// 0.0–1.0.
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Selection {
    /// Highest priority first.
    pub suggestions: Vec<Suggestion>,
    pub recommended_order: Vec<String>,
    pub urgency: Urgency,
}

impl Selection {
    /// First recommended questionnaire not yet completed.
    pub fn next_questionnaire<S: AsRef<str>>(&self, completed: &[S]) -> Option<&str> {
        self.recommended_order
            .iter()
            .map(String::as_str)
            .find(|id| !completed.iter().any(|c| c.as_ref() == *id))
    }
}

const KEYWORDS: &[(&str, &[&str])] = &[
    (
        "depression",
        &[
            "depressed",
            "sad",
            "hopeless",
            "worthless",
            "suicidal",
            "loss of interest",
            "fatigue",
            "sleep problems",
            "appetite",
            "concentration",
        ],
    ),
    (
        "anxiety",
        &[
            "anxious",
            "worried",
            "nervous",
            "panic",
            "fear",
            "restless",
            "trouble sleeping",
            "irritable",
        ],
    ),
    (
        "ptsd",
        &[
            "trauma",
            "flashback",
            "nightmare",
            "avoidance",
            "hypervigilance",
            "traumatic event",
            "ptsd",
        ],
    ),
    (
        "ocd",
        &["obsession", "compulsion", "repetitive", "ritual", "intrusive thoughts", "ocd"],
    ),
    (
        "bipolar",
        &["manic", "mania", "bipolar", "mood swings", "euphoric", "depressed then high"],
    ),
    (
        "panic",
        &[
            "panic attack",
            "heart racing",
            "chest pain",
            "shortness of breath",
            "dizziness",
            "fear of dying",
        ],
    ),
    (
        "insomnia",
        &[
            "trouble sleeping",
            "insomnia",
            "can't sleep",
            "wake up",
            "sleep problems",
            "restless sleep",
        ],
    ),
    (
        "stress",
        &["stressed", "overwhelmed", "pressure", "burnout", "exhausted", "work stress"],
    ),
    (
        "adhd",
        &[
            "adhd",
            "attention",
            "hyperactive",
            "focus",
            "distracted",
            "impulsive",
            "can't concentrate",
        ],
    ),
    (
        "alcohol",
        &["alcohol", "drug", "substance", "addiction", "drinking", "using", "abuse"],
    ),
    (
        "drug_abuse",
        &["drug use", "substance abuse", "addiction", "using drugs", "overdose"],
    ),
    (
        "binge_eating",
        &[
            "binge",
            "eating disorder",
            "overeating",
            "purge",
            "body image",
            "anorexia",
            "bulimia",
        ],
    ),
    (
        "social_anxiety",
        &[
            "social anxiety",
            "afraid of people",
            "social situations",
            "public speaking",
            "judgment",
        ],
    ),
    (
        "phobia",
        &["phobia", "fear of", "afraid of", "avoid", "specific fear"],
    ),
    (
        "burnout",
        &[
            "burnout",
            "exhausted",
            "work stress",
            "overwhelmed at work",
            "emotional exhaustion",
        ],
    ),
];

const CRITICAL_PHRASES: [&str; 7] = [
    "suicidal",
    "kill myself",
    "end my life",
    "want to die",
    "harm myself",
    "self harm",
    "overdose",
];

const HIGH_PHRASES: [&str; 7] = [
    "emergency",
    "urgent",
    "crisis",
    "can't cope",
    "breaking down",
    "severe",
    "extreme",
];

/// Suggest questionnaires from the client's messages, merged with
/// `external` suggestions. With no client text, returns
/// [`default_selection`].
pub fn select_questionnaires<S: AsRef<str>>(
    user_messages: &[S],
    external: Vec<Suggestion>,
) -> Selection {
    let text = user_messages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    if text.trim().is_empty() {
        return default_selection();
    }

    let mut suggestions = combine_suggestions(external, keyword_suggestions(&text));
    let urgency = urgency(&text, &suggestions);
    // Stable, so ties keep their merge order.
    suggestions.sort_by(|a, b| b.priority.cmp(&a.priority));

    Selection {
        recommended_order: suggestions
            .iter()
            .map(|s| s.questionnaire_id.clone())
            .collect(),
        suggestions,
        urgency,
    }
}

/// One suggestion per questionnaire with at least one keyword in `text`.
/// Each match adds 1 to a base priority of 5 (max 10) and 0.1 to a base
/// confidence of 0.5 (max 1.0).
pub fn keyword_suggestions(text: &str) -> Vec<Suggestion> {
    let lower = text.to_lowercase();
    KEYWORDS
        .iter()
        .filter_map(|&(id, keywords)| {
            let matched: Vec<&str> = keywords
                .iter()
                .copied()
                .filter(|k| lower.contains(k))
                .collect();
            if matched.is_empty() {
                return None;
            }
            let count = matched.len();
            Some(Suggestion {
                questionnaire_id: id.to_string(),
                priority: (5 + count).min(10) as u8,
                reasoning: format!(
                    "Mentioned keywords: {}",
                    matched.iter().take(3).copied().collect::<Vec<_>>().join(", ")
                ),
                confidence: (0.5 + count as f64 * 0.1).min(1.0),
            })
        })
        .collect()
}

/// Merge two suggestion lists. Entries for the same questionnaire keep the
/// higher priority and confidence and join their reasoning.
pub fn combine_suggestions(primary: Vec<Suggestion>, secondary: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut combined: Vec<Suggestion> = Vec::with_capacity(primary.len() + secondary.len());
    for suggestion in primary.into_iter().chain(secondary) {
        match combined
            .iter_mut()
            .find(|s| s.questionnaire_id == suggestion.questionnaire_id)
        {
            Some(existing) => {
                existing.priority = existing.priority.max(suggestion.priority);
                existing.confidence = existing.confidence.max(suggestion.confidence);
                existing.reasoning = format!("{}. {}", existing.reasoning, suggestion.reasoning);
            }
            None => combined.push(suggestion),
        }
    }
    combined
}

pub fn urgency(text: &str, suggestions: &[Suggestion]) -> Urgency {
    let lower = text.to_lowercase();
    if CRITICAL_PHRASES.iter().any(|p| lower.contains(p)) {
        return Urgency::Critical;
    }
    if HIGH_PHRASES.iter().any(|p| lower.contains(p)) {
        return Urgency::High;
    }
    if suggestions.iter().filter(|s| s.priority >= 8).count() >= 2 {
        return Urgency::High;
    }
    if !suggestions.is_empty() || lower.chars().count() > 100 {
        return Urgency::Medium;
    }
    Urgency::Low
}

/// Starting point when the client has not said anything yet.
pub fn default_selection() -> Selection {
    let suggestion = |id: &str, priority, confidence, reasoning: &str| Suggestion {
        questionnaire_id: id.to_string(),
        priority,
        reasoning: reasoning.to_string(),
        confidence,
    };
    let suggestions = vec![
        suggestion(
            "depression",
            5,
            0.3,
            "Common starting point for mental health assessment",
        ),
        suggestion(
            "anxiety",
            5,
            0.3,
            "Common starting point for mental health assessment",
        ),
        suggestion("stress", 4, 0.2, "General assessment starting point"),
    ];
    Selection {
        recommended_order: suggestions
            .iter()
            .map(|s| s.questionnaire_id.clone())
            .collect(),
        suggestions,
        urgency: Urgency::Low,
    }
}
