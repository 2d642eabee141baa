use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Parse the status filter used by the admin listing.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "under_review" | "under-review" => Some(Self::UnderReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A therapist's application to join the platform.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TherapistApplication {
    pub id: Uuid,
    pub user_id: String,
    pub status: ApplicationStatus,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub province: String,
    pub provider_type: String,
    pub professional_license_type: String,
    #[serde(rename = "isPRCLicensed")]
    pub is_prc_licensed: String,
    pub prc_license_number: String,
    pub years_of_experience: String,
    pub areas_of_expertise: Vec<String>,
    pub assessment_tools: Vec<String>,
    pub therapeutic_approaches_used_list: Vec<String>,
    pub languages_offered: Vec<String>,
    pub preferred_session_length: String,
    pub hourly_rate: Option<f64>,
    pub bio: String,
    pub submitted_at: jiff::Timestamp,
    pub processed_at: Option<jiff::Timestamp>,
}

const REQUIRED_FIELDS: [&str; 3] = ["firstName", "lastName", "email"];

impl TherapistApplication {
    /// Build an application from a loosely-typed form submission.
    ///
    /// `firstName`, `lastName` and `email` are required. Every other field
    /// is optional: scalars are stringified, lists accept either an array or
    /// a comma-separated string, and anything missing becomes empty.
    pub fn from_submission(
        id: Uuid,
        user_id: &str,
        form: &Map<String, Value>,
        submitted_at: jiff::Timestamp,
    ) -> Result<Self, CoreError> {
        for field in REQUIRED_FIELDS {
            if stringify(form.get(field)).is_empty() {
                return Err(CoreError::MissingField(field.to_string()));
            }
        }

        let email = stringify(form.get("email"));
        if !looks_like_email(&email) {
            return Err(CoreError::InvalidField {
                field: "email".to_string(),
                reason: format!("'{email}' is not an email address"),
            });
        }

        Ok(Self {
            id,
            user_id: user_id.to_string(),
            status: ApplicationStatus::Pending,
            first_name: stringify(form.get("firstName")),
            last_name: stringify(form.get("lastName")),
            email,
            mobile: stringify(form.get("mobile")),
            province: stringify(form.get("province")),
            provider_type: stringify(form.get("providerType")),
            professional_license_type: stringify(form.get("professionalLicenseType")),
            is_prc_licensed: stringify(form.get("isPRCLicensed")),
            prc_license_number: stringify(form.get("prcLicenseNumber")),
            years_of_experience: stringify(form.get("yearsOfExperience")),
            areas_of_expertise: string_list(form.get("areasOfExpertise")),
            assessment_tools: string_list(form.get("assessmentTools")),
            therapeutic_approaches_used_list: string_list(
                form.get("therapeuticApproachesUsedList"),
            ),
            languages_offered: string_list(form.get("languagesOffered")),
            preferred_session_length: stringify(form.get("preferredSessionLength")),
            hourly_rate: number(form.get("hourlyRate")),
            bio: stringify(form.get("bio")),
            submitted_at,
            processed_at: None,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::Bool(false)) => "no".to_string(),
        Some(other) => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| stringify(Some(item)))
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
