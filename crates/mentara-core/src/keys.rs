//! Object key conventions.
//!
//! Pure string functions. These define the canonical layout of JSON records
//! in the Mentara object store.

use uuid::Uuid;

pub const PRE_ASSESSMENTS_PREFIX: &str = "pre-assessments/";

pub const THERAPIST_APPLICATIONS_PREFIX: &str = "therapist-applications/";

pub const CHAT_SESSIONS_PREFIX: &str = "chat-sessions/";

pub fn pre_assessment(id: Uuid) -> String {
    format!("{PRE_ASSESSMENTS_PREFIX}{id}.json")
}

pub fn therapist_application(id: Uuid) -> String {
    format!("{THERAPIST_APPLICATIONS_PREFIX}{id}.json")
}

pub fn chat_session(session_id: Uuid) -> String {
    format!("{CHAT_SESSIONS_PREFIX}{session_id}.json")
}

/// User ids come from the identity provider and are opaque strings.
/// Characters outside `[A-Za-z0-9_-]` are escaped as `~<hex>~` so distinct
/// ids never share a key.
pub fn user(user_id: &str) -> String {
    let mut safe = String::with_capacity(user_id.len());
    for c in user_id.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            safe.push(c);
        } else {
            safe.push_str(&format!("~{:x}~", c as u32));
        }
    }
    format!("users/{safe}.json")
}
