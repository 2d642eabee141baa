use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum UserRole {
    Client,
    Therapist,
    Moderator,
    Admin,
}

/// Role assignment for an identity-provider user id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserAccount {
    pub id: String,
    pub role: UserRole,
    pub created_at: jiff::Timestamp,
}

impl UserAccount {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
