pub mod assessment;
pub mod chat_history;
pub mod therapist_application;
pub mod user;
