pub mod chatbot;
pub mod health;
pub mod pre_assessment;
pub mod questionnaires;
pub mod therapist_applications;
