// Scoring postings against a candidate: the resume profile, pluggable scorers, and routes.

pub mod handlers;
pub mod profile;
pub mod prompts;
pub mod scorer;
