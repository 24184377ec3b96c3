pub mod draft_session;
pub mod profile;
