pub mod form_fields;
pub mod profile;
pub mod profile_card;
