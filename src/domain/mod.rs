pub mod draft;
pub mod embed;
pub mod entities;
pub mod use_cases;
