pub mod drafts;
pub mod embed;
pub mod home;
pub mod profiles;
pub mod system;
