pub mod memory;
pub mod profile;
pub mod redis_profile;
