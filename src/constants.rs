use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Redis key namespace for stored profiles.
pub const PROFILE_KEY_PREFIX: &str = "roster_profile";

/// How often idle draft sessions are swept.
pub const DRAFT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);
