use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{
    entities::profile::{ProfileData, RosterProfile},
    errors::AppError,
    repositories::profile::{profile_not_found, ProfileRepository},
};

/// Process-local profile store. Records are cloned on every read and write,
/// so callers never hold a reference into stored state.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepo {
    profiles: DashMap<Uuid, RosterProfile>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepo {
    async fn insert(&self, profile: &RosterProfile) -> Result<(), AppError> {
        self.profiles.insert(profile.profile_id, profile.clone());
        Ok(())
    }

    async fn get_by_id(&self, profile_id: Uuid) -> Result<RosterProfile, AppError> {
        self.profiles
            .get(&profile_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| profile_not_found(profile_id))
    }

    async fn update(&self, profile_id: Uuid, data: &ProfileData) -> Result<RosterProfile, AppError> {
        let mut entry = self
            .profiles
            .get_mut(&profile_id)
            .ok_or_else(|| profile_not_found(profile_id))?;

        entry.apply_update(data.clone());
        Ok(entry.clone())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
