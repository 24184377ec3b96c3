use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::profile::{ProfileData, RosterProfile},
    errors::AppError,
};

/// Storage collaborator for profile records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a freshly imported profile
    async fn insert(&self, profile: &RosterProfile) -> Result<(), AppError>;

    /// Retrieves a profile by id, `AppError::NotFound` if absent
    async fn get_by_id(&self, profile_id: Uuid) -> Result<RosterProfile, AppError>;

    /// Merges the draft into the stored record and publishes it
    async fn update(&self, profile_id: Uuid, data: &ProfileData) -> Result<RosterProfile, AppError>;

    /// Checks that the backing store is reachable
    async fn check_connection(&self) -> Result<(), AppError>;

    /// Short name of the backing store, for health output
    fn backend(&self) -> &'static str;
}

#[async_trait]
impl<T> ProfileRepository for Arc<T>
where
    T: ProfileRepository + ?Sized,
{
    async fn insert(&self, profile: &RosterProfile) -> Result<(), AppError> {
        (**self).insert(profile).await
    }

    async fn get_by_id(&self, profile_id: Uuid) -> Result<RosterProfile, AppError> {
        (**self).get_by_id(profile_id).await
    }

    async fn update(&self, profile_id: Uuid, data: &ProfileData) -> Result<RosterProfile, AppError> {
        (**self).update(profile_id, data).await
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    fn backend(&self) -> &'static str {
        (**self).backend()
    }
}

pub(crate) fn profile_not_found(profile_id: Uuid) -> AppError {
    AppError::NotFound(format!("Profile {} not found", profile_id))
}
