use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands};
use uuid::Uuid;

use crate::{
    constants::PROFILE_KEY_PREFIX,
    entities::profile::{ProfileData, RosterProfile},
    errors::AppError,
    repositories::profile::{profile_not_found, ProfileRepository},
};

/// Stores each profile as a JSON document under `roster_profile:{id}`.
#[derive(Clone)]
pub struct RedisProfileRepo {
    conn: MultiplexedConnection,
}

impl RedisProfileRepo {
    pub fn new(conn: MultiplexedConnection) -> Self {
        RedisProfileRepo { conn }
    }

    fn key(profile_id: Uuid) -> String {
        format!("{}:{}", PROFILE_KEY_PREFIX, profile_id)
    }

    async fn write(&self, profile: &RosterProfile) -> Result<(), AppError> {
        let payload = serde_json::to_string(profile)?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(Self::key(profile.profile_id), payload).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for RedisProfileRepo {
    async fn insert(&self, profile: &RosterProfile) -> Result<(), AppError> {
        self.write(profile).await
    }

    async fn get_by_id(&self, profile_id: Uuid) -> Result<RosterProfile, AppError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(Self::key(profile_id)).await?;

        match payload {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(profile_not_found(profile_id)),
        }
    }

    async fn update(&self, profile_id: Uuid, data: &ProfileData) -> Result<RosterProfile, AppError> {
        let mut profile = self.get_by_id(profile_id).await?;
        profile.apply_update(data.clone());
        self.write(&profile).await?;
        Ok(profile)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
