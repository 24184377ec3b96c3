use redis::{aio::MultiplexedConnection, Client};
use tracing::info;
use std::time::Duration;

pub async fn create_redis_connection(redis_url: &str) -> Result<MultiplexedConnection, redis::RedisError> {
    let client = Client::open(redis_url)?;
    let max_retries = 5;
    let mut retry_count = 0;
    let mut wait_seconds = 2;

    loop {
        match client.get_multiplexed_async_connection().await {
            Ok(conn) => {
                info!("Redis connection established.");
                return Ok(conn);
            }
            Err(e) if retry_count < max_retries => {
                retry_count += 1;
                info!(
                    "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}s...",
                    retry_count, max_retries, e, wait_seconds);

                tokio::time::sleep(Duration::from_secs(wait_seconds)).await;

                wait_seconds *= 2; // Exponential backoff
            }
            Err(e) => return Err(e),
        }
    }
}
