use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path segment as a UUID, naming the resource in the error.
pub fn valid_uuid(id: &str, resource: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim())
        .map_err(|_| AppError::InvalidInput(format!("Invalid {} id format", resource)))
}
