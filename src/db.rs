//! Room repository: read-only lookups against the `rooms` table.
//!
//! The table is owned and populated by the building administrators; this
//! system never writes to it.

use sqlx::postgres::PgPool;
use sqlx::FromRow;
use tracing::{debug, info};

use crate::errors::RepositoryError;

/// A room as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RoomRecord {
    /// Display form of the room number, e.g. "205B"
    pub number: String,
    /// Floor label
    pub floor: String,
    /// Free-text description of the room and how to reach it
    pub description: String,
    /// Directional photos in walking order; may be empty
    pub photo_urls: Vec<String>,
}

/// Read-side contract for room lookups
pub trait RoomRepository {
    /// Find a room by its canonical key. The comparison is case-insensitive
    /// on both sides; at most one record is returned.
    fn find_by_key(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<RoomRecord>, RepositoryError>> + Send;
}

impl RoomRepository for PgPool {
    async fn find_by_key(&self, key: &str) -> Result<Option<RoomRecord>, RepositoryError> {
        debug!(room_key = %key, "Looking up room");

        let record = sqlx::query_as::<_, RoomRecord>(
            "SELECT number, floor::text AS floor, description,
                    COALESCE(photo_urls, ARRAY[]::text[]) AS photo_urls
             FROM rooms
             WHERE UPPER(number) = UPPER($1)",
        )
        .bind(key)
        .fetch_optional(self)
        .await?;

        match &record {
            Some(room) => info!(
                room_key = %key,
                room_number = %room.number,
                photo_count = room.photo_urls.len(),
                "Room found"
            ),
            None => info!(room_key = %key, "Room not found"),
        }

        Ok(record)
    }
}
