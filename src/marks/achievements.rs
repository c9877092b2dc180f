/**
 * Read-Count Achievements
 *
 * Observer invoked after a mark lands on `read`. Counts the user's read
 * marks and reports a newly reached threshold, if any. A store failure
 * here is logged and swallowed; it must never fail the mark write.
 */

use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::marks::db;

const FIRST_READ_THRESHOLD: i64 = 1;
const BOOKWORM_THRESHOLD: i64 = 10;

/// An unlocked achievement, attached to the mark response.
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Evaluate read-count achievements for a user. Returns `None` when no
/// threshold applies or when counting fails.
pub async fn evaluate_read_achievements(pool: &SqlitePool, user_id: Uuid) -> Option<Achievement> {
    let count = match db::count_read(pool, user_id).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count read marks for {}: {:?}", user_id, e);
            return None;
        }
    };

    let achievement = if count == FIRST_READ_THRESHOLD {
        Some(Achievement {
            id: "first-read",
            name: "First Read",
            description: "Read your first book",
        })
    } else if count >= BOOKWORM_THRESHOLD {
        Some(Achievement {
            id: "bookworm-beginner",
            name: "Bookworm Beginner",
            description: "Read 10 books",
        })
    } else {
        None
    };

    if let Some(a) = &achievement {
        tracing::info!("User {} unlocked achievement: {}", user_id, a.name);
    }
    achievement
}
