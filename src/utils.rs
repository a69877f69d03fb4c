//! Utility functions for the matchmaking model

use crate::error::{MatchmakingError, Result};
use crate::types::{MatchId, MMR_MAX, MMR_MIN};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> MatchId {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Reject empty names
pub fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MatchmakingError::InvalidArgument {
            reason: "Name passed was empty".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reject ratings outside `[MMR_MIN, MMR_MAX]`
pub fn check_rating(rating: i32) -> Result<i32> {
    if rating < MMR_MIN {
        return Err(MatchmakingError::InvalidArgument {
            reason: format!("MMR passed was smaller than {}", MMR_MIN),
        }
        .into());
    }
    if rating > MMR_MAX {
        return Err(MatchmakingError::InvalidArgument {
            reason: format!("MMR passed was greater than {}", MMR_MAX),
        }
        .into());
    }
    Ok(rating)
}

/// Apply `delta` to `rating` and clamp the result into `[MMR_MIN, MMR_MAX]`
pub fn clamp_rating(rating: i32, delta: i32) -> i32 {
    // i64 so that i32::MAX/MIN deltas cannot overflow
    let raw = i64::from(rating) + i64::from(delta);
    raw.clamp(i64::from(MMR_MIN), i64::from(MMR_MAX)) as i32
}
