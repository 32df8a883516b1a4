//! Friendship domain models.
//!
//! A friendship is a single directed edge between two users tracking the
//! relationship lifecycle. The requester side is whoever initiated the
//! current state: the request sender for PENDING/ACCEPTED/REJECTED rows, the
//! blocker for BLOCKED rows.

use chrono::{DateTime, Utc};

use crate::{
    model::friendship::{FriendDto, FriendRequestDto},
    server::{error::AppError, model::user::User},
};

/// The four mutually exclusive states a friendship row may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
    Blocked,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Blocked => "BLOCKED",
        }
    }

    /// Parses the stored column value.
    ///
    /// # Returns
    /// - `Ok(FriendshipStatus)` - Recognized status string
    /// - `Err(AppError::InternalError)` - Unknown value in the database
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            "BLOCKED" => Ok(Self::Blocked),
            other => Err(AppError::InternalError(format!(
                "Unknown friendship status '{}' in database",
                other
            ))),
        }
    }
}

/// Friendship edge between two users.
#[derive(Debug, Clone, PartialEq)]
pub struct Friendship {
    pub id: i32,
    pub requester_id: i32,
    pub addressee_id: i32,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl Friendship {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Friendship)` - Converted domain model
    /// - `Err(AppError::InternalError)` - Status column held an unknown value
    pub fn from_entity(entity: entity::friendship::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            requester_id: entity.requester_id,
            addressee_id: entity.addressee_id,
            status: FriendshipStatus::parse(&entity.status)?,
            created_at: entity.created_at,
            accepted_at: entity.accepted_at,
        })
    }

    /// Returns the id of the user on the other side of this edge.
    pub fn counterpart_of(&self, user_id: i32) -> i32 {
        if self.requester_id == user_id {
            self.addressee_id
        } else {
            self.requester_id
        }
    }
}

/// An accepted friend as seen from one user's side of the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct FriendEntry {
    pub user: User,
    pub status: FriendshipStatus,
    pub friends_since: Option<DateTime<Utc>>,
}

impl FriendEntry {
    pub fn into_dto(self) -> FriendDto {
        FriendDto {
            user: self.user.into_summary_dto(),
            status: self.status.as_str().to_string(),
            friends_since: self.friends_since,
        }
    }
}

/// A pending request together with the counterpart user.
#[derive(Debug, Clone, PartialEq)]
pub struct FriendRequestEntry {
    pub request_id: i32,
    pub user: User,
    pub status: FriendshipStatus,
    pub requested_at: DateTime<Utc>,
}

impl FriendRequestEntry {
    pub fn into_dto(self) -> FriendRequestDto {
        FriendRequestDto {
            request_id: self.request_id,
            user: self.user.into_summary_dto(),
            status: self.status.as_str().to_string(),
            requested_at: self.requested_at,
        }
    }
}
