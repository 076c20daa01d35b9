// src/domain/friendship.rs
//
// Friendship invariants:
//
// 1. An edge is directional: `user_id` requested `friend_id`
// 2. A new edge starts unconfirmed, `friend_id` confirms it explicitly
// 3. At most one edge per ordered pair
// 4. A user cannot befriend themself
// 5. Friend lists contain every outbound edge, confirmed or not

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::user::{User, UserId};
use crate::domain::{DomainError, DomainResult};

/// Directional friendship record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendEdge {
    pub user_id: UserId,
    pub friend_id: UserId,
    pub confirmed: bool,
}

impl FriendEdge {
    pub fn requested(user_id: UserId, friend_id: UserId) -> Self {
        Self {
            user_id,
            friend_id,
            confirmed: false,
        }
    }
}

/// Validates the ids of a friend request
pub fn validate_friend_request(user_id: UserId, friend_id: UserId) -> DomainResult<()> {
    if user_id < 0 || friend_id < 0 {
        return Err(DomainError::NotFound(format!(
            "user {} not found",
            user_id.min(friend_id)
        )));
    }
    if user_id == friend_id {
        return Err(DomainError::Validation(
            "user cannot befriend themself".to_string(),
        ));
    }
    Ok(())
}

/// Users present in both friend lists, ordered by id
pub fn mutual_friends(friends: &[User], other_friends: &[User]) -> Vec<User> {
    let other_ids: BTreeSet<UserId> = other_friends.iter().map(|u| u.id).collect();
    let mut mutual: Vec<User> = friends
        .iter()
        .filter(|u| other_ids.contains(&u.id))
        .cloned()
        .collect();
    mutual.sort_by_key(|u| u.id);
    mutual
}
