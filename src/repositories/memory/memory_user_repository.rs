// src/repositories/memory/memory_user_repository.rs

use std::sync::Arc;

use super::MemoryStore;
use crate::domain::{
    ensure_email_available, merge_user, FriendEdge, NewUser, User, UserId, UserPatch,
};
use crate::error::{AppError, AppResult};
use crate::repositories::UserRepository;

pub struct InMemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn create_user(&self, user: &NewUser) -> AppResult<User> {
        let mut tables = self.store.write()?;
        ensure_email_available(&user.email, tables.users.values(), None)?;

        let id = tables.next_user_id();
        let created = User::from_new(id, user.clone());
        tables.users.insert(id, created.clone());

        log::debug!("user {} inserted", id);
        Ok(created)
    }

    fn update_user(&self, id: UserId, patch: &UserPatch) -> AppResult<User> {
        let mut tables = self.store.write()?;
        let stored = tables
            .users
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("user {} not found", id)))?;

        let user = merge_user(stored, patch.clone());
        ensure_email_available(&user.email, tables.users.values(), Some(id))?;

        tables.users.insert(id, user.clone());
        Ok(user)
    }

    fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.store.read()?.users.get(&id).cloned())
    }

    fn find_all_users(&self) -> AppResult<Vec<User>> {
        Ok(self.store.read()?.users.values().cloned().collect())
    }

    fn delete_user(&self, id: UserId) -> AppResult<bool> {
        let mut tables = self.store.write()?;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        for record in tables.films.values_mut() {
            record.likes.remove(&id);
        }
        tables
            .friends
            .retain(|(user_id, friend_id), _| *user_id != id && *friend_id != id);
        Ok(true)
    }

    fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        let mut tables = self.store.write()?;
        if !tables.users.contains_key(&user_id) || !tables.users.contains_key(&friend_id) {
            return Err(AppError::not_found(format!(
                "user {} or {} not found",
                user_id, friend_id
            )));
        }

        if tables.friends.contains_key(&(user_id, friend_id)) {
            return Ok(false);
        }
        let edge = FriendEdge::requested(user_id, friend_id);
        tables
            .friends
            .insert((edge.user_id, edge.friend_id), edge.confirmed);
        Ok(true)
    }

    fn accept_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        let mut tables = self.store.write()?;
        match tables.friends.get_mut(&(user_id, friend_id)) {
            Some(confirmed) => {
                *confirmed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        let mut tables = self.store.write()?;
        Ok(tables.friends.remove(&(user_id, friend_id)).is_some())
    }

    fn find_all_friends(&self, user_id: UserId) -> AppResult<Vec<User>> {
        let tables = self.store.read()?;
        // BTreeMap key order keeps targets sorted by id
        Ok(tables
            .friends
            .range((user_id, UserId::MIN)..=(user_id, UserId::MAX))
            .filter_map(|((_, friend_id), _)| tables.users.get(friend_id).cloned())
            .collect())
    }

    fn find_friend_edges(&self, user_id: UserId) -> AppResult<Vec<FriendEdge>> {
        let tables = self.store.read()?;
        Ok(tables
            .friends
            .range((user_id, UserId::MIN)..=(user_id, UserId::MAX))
            .map(|((user_id, friend_id), confirmed)| FriendEdge {
                user_id: *user_id,
                friend_id: *friend_id,
                confirmed: *confirmed,
            })
            .collect())
    }
}
