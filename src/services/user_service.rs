// src/services/user_service.rs
use crate::domain::{
    mutual_friends, validate_friend_request, validate_new_user, validate_user_update, FriendEdge,
    User, UserDraft, UserId,
};
use crate::error::{AppError, AppResult};
use crate::repositories::UserRepository;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub fn create_user(&self, draft: UserDraft) -> AppResult<User> {
        let new_user = validate_new_user(&draft, today()).map_err(|e| {
            log::warn!("user rejected: {}", e);
            AppError::Domain(e)
        })?;

        let user = self.user_repo.create_user(&new_user)?;

        log::info!("user {} created: {}", user.id, user.login);
        Ok(user)
    }

    /// Blank or absent fields keep their stored values
    pub fn update_user(&self, draft: UserDraft) -> AppResult<User> {
        let id = draft
            .id
            .ok_or_else(|| AppError::not_found("user id required"))?;
        self.get_user(id)?;

        let patch = validate_user_update(&draft, today()).map_err(|e| {
            log::warn!("user {} update rejected: {}", id, e);
            AppError::Domain(e)
        })?;
        let user = self.user_repo.update_user(id, &patch)?;

        log::info!("user {} updated", user.id);
        Ok(user)
    }

    pub fn get_user(&self, id: UserId) -> AppResult<User> {
        self.user_repo
            .find_user_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("user {} not found", id)))
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all_users()
    }

    /// Removes the user along with their likes and friend edges
    pub fn delete_user(&self, id: UserId) -> AppResult<()> {
        if !self.user_repo.delete_user(id)? {
            return Err(AppError::not_found(format!("user {} not found", id)));
        }

        log::info!("user {} deleted", id);
        Ok(())
    }

    /// Request friendship; an existing request is left untouched
    pub fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        validate_friend_request(user_id, friend_id)?;
        self.ensure_users(user_id, friend_id)?;

        if self.user_repo.add_friend(user_id, friend_id)? {
            log::info!("user {} requested friendship with {}", user_id, friend_id);
        }
        Ok(())
    }

    /// Confirm the `user_id -> friend_id` edge; a missing edge is ignored
    pub fn accept_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        self.ensure_users(user_id, friend_id)?;

        if self.user_repo.accept_friend(user_id, friend_id)? {
            log::info!("friendship {} -> {} confirmed", user_id, friend_id);
        } else {
            log::debug!("no friendship {} -> {} to confirm", user_id, friend_id);
        }
        Ok(())
    }

    pub fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        self.ensure_users(user_id, friend_id)?;

        if self.user_repo.delete_friend(user_id, friend_id)? {
            log::info!("friendship {} -> {} removed", user_id, friend_id);
        }
        Ok(())
    }

    pub fn find_all_friends(&self, user_id: UserId) -> AppResult<Vec<User>> {
        self.get_user(user_id)?;
        self.user_repo.find_all_friends(user_id)
    }

    pub fn find_mutual_friends(&self, user_id: UserId, other_id: UserId) -> AppResult<Vec<User>> {
        self.ensure_users(user_id, other_id)?;

        let friends = self.user_repo.find_all_friends(user_id)?;
        let other_friends = self.user_repo.find_all_friends(other_id)?;
        Ok(mutual_friends(&friends, &other_friends))
    }

    pub fn find_friend_edges(&self, user_id: UserId) -> AppResult<Vec<FriendEdge>> {
        self.get_user(user_id)?;
        self.user_repo.find_friend_edges(user_id)
    }

    fn ensure_users(&self, user_id: UserId, other_id: UserId) -> AppResult<()> {
        self.get_user(user_id)?;
        self.get_user(other_id)?;
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
