// src/repositories/user_repository.rs
//
// User persistence: users and directional friend edges

use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::sync::Arc;

use super::{date_from_sql, date_to_sql, is_foreign_key_violation, is_unique_violation};
use crate::db::ConnectionPool;
use crate::domain::{merge_user, FriendEdge, NewUser, User, UserId, UserPatch};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Fails with `Duplicate` when the email is taken (case-insensitive)
    fn create_user(&self, user: &NewUser) -> AppResult<User>;

    /// Merge `patch` into the stored user and write it back as one step.
    /// Fails with `Duplicate` when another user owns the resulting email,
    /// `NotFound` when the id is unknown.
    fn update_user(&self, id: UserId, patch: &UserPatch) -> AppResult<User>;

    fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// All users ordered by id
    fn find_all_users(&self) -> AppResult<Vec<User>>;

    /// Removes the user, their likes and every friend edge touching them
    fn delete_user(&self, id: UserId) -> AppResult<bool>;

    /// Insert an unconfirmed edge; returns false when it already existed
    fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool>;

    /// Confirm an existing edge; returns false when there was none
    fn accept_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool>;

    /// Returns whether an edge was removed
    fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool>;

    /// Targets of all outbound edges, ordered by id
    fn find_all_friends(&self, user_id: UserId) -> AppResult<Vec<User>>;

    /// Outbound edges with their confirmation flag, ordered by friend id
    fn find_friend_edges(&self, user_id: UserId) -> AppResult<Vec<FriendEdge>>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let birthday: String = row.get(4)?;

        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            login: row.get(2)?,
            name: row.get(3)?,
            birthday: date_from_sql(4, &birthday)?,
        })
    }

    fn load_user(conn: &Connection, id: UserId) -> AppResult<Option<User>> {
        let mut stmt = conn.prepare(
            "SELECT user_id, email, login, name, birthday FROM users WHERE user_id = ?1",
        )?;

        match stmt.query_row(params![id], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn email_error(err: rusqlite::Error) -> AppError {
        if is_unique_violation(&err) {
            AppError::duplicate("email in use")
        } else {
            AppError::Database(err)
        }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create_user(&self, user: &NewUser) -> AppResult<User> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO users (email, login, name, birthday) VALUES (?1, ?2, ?3, ?4)",
            params![user.email, user.login, user.name, date_to_sql(user.birthday)],
        )
        .map_err(Self::email_error)?;

        let id = conn.last_insert_rowid();
        log::debug!("user {} inserted", id);
        Ok(User::from_new(id, user.clone()))
    }

    fn update_user(&self, id: UserId, patch: &UserPatch) -> AppResult<User> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored = Self::load_user(&tx, id)?
            .ok_or_else(|| AppError::not_found(format!("user {} not found", id)))?;
        let user = merge_user(&stored, patch.clone());

        tx.execute(
            "UPDATE users SET email = ?1, login = ?2, name = ?3, birthday = ?4
             WHERE user_id = ?5",
            params![
                user.email,
                user.login,
                user.name,
                date_to_sql(user.birthday),
                user.id,
            ],
        )
        .map_err(Self::email_error)?;
        tx.commit()?;

        Ok(user)
    }

    fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;
        Self::load_user(&conn, id)
    }

    fn find_all_users(&self) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT user_id, email, login, name, birthday FROM users ORDER BY user_id",
        )?;

        let users: Vec<User> = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn delete_user(&self, id: UserId) -> AppResult<bool> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM likes WHERE user_id = ?1", params![id])?;
        tx.execute(
            "DELETE FROM friends WHERE user_id = ?1 OR friend_id = ?1",
            params![id],
        )?;
        let rows_affected = tx.execute("DELETE FROM users WHERE user_id = ?1", params![id])?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }

    fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        match conn.execute(
            "INSERT OR IGNORE INTO friends (user_id, friend_id, status) VALUES (?1, ?2, 0)",
            params![user_id, friend_id],
        ) {
            Ok(rows_affected) => Ok(rows_affected > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(AppError::not_found(format!(
                "user {} or {} not found",
                user_id, friend_id
            ))),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn accept_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE friends SET status = 1 WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id, friend_id],
        )?;

        Ok(rows_affected > 0)
    }

    fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM friends WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id, friend_id],
        )?;

        Ok(rows_affected > 0)
    }

    fn find_all_friends(&self, user_id: UserId) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT u.user_id, u.email, u.login, u.name, u.birthday
             FROM friends AS f
             JOIN users AS u ON u.user_id = f.friend_id
             WHERE f.user_id = ?1
             ORDER BY u.user_id",
        )?;

        let friends: Vec<User> = stmt
            .query_map(params![user_id], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(friends)
    }

    fn find_friend_edges(&self, user_id: UserId) -> AppResult<Vec<FriendEdge>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT user_id, friend_id, status FROM friends
             WHERE user_id = ?1
             ORDER BY friend_id",
        )?;

        let edges: Vec<FriendEdge> = stmt
            .query_map(params![user_id], |row| {
                Ok(FriendEdge {
                    user_id: row.get(0)?,
                    friend_id: row.get(1)?,
                    confirmed: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(edges)
    }
}
