//! # Authentication
//!
//! The session snapshot and the mock user directory it authenticates
//! against.
//!
//! ## Session States
//! ```text
//!                    login ok / register ok
//!   ┌───────────┐ ─────────────────────────► ┌───────────────┐
//!   │ Anonymous │                            │ Authenticated │ ◄─┐ update
//!   └───────────┘ ◄───────────────────────── └───────────────┘ ──┘
//!                          logout
//! ```
//!
//! Passwords are not stored. Every directory account accepts the one shared
//! mock password.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Role, User};

// =============================================================================
// Session
// =============================================================================

/// Who is signed in. This is the persisted part of the auth store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn signed_in(user: User) -> Self {
        Session {
            user: Some(user),
            is_authenticated: true,
        }
    }

    /// The current user, only while authenticated.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref().filter(|_| self.is_authenticated)
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user().map(|u| u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|r| r.is_admin())
    }

    pub fn is_moderator(&self) -> bool {
        self.role().is_some_and(|r| r.is_moderator())
    }

    pub fn has_admin_access(&self) -> bool {
        self.role().is_some_and(|r| r.has_admin_access())
    }

    /// Back to anonymous.
    pub fn clear(&mut self) {
        self.user = None;
        self.is_authenticated = false;
    }
}

// =============================================================================
// User Directory
// =============================================================================

/// The accounts login and register check against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        UserDirectory { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Exact (case-sensitive) email lookup.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Checks credentials: the email must be in the directory and the
    /// password must equal the shared one.
    pub fn authenticate(&self, email: &str, password: &str, shared_password: &str) -> Option<User> {
        self.find_by_email(email)
            .filter(|_| password == shared_password)
            .cloned()
    }

    /// Creates a visitor account with notifications off.
    ///
    /// ## Errors
    /// [`ValidationError::Duplicate`] when the email is taken.
    pub fn register(&mut self, email: &str, name: &str) -> CoreResult<User> {
        if self.find_by_email(email).is_some() {
            return Err(duplicate_email(email));
        }

        let user = User {
            id: format!("user-{}", Uuid::new_v4().simple()),
            email: email.to_string(),
            name: name.to_string(),
            notifications_enabled: Some(false),
            role: Role::Visitor,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Replaces a user record, keeping emails unique.
    pub fn update(&mut self, user: User) -> CoreResult<User> {
        if self
            .users
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(duplicate_email(&user.email));
        }

        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| CoreError::UserNotFound(user.id.clone()))?;
        *slot = user.clone();
        Ok(user)
    }

    pub fn remove(&mut self, id: &str) -> CoreResult<User> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))?;
        Ok(self.users.remove(index))
    }
}

fn duplicate_email(email: &str) -> CoreError {
    ValidationError::Duplicate {
        field: "email".to_string(),
        value: email.to_string(),
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================
