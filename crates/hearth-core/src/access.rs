//! # Access Policy
//!
//! Every admin-panel operation asks one question: may this user do this?
//! The answer lives here and nowhere else.
//!
//! ## Capability Matrix
//! ```text
//! ┌──────────────────┬───────┬───────────┬─────────┐
//! │ Capability       │ admin │ moderator │ visitor │
//! ├──────────────────┼───────┼───────────┼─────────┤
//! │ ViewAdminPanel   │   ✓   │     ✓     │         │
//! │ ManageProducts   │   ✓   │     ✓     │         │
//! │ ManageUsers      │   ✓   │           │         │
//! │ ManageOrders     │   ✓   │           │         │
//! └──────────────────┴───────┴───────────┴─────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Role, User};

/// A named admin-panel permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Capability {
    ViewAdminPanel,
    ManageProducts,
    ManageUsers,
    ManageOrders,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::ViewAdminPanel => "view admin panel",
            Capability::ManageProducts => "manage products",
            Capability::ManageUsers => "manage users",
            Capability::ManageOrders => "manage orders",
        };
        f.write_str(name)
    }
}

impl Role {
    /// Whether this role holds the capability.
    pub fn allows(&self, capability: Capability) -> bool {
        match self {
            Role::Admin => true,
            Role::Moderator => matches!(
                capability,
                Capability::ViewAdminPanel | Capability::ManageProducts
            ),
            Role::Visitor => false,
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }

    pub fn is_moderator(&self) -> bool {
        *self == Role::Moderator
    }

    /// Admins and moderators can open the admin panel.
    pub fn has_admin_access(&self) -> bool {
        self.allows(Capability::ViewAdminPanel)
    }
}

/// Checks a capability for the signed-in user.
///
/// ## Errors
/// - [`CoreError::NotAuthenticated`] when nobody is signed in
/// - [`CoreError::AccessDenied`] when the role lacks the capability
///
/// ## Example
/// ```rust
/// use hearth_core::access::{authorize, Capability};
/// use hearth_core::seed;
///
/// let users = seed::users();
/// let moderator = users.iter().find(|u| u.id == "3").unwrap();
///
/// assert!(authorize(Some(moderator), Capability::ManageProducts).is_ok());
/// assert!(authorize(Some(moderator), Capability::ManageUsers).is_err());
/// assert!(authorize(None, Capability::ViewAdminPanel).is_err());
/// ```
pub fn authorize(user: Option<&User>, capability: Capability) -> CoreResult<()> {
    let user = user.ok_or(CoreError::NotAuthenticated)?;

    if user.role.allows(capability) {
        Ok(())
    } else {
        Err(CoreError::AccessDenied { capability })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
