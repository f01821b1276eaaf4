//! Application roles.
//!
//! These must match the `app_role` enum created in
//! `20260301000002_create_users_and_roles.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// A role a user can hold in the `user_roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Admin,
    User,
}

impl AppRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AppRole::Admin => ROLE_ADMIN,
            AppRole::User => ROLE_USER,
        }
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(AppRole::Admin),
            ROLE_USER => Ok(AppRole::User),
            other => Err(format!("Unknown role '{other}'")),
        }
    }
}
