//! Value objects for voter resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decision::UserId;

/// User group identifier (e.g. `S0123ABC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for GroupId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Channel identifier (e.g. `C0123ABC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for ChannelId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member returned by a membership lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: UserId,
    #[serde(default)]
    pub is_bot: bool,
    /// The platform's own system account
    #[serde(default)]
    pub is_system: bool,
}

impl Member {
    pub fn user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            is_bot: false,
            is_system: false,
        }
    }

    pub fn bot(user_id: impl Into<UserId>) -> Self {
        Self {
            is_bot: true,
            ..Self::user(user_id)
        }
    }

    pub fn system(user_id: impl Into<UserId>) -> Self {
        Self {
            is_system: true,
            ..Self::user(user_id)
        }
    }

    /// Whether this member can be a voter (humans only).
    pub fn is_human(&self) -> bool {
        !self.is_bot && !self.is_system
    }
}
