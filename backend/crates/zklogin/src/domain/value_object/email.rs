//! Email Value Object
//!
//! Normalized (trimmed, lowercased) email used as the unique key of an
//! address mapping. No format check beyond that: identity providers hand us
//! synthetic addresses such as `google-<id>@example.com`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ZkLoginError, ZkLoginResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Normalize and validate
    pub fn new(email: impl AsRef<str>) -> ZkLoginResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(ZkLoginError::InvalidRequest(
                "Email cannot be empty".to_string(),
            ));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(ZkLoginError::InvalidRequest(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ZkLoginError::InvalidRequest(
                "Email cannot contain whitespace".to_string(),
            ));
        }

        Ok(Self(email))
    }

    /// `None` for absent or blank input, the anonymous path
    pub fn from_optional(email: Option<&str>) -> ZkLoginResult<Option<Self>> {
        match email.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Self::new(raw).map(Some),
        }
    }

    /// Create from database value (already normalized on insert)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = ZkLoginError;

    fn from_str(s: &str) -> ZkLoginResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
