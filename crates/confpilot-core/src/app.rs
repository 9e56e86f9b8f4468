//! Application identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Applications a request can be routed to, in classification match order.
pub const KNOWN_APPS: [&str; 3] = ["chat", "matchmaking", "tournament"];

/// Key joining the schema store, values store, and coordinator.
///
/// Usually one of [`KNOWN_APPS`], but a classification reply that names none
/// of them is kept verbatim so the fetch stage can report it as not found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppName(String);

impl AppName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Resolve a free-text classification reply to an application.
    ///
    /// The reply is trimmed and lower-cased; the first known name it contains
    /// wins. With no match the lower-cased reply itself is returned.
    pub fn from_reply(reply: &str) -> Self {
        let lowered = reply.trim().to_lowercase();
        match KNOWN_APPS.iter().find(|name| lowered.contains(*name)) {
            Some(name) => Self((*name).to_string()),
            None => Self(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of [`KNOWN_APPS`].
    pub fn is_known(&self) -> bool {
        KNOWN_APPS.contains(&self.0.as_str())
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
