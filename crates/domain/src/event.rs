//! Event identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric event identifier with an optional symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventId {
    id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<Box<str>>,
}

impl EventId {
    /// Create an unnamed event id.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self { id, name: None }
    }

    /// Create an event id carrying a symbolic name.
    pub fn named(id: i32, name: impl Into<Box<str>>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    /// Numeric id.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Symbolic name, when one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<i32> for EventId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl PartialEq<i32> for EventId {
    fn eq(&self, other: &i32) -> bool {
        self.id == *other
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => formatter.write_str(name),
            None => write!(formatter, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefers_name() {
        assert_eq!(EventId::new(7).to_string(), "7");
        assert_eq!(EventId::named(7, "ActionMatched").to_string(), "ActionMatched");
    }

    #[test]
    fn equality_covers_name_but_compares_to_raw_id() {
        assert_ne!(EventId::new(1), EventId::named(1, "x"));
        assert_eq!(EventId::named(1, "x"), 1);
        assert_eq!(EventId::from(3).id(), 3);
    }
}
