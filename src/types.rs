//! Shared types used across the mapper, the policy and the dispatcher.

use std::fmt;
use std::str::FromStr;

/// The seven conventional controller actions.
pub const RESTFUL_ACTIONS: [&str; 7] = ["index", "show", "new", "create", "update", "edit", "destroy"];

/// Canonical CRUD-style operation an action is authorized as.
///
/// This is a closed set: every action that reaches the authorization policy
/// resolves to exactly one of these, or the request fails with
/// [`BoltError::ActionNotConfigured`](crate::error::BoltError::ActionNotConfigured).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Reading one or many records.
    Find,
    /// Mutating an existing record.
    Update,
    /// Creating a record.
    Create,
    /// Deleting a record.
    Destroy,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 4] = [Operation::Find, Operation::Update, Operation::Create, Operation::Destroy];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Find => "find",
            Operation::Update => "update",
            Operation::Create => "create",
            Operation::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "find" => Ok(Operation::Find),
            "update" => Ok(Operation::Update),
            "create" => Ok(Operation::Create),
            "destroy" => Ok(Operation::Destroy),
            _ => Err(format!("Invalid operation: {}", value)),
        }
    }
}
