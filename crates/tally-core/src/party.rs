//! The two fixed parties and identity resolution.
//!
//! The ledger is shared by exactly two parties. Which party an external
//! user id maps to is assigned once at provisioning time and resolved via
//! a lookup table, never by matching display names at runtime. An unknown
//! id resolves to the registry's fallback party rather than failing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;

/// One of the two fixed participants in the shared ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    A,
    B,
}

impl Party {
    /// The other participant.
    pub fn other(&self) -> Party {
        match self {
            Party::A => Party::B,
            Party::B => Party::A,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::A => write!(f, "a"),
            Party::B => write!(f, "b"),
        }
    }
}

impl FromStr for Party {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Party::A),
            "b" => Ok(Party::B),
            other => Err(TallyError::Validation(format!(
                "unknown party: {} (use \"a\" or \"b\")",
                other
            ))),
        }
    }
}

/// Provisioned mapping from external user ids to parties.
///
/// Assignments are made when the ledger is set up. Resolution never
/// inspects display names; ids absent from the table resolve to the
/// configured fallback so a stale or foreign id can never crash a caller.
#[derive(Debug, Clone)]
pub struct PartyRegistry {
    assignments: HashMap<String, Party>,
    fallback: Party,
}

impl PartyRegistry {
    /// Create an empty registry with the given fallback party.
    pub fn new(fallback: Party) -> Self {
        Self {
            assignments: HashMap::new(),
            fallback,
        }
    }

    /// Assign an external user id to a party, replacing any prior assignment.
    pub fn assign(&mut self, external_id: impl Into<String>, party: Party) {
        self.assignments.insert(external_id.into(), party);
    }

    /// Resolve an external id to its provisioned party, if any.
    pub fn lookup(&self, external_id: &str) -> Option<Party> {
        self.assignments.get(external_id).copied()
    }

    /// Resolve an external id, falling back to the configured default when
    /// the id was never provisioned.
    pub fn resolve(&self, external_id: &str) -> Party {
        self.lookup(external_id).unwrap_or(self.fallback)
    }

    /// The party used for unprovisioned ids.
    pub fn fallback(&self) -> Party {
        self.fallback
    }
}

impl Default for PartyRegistry {
    fn default() -> Self {
        Self::new(Party::A)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other() {
        assert_eq!(Party::A.other(), Party::B);
        assert_eq!(Party::B.other(), Party::A);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("a".parse::<Party>().unwrap(), Party::A);
        assert_eq!(" B ".parse::<Party>().unwrap(), Party::B);
        assert!("c".parse::<Party>().is_err());
    }

    #[test]
    fn test_resolve_provisioned() {
        let mut registry = PartyRegistry::new(Party::A);
        registry.assign("user-123", Party::B);
        assert_eq!(registry.resolve("user-123"), Party::B);
    }

    #[test]
    fn test_resolve_unknown_uses_fallback() {
        let registry = PartyRegistry::new(Party::B);
        assert_eq!(registry.lookup("nobody"), None);
        assert_eq!(registry.resolve("nobody"), Party::B);
    }

    #[test]
    fn test_reassignment_replaces() {
        let mut registry = PartyRegistry::default();
        registry.assign("u", Party::A);
        registry.assign("u", Party::B);
        assert_eq!(registry.resolve("u"), Party::B);
    }
}
