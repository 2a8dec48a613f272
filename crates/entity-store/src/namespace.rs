//! Fixed storage namespaces.

use serde::{Deserialize, Serialize};

/// Disjoint keyspace a store instance reads and writes.
///
/// The string forms are persisted alongside every record and must stay
/// stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Artists,
    Customers,
    Commissions,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Artists => "artists",
            Namespace::Customers => "customers",
            Namespace::Commissions => "commissions",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
