//! Customer records.

use common::CustomerId;
use serde::{Deserialize, Serialize};

/// A registered customer. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}
