//! Immutable payment records.

use crate::money::Money;
use serde::Serialize;
use uuid::Uuid;

/// A completed transfer between two users.
///
/// Created exactly once per successful pay operation and never mutated or
/// deleted afterwards. Both participants' feed entries carry the payment,
/// sharing the id assigned here at creation. The actor and the target are
/// always two distinct users.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    /// Globally unique identifier, assigned at creation and never reused.
    id: Uuid,

    /// Amount transferred, fixed at creation.
    amount: Money,

    /// Username of the paying user.
    actor: String,

    /// Username of the receiving user.
    target: String,

    /// Free-text memo, fixed at creation.
    note: String,
}

impl Payment {
    /// Creates a new payment record with a fresh unique id.
    pub(crate) fn new(amount: Money, actor: &str, target: &str, note: &str) -> Self {
        Payment {
            id: Uuid::new_v4(),
            amount,
            actor: actor.to_string(),
            target: target.to_string(),
            note: note.to_string(),
        }
    }

    /// Unique payment id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Amount transferred.
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Username of the paying user.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Username of the receiving user.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Free-text memo.
    pub fn note(&self) -> &str {
        &self.note
    }
}
