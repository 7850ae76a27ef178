//! Per-user activity feeds.
//!
//! A feed is an append-only log of rendered event text, owned exclusively
//! by one user. Entries never change once appended; insertion order is
//! the only ordering guarantee.

use crate::payment::Payment;
use serde::Serialize;

/// One recorded event in a user's feed.
///
/// Payment events carry the [`Payment`] they describe; friendship events
/// carry no payload. The human-readable text is computed once, at the
/// moment the event occurs.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    /// The payment behind this entry, or `None` for friendship events.
    payment: Option<Payment>,

    /// Precomputed human-readable rendering.
    text: String,
}

impl FeedEntry {
    /// The payment behind this entry, if it describes one.
    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    /// Human-readable rendering of the event.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, append-only log of a user's payment and friendship events.
#[derive(Debug, Default, Serialize)]
pub struct Feed {
    entries: Vec<FeedEntry>,
}

impl Feed {
    /// Creates an empty feed.
    pub fn new() -> Self {
        Feed::default()
    }

    /// Appends an entry for a completed payment.
    ///
    /// The text is derived from the payment's actor, target, amount, and
    /// note; both participants record the same rendering.
    pub(crate) fn record_payment(&mut self, payment: &Payment) {
        let text = format!(
            "{} paid {} ${} for {}",
            payment.actor(),
            payment.target(),
            payment.amount(),
            payment.note()
        );
        self.entries.push(FeedEntry {
            payment: Some(payment.clone()),
            text,
        });
    }

    /// Appends an entry for a new friendship between two users.
    pub(crate) fn record_friendship(&mut self, user: &str, other: &str) {
        let text = format!("{} and {} are now friends", user, other);
        self.entries.push(FeedEntry {
            payment: None,
            text,
        });
    }

    /// Returns the full ordered sequence of entries.
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
