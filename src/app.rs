//! Application facade: user registry, operation orchestration, rendering.
//!
//! [`App`] owns every user, keyed by username, together with the card
//! processor payments fall back to. The two-party operations resolve
//! usernames to exclusive entity handles and delegate to the functions in
//! [`crate::user`].

use crate::card::{AutoApprove, CardProcessor};
use crate::error::{AppError, Result};
use crate::feed::Feed;
use crate::money::Money;
use crate::payment::Payment;
use crate::user::{self, User};
use log::debug;
use std::collections::HashMap;
use std::io::Write;

/// The payment application.
///
/// Holds the username registry, so usernames are globally unique here
/// even though a [`User`] on its own does not enforce that.
pub struct App {
    /// Users indexed by username.
    users: HashMap<String, User>,

    /// Collaborator charged with card-funded payments.
    processor: Box<dyn CardProcessor>,
}

impl App {
    /// Creates an empty application backed by the always-approving
    /// default processor.
    pub fn new() -> Self {
        App::with_processor(Box::new(AutoApprove))
    }

    /// Creates an empty application with an injected card processor.
    pub fn with_processor(processor: Box<dyn CardProcessor>) -> Self {
        App {
            users: HashMap::new(),
            processor,
        }
    }

    /// Registers a new user.
    ///
    /// The username must not already be taken; construction errors from
    /// [`User::new`] propagate unchanged.
    pub fn create_user(
        &mut self,
        username: &str,
        balance: Money,
        card: Option<&str>,
    ) -> Result<&User> {
        if self.users.contains_key(username) {
            return Err(AppError::Username(format!(
                "username {:?} is already taken",
                username
            )));
        }

        let user = User::new(username, balance, card)?;
        debug!("Created user {} with starting balance {}", username, balance);
        Ok(self.users.entry(username.to_string()).or_insert(user))
    }

    /// Looks up a registered user.
    pub fn user(&self, username: &str) -> Result<&User> {
        self.users
            .get(username)
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))
    }

    /// Transfers `amount` from `actor` to `target`, balance first with
    /// card fallback.
    ///
    /// See [`user::pay`] for the funding rules. Self-payment is rejected
    /// before touching the registry.
    pub fn pay(&mut self, actor: &str, target: &str, amount: Money, note: &str) -> Result<Payment> {
        if actor == target {
            return Err(AppError::Payment("user cannot pay themselves".to_string()));
        }

        let [actor_user, target_user] = self.users.get_disjoint_mut([actor, target]);
        let actor_user = actor_user.ok_or_else(|| AppError::UnknownUser(actor.to_string()))?;
        let target_user = target_user.ok_or_else(|| AppError::UnknownUser(target.to_string()))?;

        let payment = user::pay(actor_user, target_user, self.processor.as_mut(), amount, note)?;
        debug!(
            "Payment {}: {} -> {} {} ({})",
            payment.id(),
            actor,
            target,
            amount,
            note
        );
        Ok(payment)
    }

    /// Makes two registered users friends of each other.
    ///
    /// See [`user::befriend`] for the symmetry rules. A user cannot
    /// befriend themselves.
    pub fn add_friend(&mut self, username: &str, other: &str) -> Result<()> {
        if username == other {
            return Err(AppError::DuplicateFriend(
                "users cannot befriend themselves".to_string(),
            ));
        }

        let [caller, friend] = self.users.get_disjoint_mut([username, other]);
        let caller = caller.ok_or_else(|| AppError::UnknownUser(username.to_string()))?;
        let friend = friend.ok_or_else(|| AppError::UnknownUser(other.to_string()))?;

        user::befriend(caller, friend)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes a feed as text lines: a `Feed:` header, one line per entry in
/// feed order, and an `End of Feed` footer.
pub fn render_feed<W: Write>(feed: &Feed, mut writer: W) -> Result<()> {
    writeln!(writer, "Feed:")?;
    for entry in feed.entries() {
        writeln!(writer, "{}", entry.text())?;
    }
    writeln!(writer, "End of Feed")?;
    Ok(())
}
