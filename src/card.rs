//! Credit card validation and the charging hook.
//!
//! Card numbers are checked against a fixed whitelist of accepted test
//! numbers; actually moving money off a card is delegated to a
//! [`CardProcessor`] so tests can substitute declines without touching
//! payment logic.

use crate::error::Result;
use crate::money::Money;
use log::debug;

/// Card numbers accepted by the simulated network.
pub const ACCEPTED_TEST_CARDS: &[&str] = &["4111111111111111", "4242424242424242"];

/// Returns `true` if the card number is one of the accepted test numbers.
pub fn is_accepted_card(number: &str) -> bool {
    ACCEPTED_TEST_CARDS.contains(&number)
}

/// External card-charging collaborator.
///
/// Given the card number on file, the receiving username, the amount, and
/// the payment note, an implementation either completes the charge or
/// returns an error. A failed charge must leave no trace: the payment
/// machinery only mutates state after `charge` returns `Ok`.
pub trait CardProcessor {
    /// Charges the full amount to the given card.
    fn charge(&mut self, card_number: &str, target: &str, amount: Money, note: &str) -> Result<()>;
}

/// Default processor that approves every charge.
///
/// The simulation has no real card network behind it, so the bundled
/// processor simply records the charge at debug level and succeeds.
#[derive(Debug, Default)]
pub struct AutoApprove;

impl CardProcessor for AutoApprove {
    fn charge(&mut self, card_number: &str, target: &str, amount: Money, note: &str) -> Result<()> {
        let last4 = &card_number[card_number.len().saturating_sub(4)..];
        debug!(
            "Charged {} to card ending {} for payment to {} ({})",
            amount, last4, target, note
        );
        Ok(())
    }
}
