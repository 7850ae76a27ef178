//! User entities and the two-party payment and friendship operations.
//!
//! A [`User`] owns its balance, optional credit card, friend set, and
//! activity feed. Operations that touch two users at once (paying and
//! befriending) are free functions over two exclusive handles, so the
//! caller decides where both users live and neither entity reaches into
//! the other's private state behind the caller's back.

use crate::card::{is_accepted_card, CardProcessor};
use crate::error::{AppError, Result};
use crate::feed::Feed;
use crate::money::Money;
use crate::payment::Payment;
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // 4-15 characters from letters, digits, underscore, hyphen.
        let pattern = "^[A-Za-z0-9_-]{4,15}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Returns `true` if the username satisfies the format rules.
pub fn is_valid_username(username: &str) -> bool {
    username_regex().is_match(username)
}

/// A participant in the payment application.
///
/// # Invariants
///
/// - `username` matches `^[A-Za-z0-9_-]{4,15}$` and never changes.
/// - `credit_card_number`, once present, never changes.
/// - Friendship is symmetric: this user appears in a friend's set exactly
///   when the friend appears in this user's set.
#[derive(Debug)]
pub struct User {
    username: String,
    balance: Money,
    credit_card_number: Option<String>,
    friends: BTreeSet<String>,
    feed: Feed,
}

impl User {
    /// Creates a new user with an empty feed and no friends.
    ///
    /// The username format is checked first, then the card number (when
    /// one is supplied) against the accepted-card whitelist. The starting
    /// balance is accepted as-is, with no range validation.
    pub fn new(username: &str, balance: Money, card: Option<&str>) -> Result<Self> {
        if !is_valid_username(username) {
            return Err(AppError::Username(format!(
                "{:?} is not a valid username",
                username
            )));
        }

        let credit_card_number = match card {
            Some(number) => {
                if !is_accepted_card(number) {
                    return Err(AppError::CreditCard("credit card not valid".to_string()));
                }
                Some(number.to_string())
            }
            None => None,
        };

        Ok(User {
            username: username.to_string(),
            balance,
            credit_card_number,
            friends: BTreeSet::new(),
            feed: Feed::new(),
        })
    }

    /// Username, unique within an application registry.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current balance.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Card number on file, if any.
    pub fn credit_card_number(&self) -> Option<&str> {
        self.credit_card_number.as_deref()
    }

    /// Usernames of this user's friends.
    pub fn friends(&self) -> &BTreeSet<String> {
        &self.friends
    }

    /// Returns `true` if the given username is in this user's friend set.
    pub fn is_friend(&self, username: &str) -> bool {
        self.friends.contains(username)
    }

    /// This user's activity feed.
    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Credits the balance unconditionally.
    pub fn deposit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Puts a credit card on file, once.
    ///
    /// Fails if a card is already present, regardless of the new
    /// number's validity, or if the number is not on the accepted-card
    /// whitelist.
    pub fn add_credit_card(&mut self, number: &str) -> Result<()> {
        if self.credit_card_number.is_some() {
            return Err(AppError::CreditCard(
                "only one credit card per user".to_string(),
            ));
        }
        if !is_accepted_card(number) {
            return Err(AppError::CreditCard(
                "invalid credit card number".to_string(),
            ));
        }
        self.credit_card_number = Some(number.to_string());
        Ok(())
    }
}

/// Transfers `amount` from `actor` to `target`.
///
/// The amount is funded entirely from the actor's balance when the
/// balance covers it (equality counts as sufficient); otherwise the full
/// amount is charged to the actor's card through `processor`, leaving the
/// balance untouched. There is no partial splitting between the two
/// sources.
///
/// On success the target's balance grows by `amount`, one [`Payment`] is
/// created, and both participants' feeds record it with identical text.
/// The returned payment is a copy of the recorded one.
///
/// # Errors
///
/// Fails with [`AppError::Payment`], mutating nothing, when the actor and
/// target are the same user, when `amount` is zero or negative, when the
/// balance falls short and no card is on file, or when the processor
/// declines the charge.
pub fn pay(
    actor: &mut User,
    target: &mut User,
    processor: &mut dyn CardProcessor,
    amount: Money,
    note: &str,
) -> Result<Payment> {
    if actor.username == target.username {
        return Err(AppError::Payment("user cannot pay themselves".to_string()));
    }
    if !amount.is_positive() {
        return Err(AppError::Payment(
            "amount must be a non-negative number".to_string(),
        ));
    }

    if actor.balance >= amount {
        actor.balance -= amount;
        debug!(
            "{} paid {} from balance, {} remaining",
            actor.username, amount, actor.balance
        );
    } else {
        let card = actor.credit_card_number.as_deref().ok_or_else(|| {
            AppError::Payment("must have a credit card to make a payment".to_string())
        })?;
        processor.charge(card, &target.username, amount, note)?;
        debug!("{} paid {} by card", actor.username, amount);
    }

    target.deposit(amount);

    let payment = Payment::new(amount, &actor.username, &target.username, note);
    actor.feed.record_payment(&payment);
    target.feed.record_payment(&payment);
    Ok(payment)
}

/// Makes `user` and `other` friends of each other.
///
/// The guard is caller-side only (the relationship is rejected when
/// `other` already appears in `user`'s friend set) but the mutation is
/// symmetric: both friend sets gain the opposite member, and both feeds
/// record the friendship with `user` named first.
///
/// # Errors
///
/// Fails with [`AppError::DuplicateFriend`], mutating nothing, when the
/// two are already friends.
pub fn befriend(user: &mut User, other: &mut User) -> Result<()> {
    if user.is_friend(&other.username) {
        return Err(AppError::DuplicateFriend(format!(
            "{} is already your friend",
            other.username
        )));
    }

    user.friends.insert(other.username.clone());
    other.friends.insert(user.username.clone());
    user.feed.record_friendship(&user.username, &other.username);
    other.feed.record_friendship(&user.username, &other.username);
    debug!("{} and {} are now friends", user.username, other.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn user(name: &str, balance: &str, card: Option<&str>) -> User {
        User::new(name, money(balance), card).unwrap()
    }

    /// Records every charge it is asked to make, approving all of them.
    #[derive(Default)]
    struct Recording {
        charges: Vec<(String, String, Money)>,
    }

    impl CardProcessor for Recording {
        fn charge(
            &mut self,
            card_number: &str,
            target: &str,
            amount: Money,
            _note: &str,
        ) -> Result<()> {
            self.charges
                .push((card_number.to_string(), target.to_string(), amount));
            Ok(())
        }
    }

    /// Declines every charge.
    struct Declining;

    impl CardProcessor for Declining {
        fn charge(&mut self, _: &str, _: &str, _: Money, _: &str) -> Result<()> {
            Err(AppError::Payment("card declined".to_string()))
        }
    }

    #[test]
    fn test_new_user_starts_with_empty_feed_and_no_friends() {
        let bobby = user("Bobby", "5.00", Some("4111111111111111"));

        assert_eq!(bobby.username(), "Bobby");
        assert_eq!(bobby.balance(), money("5.00"));
        assert_eq!(bobby.credit_card_number(), Some("4111111111111111"));
        assert!(bobby.friends().is_empty());
        assert!(bobby.feed().is_empty());
    }

    #[test]
    fn test_username_format_is_checked_first() {
        // Invalid username with an invalid card: the username error wins.
        let err = User::new("ab", money("0.00"), Some("not-a-card")).unwrap_err();
        assert!(matches!(err, AppError::Username(_)));
    }

    #[test]
    fn test_valid_username_boundaries() {
        for name in ["abcd", "a23456789012345", "user_name", "user-name", "1234"] {
            assert!(is_valid_username(name), "expected {:?} to be valid", name);
        }
        for name in ["abc", "a234567890123456", "", "user name", "user.name", "usér"] {
            assert!(!is_valid_username(name), "expected {:?} to be invalid", name);
        }
    }

    #[test]
    fn test_invalid_card_at_construction() {
        let err = User::new("Bobby", money("0.00"), Some("1111222233334444")).unwrap_err();
        assert!(matches!(err, AppError::CreditCard(_)));
    }

    #[test]
    fn test_negative_starting_balance_is_accepted_as_is() {
        let broke = user("broke", "-3.50", None);
        assert_eq!(broke.balance(), money("-3.50"));
    }

    #[test]
    fn test_add_credit_card_once() {
        let mut carol = user("Carol", "0.00", None);
        carol.add_credit_card("4242424242424242").unwrap();
        assert_eq!(carol.credit_card_number(), Some("4242424242424242"));
    }

    #[test]
    fn test_add_invalid_credit_card() {
        let mut carol = user("Carol", "0.00", None);
        let err = carol.add_credit_card("9999888877776666").unwrap_err();
        assert!(matches!(err, AppError::CreditCard(_)));
        assert_eq!(carol.credit_card_number(), None);
    }

    #[test]
    fn test_second_card_rejected_even_if_valid() {
        let mut bobby = user("Bobby", "0.00", Some("4111111111111111"));
        let err = bobby.add_credit_card("4242424242424242").unwrap_err();
        assert!(matches!(err, AppError::CreditCard(_)));
        assert_eq!(bobby.credit_card_number(), Some("4111111111111111"));
    }

    #[test]
    fn test_pay_rejects_non_positive_amounts() {
        let mut bobby = user("Bobby", "10.00", None);
        let mut carol = user("Carol", "0.00", None);
        let mut processor = Recording::default();

        for amount in ["0.00", "-5.00"] {
            let err = pay(&mut bobby, &mut carol, &mut processor, money(amount), "x").unwrap_err();
            assert!(matches!(err, AppError::Payment(_)));
        }

        assert_eq!(bobby.balance(), money("10.00"));
        assert_eq!(carol.balance(), money("0.00"));
        assert!(bobby.feed().is_empty());
        assert!(carol.feed().is_empty());
        assert!(processor.charges.is_empty());
    }

    #[test]
    fn test_balance_funded_payment_never_touches_the_card() {
        let mut bobby = user("Bobby", "10.00", Some("4111111111111111"));
        let mut carol = user("Carol", "2.00", None);
        let mut processor = Recording::default();

        let payment = pay(&mut bobby, &mut carol, &mut processor, money("7.50"), "Gas").unwrap();

        assert_eq!(bobby.balance(), money("2.50"));
        assert_eq!(carol.balance(), money("9.50"));
        assert_eq!(payment.amount(), money("7.50"));
        assert!(processor.charges.is_empty());
    }

    #[test]
    fn test_exact_balance_counts_as_sufficient() {
        let mut carol = user("Carol", "15.00", Some("4242424242424242"));
        let mut bobby = user("Bobby", "0.00", None);
        let mut processor = Recording::default();

        pay(&mut carol, &mut bobby, &mut processor, money("15.00"), "Lunch").unwrap();

        assert_eq!(carol.balance(), money("0.00"));
        assert_eq!(bobby.balance(), money("15.00"));
        assert!(processor.charges.is_empty());
    }

    #[test]
    fn test_card_funded_payment_leaves_balance_untouched() {
        let mut bobby = user("Bobby", "5.00", Some("4111111111111111"));
        let mut carol = user("Carol", "0.00", None);
        let mut processor = Recording::default();

        pay(&mut bobby, &mut carol, &mut processor, money("20.00"), "Rent").unwrap();

        assert_eq!(bobby.balance(), money("5.00"));
        assert_eq!(carol.balance(), money("20.00"));
        assert_eq!(
            processor.charges,
            vec![(
                "4111111111111111".to_string(),
                "Carol".to_string(),
                money("20.00")
            )]
        );
    }

    #[test]
    fn test_insufficient_balance_without_card_fails() {
        let mut bobby = user("Bobby", "5.00", None);
        let mut carol = user("Carol", "0.00", None);
        let mut processor = Recording::default();

        let err = pay(&mut bobby, &mut carol, &mut processor, money("20.00"), "Rent").unwrap_err();

        assert!(matches!(err, AppError::Payment(_)));
        assert_eq!(bobby.balance(), money("5.00"));
        assert_eq!(carol.balance(), money("0.00"));
        assert!(bobby.feed().is_empty());
        assert!(carol.feed().is_empty());
    }

    #[test]
    fn test_declined_charge_mutates_nothing() {
        let mut bobby = user("Bobby", "5.00", Some("4111111111111111"));
        let mut carol = user("Carol", "0.00", None);

        let err = pay(&mut bobby, &mut carol, &mut Declining, money("20.00"), "Rent").unwrap_err();

        assert!(matches!(err, AppError::Payment(_)));
        assert_eq!(bobby.balance(), money("5.00"));
        assert_eq!(carol.balance(), money("0.00"));
        assert!(bobby.feed().is_empty());
        assert!(carol.feed().is_empty());
    }

    #[test]
    fn test_successful_payment_appears_in_both_feeds() {
        let mut bobby = user("Bobby", "5.00", Some("4111111111111111"));
        let mut carol = user("Carol", "10.00", Some("4242424242424242"));
        let mut processor = Recording::default();

        let payment = pay(
            &mut bobby,
            &mut carol,
            &mut processor,
            money("5.00"),
            "Coffee",
        )
        .unwrap();

        assert_eq!(bobby.feed().len(), 1);
        assert_eq!(carol.feed().len(), 1);

        let in_bobby = &bobby.feed().entries()[0];
        let in_carol = &carol.feed().entries()[0];
        assert_eq!(in_bobby.text(), "Bobby paid Carol $5.00 for Coffee");
        assert_eq!(in_bobby.text(), in_carol.text());
        assert_eq!(in_bobby.payment().unwrap().id(), payment.id());
        assert_eq!(in_carol.payment().unwrap().id(), payment.id());
    }

    #[test]
    fn test_befriend_is_symmetric() {
        let mut bobby = user("Bobby", "0.00", None);
        let mut carol = user("Carol", "0.00", None);

        befriend(&mut bobby, &mut carol).unwrap();

        assert!(bobby.is_friend("Carol"));
        assert!(carol.is_friend("Bobby"));
        assert_eq!(bobby.feed().len(), 1);
        assert_eq!(carol.feed().len(), 1);
        assert_eq!(
            bobby.feed().entries()[0].text(),
            "Bobby and Carol are now friends"
        );
        assert_eq!(
            carol.feed().entries()[0].text(),
            "Bobby and Carol are now friends"
        );
    }

    #[test]
    fn test_befriend_twice_fails_without_new_entries() {
        let mut bobby = user("Bobby", "0.00", None);
        let mut carol = user("Carol", "0.00", None);

        befriend(&mut bobby, &mut carol).unwrap();
        let err = befriend(&mut bobby, &mut carol).unwrap_err();

        assert!(matches!(err, AppError::DuplicateFriend(_)));
        assert_eq!(bobby.feed().len(), 1);
        assert_eq!(carol.feed().len(), 1);
        assert_eq!(bobby.friends().len(), 1);
        assert_eq!(carol.friends().len(), 1);
    }

    #[test]
    fn test_befriend_guard_checks_the_caller_side() {
        let mut bobby = user("Bobby", "0.00", None);
        let mut carol = user("Carol", "0.00", None);

        befriend(&mut bobby, &mut carol).unwrap();

        // The reverse direction trips the guard from the other side.
        let err = befriend(&mut carol, &mut bobby).unwrap_err();
        assert!(matches!(err, AppError::DuplicateFriend(_)));
    }
}
