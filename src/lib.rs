//! # PeerPay
//!
//! An in-memory peer-to-peer payment simulator: users hold a balance and
//! an optional credit card, pay one another, befriend one another, and
//! accumulate a chronological activity feed of both kinds of event.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: amounts use 2 decimal places via `rust_decimal`
//! - **Balance first, card fallback**: a payment is funded entirely by the
//!   payer's balance when it covers the amount, otherwise entirely by the
//!   payer's card, never split between the two
//! - **Append-only feeds**: every successful payment or friendship is
//!   recorded once in each participant's feed, in event order
//! - **Injectable card processor**: card charging sits behind a trait so
//!   declines are testable without a real network
//!
//! ## Example
//!
//! ```
//! use peerpay::{render_feed, App, Money};
//! use rust_decimal_macros::dec;
//!
//! let mut app = App::new();
//! app.create_user("Bobby", Money::new(dec!(5.00)), Some("4111111111111111")).unwrap();
//! app.create_user("Carol", Money::new(dec!(10.00)), None).unwrap();
//! app.pay("Bobby", "Carol", Money::new(dec!(5.00)), "Coffee").unwrap();
//! render_feed(app.user("Carol").unwrap().feed(), std::io::stdout()).unwrap();
//! ```

pub mod app;
pub mod card;
pub mod error;
pub mod feed;
pub mod money;
pub mod payment;
pub mod user;

pub use app::{render_feed, App};
pub use card::{is_accepted_card, AutoApprove, CardProcessor, ACCEPTED_TEST_CARDS};
pub use error::{AppError, Result};
pub use feed::{Feed, FeedEntry};
pub use money::Money;
pub use payment::Payment;
pub use user::{befriend, is_valid_username, pay, User};
