//! PeerPay demo CLI
//!
//! Runs a small scripted scenario (two users paying each other and
//! becoming friends) and renders their activity feeds to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use log::warn;
use peerpay::{render_feed, App, AppError, Money, Result};
use rust_decimal_macros::dec;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut app = App::new();
    app.create_user("Bobby", Money::new(dec!(5.00)), Some("4111111111111111"))?;
    app.create_user("Carol", Money::new(dec!(10.00)), Some("4242424242424242"))?;

    // A declined or invalid payment should not end the demo; anything
    // else is fatal to the run.
    let payments = [
        ("Bobby", "Carol", dec!(5.00), "Coffee"),
        ("Carol", "Bobby", dec!(15.00), "Lunch"),
    ];
    for (actor, target, amount, note) in payments {
        match app.pay(actor, target, Money::new(amount), note) {
            Ok(_) => {}
            Err(e @ AppError::Payment(_)) => warn!("payment declined: {}", e),
            Err(e) => return Err(e),
        }
    }

    let stdout = io::stdout();
    render_feed(app.user("Bobby")?.feed(), stdout.lock())?;

    app.add_friend("Bobby", "Carol")?;

    render_feed(app.user("Bobby")?.feed(), stdout.lock())?;
    render_feed(app.user("Carol")?.feed(), stdout.lock())?;

    Ok(())
}
