//! Application layer: the checkout page and the steps it orchestrates.
//!
//! `CheckoutPage` loads the order summary, keeps a payment authorization for the current
//! total and runs the submission workflow. Every backend and provider call is awaited in
//! sequence.

pub mod authorization;
pub mod checkout;
pub mod summary;
