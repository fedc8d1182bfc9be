//! Adapters between the checkout and a terminal.

pub mod console;
