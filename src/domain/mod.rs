//! Domain types for a scholarship checkout and the ports the checkout talks through.

pub mod applicant;
pub mod application;
pub mod money;
pub mod outcome;
pub mod payment;
pub mod ports;
pub mod scholarship;
