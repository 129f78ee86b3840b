//! Core business logic for Evenshare.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Each computation works on an input snapshot and returns owned results.
//!
//! # Modules
//!
//! - `balance` - Equal-split balances and the greedy settlement plan
//! - `validation` - Boundary rules for names, descriptions, and amounts

pub mod balance;
pub mod validation;
