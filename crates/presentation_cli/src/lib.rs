//! Directory sync CLI
//!
//! Operator tooling for the customer directory pipeline: lookups, avatar
//! resolution, replaying mail events into contact history, and checking
//! configuration.

pub mod cli;
pub mod commands;
