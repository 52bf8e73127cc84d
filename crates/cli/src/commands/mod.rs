//! CLI Commands

pub mod account;
