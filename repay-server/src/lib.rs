//! Delay repay calculator server.
//!
//! A web application that answers: "My train was late, how much
//! compensation am I owed for the tickets I bought?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod ledger;
pub mod repay;
pub mod web;
