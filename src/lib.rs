//! HR engine for small organizations
//!
//! This crate reconstructs the management hierarchy from a flat employee
//! roster, resets leave balances once per calendar month, records geofenced
//! punch-in/punch-out attendance and pro-rates monthly salaries by attended
//! days. The [`api`] module exposes the same operations over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod attendance;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod leave;
pub mod models;
pub mod payroll;
pub mod store;
