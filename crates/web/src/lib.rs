//! WeRescueCats web library.
//!
//! The adoption site, the admin back-office and the `/api` JSON endpoints,
//! exposed as a library so the CLI can reuse the repositories and services.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
