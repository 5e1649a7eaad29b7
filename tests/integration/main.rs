//! Integration tests exercising the HTTP surface without a database.
//!
//! The pool is created lazily, so only paths that reject before touching
//! PostgreSQL are covered here. Handler and service logic against a live
//! database is covered by per-crate tests.

mod helpers;

mod admin_test;
mod health_test;
mod track_test;
mod ws_test;
