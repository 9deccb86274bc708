//! Catalog integration test suite.
//!
//! Runs every catalog operation against an in-memory SQLite database with
//! migrations applied, an in-memory blob store and a recording notifier.
//!
//! Run with: cargo test --test catalog

mod test_helpers;

mod test_assets;
mod test_games;
mod test_releases;
