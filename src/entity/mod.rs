//! SeaORM entity definitions.

pub mod asset;
pub mod crash_report;
pub mod framework;
pub mod game;
pub mod release;
pub mod user;
