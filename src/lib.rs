//! Gamecast catalog library.
//!
//! This library provides the core functionality for the game catalog,
//! including the entity store, release versioning, asset storage, update
//! feeds and analytics events.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod migration;
pub mod models;
pub mod services;
