//! # Infrastructure Layer
//!
//! Handles interactions with external systems: the Matrix homeserver and the glossary database.
//! Implements the traits defined in the Domain layer (e.g., ChatProvider).

pub mod database;
pub mod matrix;
pub mod repository;
