//! # Application Layer
//!
//! Contains the core business logic of the bot:
//! command parsing, the glossary engine, reply formatting, routing and logging setup.

pub mod engine;
pub mod formatter;
pub mod logging;
pub mod parsing;
pub mod router;
pub mod utils;
