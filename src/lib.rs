#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod gateway;
pub mod moodboard;
pub mod palette;
pub mod parse;
pub mod providers;
pub mod tokens;
pub mod wizard;

pub use error::{ForgeError, Result};
