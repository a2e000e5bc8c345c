//! # psyscore Common Library
//!
//! Shared code for the psyscore crates including:
//! - Error and result types
//! - Configuration loading and resolution
//! - Logging initialisation
//! - The closed Big Five trait set and its associative container

pub mod big_five;
pub mod config;
pub mod error;
pub mod logging;

pub use big_five::{Trait, TraitMap};
pub use error::{Error, Result};
