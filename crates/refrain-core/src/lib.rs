//! Core domain model for refrain.
//!
//! This crate defines the canonical [`Track`] record produced by the
//! catalog reader, the entity references that name albums and playlists,
//! and the core error type.
//!
//! [`Track`]: model::Track

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;

pub use error::{Error, Result};
