//! RabitLink bridge library.
//!
//! Line-oriented protocol bridge between a microcontroller and its
//! companion app.  Everything except the UART adapter compiles on the
//! host; ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod bridge;
pub mod config;
pub mod proto;

mod error;

pub use error::{Error, LinkError, Result};
