//! Common utilities for ddsloader.
//!
//! - [`BinaryReader`] - Bounds-checked, zero-copy reading of little-endian
//!   fields and fixed-layout structs from byte slices

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;
