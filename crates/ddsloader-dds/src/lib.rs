//! DDS texture decoding.
//!
//! Reads DXT1, DXT5, 24-bit RGB and 32-bit RGBA DirectDraw Surface files and
//! produces the raw payload an engine uploads directly:
//!
//! - leading mip levels can be dropped with a configurable bias, with a
//!   separate bias for normal maps
//! - uncompressed data has its red and blue bytes swapped per pixel, level by
//!   level, honouring the 4-byte row padding
//!
//! # Example
//!
//! ```no_run
//! use ddsloader_dds::{decode_file, LoaderSettings};
//!
//! let settings = LoaderSettings::new(1, 0);
//! let image = decode_file("Parts/hull.dds", &settings)?;
//! println!("{} {}x{} ({} mips)", image.format, image.width, image.height, image.mipmap_count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decode;
mod error;
mod format;
mod header;
mod mip;
mod policy;
mod settings;
mod swizzle;

#[cfg(test)]
mod test_util;

pub use decode::{decode, decode_bytes, decode_file, DecodedImage};
pub use error::{Error, ErrorKind, Result};
pub use format::{is_normal_map, FormatInfo, PixelFormat, NORMAL_MAP_SUFFIX};
pub use header::{DdsHeader, DdsPixelFormat, FourCC};
pub use mip::{compute_mip_skip, next_mip_dimension, MipSkip};
pub use policy::TextureInfo;
pub use settings::LoaderSettings;
pub use swizzle::{row_stride, swap_red_blue};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Length of the magic plus header; pixel data starts here.
pub const HEADER_LEN: usize = 128;
