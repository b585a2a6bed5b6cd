//! Pixel format resolution.

use crate::header::{DdsPixelFormat, FourCC};
use crate::{Error, Result};

/// Texture name suffix marking a normal map.
pub const NORMAL_MAP_SUFFIX: &str = "NRM";

/// Pixel encodings the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// BC1, 8 bytes per 4x4 block.
    Dxt1,
    /// BC3, 16 bytes per 4x4 block.
    Dxt5,
    /// Uncompressed RGB.
    Rgb24,
    /// Uncompressed RGB with alpha.
    Rgba32,
}

impl PixelFormat {
    /// Whether the data is stored in 4x4 blocks.
    pub fn is_compressed(self) -> bool {
        matches!(self, PixelFormat::Dxt1 | PixelFormat::Dxt5)
    }

    /// Bytes per 4x4 block, for block-compressed formats.
    pub fn block_size(self) -> Option<usize> {
        match self {
            PixelFormat::Dxt1 => Some(8),
            PixelFormat::Dxt5 => Some(16),
            PixelFormat::Rgb24 | PixelFormat::Rgba32 => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Dxt1 => "DXT1",
            PixelFormat::Dxt5 => "DXT5",
            PixelFormat::Rgb24 => "RGB24",
            PixelFormat::Rgba32 => "RGBA32",
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved pixel format together with its storage unit size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub pixel_format: PixelFormat,
    /// Bytes per 4x4 block when compressed, bytes per pixel otherwise.
    pub unit_size: usize,
}

impl FormatInfo {
    /// Classify a pixel format record.
    ///
    /// A set FourCC flag takes precedence: the bit count and masks are then
    /// ignored. Uncompressed formats take their pixel size from
    /// `rgb_bit_count`, which must cover at least the three color bytes.
    pub fn resolve(pf: &DdsPixelFormat) -> Result<Self> {
        if pf.has_flag(DdsPixelFormat::FLAG_FOURCC) {
            let pixel_format = match pf.four_cc {
                FourCC::DXT1 => PixelFormat::Dxt1,
                FourCC::DXT5 => PixelFormat::Dxt5,
                FourCC::DX10 => {
                    return Err(Error::UnsupportedFormat(
                        "DX10 extended headers are not supported".into(),
                    ))
                }
                other => {
                    return Err(Error::UnsupportedFormat(format!(
                        "FourCC '{}' (only DXT1, DXT5, RGB24, RGBA32 supported)",
                        other
                    )))
                }
            };
            let unit_size = pixel_format.block_size().unwrap_or(16);
            return Ok(Self {
                pixel_format,
                unit_size,
            });
        }

        if pf.has_flag(DdsPixelFormat::FLAG_RGB) {
            let pixel_format = if pf.has_flag(DdsPixelFormat::FLAG_ALPHA_PIXELS) {
                PixelFormat::Rgba32
            } else {
                PixelFormat::Rgb24
            };
            let bit_count = pf.rgb_bit_count;
            let unit_size = (bit_count / 8) as usize;
            if unit_size < 3 {
                return Err(Error::UnsupportedFormat(format!(
                    "{} bits per pixel is too narrow for {}",
                    bit_count, pixel_format
                )));
            }
            return Ok(Self {
                pixel_format,
                unit_size,
            });
        }

        Err(Error::UnsupportedFormat(
            "only DXT1, DXT5, RGB24, RGBA32 supported".into(),
        ))
    }

    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.pixel_format.is_compressed()
    }

    /// Size in bytes of one unpadded mip level, saturating at `u64::MAX`.
    pub fn level_size(&self, width: u32, height: u32) -> u64 {
        let (width, height, unit) = (width as u64, height as u64, self.unit_size as u64);
        if self.is_compressed() {
            width
                .div_ceil(4)
                .saturating_mul(height.div_ceil(4))
                .saturating_mul(unit)
        } else {
            width.saturating_mul(height).saturating_mul(unit)
        }
    }
}

/// Whether a texture is a normal map, by pixel-format flag or by a name
/// ending in [`NORMAL_MAP_SUFFIX`]. Either signal suffices.
pub fn is_normal_map(pf: &DdsPixelFormat, name: &str) -> bool {
    pf.has_flag(DdsPixelFormat::FLAG_NORMAL) || name.ends_with(NORMAL_MAP_SUFFIX)
}
