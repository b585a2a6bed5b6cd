//! DDS header structures and parsing.

use std::fmt;

use ddsloader_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result, DDS_MAGIC, HEADER_LEN};

/// DDS file header, the 124 bytes following the magic.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (must be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels. Forced to 1 by [`DdsHeader::parse`] when
    /// the mipmap count flag is unset.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

const _: () = assert!(std::mem::size_of::<DdsHeader>() + 4 == HEADER_LEN);

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// `DDSD_MIPMAPCOUNT`: the mipmap count field is valid.
    pub const FLAG_MIPMAPCOUNT: u32 = 0x0002_0000;

    /// Parse the magic and header from the first [`HEADER_LEN`] bytes of a file.
    ///
    /// Only the magic and the size field are validated. Input shorter than a
    /// full header is rejected as [`Error::InvalidFormat`] when the magic is
    /// cut off, [`Error::InvalidHeader`] when the size field is cut off, and
    /// [`Error::TruncatedPayload`] otherwise.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        match reader.expect_magic(DDS_MAGIC) {
            Ok(()) => {}
            Err(ddsloader_common::Error::InvalidMagic { actual, .. }) => {
                return Err(Error::InvalidFormat(actual));
            }
            Err(_) => return Err(Error::InvalidFormat(data.to_vec())),
        }

        let size = reader
            .peek_u32()
            .map_err(|_| Error::InvalidHeader("header size field is truncated".into()))?;
        if size != Self::SIZE {
            return Err(Error::InvalidHeader(format!(
                "expected size {}, got {}",
                Self::SIZE,
                size
            )));
        }

        let mut header: DdsHeader = reader.read_struct().map_err(|_| Error::TruncatedPayload {
            offset: HEADER_LEN as u64,
            length: data.len() as u64,
        })?;

        if !header.has_mipmap_count() {
            header.mipmap_count = 1;
        }

        Ok(header)
    }

    /// Whether the mipmap count field is flagged as present.
    pub fn has_mipmap_count(&self) -> bool {
        self.flags & Self::FLAG_MIPMAPCOUNT != 0
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// `DDPF_ALPHAPIXELS`: the surface carries alpha.
    pub const FLAG_ALPHA_PIXELS: u32 = 0x1;
    /// `DDPF_FOURCC`: the surface is described by `four_cc`.
    pub const FLAG_FOURCC: u32 = 0x4;
    /// `DDPF_RGB`: uncompressed RGB data.
    pub const FLAG_RGB: u32 = 0x40;
    /// `DDPF_NORMAL`: the surface is a normal map.
    pub const FLAG_NORMAL: u32 = 0x8000_0000;

    /// Whether any bit of `flag` is set.
    #[inline]
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
