//! Synthetic DDS files for tests.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::header::{DdsHeader, DdsPixelFormat, FourCC};

/// Builds a DDS file byte by byte in on-disk field order.
#[derive(Debug, Clone)]
pub(crate) struct DdsBuilder {
    magic: [u8; 4],
    header_size: u32,
    header_flags: u32,
    width: u32,
    height: u32,
    mipmap_count: u32,
    pf_flags: u32,
    four_cc: [u8; 4],
    rgb_bit_count: u32,
    payload: Vec<u8>,
}

impl DdsBuilder {
    fn base(width: u32, height: u32) -> Self {
        Self {
            magic: *b"DDS ",
            header_size: DdsHeader::SIZE,
            header_flags: 0x1 | 0x2 | 0x4 | 0x1000,
            width,
            height,
            mipmap_count: 1,
            pf_flags: 0,
            four_cc: [0; 4],
            rgb_bit_count: 0,
            payload: Vec::new(),
        }
    }

    /// Block-compressed surface.
    pub fn dxt(four_cc: FourCC, width: u32, height: u32) -> Self {
        let mut builder = Self::base(width, height);
        builder.pf_flags = DdsPixelFormat::FLAG_FOURCC;
        builder.four_cc = four_cc.0;
        builder
    }

    /// 24-bit RGB surface.
    pub fn rgb24(width: u32, height: u32) -> Self {
        let mut builder = Self::base(width, height);
        builder.pf_flags = DdsPixelFormat::FLAG_RGB;
        builder.rgb_bit_count = 24;
        builder
    }

    /// 32-bit RGBA surface.
    pub fn rgba32(width: u32, height: u32) -> Self {
        let mut builder = Self::base(width, height);
        builder.pf_flags = DdsPixelFormat::FLAG_RGB | DdsPixelFormat::FLAG_ALPHA_PIXELS;
        builder.rgb_bit_count = 32;
        builder
    }

    /// Sets the mipmap count and the flag marking it valid.
    pub fn mipmaps(mut self, count: u32) -> Self {
        self.mipmap_count = count;
        self.header_flags |= DdsHeader::FLAG_MIPMAPCOUNT;
        self
    }

    pub fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    pub fn header_size(mut self, size: u32) -> Self {
        self.header_size = size;
        self
    }

    pub fn header_flags(mut self, flags: u32) -> Self {
        self.header_flags = flags;
        self
    }

    pub fn pixel_flags(mut self, flags: u32) -> Self {
        self.pf_flags = flags;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(128 + self.payload.len());
        out.extend_from_slice(&self.magic);

        let fields = [
            self.header_size,
            self.header_flags,
            self.height,
            self.width,
            0,
            0,
            self.mipmap_count,
        ];
        for value in fields {
            out.write_u32::<LittleEndian>(value).unwrap();
        }
        for _ in 0..11 {
            out.write_u32::<LittleEndian>(0).unwrap();
        }

        out.write_u32::<LittleEndian>(32).unwrap();
        out.write_u32::<LittleEndian>(self.pf_flags).unwrap();
        out.extend_from_slice(&self.four_cc);
        out.write_u32::<LittleEndian>(self.rgb_bit_count).unwrap();
        for _ in 0..4 {
            out.write_u32::<LittleEndian>(0).unwrap();
        }

        // caps, caps2, caps3, caps4, reserved2
        out.write_u32::<LittleEndian>(0x1000).unwrap();
        for _ in 0..4 {
            out.write_u32::<LittleEndian>(0).unwrap();
        }

        assert_eq!(out.len(), 128);
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Payload of `len` bytes counting up from zero.
pub(crate) fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}
