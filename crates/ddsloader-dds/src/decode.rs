//! DDS decoding: header, format, mip skip, payload and channel swap.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use crate::format::{is_normal_map, FormatInfo, PixelFormat};
use crate::header::DdsHeader;
use crate::mip::compute_mip_skip;
use crate::settings::LoaderSettings;
use crate::swizzle::swap_red_blue;
use crate::{Error, Result, HEADER_LEN};

/// A decoded texture, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Pixel data of the kept mip levels. Uncompressed data has red and
    /// blue swapped into engine order.
    pub data: Vec<u8>,
    pub format: PixelFormat,
    /// Width of the first kept level.
    pub width: u32,
    /// Height of the first kept level.
    pub height: u32,
    /// Number of kept mip levels.
    pub mipmap_count: u32,
    pub is_compressed: bool,
    pub is_normal_map: bool,
}

/// Decode a DDS stream.
///
/// `name` is the texture identifier used for normal-map detection (a name
/// ending in `NRM`). The payload runs from the computed base offset to the
/// end of the stream; its length is not checked against the header.
pub fn decode<R: Read + Seek>(
    reader: &mut R,
    name: &str,
    settings: &LoaderSettings,
) -> Result<DecodedImage> {
    reader.seek(SeekFrom::Start(0))?;

    let mut header_bytes = Vec::with_capacity(HEADER_LEN);
    reader
        .by_ref()
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header_bytes)?;
    let header = DdsHeader::parse(&header_bytes)?;

    let pixel_format = header.pixel_format;
    let format = FormatInfo::resolve(&pixel_format)?;
    let is_normal_map = is_normal_map(&pixel_format, name);

    let (width, height, mipmap_count) = (header.width, header.height, header.mipmap_count);
    let bias = settings.bias_for(is_normal_map);
    let skip = compute_mip_skip(width, height, mipmap_count, &format, bias);

    tracing::debug!(
        texture = name,
        format = %format.pixel_format,
        width,
        height,
        mipmap_count,
        is_normal_map,
        bias,
        skipped = skip.levels,
        "Parsed DDS header"
    );

    let length = reader.seek(SeekFrom::End(0))?;
    if skip.base_offset > length {
        return Err(Error::TruncatedPayload {
            offset: skip.base_offset,
            length,
        });
    }

    reader.seek(SeekFrom::Start(skip.base_offset))?;
    let mut data = Vec::with_capacity((length - skip.base_offset) as usize);
    reader.read_to_end(&mut data)?;

    if !format.is_compressed() {
        swap_red_blue(
            &mut data,
            skip.width,
            skip.height,
            skip.mipmap_count,
            format.unit_size,
        );
    }

    Ok(DecodedImage {
        data,
        format: format.pixel_format,
        width: skip.width,
        height: skip.height,
        mipmap_count: skip.mipmap_count,
        is_compressed: format.is_compressed(),
        is_normal_map,
    })
}

/// Decode a DDS file held in memory.
pub fn decode_bytes(data: &[u8], name: &str, settings: &LoaderSettings) -> Result<DecodedImage> {
    decode(&mut Cursor::new(data), name, settings)
}

/// Decode a DDS file from disk, using the file stem as the texture name.
pub fn decode_file<P: AsRef<Path>>(path: P, settings: &LoaderSettings) -> Result<DecodedImage> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();

    decode(&mut BufReader::new(file), &name, settings)
}
