//! Red/blue channel swap for uncompressed mip chains.

use crate::mip::next_mip_dimension;

/// Row stride in bytes: the pixel bytes of a row rounded up to a multiple of 4.
#[inline]
pub fn row_stride(width: u32, bytes_per_pixel: usize) -> usize {
    (width as usize).saturating_mul(bytes_per_pixel).saturating_add(3) / 4 * 4
}

/// Swap byte 0 and byte 2 of every pixel, in place, across `mip_levels` levels.
///
/// Each level starts at `width` x `height` halved per level (floored at 1)
/// and is laid out in rows of [`row_stride`] bytes. Padding bytes at the end
/// of a row are left alone. Data past the end of `data` is skipped, as is a
/// trailing partial pixel.
pub fn swap_red_blue(
    data: &mut [u8],
    width: u32,
    height: u32,
    mip_levels: u32,
    bytes_per_pixel: usize,
) {
    if bytes_per_pixel < 3 {
        return;
    }

    let mut offset = 0usize;
    let mut width = width.max(1);
    let mut height = height.max(1);

    for _ in 0..mip_levels {
        let stride = row_stride(width, bytes_per_pixel);
        let row_bytes = (width as usize).saturating_mul(bytes_per_pixel);

        for row in 0..height as usize {
            let start = offset.saturating_add(row.saturating_mul(stride));
            if start >= data.len() {
                return;
            }
            let end = start.saturating_add(row_bytes).min(data.len());

            for pixel in data[start..end].chunks_exact_mut(bytes_per_pixel) {
                pixel.swap(0, 2);
            }
        }

        offset = offset.saturating_add(stride.saturating_mul(height as usize));
        width = next_mip_dimension(width);
        height = next_mip_dimension(height);
    }
}
