//! Leading mipmap level skipping.

use crate::format::FormatInfo;
use crate::HEADER_LEN;

/// Result of skipping leading mip levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipSkip {
    /// Number of levels dropped from the front of the chain.
    pub levels: u32,
    /// Absolute file offset of the first kept level.
    pub base_offset: u64,
    /// Width of the first kept level.
    pub width: u32,
    /// Height of the first kept level.
    pub height: u32,
    /// Levels remaining after the skip, at least 1.
    pub mipmap_count: u32,
}

/// Dimension of the next mip level: halved, never below 1.
#[inline]
pub fn next_mip_dimension(value: u32) -> u32 {
    (value / 2).max(1)
}

/// Work out how many leading levels a `bias` drops and where the rest start.
///
/// The skip never removes the last level: `levels` is clamped to
/// `mipmap_count - 1`, and a negative bias skips nothing. Level sizes are
/// unpadded.
pub fn compute_mip_skip(
    width: u32,
    height: u32,
    mipmap_count: u32,
    format: &FormatInfo,
    bias: i32,
) -> MipSkip {
    let max_levels = mipmap_count.saturating_sub(1);
    let levels = u32::try_from(bias).unwrap_or(0).min(max_levels);

    let mut offset = HEADER_LEN as u64;
    let mut width = width.max(1);
    let mut height = height.max(1);

    for _ in 0..levels {
        offset = offset.saturating_add(format.level_size(width, height));
        width = next_mip_dimension(width);
        height = next_mip_dimension(height);
    }

    MipSkip {
        levels,
        base_offset: offset,
        width,
        height,
        mipmap_count: mipmap_count.saturating_sub(levels).max(1),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::format::PixelFormat;

    const DXT1: FormatInfo = FormatInfo {
        pixel_format: PixelFormat::Dxt1,
        unit_size: 8,
    };
    const RGB24: FormatInfo = FormatInfo {
        pixel_format: PixelFormat::Rgb24,
        unit_size: 3,
    };

    #[test]
    fn test_zero_bias_is_identity() {
        let skip = compute_mip_skip(256, 128, 9, &DXT1, 0);

        assert_eq!(
            skip,
            MipSkip {
                levels: 0,
                base_offset: 128,
                width: 256,
                height: 128,
                mipmap_count: 9,
            }
        );
    }

    #[rstest]
    #[case(-1)]
    #[case(-100)]
    #[case(i32::MIN)]
    fn test_negative_bias_matches_zero(#[case] bias: i32) {
        assert_eq!(
            compute_mip_skip(64, 64, 7, &DXT1, bias),
            compute_mip_skip(64, 64, 7, &DXT1, 0)
        );
    }

    #[rstest]
    #[case(7)]
    #[case(8)]
    #[case(i32::MAX)]
    fn test_bias_clamped_to_last_level(#[case] bias: i32) {
        let skip = compute_mip_skip(64, 64, 7, &DXT1, bias);

        assert_eq!(skip.levels, 6);
        assert_eq!((skip.width, skip.height), (1, 1));
        assert_eq!(skip.mipmap_count, 1);
    }

    #[test]
    fn test_compressed_offsets() {
        // 64x64 -> 32x32 -> 16x16: 16*16*8 + 8*8*8
        let skip = compute_mip_skip(64, 64, 7, &DXT1, 2);

        assert_eq!(skip.base_offset, 128 + 2048 + 512);
        assert_eq!((skip.width, skip.height), (16, 16));
        assert_eq!(skip.mipmap_count, 5);
    }

    #[test]
    fn test_small_compressed_levels_round_up_to_blocks() {
        // 4x4 -> 2x2 -> 1x1 are each one block
        let skip = compute_mip_skip(4, 4, 3, &DXT1, 2);

        assert_eq!(skip.base_offset, 128 + 8 + 8);
    }

    #[test]
    fn test_uncompressed_offsets_unpadded() {
        let skip = compute_mip_skip(3, 3, 2, &RGB24, 1);

        assert_eq!(skip.base_offset, 128 + 27);
        assert_eq!((skip.width, skip.height), (1, 1));
    }

    #[test]
    fn test_halving_floors_at_one() {
        let skip = compute_mip_skip(3, 1, 2, &RGB24, 1);

        assert_eq!((skip.width, skip.height), (1, 1));
        assert_eq!(next_mip_dimension(1), 1);
        assert_eq!(next_mip_dimension(0), 1);
    }

    #[test]
    fn test_single_level_never_skipped() {
        let skip = compute_mip_skip(512, 512, 1, &DXT1, 4);

        assert_eq!(skip.levels, 0);
        assert_eq!(skip.base_offset, 128);
    }

    #[test]
    fn test_zero_mipmap_count_reports_one() {
        let skip = compute_mip_skip(16, 16, 0, &DXT1, 3);

        assert_eq!(skip.levels, 0);
        assert_eq!(skip.mipmap_count, 1);
    }
}
