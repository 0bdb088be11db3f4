//! Support heights published by a surface tile.
//!
//! Each slope shape assigns every segment of the footprint a height above the
//! tile base and a shape tag, following the roof line of the slope.

use crate::session::Segment::{
    self, Bottom, BottomLeft, BottomRight, Centre, Left, Right, Top, TopLeft, TopRight,
};
use crate::session::{SegmentSet, SupportHeights};

/// Segments raised by `rise` above the tile base, tagged with `tag`.
type Band = (SegmentSet, u16, u8);

const fn band(segments: &[Segment], rise: u16, tag: u8) -> Band {
    (SegmentSet::of(segments), rise, tag)
}

const FLAT: &[Band] = &[(SegmentSet::ALL, 0, 0)];

const SLOPE_1: &[Band] = &[
    band(&[Top, TopLeft, TopRight], 0, 0),
    band(&[Left, Centre, Right], 0, 1),
    band(&[BottomLeft, BottomRight], 6, 0x1B),
    band(&[Bottom], 12, 0x1B),
];

const SLOPE_2: &[Band] = &[
    band(&[Right, TopRight, BottomRight], 0, 0),
    band(&[Top, Centre, Bottom], 0, 2),
    band(&[TopLeft, BottomLeft], 6, 0x17),
    band(&[Left], 12, 0x17),
];

const SLOPE_3: &[Band] = &[
    band(&[Top, TopRight, Right], 2, 3),
    band(&[TopLeft, Centre, BottomRight], 8, 3),
    band(&[Left, BottomLeft, Bottom], 14, 3),
];

const SLOPE_4: &[Band] = &[
    band(&[Bottom, BottomLeft, BottomRight], 0, 0),
    band(&[Left, Centre, Right], 0, 4),
    band(&[TopLeft, TopRight], 6, 0x1E),
    band(&[Top], 12, 0x1E),
];

const SLOPE_5: &[Band] = &[
    band(&[Top], 12, 0x1E),
    band(&[TopLeft, TopRight], 6, 0x1E),
    band(&[Left, Centre, Right], 0, 5),
    band(&[BottomLeft, BottomRight], 6, 0x1B),
    band(&[Bottom], 12, 0x1B),
];

const SLOPE_6: &[Band] = &[
    band(&[Right, BottomRight, Bottom], 2, 6),
    band(&[BottomLeft, Centre, TopRight], 8, 6),
    band(&[Left, TopLeft, Top], 14, 6),
];

const SLOPE_7: &[Band] = &[
    band(&[Right], 4, 0x17),
    band(&[TopRight, BottomRight], 10, 0x17),
    band(&[Top, Centre, Bottom], 16, 7),
    band(&[TopLeft, BottomLeft, Left], 16, 0),
];

const SLOPE_8: &[Band] = &[
    band(&[Left, TopLeft, BottomLeft], 0, 0),
    band(&[Top, Centre, Bottom], 0, 8),
    band(&[TopRight, BottomRight], 6, 0x1D),
    band(&[Right], 12, 0x1D),
];

const SLOPE_9: &[Band] = &[
    band(&[Top, TopLeft, Left], 2, 9),
    band(&[BottomLeft, Centre, TopRight], 8, 9),
    band(&[Bottom, BottomRight, Right], 14, 9),
];

const SLOPE_10: &[Band] = &[
    band(&[Left], 12, 0x17),
    band(&[TopLeft, BottomLeft], 6, 0x17),
    band(&[Top, Centre, Bottom], 0, 0x0A),
    band(&[TopRight, BottomRight], 6, 0x1D),
    band(&[Right], 12, 0x1D),
];

const SLOPE_11: &[Band] = &[
    band(&[Top], 4, 0x1B),
    band(&[TopLeft, TopRight], 10, 0x1B),
    band(&[Left, Centre, Right], 16, 0x0B),
    band(&[BottomLeft, BottomRight, Bottom], 16, 0),
];

const SLOPE_12: &[Band] = &[
    band(&[Left, BottomLeft, Bottom], 2, 0x0C),
    band(&[TopLeft, Centre, BottomRight], 8, 0x0C),
    band(&[Top, TopRight, Right], 14, 0x0C),
];

const SLOPE_13: &[Band] = &[
    band(&[Left], 4, 0x1D),
    band(&[TopLeft, BottomLeft], 10, 0x1D),
    band(&[Top, Centre, Bottom], 16, 0x0D),
    band(&[TopRight, BottomRight, Right], 16, 0),
];

const SLOPE_14: &[Band] = &[
    band(&[Bottom], 4, 0x1E),
    band(&[BottomLeft, BottomRight], 10, 0x1E),
    band(&[Left, Centre, Right], 16, 0x0E),
    band(&[TopLeft, TopRight, Top], 16, 0),
];

const STEEP_23: &[Band] = &[
    band(&[Right], 4, 0x17),
    band(&[TopRight, BottomRight], 10, 0x17),
    band(&[Top, Centre, Bottom], 16, 0x17),
    band(&[TopLeft, BottomLeft], 22, 0x17),
    band(&[Left], 28, 0x17),
];

const STEEP_27: &[Band] = &[
    band(&[Top], 4, 0x1B),
    band(&[TopLeft, TopRight], 10, 0x1B),
    band(&[Left, Centre, Right], 16, 0x1B),
    band(&[BottomLeft, BottomRight], 22, 0x1B),
    band(&[Bottom], 28, 0x1B),
];

const STEEP_29: &[Band] = &[
    band(&[Left], 4, 0x1D),
    band(&[TopLeft, BottomLeft], 10, 0x1D),
    band(&[Top, Centre, Bottom], 16, 0x1D),
    band(&[TopRight, BottomRight], 22, 0x1D),
    band(&[Right], 28, 0x1D),
];

const STEEP_30: &[Band] = &[
    band(&[Bottom], 4, 0x1E),
    band(&[BottomLeft, BottomRight], 10, 0x1E),
    band(&[Left, Centre, Right], 16, 0x1E),
    band(&[TopLeft, TopRight], 22, 0x1E),
    band(&[Top], 28, 0x1E),
];

fn bands(slope: u8) -> Option<&'static [Band]> {
    let bands = match slope {
        1 => SLOPE_1,
        2 => SLOPE_2,
        3 => SLOPE_3,
        4 => SLOPE_4,
        5 => SLOPE_5,
        6 => SLOPE_6,
        7 => SLOPE_7,
        8 => SLOPE_8,
        9 => SLOPE_9,
        10 => SLOPE_10,
        11 => SLOPE_11,
        12 => SLOPE_12,
        13 => SLOPE_13,
        14 => SLOPE_14,
        23 => STEEP_23,
        27 => STEEP_27,
        29 => STEEP_29,
        30 => STEEP_30,
        _ => return None,
    };
    Some(bands)
}

/// Writes the nine segment heights and the general height for a surface
/// tile at `height` with the camera-relative `slope`.
pub fn publish_surface_supports(supports: &mut SupportHeights, slope: u8, height: u16) {
    match bands(slope) {
        Some(bands) => {
            for &(segments, rise, tag) in bands {
                supports.set_segments(segments, height + rise, tag);
            }
            supports.set_general(height, slope);
        }
        None => {
            for &(segments, rise, tag) in FLAT {
                supports.set_segments(segments, height + rise, tag);
            }
            supports.set_general(height, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SegmentSupport;

    fn published(slope: u8, height: u16) -> SupportHeights {
        let mut supports = SupportHeights::default();
        publish_surface_supports(&mut supports, slope, height);
        supports
    }

    #[test]
    fn flat_tile_levels_every_segment() {
        let supports = published(0, 112);
        for segment in Segment::ALL {
            assert_eq!(supports.segment(segment), SegmentSupport { height: 112, slope: 0 });
        }
        assert_eq!(supports.general, SegmentSupport { height: 112, slope: 0 });
    }

    #[test]
    fn all_corners_raised_counts_as_flat() {
        assert_eq!(published(15, 64), published(0, 64));
    }

    #[test]
    fn diagonal_slope_climbs_in_three_bands() {
        let supports = published(3, 80);
        assert_eq!(supports.segment(Top).height, 82);
        assert_eq!(supports.segment(Centre).height, 88);
        assert_eq!(supports.segment(Bottom).height, 94);
        assert!(Segment::ALL.iter().all(|s| supports.segment(*s).slope == 3));
        assert_eq!(supports.general, SegmentSupport { height: 80, slope: 3 });
    }

    #[test]
    fn every_shape_covers_all_nine_segments() {
        for slope in 0..32u8 {
            let supports = published(slope, 48);
            for segment in Segment::ALL {
                let support = supports.segment(segment);
                assert_ne!(support.slope, SegmentSupport::UNSET_SLOPE, "slope {slope} {segment:?}");
                assert!(support.height >= 48);
            }
        }
    }

    #[test]
    fn steep_slope_reaches_two_steps_up() {
        let supports = published(23, 0);
        assert_eq!(supports.segment(Right).height, 4);
        assert_eq!(supports.segment(Left).height, 28);
        assert_eq!(supports.general.slope, 0x17);
    }
}
