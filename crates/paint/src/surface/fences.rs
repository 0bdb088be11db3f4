//! Fences along the park boundary.

use crate::geometry::sprites::{
    SPR_PARK_FENCE_FLAT_NW_SE, SPR_PARK_FENCE_FLAT_SW_NE, SPR_PARK_FENCE_RAISED_A_NW_SE,
    SPR_PARK_FENCE_RAISED_A_SW_NE, SPR_PARK_FENCE_RAISED_B_NW_SE, SPR_PARK_FENCE_RAISED_B_SW_NE,
};
use crate::geometry::ImageId;
use crate::map::{SurfaceElement, SLOPE_STEEP};
use crate::session::{InteractionKind, PaintContext, PaintSink};

const FENCE_BOUND_HEIGHT: i16 = 9;

/// Slope bits and images for one fence side. `near` and `far` are the two
/// corners the fence runs between; `steep_near` and `steep_far` choose the
/// image on the upper half of a steep slope.
#[derive(Debug, Clone, Copy)]
struct FenceSide {
    near: u8,
    far: u8,
    steep_near: u8,
    steep_far: u8,
    flat: u32,
    rising: u32,
    falling: u32,
    offset: (i16, i16),
    size: (i16, i16),
    bound_offset: (i16, i16),
}

impl FenceSide {
    /// Images used on a steep slope when both corners are raised.
    fn steep_images(&self, side: usize) -> (u32, u32) {
        if side < 2 {
            (self.falling, self.rising)
        } else {
            (self.rising, self.falling)
        }
    }
}

const FENCE_SIDES: [FenceSide; 4] = [
    FenceSide {
        near: 1,
        far: 8,
        steep_near: 4,
        steep_far: 2,
        flat: SPR_PARK_FENCE_FLAT_SW_NE,
        rising: SPR_PARK_FENCE_RAISED_B_SW_NE,
        falling: SPR_PARK_FENCE_RAISED_A_SW_NE,
        offset: (1, 31),
        size: (30, 1),
        bound_offset: (1, 31),
    },
    FenceSide {
        near: 1,
        far: 2,
        steep_near: 4,
        steep_far: 8,
        flat: SPR_PARK_FENCE_FLAT_NW_SE,
        rising: SPR_PARK_FENCE_RAISED_B_NW_SE,
        falling: SPR_PARK_FENCE_RAISED_A_NW_SE,
        offset: (31, 0),
        size: (1, 30),
        bound_offset: (31, 1),
    },
    FenceSide {
        near: 4,
        far: 2,
        steep_near: 8,
        steep_far: 1,
        flat: SPR_PARK_FENCE_FLAT_SW_NE,
        rising: SPR_PARK_FENCE_RAISED_A_SW_NE,
        falling: SPR_PARK_FENCE_RAISED_B_SW_NE,
        offset: (1, 0),
        size: (30, 1),
        bound_offset: (1, 1),
    },
    FenceSide {
        near: 4,
        far: 8,
        steep_near: 2,
        steep_far: 1,
        flat: SPR_PARK_FENCE_FLAT_NW_SE,
        rising: SPR_PARK_FENCE_RAISED_A_NW_SE,
        falling: SPR_PARK_FENCE_RAISED_B_NW_SE,
        offset: (1, 1),
        size: (1, 30),
        bound_offset: (1, 1),
    },
];

/// Fence sides present once the stored directions are turned by `rotation`.
pub fn rotated_fence_mask(fences: u8, rotation: u8) -> u8 {
    let shifted = u16::from(fences & 0x0F) << (rotation & 3);
    ((shifted | (shifted >> 4)) & 0x0F) as u8
}

/// Picks the fence image and the height it stands at.
fn fence_image(side: usize, slope: u8, height: u16) -> (u32, u16) {
    let geometry = &FENCE_SIDES[side];
    if slope & geometry.near == 0 {
        let image = if slope & geometry.far != 0 {
            geometry.falling
        } else {
            geometry.flat
        };
        return (image, height);
    }
    if slope & geometry.far == 0 {
        return (geometry.rising, height);
    }

    let (steep_near_image, steep_far_image) = geometry.steep_images(side);
    let image = if slope & SLOPE_STEEP == 0 {
        geometry.flat
    } else if slope & geometry.steep_near != 0 {
        steep_near_image
    } else if slope & geometry.steep_far != 0 {
        steep_far_image
    } else {
        geometry.flat
    };
    (image, height + 16)
}

/// Draws the park fences stored on `element`. `slope` is already relative to
/// the camera rotation.
pub fn paint_park_fences(
    ctx: &mut PaintContext,
    sink: &mut impl PaintSink,
    element: &SurfaceElement,
    slope: u8,
    height: u16,
) {
    let fences = element.park_fences();
    if fences == 0 {
        return;
    }

    ctx.interaction = InteractionKind::Park;
    let mask = rotated_fence_mask(fences, ctx.rotation());
    for (side, geometry) in FENCE_SIDES.iter().enumerate() {
        if mask & (1 << side) == 0 {
            continue;
        }
        let (image, z) = fence_image(side, slope, height);
        let z = z as i16;
        let primitive = ctx
            .primitive(
                ImageId::new(image),
                geometry.offset,
                (geometry.size.0, geometry.size.1, FENCE_BOUND_HEIGHT),
                z,
            )
            .with_bound_offset((geometry.bound_offset.0, geometry.bound_offset.1, z + 1));
        sink.add_parent(primitive);
    }
    ctx.interaction = InteractionKind::Terrain;
}
