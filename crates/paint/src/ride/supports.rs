//! Wooden support columns under flat rides and buildings.
//!
//! Only the straight column pieces are drawn: one 16-unit column per step
//! from the ground (or the water surface) up to the ride floor.

use crate::geometry::sprites::SPR_WOODEN_SUPPORT_COLUMN_NE_SW;
use crate::geometry::ImageId;
use crate::session::{PaintContext, PaintSink};

const COLUMN_STEP: u16 = 16;

/// Draws columns along `axis` (0 = NE-SW, 1 = NW-SE) between `ground` and
/// `height`. Returns whether any column was drawn.
pub fn paint_wooden_supports(
    ctx: &PaintContext,
    sink: &mut dyn PaintSink,
    axis: u8,
    ground: u16,
    height: u16,
    template: ImageId,
) -> bool {
    let water = ctx.water_height.div_ceil(COLUMN_STEP) * COLUMN_STEP;
    let image = ImageId::new(SPR_WOODEN_SUPPORT_COLUMN_NE_SW + u32::from(axis & 1)).with_template(template);

    let mut z = ground.max(water);
    let mut drawn = false;
    while z < height {
        sink.add_parent(ctx.primitive(image, (0, 0), (32, 32, COLUMN_STEP as i16 - 1), z as i16));
        z += COLUMN_STEP;
        drawn = true;
    }
    drawn
}
