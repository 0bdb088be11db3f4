//! Single-tile stalls and facilities.

use crate::geometry::sprites::{SPR_FLOOR_FOUNDATION_NE_SW, SPR_FLOOR_FOUNDATION_NW_SE};
use crate::geometry::ImageId;
use crate::session::{PaintContext, PaintSink, SegmentSet};

use super::registry::TrackPaintCall;
use super::supports::paint_wooden_supports;

const SHOP_LENGTH: (i16, i16, i16) = (28, 28, 45);
const SHOP_CLEARANCE: u16 = 48;
const FACILITY_HEIGHT: i16 = 29;
const FACILITY_CLEARANCE: u16 = 32;

/// Stall: one building image per direction, standing on a foundation when
/// it is raised on supports.
pub fn paint_shop(ctx: &mut PaintContext, sink: &mut dyn PaintSink, call: &TrackPaintCall<'_>) {
    let height = call.height;
    let z = height as i16;
    let supported = paint_wooden_supports(
        ctx,
        sink,
        call.direction & 1,
        call.ground,
        height,
        call.colours.supports,
    );
    ctx.supports.block_segments(SegmentSet::ALL);

    let mut template = call.colours.track;
    if template.has_flags(ImageId::FLAG_SECONDARY_REMAP) {
        template = template.without_secondary_remap();
    }
    let building = ImageId::new(call.ride.vehicle_base_image + u32::from(call.direction))
        .with_template(template);

    let building = ctx
        .primitive(building, (0, 0), SHOP_LENGTH, z)
        .with_bound_offset((2, 2, z));
    if supported {
        let foundation = if call.direction & 1 == 0 {
            SPR_FLOOR_FOUNDATION_NE_SW
        } else {
            SPR_FLOOR_FOUNDATION_NW_SE
        };
        let foundation = ImageId::new(foundation).with_template(call.colours.supports);
        sink.add_parent(
            ctx.primitive(foundation, (0, 0), SHOP_LENGTH, z)
                .with_bound_offset((2, 2, z)),
        );
        sink.add_child(building);
    } else {
        sink.add_parent(building);
    }

    ctx.supports.raise_clearance(height + SHOP_CLEARANCE);
}

/// Toilets and similar: a door facing the path, plus a back wall for the
/// two directions whose door sits at the front of the tile.
pub fn paint_facility(ctx: &mut PaintContext, sink: &mut dyn PaintSink, call: &TrackPaintCall<'_>) {
    let height = call.height;
    let z = height as i16;
    let direction = call.direction;
    let supported = paint_wooden_supports(
        ctx,
        sink,
        direction & 1,
        call.ground,
        height,
        call.colours.supports,
    );
    ctx.supports.block_segments(SegmentSet::ALL);

    let door = ImageId::new(call.ride.vehicle_base_image + u32::from((direction + 2) & 3))
        .with_template(call.colours.track);
    let length = if direction & 1 == 0 {
        (28, 2, FACILITY_HEIGHT)
    } else {
        (2, 28, FACILITY_HEIGHT)
    };
    let bound = (
        if direction == 3 { 28 } else { 2 },
        if direction == 0 { 28 } else { 2 },
        z,
    );

    let door_primitive = ctx
        .primitive(door, (0, 0), length, z)
        .with_bound_offset(bound);
    if supported {
        let foundation = ImageId::new(SPR_FLOOR_FOUNDATION_NE_SW).with_template(call.colours.supports);
        sink.add_parent(ctx.primitive(foundation, (0, 0), length, z).with_bound_offset(bound));
        sink.add_child(door_primitive);
    } else {
        sink.add_parent(door_primitive);
    }

    match direction {
        1 => {
            sink.add_parent(
                ctx.primitive(door.offset(2), (0, 0), (2, 28, FACILITY_HEIGHT), z)
                    .with_bound_offset((28, 2, z)),
            );
        }
        2 => {
            sink.add_parent(
                ctx.primitive(door.offset(4), (0, 0), (28, 2, FACILITY_HEIGHT), z)
                    .with_bound_offset((2, 28, z)),
            );
        }
        _ => {}
    }

    ctx.supports.raise_clearance(height + FACILITY_CLEARANCE);
}
