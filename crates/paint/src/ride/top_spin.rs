//! Top spin: a 3x3 flat ride whose gondola swings on two arms.
//!
//! Each tile gets a floor, fences on the outer edges, and a share of the
//! vehicle. The vehicle is drawn once per outer tile, offset back towards
//! the ride centre so the pieces overlap into one sprite.

use crate::geometry::sprites::{
    SPR_FLAT_RIDE_FENCE_BACK, SPR_FLAT_RIDE_FENCE_BACK_RIGHT, SPR_FLAT_RIDE_FENCE_FRONT,
    SPR_FLAT_RIDE_FENCE_RIGHT, SPR_FLAT_RIDE_FLOOR_CORNER, SPR_FLAT_RIDE_FLOOR_EDGE_LEFT,
    SPR_FLAT_RIDE_FLOOR_EDGE_RIGHT, SPR_FLAT_RIDE_FLOOR_PLAIN,
};
use crate::geometry::ImageId;
use crate::session::Segment::{
    Bottom, BottomLeft, BottomRight, Left, Right, Top, TopLeft, TopRight,
};
use crate::session::{InteractionKind, PaintContext, PaintPrimitive, PaintSink, SegmentSet, SegmentSupport};

use super::registry::TrackPaintCall;
use super::state::VehicleState;
use super::supports::paint_wooden_supports;

/// Horizontal seat travel per arm step, along the ride's facing axis.
const SEAT_POSITION_OFFSET: [i16; 49] = [
    0, 4, 9, 13, 17, 21, 24, 27, 29, 31, 33, 34, 34, 34, 33, 31, 29, 27, 24, 21, 17, 13, 9, 4, 0,
    -3, -8, -12, -16, -20, -23, -26, -28, -30, -32, -33, -33, -33, -32, -30, -28, -26, -23, -20,
    -16, -12, -8, -3, 0,
];

/// Seat height above the hub per arm step.
const SEAT_HEIGHT_OFFSET: [i16; 49] = [
    -10, -10, -9, -7, -4, -1, 2, 6, 11, 16, 21, 26, 31, 37, 42, 47, 52, 57, 61, 64, 67, 70, 72, 73,
    73, 73, 72, 70, 67, 64, 61, 57, 52, 47, 42, 37, 31, 26, 21, 16, 11, 6, 2, -1, -4, -7, -9, -10,
    -10,
];

const MAX_ARM_STEP: u8 = 48;
const ARM_STEPS: u32 = 48;

const VEHICLE_LENGTH: (i16, i16, i16) = (24, 24, 90);
const VEHICLE_LIFT: i16 = 3;

const IMAGE_SEAT_RESTRAINTS: u32 = 64;
const IMAGE_RIDERS: u32 = 76;
const IMAGE_LEFT_ARM: u32 = 380;
const IMAGE_RIGHT_ARM: u32 = 476;
const IMAGE_LEFT_SUPPORT: u32 = 572;
const IMAGE_RIGHT_SUPPORT: u32 = 573;

/// Neighbour tile behind each fence side, before the camera rotation.
const FENCE_NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[derive(Debug, Clone, Copy)]
struct Fence {
    /// Side of the tile, turned by the camera rotation to find the neighbour.
    side: u8,
    image: u32,
    child: bool,
    length: (i16, i16),
    bound: (i16, i16),
    lift: i16,
}

const fn fence(side: u8, image: u32, child: bool, length: (i16, i16), bound: (i16, i16)) -> Fence {
    Fence {
        side,
        image,
        child,
        length,
        bound,
        lift: 2,
    }
}

#[derive(Debug, Clone, Copy)]
struct TileLayout {
    floor: u32,
    fences: &'static [Fence],
    /// Image offset that places this tile's copy of the vehicle on the hub.
    vehicle: Option<(i16, i16)>,
    /// Segments left walkable at floor level; the rest are blocked.
    open: SegmentSet,
    clearance: u16,
}

const FENCE_BACK: Fence = fence(0, SPR_FLAT_RIDE_FENCE_BACK, true, (32, 1), (0, 2));
const FENCE_RIGHT: Fence = fence(3, SPR_FLAT_RIDE_FENCE_RIGHT, true, (1, 32), (2, 0));
const FENCE_FRONT: Fence = fence(2, SPR_FLAT_RIDE_FENCE_FRONT, false, (32, 1), (0, 30));

const TILES: [TileLayout; 9] = [
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_PLAIN,
        fences: &[],
        vehicle: None,
        open: SegmentSet::NONE,
        clearance: 112,
    },
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_PLAIN,
        fences: &[
            FENCE_BACK,
            fence(3, SPR_FLAT_RIDE_FENCE_RIGHT, true, (1, 32), (0, 2)),
        ],
        vehicle: Some((32, 32)),
        open: SegmentSet::of(&[Top, TopLeft, TopRight]),
        clearance: 110,
    },
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_PLAIN,
        fences: &[FENCE_RIGHT],
        vehicle: None,
        open: SegmentSet::NONE,
        clearance: 110,
    },
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_EDGE_LEFT,
        fences: &[FENCE_RIGHT, FENCE_FRONT],
        vehicle: Some((32, -32)),
        open: SegmentSet::of(&[Right, TopRight, BottomRight]),
        clearance: 110,
    },
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_PLAIN,
        fences: &[FENCE_BACK],
        vehicle: None,
        open: SegmentSet::NONE,
        clearance: 110,
    },
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_EDGE_LEFT,
        fences: &[FENCE_FRONT],
        vehicle: Some((0, -32)),
        open: SegmentSet::NONE,
        clearance: 112,
    },
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_EDGE_RIGHT,
        fences: &[
            FENCE_BACK,
            fence(1, SPR_FLAT_RIDE_FENCE_BACK_RIGHT, false, (1, 32), (30, 2)),
        ],
        vehicle: Some((-32, 32)),
        open: SegmentSet::of(&[Left, TopLeft, BottomLeft]),
        clearance: 110,
    },
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_CORNER,
        fences: &[
            Fence {
                lift: 3,
                ..fence(1, SPR_FLAT_RIDE_FENCE_BACK_RIGHT, false, (1, 28), (29, 0))
            },
            Fence {
                lift: 3,
                ..fence(2, SPR_FLAT_RIDE_FENCE_FRONT, false, (28, 1), (0, 29))
            },
        ],
        vehicle: Some((-32, -32)),
        open: SegmentSet::of(&[Bottom, BottomLeft, BottomRight]),
        clearance: 110,
    },
    TileLayout {
        floor: SPR_FLAT_RIDE_FLOOR_EDGE_RIGHT,
        fences: &[fence(1, SPR_FLAT_RIDE_FENCE_BACK_RIGHT, false, (1, 32), (30, 0))],
        vehicle: Some((-32, 0)),
        open: SegmentSet::NONE,
        clearance: 112,
    },
];

pub fn paint_top_spin(ctx: &mut PaintContext, sink: &mut dyn PaintSink, call: &TrackPaintCall<'_>) {
    let Some(layout) = TILES.get(usize::from(call.sequence)) else {
        return;
    };
    let height = call.height;
    let z = height as i16;

    paint_wooden_supports(
        ctx,
        sink,
        call.direction & 1,
        call.ground,
        height,
        call.colours.structure,
    );

    let floor = ImageId::new(layout.floor).with_template(call.colours.track);
    sink.add_parent(ctx.primitive(floor, (0, 0), (32, 32, 1), z));

    for fence in layout.fences {
        let (dx, dy) = FENCE_NEIGHBOURS[usize::from((ctx.rotation() + fence.side) & 3)];
        let neighbour = ctx.tile.offset((dx, dy));
        if call.ride.is_station_opening(call.track.station_index, neighbour) {
            continue;
        }
        let image = ImageId::new(fence.image).with_template(call.colours.structure);
        let primitive = ctx
            .primitive(image, (0, 0), (fence.length.0, fence.length.1, 7), z)
            .with_bound_offset((fence.bound.0, fence.bound.1, z + fence.lift));
        if fence.child {
            sink.add_child(primitive);
        } else {
            sink.add_parent(primitive);
        }
    }

    if let Some(offset) = layout.vehicle {
        paint_vehicle(ctx, sink, call, offset);
    }

    ctx.supports.block_segments(SegmentSet::ALL.without(layout.open));
    ctx.supports
        .set_segments(layout.open, height + 2, SegmentSupport::CLEARANCE_SLOPE);
    ctx.supports.raise_clearance(height + layout.clearance);
}

/// Colour templates for the support, arm and seat groups.
fn vehicle_templates(call: &TrackPaintCall<'_>) -> (ImageId, ImageId, ImageId) {
    if !call.colours.structure_is_neutral() {
        let template = call.colours.structure;
        return (template, template, template);
    }
    let ride = call.ride;
    (
        ImageId::NEUTRAL.with_remap(ride.track_colour_main, ride.track_colour_supports),
        ImageId::NEUTRAL.with_remap(ride.track_colour_main, ride.track_colour_additional),
        ImageId::NEUTRAL.with_remap(ride.vehicle_body_colour, ride.vehicle_trim_colour),
    )
}

fn seat_image(vehicle: Option<&VehicleState>, direction: u8, base: u32) -> u32 {
    let direction = u32::from(direction);
    match vehicle {
        Some(vehicle) if vehicle.restraints_position >= 64 => {
            u32::from((vehicle.restraints_position - 64) >> 6)
                + direction * 3
                + base
                + IMAGE_SEAT_RESTRAINTS
        }
        _ => direction * 16 + u32::from(vehicle.map_or(0, |v| v.seat_rotation)) + base,
    }
}

/// Where one group of vehicle images is drawn. All groups share the hub's
/// bounding box so they sort as one object.
#[derive(Debug, Clone, Copy)]
struct VehiclePiece {
    offset: (i16, i16),
    z: i16,
    bound: (i16, i16, i16),
}

impl VehiclePiece {
    fn primitive(&self, ctx: &PaintContext, index: u32, template: ImageId) -> PaintPrimitive {
        ctx.primitive(ImageId::new(index).with_template(template), self.offset, VEHICLE_LENGTH, self.z)
            .with_bound_offset(self.bound)
    }
}

fn paint_vehicle(
    ctx: &mut PaintContext,
    sink: &mut dyn PaintSink,
    call: &TrackPaintCall<'_>,
    (x, y): (i16, i16),
) {
    let vehicle = call.ride.vehicle.as_ref();
    if vehicle.is_some() {
        ctx.interaction = InteractionKind::Sprite;
    }

    let direction = call.direction;
    let axis = u32::from(direction & 1);
    let base = call.ride.vehicle_base_image;
    let arm = vehicle.map_or(0, |v| v.arm_rotation.min(MAX_ARM_STEP));
    let mut swing = u32::from(arm);
    if direction & 2 != 0 && swing != 0 {
        swing = ARM_STEPS - swing;
    }

    let z = call.height as i16 + VEHICLE_LIFT;
    let bound = (x + 16, y + 16, z);
    let (support_template, arm_template, seat_template) = vehicle_templates(call);
    let arm_index = swing + axis * ARM_STEPS + base;
    let piece = VehiclePiece { offset: (x, y), z, bound };
    sink.add_parent(piece.primitive(ctx, base + IMAGE_LEFT_SUPPORT + axis * 2, support_template));
    sink.add_child(piece.primitive(ctx, arm_index + IMAGE_LEFT_ARM, arm_template));

    let seat = seat_image(vehicle, direction, base);
    let travel = SEAT_POSITION_OFFSET[usize::from(arm)];
    let seat_offset = match direction {
        0 => (x - travel, y),
        1 => (x, y + travel),
        2 => (x + travel, y),
        _ => (x, y - travel),
    };
    let seat_piece = VehiclePiece {
        offset: seat_offset,
        z: z + SEAT_HEIGHT_OFFSET[usize::from(arm)],
        bound,
    };
    sink.add_child(seat_piece.primitive(ctx, seat, seat_template));

    if let Some(vehicle) = vehicle {
        if ctx.config.zoom() < 2 && vehicle.peep_count > 0 {
            for (pair, colours) in vehicle.peep_tshirt_colours.chunks_exact(2).enumerate() {
                if usize::from(vehicle.peep_count) <= pair * 2 {
                    break;
                }
                let riders = ImageId::NEUTRAL.with_remap(colours[0], colours[1]);
                let index = seat + IMAGE_RIDERS * (pair as u32 + 1);
                sink.add_child(seat_piece.primitive(ctx, index, riders));
            }
        }
    }

    sink.add_child(piece.primitive(ctx, arm_index + IMAGE_RIGHT_ARM, arm_template));
    sink.add_child(piece.primitive(ctx, base + IMAGE_RIGHT_SUPPORT + axis * 2, support_template));

    ctx.interaction = InteractionKind::Ride;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::geometry::{COLOUR_BRIGHT_RED, COLOUR_GREY};
    use crate::map::{TileCoord, TrackElement};
    use crate::ride::registry::TRACK_FLAT_3X3;
    use crate::ride::state::{RideState, TrackColours};
    use crate::ride::RideType;
    use crate::session::{PaintList, Segment};

    const BASE: u32 = 10_000;
    const TILE: TileCoord = TileCoord::new(5, 5);

    fn ride() -> RideState {
        let mut ride = RideState::new(RideType::TopSpin);
        ride.track_colour_main = COLOUR_BRIGHT_RED;
        ride.track_colour_additional = COLOUR_GREY;
        ride.vehicle_base_image = BASE;
        ride
    }

    fn paint(ride: &RideState, sequence: u8, direction: u8, zoom: u8) -> (PaintContext, PaintList) {
        let config = DisplayConfig::new(0, zoom).expect("config");
        let mut ctx = PaintContext::new(config);
        ctx.begin_tile(TILE);
        ctx.interaction = InteractionKind::Ride;
        let track = TrackElement {
            track_type: TRACK_FLAT_3X3,
            sequence,
            base_height: 14,
            ..Default::default()
        };
        let call = TrackPaintCall {
            ride,
            track: &track,
            sequence,
            direction,
            height: 112,
            ground: 112,
            colours: TrackColours::for_ride(ride, false),
        };
        let mut list = PaintList::new();
        paint_top_spin(&mut ctx, &mut list, &call);
        (ctx, list)
    }

    #[test]
    fn centre_tile_is_floor_only() {
        let (ctx, list) = paint(&ride(), 0, 0, 0);
        assert_eq!(list.len(), 1);
        let floor = &list.primitives()[0];
        assert_eq!(floor.image.index(), SPR_FLAT_RIDE_FLOOR_PLAIN);
        assert_eq!(floor.image.primary_colour(), COLOUR_BRIGHT_RED);
        assert_eq!(floor.bounds.length, (32, 32, 1));
        assert!(Segment::ALL
            .iter()
            .all(|segment| ctx.supports.segment(*segment).is_blocked()));
        assert_eq!(ctx.supports.general.height, 224);
    }

    #[test]
    fn corner_tile_draws_fences_and_vehicle() {
        let (ctx, list) = paint(&ride(), 1, 0, 0);
        let images: Vec<u32> = list.primitives().iter().map(|p| p.image.index()).collect();
        assert_eq!(
            images,
            vec![
                SPR_FLAT_RIDE_FLOOR_PLAIN,
                SPR_FLAT_RIDE_FENCE_BACK,
                SPR_FLAT_RIDE_FENCE_RIGHT,
                BASE + IMAGE_LEFT_SUPPORT,
                BASE + IMAGE_LEFT_ARM,
                BASE,
                BASE + IMAGE_RIGHT_ARM,
                BASE + IMAGE_RIGHT_SUPPORT,
            ]
        );
        assert_eq!(list.primitives()[1].parent, Some(0));
        assert_eq!(list.primitives()[3].bounds.offset, (48, 48, 115));
        assert_eq!(ctx.supports.segment(Segment::Top).height, 114);
        assert!(ctx.supports.segment(Segment::Bottom).is_blocked());
        assert_eq!(ctx.supports.general.height, 222);
    }

    #[test]
    fn entrance_suppresses_the_fence_behind_it() {
        let mut ride = ride();
        ride.entrances[0] = Some(TILE.offset((0, -1)));
        let (_, list) = paint(&ride, 1, 0, 0);
        assert!(list
            .primitives()
            .iter()
            .all(|p| p.image.index() != SPR_FLAT_RIDE_FENCE_BACK));
        assert!(list
            .primitives()
            .iter()
            .any(|p| p.image.index() == SPR_FLAT_RIDE_FENCE_RIGHT));
    }

    #[test]
    fn arm_angle_moves_the_seat() {
        let mut ride = ride();
        ride.vehicle = Some(VehicleState {
            arm_rotation: 12,
            ..Default::default()
        });
        let (_, list) = paint(&ride, 1, 0, 0);
        let arm = &list.primitives()[4];
        assert_eq!(arm.image.index(), BASE + IMAGE_LEFT_ARM + 12);
        let seat = &list.primitives()[5];
        assert_eq!(seat.offset, (32 - 34, 32));
        assert_eq!(seat.z_offset, 115 + 31);

        let (_, flipped) = paint(&ride, 1, 2, 0);
        assert_eq!(
            flipped.primitives()[4].image.index(),
            BASE + IMAGE_LEFT_ARM + 36
        );
        assert_eq!(flipped.primitives()[5].offset, (32 + 34, 32));
    }

    #[test]
    fn riders_drawn_in_pairs_when_zoomed_in() {
        let mut ride = ride();
        ride.vehicle = Some(VehicleState {
            peep_count: 5,
            peep_tshirt_colours: [1, 2, 3, 4, 5, 6, 7, 8],
            ..Default::default()
        });
        let (ctx, list) = paint(&ride, 1, 1, 0);
        let seat = BASE + 16;
        let riders: Vec<&PaintPrimitive> = list
            .primitives()
            .iter()
            .filter(|p| p.image.index() > seat && p.image.index() < BASE + IMAGE_LEFT_ARM)
            .collect();
        assert_eq!(riders.len(), 3);
        assert_eq!(riders[0].image.index(), seat + 76);
        assert_eq!(riders[2].image.index(), seat + 228);
        assert_eq!(riders[1].image.primary_colour(), 3);
        assert_eq!(riders[1].image.secondary_colour(), 4);
        assert!(list.primitives()[3..]
            .iter()
            .all(|p| p.interaction == InteractionKind::Sprite));
        assert_eq!(ctx.interaction, InteractionKind::Ride);

        let (_, far) = paint(&ride, 1, 1, 2);
        assert_eq!(far.len(), list.len() - 3);
    }

    #[test]
    fn open_restraints_pick_the_restraint_frames() {
        let mut ride = ride();
        ride.vehicle = Some(VehicleState {
            restraints_position: 128,
            ..Default::default()
        });
        let (_, list) = paint(&ride, 3, 1, 0);
        let seat = &list.primitives()[5];
        assert_eq!(seat.image.index(), 1 + 3 + BASE + IMAGE_SEAT_RESTRAINTS);
    }

    #[test]
    fn ghost_template_covers_the_vehicle() {
        let ride = ride();
        let config = DisplayConfig::default();
        let mut ctx = PaintContext::new(config);
        ctx.begin_tile(TILE);
        let track = TrackElement {
            sequence: 8,
            ghost: true,
            ..Default::default()
        };
        let call = TrackPaintCall {
            ride: &ride,
            track: &track,
            sequence: 8,
            direction: 0,
            height: 112,
            ground: 112,
            colours: TrackColours::for_ride(&ride, true),
        };
        let mut list = PaintList::new();
        paint_top_spin(&mut ctx, &mut list, &call);
        let ghost = call.colours.structure;
        assert!(list.primitives()[1..]
            .iter()
            .all(|p| p.image.raw() & !0x0007_FFFF == ghost.raw()));
    }
}
