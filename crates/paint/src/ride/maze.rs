//! Hedge, brick, ice and wooden mazes.
//!
//! A maze tile is a 4x4 grid of wall slots; bit `n` of the entry mask marks
//! a wall in slot `n`. Walls and the columns between them are drawn from one
//! table, each piece keyed by the slots that need it.

use crate::geometry::sprites::{
    SPR_MAZE_BASE_BRICK, SPR_MAZE_BASE_HEDGE, SPR_MAZE_BASE_ICE, SPR_MAZE_BASE_WOOD, SPR_MAZE_GROUND,
};
use crate::geometry::ImageId;
use crate::session::{PaintContext, PaintSink, Segment, SegmentSet, SegmentSupport};

use super::registry::TrackPaintCall;
use super::supports::paint_wooden_supports;

const WALL_CENTRE: u32 = 0;
const WALL_INNER_NE_SW: u32 = 1;
const WALL_INNER_NW_SE: u32 = 2;
const WALL_TOP_LEFT: u32 = 3;
const WALL_TOP_RIGHT: u32 = 4;
const WALL_BOTTOM_RIGHT: u32 = 5;
const WALL_BOTTOM_LEFT: u32 = 6;
const COLUMN_CENTRE: u32 = 7;
const COLUMN_TOP_RIGHT: u32 = 8;
const COLUMN_TOP_LEFT: u32 = 9;
const COLUMN_BOTTOM_LEFT: u32 = 10;
const COLUMN_BOTTOM_RIGHT: u32 = 11;
const COLUMN_CORNER: u32 = 12;

const WALL_HEIGHT: i16 = 9;
const CENTRE_COLUMN_MASK: u16 = bits(&[2, 6, 10, 14]);
const CENTRE_COLUMN_TOP: u16 = 12;
const CLEARANCE: u16 = 32;

#[derive(Debug, Clone, Copy)]
struct MazePiece {
    /// Drawn when any of these slots holds a wall.
    slots: u16,
    image: u32,
    offset: (i16, i16),
    length: (i16, i16, i16),
    bound: (i16, i16),
}

const fn bits(slots: &[u8]) -> u16 {
    let mut mask = 0u16;
    let mut i = 0;
    while i < slots.len() {
        mask |= 1u16 << slots[i];
        i += 1;
    }
    mask
}

const fn piece(
    slots: &[u8],
    image: u32,
    offset: (i16, i16),
    length: (i16, i16),
    bound: (i16, i16),
) -> MazePiece {
    MazePiece {
        slots: bits(slots),
        image,
        offset,
        length: (length.0, length.1, WALL_HEIGHT),
        bound,
    }
}

const PIECES: [MazePiece; 25] = [
    piece(&[3], WALL_CENTRE, (2, 2), (10, 10), (3, 3)),
    piece(&[7], WALL_CENTRE, (2, 18), (10, 10), (3, 19)),
    piece(&[11], WALL_CENTRE, (18, 18), (10, 10), (19, 19)),
    piece(&[15], WALL_CENTRE, (18, 2), (10, 10), (19, 3)),
    piece(&[0], WALL_TOP_LEFT, (2, 0), (10, 1), (3, 1)),
    piece(&[13], WALL_TOP_LEFT, (18, 0), (10, 1), (19, 1)),
    piece(&[5], WALL_BOTTOM_RIGHT, (2, 30), (10, 1), (3, 30)),
    piece(&[8], WALL_BOTTOM_RIGHT, (18, 30), (10, 1), (19, 30)),
    piece(&[1], WALL_TOP_RIGHT, (0, 2), (1, 10), (1, 3)),
    piece(&[4], WALL_TOP_RIGHT, (0, 18), (1, 10), (1, 19)),
    piece(&[12], WALL_BOTTOM_LEFT, (30, 2), (1, 10), (30, 3)),
    piece(&[9], WALL_BOTTOM_LEFT, (30, 18), (1, 10), (30, 19)),
    piece(&[2], WALL_INNER_NE_SW, (2, 14), (10, 4), (3, 14)),
    piece(&[10], WALL_INNER_NE_SW, (18, 14), (10, 4), (19, 14)),
    piece(&[14], WALL_INNER_NW_SE, (14, 2), (4, 10), (14, 3)),
    piece(&[6], WALL_INNER_NW_SE, (14, 18), (4, 10), (14, 19)),
    piece(&[0, 1], COLUMN_CORNER, (0, 0), (1, 1), (1, 1)),
    piece(&[4, 5], COLUMN_CORNER, (0, 30), (1, 1), (1, 30)),
    piece(&[8, 9], COLUMN_CORNER, (30, 30), (1, 1), (30, 30)),
    piece(&[12, 13], COLUMN_CORNER, (30, 0), (1, 1), (30, 1)),
    piece(&[0, 13, 14], COLUMN_TOP_LEFT, (14, 0), (2, 1), (15, 1)),
    piece(&[5, 6, 8], COLUMN_BOTTOM_RIGHT, (14, 30), (2, 1), (15, 30)),
    piece(&[1, 2, 4], COLUMN_TOP_RIGHT, (0, 14), (1, 2), (1, 15)),
    piece(&[9, 10, 12], COLUMN_BOTTOM_LEFT, (30, 14), (1, 2), (30, 15)),
    MazePiece {
        slots: CENTRE_COLUMN_MASK,
        image: COLUMN_CENTRE,
        offset: (14, 14),
        length: (2, 2, 8),
        bound: (15, 15),
    },
];

/// First wall image for the wall style stored in the support colour.
fn wall_base(style: u8) -> u32 {
    match style {
        1 => SPR_MAZE_BASE_HEDGE,
        2 => SPR_MAZE_BASE_ICE,
        3 => SPR_MAZE_BASE_WOOD,
        _ => SPR_MAZE_BASE_BRICK,
    }
}

pub fn paint_maze(ctx: &mut PaintContext, sink: &mut dyn PaintSink, call: &TrackPaintCall<'_>) {
    let entry = call.track.maze_entry.rotate_left(u32::from(call.direction) * 4);
    let height = call.height;
    let z = height as i16;

    let ground = ImageId::new(SPR_MAZE_GROUND).with_template(call.colours.structure);
    sink.add_parent(ctx.primitive(ground, (0, 0), (32, 32, 0), z));

    paint_wooden_supports(
        ctx,
        sink,
        call.direction & 1,
        call.ground,
        height,
        call.colours.supports,
    );

    ctx.supports
        .block_segments(SegmentSet::ALL.without(Segment::Centre.bit()));

    let base = wall_base(call.ride.track_colour_supports);
    for piece in PIECES.iter().filter(|piece| entry & piece.slots != 0) {
        let image = ImageId::new(base + piece.image).with_template(call.colours.structure);
        let primitive = ctx
            .primitive(image, piece.offset, piece.length, z)
            .with_bound_offset((piece.bound.0, piece.bound.1, z + 2));
        sink.add_parent(primitive);
    }

    if entry & CENTRE_COLUMN_MASK != 0 {
        ctx.supports.set_segments(
            Segment::Centre.bit(),
            height + CENTRE_COLUMN_TOP,
            SegmentSupport::CLEARANCE_SLOPE,
        );
    }
    ctx.supports.raise_clearance(height + CLEARANCE);
}
