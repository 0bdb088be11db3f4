use serde::Deserialize;
use tracing::{debug, trace};

use crate::map::{MapQuery, SurfaceElement, TrackElement};
use crate::session::{InteractionKind, PaintContext, PaintSink};

use super::state::{RideLookup, RideState, TrackColours};
use super::{maze, shop, top_spin};

pub const TRACK_FLAT_1X1_A: u8 = 118;
pub const TRACK_FLAT_1X1_B: u8 = 121;
pub const TRACK_FLAT_3X3: u8 = 123;
pub const TRACK_MAZE: u8 = 101;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideType {
    TopSpin,
    Maze,
    Shop,
    Facility,
}

/// Everything a track painter needs about the piece on the current tile.
#[derive(Debug, Clone, Copy)]
pub struct TrackPaintCall<'a> {
    pub ride: &'a RideState,
    pub track: &'a TrackElement,
    /// Tile within the piece after the direction has been folded in.
    pub sequence: u8,
    /// Track direction relative to the camera.
    pub direction: u8,
    pub height: u16,
    /// World z of the land under the piece.
    pub ground: u16,
    pub colours: TrackColours,
}

pub type TrackPaintFn = fn(&mut PaintContext, &mut dyn PaintSink, &TrackPaintCall<'_>);

/// How the stored sequence index maps onto the painter's tile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceRotation {
    /// Single-tile pieces; the sequence is passed through.
    Fixed,
    /// 3x3 pieces whose tiles are renumbered by each quarter turn.
    ThreeByThree,
}

#[derive(Debug, Clone, Copy)]
pub struct RidePaintEntry {
    pub track_type: u8,
    pub paint: TrackPaintFn,
    pub rotation: SequenceRotation,
}

/// Painter table keyed by ride type and track piece.
#[derive(Debug)]
pub struct RidePaintRegistry {
    entries: &'static [(RideType, RidePaintEntry)],
}

static STANDARD_REGISTRY: RidePaintRegistry = RidePaintRegistry::new(&[
    (
        RideType::TopSpin,
        RidePaintEntry {
            track_type: TRACK_FLAT_3X3,
            paint: top_spin::paint_top_spin,
            rotation: SequenceRotation::ThreeByThree,
        },
    ),
    (
        RideType::Maze,
        RidePaintEntry {
            track_type: TRACK_MAZE,
            paint: maze::paint_maze,
            rotation: SequenceRotation::Fixed,
        },
    ),
    (
        RideType::Shop,
        RidePaintEntry {
            track_type: TRACK_FLAT_1X1_A,
            paint: shop::paint_shop,
            rotation: SequenceRotation::Fixed,
        },
    ),
    (
        RideType::Shop,
        RidePaintEntry {
            track_type: TRACK_FLAT_1X1_B,
            paint: shop::paint_shop,
            rotation: SequenceRotation::Fixed,
        },
    ),
    (
        RideType::Facility,
        RidePaintEntry {
            track_type: TRACK_FLAT_1X1_A,
            paint: shop::paint_facility,
            rotation: SequenceRotation::Fixed,
        },
    ),
]);

impl RidePaintRegistry {
    pub const fn new(entries: &'static [(RideType, RidePaintEntry)]) -> Self {
        Self { entries }
    }

    /// Painters for every ride type this crate knows.
    pub fn standard() -> &'static Self {
        &STANDARD_REGISTRY
    }

    pub fn resolve(&self, ride_type: RideType, track_type: u8) -> Option<&RidePaintEntry> {
        self.entries
            .iter()
            .find(|(kind, entry)| *kind == ride_type && entry.track_type == track_type)
            .map(|(_, entry)| entry)
    }
}

const QUARTER_TURN: [u8; 9] = [0, 3, 5, 7, 2, 8, 1, 6, 4];

/// Maps the stored sequence index of a 3x3 piece facing `direction` onto the
/// tile layout of direction 0. Indices outside the piece pass through.
pub fn rotate_sequence_index(direction: u8, sequence: u8) -> u8 {
    if usize::from(sequence) >= QUARTER_TURN.len() {
        return sequence;
    }
    (0..direction & 3).fold(sequence, |tile, _| QUARTER_TURN[usize::from(tile)])
}

/// Paints one track element. `direction` already includes the camera
/// rotation; `height` is the element's world z.
pub fn paint_ride_track_tile(
    ctx: &mut PaintContext,
    sink: &mut impl PaintSink,
    map: &impl MapQuery,
    rides: &(impl RideLookup + ?Sized),
    track: &TrackElement,
    direction: u8,
    height: u16,
) {
    let Some(ride) = rides.ride(track.ride_index) else {
        debug!(ride_index = track.ride_index, "missing_ride_skipped");
        return;
    };
    let Some(entry) = RidePaintRegistry::standard().resolve(ride.ride_type, track.track_type) else {
        debug!(
            ride_index = track.ride_index,
            ride_type = ?ride.ride_type,
            track_type = track.track_type,
            "unknown_ride_type_skipped"
        );
        return;
    };

    let direction = direction & 3;
    let sequence = match entry.rotation {
        SequenceRotation::Fixed => track.sequence,
        SequenceRotation::ThreeByThree => rotate_sequence_index(direction, track.sequence),
    };
    let call = TrackPaintCall {
        ride,
        track,
        sequence,
        direction,
        height,
        ground: map.surface_at(ctx.tile).map_or(0, SurfaceElement::world_z),
        colours: TrackColours::for_ride(ride, track.ghost),
    };

    ctx.interaction = InteractionKind::Ride;
    (entry.paint)(ctx, sink, &call);
    trace!(
        x = ctx.tile.x,
        y = ctx.tile.y,
        track_type = track.track_type,
        sequence,
        direction,
        "ride_tile_painted"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::map::{ParkMap, TileCoord};
    use crate::session::PaintList;

    fn rides(ride_type: RideType) -> Vec<RideState> {
        vec![RideState::new(ride_type)]
    }

    #[test]
    fn sequence_rotation_matches_quarter_turns() {
        for sequence in 0..9 {
            assert_eq!(rotate_sequence_index(0, sequence), sequence);
            assert_eq!(rotate_sequence_index(4, sequence), sequence);
        }
        assert_eq!(rotate_sequence_index(1, 1), 3);
        assert_eq!(rotate_sequence_index(2, 1), 7);
        assert_eq!(rotate_sequence_index(2, 2), 8);
        assert_eq!(rotate_sequence_index(3, 1), 6);
        assert_eq!(rotate_sequence_index(1, 12), 12);
    }

    #[test]
    fn every_direction_is_a_permutation() {
        for direction in 0..4 {
            let mut seen: Vec<u8> = (0..9).map(|s| rotate_sequence_index(direction, s)).collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..9).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn registry_resolves_by_type_and_piece() {
        let registry = RidePaintRegistry::standard();
        let top_spin = registry.resolve(RideType::TopSpin, TRACK_FLAT_3X3).expect("top spin");
        assert_eq!(top_spin.rotation, SequenceRotation::ThreeByThree);
        assert!(registry.resolve(RideType::Shop, TRACK_FLAT_1X1_B).is_some());
        assert!(registry.resolve(RideType::Facility, TRACK_FLAT_1X1_B).is_none());
        assert!(registry.resolve(RideType::Maze, TRACK_FLAT_3X3).is_none());
    }

    #[test]
    fn unknown_piece_paints_nothing() {
        let map = ParkMap::filled(3, 3, SurfaceElement::new(14, 0)).expect("map");
        let mut ctx = PaintContext::new(DisplayConfig::default());
        ctx.begin_tile(TileCoord::new(1, 1));
        let mut list = PaintList::new();
        let track = TrackElement {
            track_type: 7,
            base_height: 14,
            ..Default::default()
        };
        paint_ride_track_tile(&mut ctx, &mut list, &map, &rides(RideType::Maze), &track, 0, 112);
        assert!(list.is_empty());

        let orphan = TrackElement {
            ride_index: 3,
            track_type: TRACK_MAZE,
            ..track
        };
        paint_ride_track_tile(&mut ctx, &mut list, &map, &rides(RideType::Maze), &orphan, 0, 112);
        assert!(list.is_empty());
    }

    #[test]
    fn painted_pieces_are_tagged_as_ride() {
        let map = ParkMap::filled(3, 3, SurfaceElement::new(14, 0)).expect("map");
        let mut ctx = PaintContext::new(DisplayConfig::default());
        ctx.begin_tile(TileCoord::new(1, 1));
        let mut list = PaintList::new();
        let track = TrackElement {
            track_type: TRACK_MAZE,
            base_height: 14,
            maze_entry: 0xFFFF,
            ..Default::default()
        };
        paint_ride_track_tile(&mut ctx, &mut list, &map, &rides(RideType::Maze), &track, 0, 112);
        assert!(!list.is_empty());
        assert!(list
            .primitives()
            .iter()
            .all(|primitive| primitive.interaction == InteractionKind::Ride));
    }
}
