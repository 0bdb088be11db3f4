mod maze;
mod registry;
mod shop;
mod state;
mod supports;
mod top_spin;

pub use registry::{
    paint_ride_track_tile, rotate_sequence_index, RidePaintEntry, RidePaintRegistry, RideType,
    SequenceRotation, TrackPaintCall, TrackPaintFn, TRACK_FLAT_1X1_A, TRACK_FLAT_1X1_B,
    TRACK_FLAT_3X3, TRACK_MAZE,
};
pub use state::{RideLookup, RideState, TrackColours, VehicleState, MAX_RIDERS, MAX_STATIONS};
pub use supports::paint_wooden_supports;
