use std::collections::BTreeMap;

use serde::Deserialize;

use crate::geometry::{ImageId, COLOUR_DARK_GREEN, COLOUR_GREY};
use crate::map::TileCoord;

use super::registry::RideType;

pub const MAX_STATIONS: usize = 4;
pub const MAX_RIDERS: usize = 8;

/// Live state of the first vehicle of a ride that is running on its track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VehicleState {
    /// Arm angle in 48 steps per turn.
    pub arm_rotation: u8,
    /// Seat frame within the current direction.
    pub seat_rotation: u8,
    /// Values from 64 upward mean the restraints are opening.
    pub restraints_position: u8,
    pub peep_count: u8,
    /// Shirt colours of the riders, two per seat pair.
    pub peep_tshirt_colours: [u8; MAX_RIDERS],
}

/// Ride data the track painters read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RideState {
    pub ride_type: RideType,
    #[serde(default)]
    pub track_colour_main: u8,
    #[serde(default)]
    pub track_colour_additional: u8,
    #[serde(default)]
    pub track_colour_supports: u8,
    #[serde(default)]
    pub vehicle_body_colour: u8,
    #[serde(default)]
    pub vehicle_trim_colour: u8,
    /// First sprite of the vehicle or building image set.
    #[serde(default)]
    pub vehicle_base_image: u32,
    #[serde(default)]
    pub entrances: [Option<TileCoord>; MAX_STATIONS],
    #[serde(default)]
    pub exits: [Option<TileCoord>; MAX_STATIONS],
    /// Present while the ride is running with a vehicle on the track.
    #[serde(default)]
    pub vehicle: Option<VehicleState>,
}

impl RideState {
    pub fn new(ride_type: RideType) -> Self {
        Self {
            ride_type,
            track_colour_main: 0,
            track_colour_additional: 0,
            track_colour_supports: 0,
            vehicle_body_colour: 0,
            vehicle_trim_colour: 0,
            vehicle_base_image: 0,
            entrances: [None; MAX_STATIONS],
            exits: [None; MAX_STATIONS],
            vehicle: None,
        }
    }

    /// True when `tile` holds the entrance or the exit of `station`.
    pub fn is_station_opening(&self, station: u8, tile: TileCoord) -> bool {
        let station = usize::from(station);
        let matches = |slots: &[Option<TileCoord>; MAX_STATIONS]| {
            slots.get(station).copied().flatten() == Some(tile)
        };
        matches(&self.entrances) || matches(&self.exits)
    }
}

/// Looks up rides by the index stored on track elements.
pub trait RideLookup {
    fn ride(&self, index: u8) -> Option<&RideState>;
}

impl RideLookup for BTreeMap<u8, RideState> {
    fn ride(&self, index: u8) -> Option<&RideState> {
        self.get(&index)
    }
}

impl RideLookup for [RideState] {
    fn ride(&self, index: u8) -> Option<&RideState> {
        self.get(usize::from(index))
    }
}

impl RideLookup for Vec<RideState> {
    fn ride(&self, index: u8) -> Option<&RideState> {
        self.as_slice().ride(index)
    }
}

/// Colour templates applied to the three image groups of a track piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackColours {
    pub track: ImageId,
    /// Left neutral so vehicle parts can pick their own ride colours.
    pub structure: ImageId,
    pub supports: ImageId,
}

impl TrackColours {
    pub fn for_ride(ride: &RideState, ghost: bool) -> Self {
        if ghost {
            let ghost = ImageId::NEUTRAL.with_colours(COLOUR_DARK_GREEN, COLOUR_GREY);
            return Self {
                track: ghost,
                structure: ghost,
                supports: ghost,
            };
        }
        Self {
            track: ImageId::NEUTRAL.with_remap(ride.track_colour_main, ride.track_colour_additional),
            structure: ImageId::NEUTRAL,
            supports: ImageId::NEUTRAL.with_primary(ride.track_colour_supports),
        }
    }

    /// True when the structure template still defers to the ride colours.
    pub fn structure_is_neutral(&self) -> bool {
        self.structure == ImageId::NEUTRAL
    }
}
