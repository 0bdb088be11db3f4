use serde::{Deserialize, Serialize};

/// Tile coordinate in map tiles (one tile spans 32 world units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

pub const TILE_SIZE: i32 = 32;

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// World position of the tile's origin corner.
    pub const fn world(self) -> (i32, i32) {
        (self.x * TILE_SIZE, self.y * TILE_SIZE)
    }
}

/// Land surface of one tile, kept in its packed storage layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceElement {
    /// Height in half land steps; world z is `base_height * 8`.
    pub base_height: u8,
    /// Bits 0..=4 slope code, bits 5..=7 low edge-style bits.
    pub slope: u8,
    /// Bits 0..=4 water height in land steps, bits 5..=7 low terrain bits.
    pub terrain: u8,
    /// Bits 0..=1 high terrain bits, bit 7 high edge-style bit.
    pub type_bits: u8,
    /// Bits 0..=3 park fence directions plus the ownership flags below.
    pub ownership: u8,
    /// Bits 0..=2 hold the grass growth stage.
    pub grass_length: u8,
}

pub const OWNERSHIP_FENCE_MASK: u8 = 0x0F;
pub const OWNERSHIP_CONSTRUCTION_RIGHTS_OWNED: u8 = 1 << 4;
pub const OWNERSHIP_OWNED: u8 = 1 << 5;
pub const OWNERSHIP_CONSTRUCTION_RIGHTS_AVAILABLE: u8 = 1 << 6;
pub const OWNERSHIP_AVAILABLE: u8 = 1 << 7;

pub const SLOPE_CODE_MASK: u8 = 0x1F;
pub const SLOPE_STEEP: u8 = 0x10;
pub const WATER_HEIGHT_MASK: u8 = 0x1F;

impl SurfaceElement {
    pub fn new(base_height: u8, slope_code: u8) -> Self {
        Self {
            base_height,
            slope: slope_code & SLOPE_CODE_MASK,
            ..Self::default()
        }
    }

    pub fn with_terrain(mut self, kind: u8) -> Self {
        self.terrain = (self.terrain & WATER_HEIGHT_MASK) | ((kind & 0x07) << 5);
        self.type_bits = (self.type_bits & !0x03) | ((kind >> 3) & 0x03);
        self
    }

    pub fn with_edge_style(mut self, style: u8) -> Self {
        self.slope = (self.slope & SLOPE_CODE_MASK) | ((style & 0x07) << 5);
        self.type_bits = (self.type_bits & 0x7F) | (((style >> 3) & 0x01) << 7);
        self
    }

    pub fn with_water_height(mut self, level: u8) -> Self {
        self.terrain = (self.terrain & !WATER_HEIGHT_MASK) | (level & WATER_HEIGHT_MASK);
        self
    }

    pub fn with_ownership(mut self, ownership: u8) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn with_grass_length(mut self, grass_length: u8) -> Self {
        self.grass_length = grass_length;
        self
    }

    pub fn slope_code(&self) -> u8 {
        self.slope & SLOPE_CODE_MASK
    }

    pub fn edge_style(&self) -> u8 {
        (self.slope >> 5) | ((self.type_bits >> 7) << 3)
    }

    pub fn terrain_kind(&self) -> u8 {
        ((self.type_bits & 0x03) << 3) | (self.terrain >> 5)
    }

    /// Water level in land steps; zero means no water.
    pub fn water_height(&self) -> u8 {
        self.terrain & WATER_HEIGHT_MASK
    }

    pub fn park_fences(&self) -> u8 {
        self.ownership & OWNERSHIP_FENCE_MASK
    }

    pub fn owns(&self, flag: u8) -> bool {
        self.ownership & flag != 0
    }

    pub fn grass_stage(&self) -> u8 {
        self.grass_length & 0x07
    }

    /// True when the low terrain bits and high terrain bits are both clear,
    /// which is the only material that grows grass.
    pub fn is_plain_grass(&self) -> bool {
        self.terrain & 0xE0 == 0 && self.type_bits & 0x03 == 0
    }

    /// Slope code as seen from a camera `rotation` quarter turns away.
    pub fn relative_slope(&self, rotation: u8) -> u8 {
        let slope = self.slope_code();
        let shifted = u16::from(slope & 0x0F) << (rotation & 3);
        let corners = (((shifted >> 4) | shifted) & 0x0F) as u8;
        corners | (slope & SLOPE_STEEP)
    }

    pub fn world_z(&self) -> u16 {
        u16::from(self.base_height) * 8
    }
}

/// Ride track piece occupying one tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackElement {
    pub ride_index: u8,
    pub track_type: u8,
    /// Position of this tile within a multi-tile piece.
    pub sequence: u8,
    pub station_index: u8,
    /// Facing in world space, before the camera rotation is applied.
    pub direction: u8,
    pub base_height: u8,
    /// Maze connectivity bits; only meaningful on maze tiles.
    pub maze_entry: u16,
    /// Preview piece drawn while the player is still placing it.
    pub ghost: bool,
}

impl TrackElement {
    pub fn world_z(&self) -> u16 {
        u16::from(self.base_height) * 8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileElement {
    Surface(SurfaceElement),
    Track(TrackElement),
}

impl TileElement {
    pub fn base_height(&self) -> u8 {
        match self {
            TileElement::Surface(surface) => surface.base_height,
            TileElement::Track(track) => track.base_height,
        }
    }
}
