//! Fixed lookup tables for slopes, terrain, tunnels and edge styles.
//!
//! Every lookup indexes directly; an out-of-range slope, terrain or tunnel
//! code is a caller bug and panics.

use super::edge::Edge;
use super::image_id::{
    ImageId, COLOUR_BRIGHT_GREEN, COLOUR_BRIGHT_PURPLE, COLOUR_BRIGHT_RED, COLOUR_YELLOW,
};
use super::sprites::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CornerHeights {
    pub top: u8,
    pub right: u8,
    pub bottom: u8,
    pub left: u8,
}

impl CornerHeights {
    pub const fn new(top: u8, right: u8, bottom: u8, left: u8) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(height: u8) -> Self {
        Self::new(height, height, height, height)
    }

    pub fn raised_by(self, base: u8) -> Self {
        Self {
            top: base + self.top,
            right: base + self.right,
            bottom: base + self.bottom,
            left: base + self.left,
        }
    }

    pub fn max(self) -> u8 {
        self.top.max(self.right).max(self.bottom).max(self.left)
    }
}

const SLOPE_IMAGE_OFFSET: [u8; 32] = [
    0, 2, 1, 3, 8, 10, 9, 11, 4, 6, 5, 7, 12, 14, 13, 15, 0, 0, 0, 0, 0, 0, 0, 17, 0, 0, 0, 16, 0,
    18, 15, 0,
];

// Entry 23 raises the left corner by two where the neighbouring steep entries
// suggest one. Height math elsewhere depends on the published values.
const CORNER_HEIGHTS: [CornerHeights; 32] = [
    CornerHeights::new(0, 0, 0, 0),
    CornerHeights::new(0, 0, 1, 0),
    CornerHeights::new(0, 0, 0, 1),
    CornerHeights::new(0, 0, 1, 1),
    CornerHeights::new(1, 0, 0, 0),
    CornerHeights::new(1, 0, 1, 0),
    CornerHeights::new(1, 0, 0, 1),
    CornerHeights::new(1, 0, 1, 1),
    CornerHeights::new(0, 1, 0, 0),
    CornerHeights::new(0, 1, 1, 0),
    CornerHeights::new(0, 1, 0, 1),
    CornerHeights::new(0, 1, 1, 1),
    CornerHeights::new(1, 1, 0, 0),
    CornerHeights::new(1, 1, 1, 0),
    CornerHeights::new(1, 1, 0, 1),
    CornerHeights::new(1, 1, 1, 1),
    CornerHeights::new(0, 0, 0, 0),
    CornerHeights::new(0, 0, 1, 0),
    CornerHeights::new(0, 0, 0, 1),
    CornerHeights::new(0, 0, 1, 1),
    CornerHeights::new(1, 0, 0, 0),
    CornerHeights::new(1, 0, 1, 0),
    CornerHeights::new(1, 0, 0, 1),
    CornerHeights::new(1, 0, 1, 2),
    CornerHeights::new(0, 1, 0, 0),
    CornerHeights::new(0, 1, 1, 0),
    CornerHeights::new(0, 1, 0, 1),
    CornerHeights::new(0, 1, 2, 1),
    CornerHeights::new(1, 1, 0, 0),
    CornerHeights::new(1, 2, 1, 0),
    CornerHeights::new(2, 1, 0, 1),
    CornerHeights::new(1, 1, 1, 1),
];

const TINT_BOTTOM_LEFT: [u8; 19] = [2, 5, 1, 4, 2, 5, 1, 2, 2, 4, 1, 2, 1, 3, 0, 3, 1, 5, 0];
const TINT_TOP_LEFT: [u8; 19] = [2, 5, 2, 4, 2, 5, 1, 1, 3, 4, 3, 2, 1, 2, 0, 3, 1, 5, 0];
const TINT_TOP_RIGHT: [u8; 19] = [2, 2, 2, 4, 0, 0, 1, 1, 3, 4, 3, 5, 1, 2, 2, 3, 1, 5, 0];
const TINT_BOTTOM_RIGHT: [u8; 19] = [2, 2, 1, 4, 0, 0, 1, 2, 2, 4, 1, 5, 1, 3, 2, 3, 1, 5, 0];

/// Smoothing flags for one terrain kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainSmoothing(u8);

impl TerrainSmoothing {
    pub const NONE: Self = Self(0);
    /// Never blends with a different neighbouring terrain.
    pub const SUPPRESS_BLEND: Self = Self(1 << 0);
    /// Never blends with itself across differently tinted edges.
    pub const SUPPRESS_SELF_BLEND: Self = Self(1 << 1);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

const SUPPRESS_ALL: TerrainSmoothing =
    TerrainSmoothing::SUPPRESS_BLEND.union(TerrainSmoothing::SUPPRESS_SELF_BLEND);

const TERRAIN_SMOOTHING: [TerrainSmoothing; 14] = [
    TerrainSmoothing::NONE,
    TerrainSmoothing::NONE,
    TerrainSmoothing::NONE,
    TerrainSmoothing::SUPPRESS_SELF_BLEND,
    TerrainSmoothing::SUPPRESS_SELF_BLEND,
    SUPPRESS_ALL,
    TerrainSmoothing::NONE,
    TerrainSmoothing::NONE,
    SUPPRESS_ALL,
    SUPPRESS_ALL,
    SUPPRESS_ALL,
    SUPPRESS_ALL,
    TerrainSmoothing::NONE,
    TerrainSmoothing::NONE,
];

/// Vertical span and bounding-box length of a tunnel type, in land steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelShape {
    pub height: u8,
    pub bound_length: u8,
}

const fn shape(height: u8, bound_length: u8) -> TunnelShape {
    TunnelShape {
        height,
        bound_length,
    }
}

pub const TUNNEL_KIND_COUNT: u8 = 16;

const TUNNEL_SHAPES: [TunnelShape; TUNNEL_KIND_COUNT as usize] = [
    shape(2, 2),
    shape(3, 3),
    shape(3, 5),
    shape(3, 3),
    shape(4, 4),
    shape(4, 6),
    shape(2, 2),
    shape(3, 3),
    shape(3, 5),
    shape(3, 3),
    shape(2, 3),
    shape(2, 3),
    shape(2, 3),
    shape(3, 4),
    shape(2, 3),
    shape(3, 4),
];

const TUNNEL_Z_CORRECTION: [i16; TUNNEL_KIND_COUNT as usize] = [
    0, 0, -32, 0, 0, -48, 0, 0, -32, 0, -16, -16, -16, -16, -16, -16,
];

const TUNNEL_CAPPED_REMAP: [u8; TUNNEL_KIND_COUNT as usize] =
    [0, 0, 0, 3, 3, 3, 6, 6, 6, 6, 10, 11, 12, 13, 14, 14];

/// Wall sprite bases for one edge style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStyleImages {
    pub land: u32,
    pub underground: u32,
    pub water: u32,
    pub top_connector: u32,
}

pub const EDGE_STYLE_COUNT: u8 = 4;

const EDGE_STYLE_IMAGES: [EdgeStyleImages; 4] = [
    EdgeStyleImages {
        land: 1579,
        underground: 1599,
        water: 1589,
        top_connector: 1609,
    },
    EdgeStyleImages {
        land: 1747,
        underground: 1767,
        water: 1757,
        top_connector: 1777,
    },
    EdgeStyleImages {
        land: 1663,
        underground: 1683,
        water: 1673,
        top_connector: 1693,
    },
    EdgeStyleImages {
        land: 1831,
        underground: 1851,
        water: 1841,
        top_connector: 1861,
    },
];

const TUNNEL_IMAGES: [[u32; 16]; 4] = [
    tunnel_row(1615),
    tunnel_row(1783),
    tunnel_row(1699),
    tunnel_row(1867),
];

// Twelve distinct tunnel pairs four sprites apart, then four aliases of the
// first, fourth, seventh and tenth pair.
const fn tunnel_row(base: u32) -> [u32; 16] {
    let mut row = [0u32; 16];
    let mut i = 0;
    while i < 12 {
        row[i] = base + 4 * i as u32;
        i += 1;
    }
    row[12] = base;
    row[13] = base + 12;
    row[14] = base + 24;
    row[15] = base + 36;
    row
}

const WATER_IMAGE_OFFSET: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 3, 0, 1, 4, 0];

/// Plain and grid-line variants of one terrain image run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainImages {
    pub plain: ImageId,
    pub grid: ImageId,
}

impl TerrainImages {
    pub const fn pick(self, show_gridlines: bool) -> ImageId {
        if show_gridlines {
            self.grid
        } else {
            self.plain
        }
    }
}

const fn plain(plain: u32, grid: u32) -> TerrainImages {
    TerrainImages {
        plain: ImageId::new(plain),
        grid: ImageId::new(grid),
    }
}

const fn coloured_grid(colour: u8) -> TerrainImages {
    TerrainImages {
        plain: ImageId::new(SPR_TERRAIN_GRID).with_primary(colour),
        grid: ImageId::new(SPR_TERRAIN_GRID_GRID).with_primary(colour),
    }
}

const TERRAIN_IMAGES: [TerrainImages; 15] = [
    plain(SPR_TERRAIN_GRASS, SPR_TERRAIN_GRASS_GRID),
    plain(SPR_TERRAIN_SAND_YELLOW, SPR_TERRAIN_SAND_YELLOW_GRID),
    plain(SPR_TERRAIN_DIRT, SPR_TERRAIN_DIRT_GRID),
    plain(SPR_TERRAIN_ROCK, SPR_TERRAIN_ROCK_GRID),
    plain(SPR_TERRAIN_MARTIAN, SPR_TERRAIN_MARTIAN_GRID),
    plain(SPR_TERRAIN_CHECKERBOARD, SPR_TERRAIN_CHECKERBOARD_GRID),
    plain(SPR_TERRAIN_GRASS_CLUMPS, SPR_TERRAIN_GRASS_CLUMPS_GRID),
    plain(SPR_TERRAIN_ICE, SPR_TERRAIN_ICE_GRID),
    coloured_grid(COLOUR_BRIGHT_RED),
    coloured_grid(COLOUR_YELLOW),
    coloured_grid(COLOUR_BRIGHT_PURPLE),
    coloured_grid(COLOUR_BRIGHT_GREEN),
    plain(SPR_TERRAIN_SAND_RED, SPR_TERRAIN_SAND_RED_GRID),
    plain(SPR_TERRAIN_SAND, SPR_TERRAIN_SAND_GRID),
    plain(
        SPR_TERRAIN_CHECKERBOARD_INVERTED,
        SPR_TERRAIN_CHECKERBOARD_INVERTED_GRID,
    ),
];

const TERRAIN_UNDERGROUND_IMAGES: [ImageId; 15] = [
    ImageId::new(SPR_TERRAIN_GRASS_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_SAND_YELLOW_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_DIRT_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_ROCK_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_MARTIAN_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_CHECKERBOARD_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_GRASS_CLUMPS_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_ICE_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_GRID_UNDERGROUND).with_primary(COLOUR_BRIGHT_RED),
    ImageId::new(SPR_TERRAIN_GRID_UNDERGROUND).with_primary(COLOUR_YELLOW),
    ImageId::new(SPR_TERRAIN_GRID_UNDERGROUND).with_primary(COLOUR_BRIGHT_PURPLE),
    ImageId::new(SPR_TERRAIN_GRID_UNDERGROUND).with_primary(COLOUR_BRIGHT_GREEN),
    ImageId::new(SPR_TERRAIN_SAND_RED_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_SAND_UNDERGROUND),
    ImageId::new(SPR_TERRAIN_CHECKERBOARD_INVERTED_UNDERGROUND),
];

// Checkerboard and the coloured grids blend with plain grass patterns.
const TERRAIN_PATTERN_IMAGES: [u32; 14] = [
    SPR_TERRAIN_PATTERN_GRASS,
    SPR_TERRAIN_PATTERN_SAND_YELLOW,
    SPR_TERRAIN_PATTERN_DIRT,
    SPR_TERRAIN_PATTERN_ROCK,
    SPR_TERRAIN_PATTERN_MARTIAN,
    SPR_TERRAIN_PATTERN_GRASS,
    SPR_TERRAIN_PATTERN_GRASS_CLUMPS,
    SPR_TERRAIN_PATTERN_ICE,
    SPR_TERRAIN_PATTERN_GRASS,
    SPR_TERRAIN_PATTERN_GRASS,
    SPR_TERRAIN_PATTERN_GRASS,
    SPR_TERRAIN_PATTERN_GRASS,
    SPR_TERRAIN_PATTERN_SAND_RED,
    SPR_TERRAIN_PATTERN_SAND,
];

const ROTATED_TERRAIN: [u8; 14] = [0, 1, 2, 3, 4, 14, 6, 7, 8, 9, 10, 11, 12, 13];

const GRASS_LENGTH_4_IMAGES: [TerrainImages; 4] = [
    plain(
        SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_1,
        SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_1_GRID,
    ),
    plain(
        SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_2,
        SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_2_GRID,
    ),
    plain(
        SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_3,
        SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_3_GRID,
    ),
    plain(
        SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_4,
        SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_4_GRID,
    ),
];

const GRASS_LENGTH_6_IMAGES: [TerrainImages; 4] = [
    plain(
        SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_1,
        SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_1_GRID,
    ),
    plain(
        SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_2,
        SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_2_GRID,
    ),
    plain(
        SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_3,
        SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_3_GRID,
    ),
    plain(
        SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_4,
        SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_4_GRID,
    ),
];

const GRASS_MOWED_IMAGES: [TerrainImages; 4] = [
    plain(SPR_TERRAIN_GRASS_MOWED_90, SPR_TERRAIN_GRASS_MOWED_90_GRID),
    plain(SPR_TERRAIN_GRASS_MOWED, SPR_TERRAIN_GRASS_MOWED_GRID),
    plain(SPR_TERRAIN_GRASS_MOWED_90, SPR_TERRAIN_GRASS_MOWED_90_GRID),
    plain(SPR_TERRAIN_GRASS_MOWED, SPR_TERRAIN_GRASS_MOWED_GRID),
];

/// Number of distinct terrain kinds stored on surface elements.
pub const TERRAIN_KIND_COUNT: u8 = 14;

pub fn slope_image_offset(slope: u8) -> u32 {
    u32::from(SLOPE_IMAGE_OFFSET[usize::from(slope)])
}

pub fn corner_heights(slope: u8) -> CornerHeights {
    CORNER_HEIGHTS[usize::from(slope)]
}

/// Tint tables used for an edge: (own tint table, neighbour tint table).
fn edge_tint_tables(edge: Edge) -> (&'static [u8; 19], &'static [u8; 19]) {
    match edge {
        Edge::BottomLeft => (&TINT_BOTTOM_LEFT, &TINT_TOP_RIGHT),
        Edge::TopLeft => (&TINT_TOP_LEFT, &TINT_BOTTOM_RIGHT),
        Edge::BottomRight => (&TINT_BOTTOM_RIGHT, &TINT_TOP_LEFT),
        Edge::TopRight => (&TINT_TOP_RIGHT, &TINT_BOTTOM_LEFT),
    }
}

/// Tint of the tile itself along `edge`.
pub fn own_tint(edge: Edge, slope: u8) -> u8 {
    let (own, _) = edge_tint_tables(edge);
    own[SLOPE_IMAGE_OFFSET[usize::from(slope)] as usize]
}

/// Tint of the neighbour seen across `edge`.
pub fn neighbour_tint(edge: Edge, slope: u8) -> u8 {
    let (_, neighbour) = edge_tint_tables(edge);
    neighbour[SLOPE_IMAGE_OFFSET[usize::from(slope)] as usize]
}

pub fn edge_mask_base(edge: Edge) -> u32 {
    match edge {
        Edge::BottomLeft => SPR_TERRAIN_EDGE_MASK_BOTTOM_LEFT,
        Edge::BottomRight => SPR_TERRAIN_EDGE_MASK_BOTTOM_RIGHT,
        Edge::TopLeft => SPR_TERRAIN_EDGE_MASK_TOP_LEFT,
        Edge::TopRight => SPR_TERRAIN_EDGE_MASK_TOP_RIGHT,
    }
}

pub fn terrain_smoothing(terrain: u8) -> TerrainSmoothing {
    TERRAIN_SMOOTHING[usize::from(terrain)]
}

pub fn tunnel_shape(kind: u8) -> TunnelShape {
    TUNNEL_SHAPES[usize::from(kind)]
}

pub fn tunnel_z_correction(kind: u8) -> i16 {
    TUNNEL_Z_CORRECTION[usize::from(kind)]
}

pub fn capped_tunnel(kind: u8) -> u8 {
    TUNNEL_CAPPED_REMAP[usize::from(kind)]
}

pub fn edge_style_images(style: u8) -> EdgeStyleImages {
    EDGE_STYLE_IMAGES[usize::from(style)]
}

pub fn tunnel_image(style: u8, kind: u8) -> u32 {
    TUNNEL_IMAGES[usize::from(style)][usize::from(kind)]
}

pub fn water_image_offset(slope: u8) -> u32 {
    u32::from(WATER_IMAGE_OFFSET[usize::from(slope & 0x0F)])
}

pub fn terrain_images(terrain: u8) -> TerrainImages {
    TERRAIN_IMAGES[usize::from(terrain)]
}

pub fn terrain_underground_image(terrain: u8) -> ImageId {
    TERRAIN_UNDERGROUND_IMAGES[usize::from(terrain)]
}

pub fn terrain_pattern_image(terrain: u8) -> u32 {
    TERRAIN_PATTERN_IMAGES[usize::from(terrain)]
}

/// Terrain kind to draw when the camera is turned a quarter from the stored
/// orientation. Only the checkerboard changes.
pub fn rotated_terrain(terrain: u8, rotation: u8) -> u8 {
    if rotation & 1 == 1 {
        ROTATED_TERRAIN[usize::from(terrain)]
    } else {
        terrain
    }
}

pub fn grass_length_4_images(quadrant: usize) -> TerrainImages {
    GRASS_LENGTH_4_IMAGES[quadrant]
}

pub fn grass_length_6_images(quadrant: usize) -> TerrainImages {
    GRASS_LENGTH_6_IMAGES[quadrant]
}

pub fn grass_mowed_images(rotation: u8) -> TerrainImages {
    GRASS_MOWED_IMAGES[usize::from(rotation & 3)]
}
