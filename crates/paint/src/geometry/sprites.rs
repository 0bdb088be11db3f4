//! Sprite sheet indices used by the paint routines.
//!
//! Terrain families are laid out in runs of 19 images, one per slope image
//! offset (see [`super::tables::slope_image_offset`]).

pub const SLOPE_IMAGE_COUNT: u32 = 19;

pub const SPR_VERTICAL_TUNNEL_BACK_LEFT: u32 = 1575;
pub const SPR_VERTICAL_TUNNEL_BACK_RIGHT: u32 = 1576;
pub const SPR_VERTICAL_TUNNEL_FRONT_LEFT: u32 = 1577;
pub const SPR_VERTICAL_TUNNEL_FRONT_RIGHT: u32 = 1578;

pub const SPR_TERRAIN_GRASS: u32 = 1915;
pub const SPR_TERRAIN_GRASS_GRID: u32 = 1934;
pub const SPR_TERRAIN_SAND_YELLOW: u32 = 1953;
pub const SPR_TERRAIN_SAND_YELLOW_GRID: u32 = 1972;
pub const SPR_TERRAIN_DIRT: u32 = 1991;
pub const SPR_TERRAIN_DIRT_GRID: u32 = 2010;
pub const SPR_TERRAIN_ROCK: u32 = 2029;
pub const SPR_TERRAIN_ROCK_GRID: u32 = 2048;
pub const SPR_TERRAIN_MARTIAN: u32 = 2067;
pub const SPR_TERRAIN_MARTIAN_GRID: u32 = 2086;
pub const SPR_TERRAIN_CHECKERBOARD: u32 = 2105;
pub const SPR_TERRAIN_CHECKERBOARD_GRID: u32 = 2124;
pub const SPR_TERRAIN_GRASS_CLUMPS: u32 = 2143;
pub const SPR_TERRAIN_GRASS_CLUMPS_GRID: u32 = 2162;
pub const SPR_TERRAIN_ICE: u32 = 2181;
pub const SPR_TERRAIN_ICE_GRID: u32 = 2200;
pub const SPR_TERRAIN_GRID: u32 = 2219;
pub const SPR_TERRAIN_GRID_GRID: u32 = 2238;
pub const SPR_TERRAIN_SAND_RED: u32 = 2257;
pub const SPR_TERRAIN_SAND_RED_GRID: u32 = 2276;
pub const SPR_TERRAIN_SAND: u32 = 2295;
pub const SPR_TERRAIN_SAND_GRID: u32 = 2314;
pub const SPR_TERRAIN_CHECKERBOARD_INVERTED: u32 = 2333;
pub const SPR_TERRAIN_CHECKERBOARD_INVERTED_GRID: u32 = 2352;

pub const SPR_TERRAIN_GRASS_UNDERGROUND: u32 = 2371;
pub const SPR_TERRAIN_SAND_YELLOW_UNDERGROUND: u32 = 2390;
pub const SPR_TERRAIN_DIRT_UNDERGROUND: u32 = 2409;
pub const SPR_TERRAIN_ROCK_UNDERGROUND: u32 = 2428;
pub const SPR_TERRAIN_MARTIAN_UNDERGROUND: u32 = 2447;
pub const SPR_TERRAIN_CHECKERBOARD_UNDERGROUND: u32 = 2466;
pub const SPR_MAZE_GROUND: u32 = 2485;
pub const SPR_TERRAIN_GRASS_CLUMPS_UNDERGROUND: u32 = 2504;
pub const SPR_TERRAIN_ICE_UNDERGROUND: u32 = 2523;
pub const SPR_TERRAIN_GRID_UNDERGROUND: u32 = 2542;
pub const SPR_TERRAIN_SAND_RED_UNDERGROUND: u32 = 2561;
pub const SPR_TERRAIN_SAND_UNDERGROUND: u32 = 2580;
pub const SPR_TERRAIN_CHECKERBOARD_INVERTED_UNDERGROUND: u32 = 2599;

pub const SPR_TERRAIN_TRACK_DESIGNER: u32 = 2623;
pub const SPR_TERRAIN_SELECTION_SQUARE_SIMPLE: u32 = 2624;
pub const SPR_TERRAIN_SELECTION_SQUARE: u32 = 2625;
pub const SPR_TERRAIN_SELECTION_DOTTED: u32 = 2644;
pub const SPR_TERRAIN_SELECTION_CORNER: u32 = 2663;
pub const SPR_TERRAIN_SELECTION_QUARTER: u32 = 2682;
pub const SPR_TERRAIN_SELECTION_EDGE: u32 = 2701;
pub const SPR_TERRAIN_SELECTION_PATROL_AREA: u32 = 2720;

pub const SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_1: u32 = 2739;
pub const SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_1_GRID: u32 = 2758;
pub const SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_2: u32 = 2777;
pub const SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_2_GRID: u32 = 2796;
pub const SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_3: u32 = 2815;
pub const SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_3_GRID: u32 = 2834;
pub const SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_4: u32 = 2853;
pub const SPR_TERRAIN_GRASS_LENGTH_4_VARIANT_4_GRID: u32 = 2872;
pub const SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_1: u32 = 2891;
pub const SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_1_GRID: u32 = 2910;
pub const SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_2: u32 = 2929;
pub const SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_2_GRID: u32 = 2948;
pub const SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_3: u32 = 2967;
pub const SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_3_GRID: u32 = 2986;
pub const SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_4: u32 = 3005;
pub const SPR_TERRAIN_GRASS_LENGTH_6_VARIANT_4_GRID: u32 = 3024;
pub const SPR_TERRAIN_GRASS_MOWED: u32 = 3043;
pub const SPR_TERRAIN_GRASS_MOWED_GRID: u32 = 3062;
pub const SPR_TERRAIN_GRASS_MOWED_90: u32 = 3081;
pub const SPR_TERRAIN_GRASS_MOWED_90_GRID: u32 = 3100;

pub const SPR_PEEP_SPAWN_ARROW: u32 = 3111;

pub const SPR_TERRAIN_EDGE_MASK_TOP_RIGHT: u32 = 3119;
pub const SPR_TERRAIN_EDGE_MASK_BOTTOM_RIGHT: u32 = 3138;
pub const SPR_TERRAIN_EDGE_MASK_BOTTOM_LEFT: u32 = 3157;
pub const SPR_TERRAIN_EDGE_MASK_TOP_LEFT: u32 = 3176;

/// Pattern images come in runs of six tints.
pub const SPR_TERRAIN_PATTERN_GRASS: u32 = 3195;
pub const SPR_TERRAIN_PATTERN_SAND_YELLOW: u32 = 3201;
pub const SPR_TERRAIN_PATTERN_DIRT: u32 = 3207;
pub const SPR_TERRAIN_PATTERN_ROCK: u32 = 3213;
pub const SPR_TERRAIN_PATTERN_MARTIAN: u32 = 3219;
pub const SPR_TERRAIN_PATTERN_GRASS_CLUMPS: u32 = 3225;
pub const SPR_TERRAIN_PATTERN_ICE: u32 = 3231;
pub const SPR_TERRAIN_PATTERN_SAND_RED: u32 = 3237;
pub const SPR_TERRAIN_PATTERN_SAND: u32 = 3243;

pub const SPR_HEIGHT_MARKER_BASE: u32 = 3249;
pub const SPR_WATER_MASK: u32 = 3337;
pub const SPR_WATER_OVERLAY: u32 = 3356;

pub const SPR_WOODEN_SUPPORT_COLUMN_NE_SW: u32 = 3378;
pub const SPR_WOODEN_SUPPORT_COLUMN_NW_SE: u32 = 3379;
pub const SPR_FLOOR_FOUNDATION_NE_SW: u32 = 3395;
pub const SPR_FLOOR_FOUNDATION_NW_SE: u32 = 3396;

pub const SPR_MAZE_BASE_HEDGE: u32 = 21938;
pub const SPR_MAZE_BASE_BRICK: u32 = 21951;
pub const SPR_MAZE_BASE_ICE: u32 = 21964;
pub const SPR_MAZE_BASE_WOOD: u32 = 21977;

pub const SPR_FLAT_RIDE_FLOOR_CORNER: u32 = 22134;
pub const SPR_FLAT_RIDE_FLOOR_EDGE_RIGHT: u32 = 22135;
pub const SPR_FLAT_RIDE_FLOOR_EDGE_LEFT: u32 = 22136;
pub const SPR_FLAT_RIDE_FLOOR_PLAIN: u32 = 22137;
pub const SPR_FLAT_RIDE_FENCE_RIGHT: u32 = 22138;
pub const SPR_FLAT_RIDE_FENCE_FRONT: u32 = 22139;
pub const SPR_FLAT_RIDE_FENCE_BACK_RIGHT: u32 = 22140;
pub const SPR_FLAT_RIDE_FENCE_BACK: u32 = 22141;

pub const SPR_PARK_FENCE_FLAT_SW_NE: u32 = 22872;
pub const SPR_PARK_FENCE_FLAT_NW_SE: u32 = 22873;
pub const SPR_PARK_FENCE_RAISED_A_SW_NE: u32 = 22874;
pub const SPR_PARK_FENCE_RAISED_A_NW_SE: u32 = 22875;
pub const SPR_PARK_FENCE_RAISED_B_SW_NE: u32 = 22876;
pub const SPR_PARK_FENCE_RAISED_B_NW_SE: u32 = 22877;

pub const SPR_LAND_OWNERSHIP_AVAILABLE: u32 = 22955;
pub const SPR_LAND_CONSTRUCTION_RIGHTS_AVAILABLE: u32 = 22956;
