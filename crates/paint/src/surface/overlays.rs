//! Tool and information overlays drawn on top of the terrain.

use crate::config::{ScreenMode, ViewFlags};
use crate::geometry::sprites::{
    SPR_HEIGHT_MARKER_BASE, SPR_LAND_CONSTRUCTION_RIGHTS_AVAILABLE, SPR_LAND_OWNERSHIP_AVAILABLE,
    SPR_PEEP_SPAWN_ARROW, SPR_TERRAIN_SELECTION_CORNER, SPR_TERRAIN_SELECTION_DOTTED,
    SPR_TERRAIN_SELECTION_EDGE, SPR_TERRAIN_SELECTION_PATROL_AREA,
    SPR_TERRAIN_SELECTION_QUARTER, SPR_TERRAIN_SELECTION_SQUARE,
    SPR_TERRAIN_SELECTION_SQUARE_SIMPLE,
};
use crate::geometry::tables::slope_image_offset;
use crate::geometry::{
    ImageId, COLOUR_BRIGHT_PURPLE, COLOUR_GREY, COLOUR_LIGHT_BLUE, COLOUR_SATURATED_GREEN,
    PALETTE_SELECTION_BASE, PALETTE_SELECTION_QUARTER_BASE, PALETTE_SELECTION_WATER,
};
use crate::map::{
    MapQuery, SurfaceElement, TileCoord, OWNERSHIP_AVAILABLE,
    OWNERSHIP_CONSTRUCTION_RIGHTS_AVAILABLE, OWNERSHIP_CONSTRUCTION_RIGHTS_OWNED, OWNERSHIP_OWNED,
    SLOPE_STEEP, TILE_SIZE,
};
use crate::session::{AttachedImage, PaintContext, PaintSink};

pub const MAX_PEEP_SPAWNS: usize = 2;
const PATROL_WORDS: usize = 128;
const HEIGHT_MARKER_COLOUR: u8 = 15;

/// Staff patrol bitmap with one bit per 4x4 block of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatrolArea {
    words: [u32; PATROL_WORDS],
}

impl Default for PatrolArea {
    fn default() -> Self {
        Self {
            words: [0; PATROL_WORDS],
        }
    }
}

impl PatrolArea {
    fn bit_index(world_x: i32, world_y: i32) -> usize {
        let x = (world_x & 0x1F80) >> 7;
        let y = (world_y & 0x1F80) >> 1;
        (x | y) as usize
    }

    pub fn insert(&mut self, world_x: i32, world_y: i32) {
        let index = Self::bit_index(world_x, world_y);
        self.words[index >> 5] |= 1 << (index & 0x1F);
    }

    pub fn contains(&self, world_x: i32, world_y: i32) -> bool {
        let index = Self::bit_index(world_x, world_y);
        self.words[index >> 5] & (1 << (index & 0x1F)) != 0
    }
}

/// Patrol area shown while a staff member or staff type is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatrolHighlight {
    /// Combined area of the staff type.
    pub staff_type_area: PatrolArea,
    /// Area of the one selected staff member, if any.
    pub individual: Option<PatrolArea>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeepSpawn {
    pub world_x: i32,
    pub world_y: i32,
    /// Height in land steps.
    pub z: u8,
    pub direction: u8,
}

/// Shape of the land tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// One corner, numbered 0..=3 before rotation.
    Corner(u8),
    Full,
    WaterTool,
    /// One quarter of the tile, numbered 0..=3 before rotation.
    Quarter(u8),
    /// One edge, numbered 0..=3 before rotation. Edge palettes run one
    /// ahead of the corner palettes.
    Edge(u8),
}

/// Rectangle of tiles selected by a land tool, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSelection {
    pub from: TileCoord,
    pub to: TileCoord,
    pub kind: SelectionKind,
}

impl MapSelection {
    pub fn contains(&self, tile: TileCoord) -> bool {
        tile.x >= self.from.x && tile.x <= self.to.x && tile.y >= self.from.y && tile.y <= self.to.y
    }
}

/// Tiles highlighted while placing a construction, such as a ride footprint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructionHighlight {
    pub tiles: Vec<TileCoord>,
    /// Placement is valid; valid tiles are green, invalid ones purple.
    pub placeable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub patrol: Option<PatrolHighlight>,
    pub peep_spawns: Vec<PeepSpawn>,
    pub selection: Option<MapSelection>,
    pub construction: Option<ConstructionHighlight>,
}

fn centre_height(ctx: &PaintContext, map: &impl MapQuery) -> u16 {
    let (x, y) = ctx.tile_world();
    map.height_at(x + TILE_SIZE / 2, y + TILE_SIZE / 2)
}

pub fn paint_height_marker(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    map: &impl MapQuery,
    height: u16,
) {
    if !ctx.config.has(ViewFlags::LAND_HEIGHTS) || ctx.config.zoom() != 0 {
        return;
    }
    let marker_step = (u32::from(centre_height(ctx, map)) + 3) / 16;
    let image = ImageId::new(SPR_HEIGHT_MARKER_BASE + marker_step)
        .with_primary(HEIGHT_MARKER_COLOUR)
        .offset(ctx.config.height_marker_offset);
    sink.add_parent(ctx.primitive(image, (16, 16), (1, 1, 0), height as i16));
}

pub fn paint_patrol_area(ctx: &PaintContext, sink: &mut impl PaintSink, slope: u8) {
    let Some(patrol) = &ctx.overlays.patrol else {
        return;
    };
    let (x, y) = ctx.tile_world();
    if !patrol.staff_type_area.contains(x, y) {
        return;
    }
    let colour = match &patrol.individual {
        Some(area) if !area.contains(x, y) => COLOUR_GREY,
        _ => COLOUR_LIGHT_BLUE,
    };
    let image = ImageId::new(SPR_TERRAIN_SELECTION_PATROL_AREA + slope_image_offset(slope))
        .with_primary(colour);
    sink.attach(AttachedImage::new(image));
}

pub fn paint_peep_spawns(ctx: &PaintContext, sink: &mut impl PaintSink) {
    if ctx.config.screen_mode != ScreenMode::ScenarioEditor
        || !ctx.config.has(ViewFlags::LAND_OWNERSHIP)
    {
        return;
    }
    for spawn in ctx.overlays.peep_spawns.iter().take(MAX_PEEP_SPAWNS) {
        let spawn_tile = TileCoord::new(
            spawn.world_x.div_euclid(TILE_SIZE),
            spawn.world_y.div_euclid(TILE_SIZE),
        );
        if spawn_tile != ctx.tile {
            continue;
        }
        let z = i16::from(spawn.z) * 16;
        sink.add_parent(ctx.primitive(
            ImageId::new(SPR_TERRAIN_SELECTION_SQUARE_SIMPLE),
            (0, 0),
            (32, 32, 16),
            z,
        ));
        let arrow = u32::from((((spawn.direction & 3) ^ 2) + ctx.rotation()) & 3);
        let image = ImageId::new(SPR_PEEP_SPAWN_ARROW + arrow).with_primary(COLOUR_LIGHT_BLUE);
        sink.add_parent(ctx.primitive(image, (0, 0), (32, 32, 19), z));
    }
}

pub fn paint_ownership(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    map: &impl MapQuery,
    element: &SurfaceElement,
    slope: u8,
) {
    if !ctx.config.has(ViewFlags::LAND_OWNERSHIP) {
        return;
    }
    if element.owns(OWNERSHIP_OWNED) {
        let image = ImageId::new(SPR_TERRAIN_SELECTION_SQUARE + slope_image_offset(slope));
        sink.attach(AttachedImage::new(image));
    } else if element.owns(OWNERSHIP_AVAILABLE) {
        let z = centre_height(ctx, map) + 3;
        sink.add_marker(ctx.primitive(
            ImageId::new(SPR_LAND_OWNERSHIP_AVAILABLE),
            (16, 16),
            (1, 1, 0),
            z as i16,
        ));
    }
}

pub fn paint_construction_rights(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    map: &impl MapQuery,
    element: &SurfaceElement,
    slope: u8,
) {
    if !ctx.config.has(ViewFlags::CONSTRUCTION_RIGHTS) || element.owns(OWNERSHIP_OWNED) {
        return;
    }
    if element.owns(OWNERSHIP_CONSTRUCTION_RIGHTS_OWNED) {
        let image = ImageId::new(SPR_TERRAIN_SELECTION_DOTTED + slope_image_offset(slope));
        sink.attach(AttachedImage::new(image));
    } else if element.owns(OWNERSHIP_CONSTRUCTION_RIGHTS_AVAILABLE) {
        let z = centre_height(ctx, map) + 3;
        sink.add_marker(ctx.primitive(
            ImageId::new(SPR_LAND_CONSTRUCTION_RIGHTS_AVAILABLE),
            (16, 16),
            (1, 1, 0),
            z as i16,
        ));
    }
}

/// Slope and height of the water tool marker: the water plane when the tile
/// is submerged, otherwise the land itself.
fn water_tool_shape(element: &SurfaceElement, slope: u8, height: u16) -> (u8, u16) {
    let water = element.water_height();
    if water == 0 {
        return (slope, height);
    }
    let water_height = u16::from(water) * 16;
    if water_height <= height {
        return (slope, height);
    }
    let raised = height + 16;
    if water_height != raised || slope & SLOPE_STEEP == 0 {
        return (0, water_height);
    }
    let low = ((slope ^ 0x0F) << 2) & 0xFF;
    let high = low >> 4;
    ((high & 0x03) | (low & 0x0C), raised)
}

pub fn paint_map_selection(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    element: &SurfaceElement,
    slope: u8,
    height: u16,
) {
    let Some(selection) = ctx.overlays.selection else {
        return;
    };
    if !selection.contains(ctx.tile) {
        return;
    }
    let rotation = ctx.rotation();
    let offset = slope_image_offset(slope);
    let image = match selection.kind {
        SelectionKind::Edge(side) => ImageId::new(SPR_TERRAIN_SELECTION_EDGE + offset)
            .with_remap_palette((((side & 3) + 1 + rotation) & 3) + PALETTE_SELECTION_BASE),
        SelectionKind::Quarter(quarter) => ImageId::new(SPR_TERRAIN_SELECTION_QUARTER + offset)
            .with_remap_palette((((quarter & 3) + rotation) & 3) + PALETTE_SELECTION_QUARTER_BASE),
        SelectionKind::Corner(corner) => ImageId::new(SPR_TERRAIN_SELECTION_CORNER + offset)
            .with_remap_palette((((corner & 3) + rotation) & 3) + PALETTE_SELECTION_BASE),
        SelectionKind::Full => ImageId::new(SPR_TERRAIN_SELECTION_CORNER + offset)
            .with_remap_palette(4 + PALETTE_SELECTION_BASE),
        SelectionKind::WaterTool => {
            let (marker_slope, marker_height) = water_tool_shape(element, slope, height);
            let image = ImageId::new(SPR_TERRAIN_SELECTION_CORNER + slope_image_offset(marker_slope))
                .with_remap_palette(PALETTE_SELECTION_WATER);
            sink.add_marker(ctx.primitive(image, (0, 0), (32, 32, 1), marker_height as i16));
            return;
        }
    };
    sink.attach(AttachedImage::new(image));
}

pub fn paint_construction_tiles(ctx: &PaintContext, sink: &mut impl PaintSink, slope: u8) {
    let Some(construction) = &ctx.overlays.construction else {
        return;
    };
    if !construction.tiles.contains(&ctx.tile) {
        return;
    }
    let primary = if construction.placeable {
        COLOUR_SATURATED_GREEN
    } else {
        COLOUR_BRIGHT_PURPLE
    };
    let image = ImageId::new(SPR_TERRAIN_SELECTION_CORNER + slope_image_offset(slope))
        .with_colours(primary, COLOUR_GREY);
    sink.attach(AttachedImage::new(image));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::map::ParkMap;
    use crate::session::PaintList;

    fn ctx_with(flags: ViewFlags) -> PaintContext {
        let mut ctx = PaintContext::new(DisplayConfig::default().with_flags(flags));
        ctx.begin_tile(TileCoord::new(1, 1));
        ctx
    }

    fn list_with_base(ctx: &PaintContext) -> PaintList {
        let mut list = PaintList::new();
        list.add_parent(ctx.primitive(ImageId::new(1915), (0, 0), (32, 32, 255), 112));
        list
    }

    #[test]
    fn patrol_bits_cover_four_by_four_blocks() {
        let mut area = PatrolArea::default();
        area.insert(128, 256);
        assert!(area.contains(128 + 96, 256 + 96));
        assert!(!area.contains(0, 256));
        assert!(!area.contains(128, 384));
    }

    #[test]
    fn patrol_tint_depends_on_selected_member() {
        let mut ctx = ctx_with(ViewFlags::NONE);
        let mut staff_type_area = PatrolArea::default();
        staff_type_area.insert(32, 32);
        ctx.overlays.patrol = Some(PatrolHighlight {
            staff_type_area,
            individual: Some(PatrolArea::default()),
        });
        let mut list = list_with_base(&ctx);
        paint_patrol_area(&ctx, &mut list, 0);
        let attached = list.primitives()[0].attached[0];
        assert_eq!(attached.image.primary_colour(), COLOUR_GREY);
        assert_eq!(attached.image.index(), SPR_TERRAIN_SELECTION_PATROL_AREA);
    }

    #[test]
    fn owned_land_tints_and_available_land_gets_marker() {
        let ctx = ctx_with(ViewFlags::LAND_OWNERSHIP);
        let map = ParkMap::filled(3, 3, SurfaceElement::new(14, 0)).expect("map");
        let owned = SurfaceElement::new(14, 0).with_ownership(OWNERSHIP_OWNED);
        let mut list = list_with_base(&ctx);
        paint_ownership(&ctx, &mut list, &map, &owned, 0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.attachment_count(), 1);

        let available = SurfaceElement::new(14, 0).with_ownership(OWNERSHIP_AVAILABLE);
        paint_ownership(&ctx, &mut list, &map, &available, 0);
        assert_eq!(list.len(), 2);
        assert_eq!(list.primitives()[1].z_offset, 115);
        assert!(list.attach(AttachedImage::new(ImageId::new(1))));
        assert_eq!(list.primitives()[0].attached.len(), 2);
    }

    #[test]
    fn construction_rights_hidden_on_owned_land() {
        let ctx = ctx_with(ViewFlags::CONSTRUCTION_RIGHTS);
        let map = ParkMap::filled(3, 3, SurfaceElement::new(14, 0)).expect("map");
        let owned = SurfaceElement::new(14, 0)
            .with_ownership(OWNERSHIP_OWNED | OWNERSHIP_CONSTRUCTION_RIGHTS_OWNED);
        let mut list = list_with_base(&ctx);
        paint_construction_rights(&ctx, &mut list, &map, &owned, 0);
        assert_eq!(list.attachment_count(), 0);
    }

    #[test]
    fn selection_palettes_follow_rotation() {
        let mut ctx = ctx_with(ViewFlags::NONE);
        ctx.config.set_rotation(1).expect("rotation");
        ctx.overlays.selection = Some(MapSelection {
            from: TileCoord::new(0, 0),
            to: TileCoord::new(2, 2),
            kind: SelectionKind::Edge(2),
        });
        let surface = SurfaceElement::new(14, 0);
        let mut list = list_with_base(&ctx);
        paint_map_selection(&ctx, &mut list, &surface, 0, 112);
        let attached = list.primitives()[0].attached[0];
        assert_eq!(attached.image.index(), SPR_TERRAIN_SELECTION_EDGE);
        assert_eq!(
            attached.image,
            ImageId::new(SPR_TERRAIN_SELECTION_EDGE).with_remap_palette(PALETTE_SELECTION_BASE)
        );
    }

    #[test]
    fn water_tool_marks_the_water_plane() {
        let mut ctx = ctx_with(ViewFlags::NONE);
        ctx.overlays.selection = Some(MapSelection {
            from: TileCoord::new(1, 1),
            to: TileCoord::new(1, 1),
            kind: SelectionKind::WaterTool,
        });
        let flooded = SurfaceElement::new(14, 3).with_water_height(10);
        let mut list = list_with_base(&ctx);
        paint_map_selection(&ctx, &mut list, &flooded, 3, 112);
        assert_eq!(list.len(), 2);
        let marker = &list.primitives()[1];
        assert_eq!(marker.z_offset, 160);
        assert_eq!(marker.image.index(), SPR_TERRAIN_SELECTION_CORNER);
    }

    #[test]
    fn water_tool_on_steep_slope_flips_corners() {
        let element = SurfaceElement::new(14, 0x17).with_water_height(8);
        assert_eq!(water_tool_shape(&element, 0x17, 112), (0x02, 128));
    }

    #[test]
    fn peep_spawns_only_show_in_editor() {
        let mut ctx = ctx_with(ViewFlags::LAND_OWNERSHIP);
        ctx.overlays.peep_spawns.push(PeepSpawn {
            world_x: 40,
            world_y: 50,
            z: 7,
            direction: 0,
        });
        let mut list = PaintList::new();
        paint_peep_spawns(&ctx, &mut list);
        assert!(list.is_empty());

        ctx.config.screen_mode = ScreenMode::ScenarioEditor;
        paint_peep_spawns(&ctx, &mut list);
        assert_eq!(list.len(), 2);
        assert_eq!(list.primitives()[1].image.index(), SPR_PEEP_SPAWN_ARROW + 2);
    }

    #[test]
    fn construction_tiles_colour_by_validity() {
        let mut ctx = ctx_with(ViewFlags::NONE);
        ctx.overlays.construction = Some(ConstructionHighlight {
            tiles: vec![TileCoord::new(1, 1)],
            placeable: false,
        });
        let mut list = list_with_base(&ctx);
        paint_construction_tiles(&ctx, &mut list, 0);
        let attached = list.primitives()[0].attached[0];
        assert_eq!(attached.image.primary_colour(), COLOUR_BRIGHT_PURPLE);
        assert_eq!(attached.image.secondary_colour(), COLOUR_GREY);
    }
}
