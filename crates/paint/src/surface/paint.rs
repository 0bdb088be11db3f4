//! Per-tile entry point for surface elements.

use tracing::{trace, warn};

use crate::config::ViewFlags;
use crate::geometry::sprites::{
    SPR_TERRAIN_TRACK_DESIGNER, SPR_VERTICAL_TUNNEL_BACK_LEFT, SPR_VERTICAL_TUNNEL_BACK_RIGHT,
    SPR_VERTICAL_TUNNEL_FRONT_LEFT, SPR_VERTICAL_TUNNEL_FRONT_RIGHT, SPR_WATER_MASK,
    SPR_WATER_OVERLAY,
};
use crate::geometry::tables::{
    grass_length_4_images, grass_length_6_images, grass_mowed_images, rotated_terrain,
    slope_image_offset, terrain_images, terrain_underground_image, water_image_offset,
    EDGE_STYLE_COUNT,
};
use crate::geometry::{Edge, ImageId, PALETTE_UNDERGROUND_GHOST, PALETTE_WATER};
use crate::map::{MapQuery, SurfaceElement};
use crate::session::{AttachedImage, InteractionKind, PaintContext, PaintSink};

use super::descriptor::{build_descriptors, TileDescriptor};
use super::fences::paint_park_fences;
use super::overlays::{
    paint_construction_rights, paint_construction_tiles, paint_height_marker, paint_map_selection,
    paint_ownership, paint_patrol_area, paint_peep_spawns,
};
use super::smoothing::smooth_edge;
use super::supports::publish_surface_supports;
use super::vertical::{
    paint_land_side_bottom, paint_land_side_top, paint_water_side_bottom, paint_water_side_top,
};

const TERRAIN_BOUND_HEIGHT: i16 = 255;

/// Walls of a vertical shaft: image, bound lengths, bound offset relative to
/// the tile height.
const VERTICAL_TUNNEL_WALLS: [(u32, (i16, i16, i16), (i16, i16, i16)); 4] = [
    (SPR_VERTICAL_TUNNEL_BACK_LEFT, (1, 30, 39), (-2, 1, -40)),
    (SPR_VERTICAL_TUNNEL_BACK_RIGHT, (30, 1, 0), (1, 31, 0)),
    (SPR_VERTICAL_TUNNEL_FRONT_LEFT, (1, 30, 0), (31, 1, 0)),
    (SPR_VERTICAL_TUNNEL_FRONT_RIGHT, (30, 1, 39), (1, -2, -40)),
];

/// Paints one surface element at world height `height`, publishing its
/// support heights and water level into `ctx`.
pub fn paint_surface_tile(
    ctx: &mut PaintContext,
    sink: &mut impl PaintSink,
    map: &impl MapQuery,
    height: u16,
    element: &SurfaceElement,
) {
    ctx.interaction = InteractionKind::Terrain;
    let rotation = ctx.rotation();
    let descriptors = build_descriptors(map, ctx.tile, rotation, height, element);
    let own = descriptors[0];
    let slope = own.slope;
    let neighbour = |edge: Edge| across(&descriptors, edge);

    paint_height_marker(ctx, sink, map, height);

    if ctx
        .vertical_tunnel_height
        .is_some_and(|step| u16::from(step) * 16 == height)
    {
        paint_vertical_tunnel(ctx, sink, height);
        return;
    }

    let base = base_terrain_image(ctx, element, slope);
    sink.add_parent(ctx.primitive(base, (0, 0), (32, 32, TERRAIN_BOUND_HEIGHT), height as i16));

    paint_patrol_area(ctx, sink, slope);
    paint_peep_spawns(ctx, sink);
    paint_ownership(ctx, sink, map, element, slope);
    paint_construction_rights(ctx, sink, map, element, slope);
    paint_map_selection(ctx, sink, element, slope, height);
    paint_construction_tiles(ctx, sink, slope);

    let config = &ctx.config;
    if config.zoom() == 0 && !config.is_see_through() && config.smoothing_enabled {
        for edge in Edge::SMOOTHING_ORDER {
            smooth_edge(sink, edge, &own, neighbour(edge));
        }
    }

    if ctx.config.has(ViewFlags::UNDERGROUND_INSIDE)
        && !ctx.config.has(ViewFlags::HIDE_BASE)
        && !ctx.config.screen_mode.is_track_designer()
    {
        let terrain = rotated_terrain(element.terrain_kind(), rotation);
        let image = terrain_underground_image(terrain).offset(slope_image_offset(slope));
        sink.attach(AttachedImage::new(image));
    }

    let edge_style = element.edge_style();
    let edge_style_known = edge_style < EDGE_STYLE_COUNT;
    if !edge_style_known {
        warn!(
            x = ctx.tile.x,
            y = ctx.tile.y,
            edge_style,
            "unsupported_edge_style"
        );
    }

    let tunnels = ctx.tunnels;
    if !ctx.config.has(ViewFlags::HIDE_VERTICAL) && edge_style_known {
        let step = (height / 16) as u8;
        for edge in [Edge::TopLeft, Edge::TopRight] {
            paint_land_side_top(ctx, sink, edge, step, edge_style, &own, neighbour(edge));
        }
        for edge in [Edge::BottomLeft, Edge::BottomRight] {
            paint_land_side_bottom(ctx, sink, edge, edge_style, &own, neighbour(edge));
        }
    }

    let water = element.water_height();
    if water > 0 {
        ctx.interaction = InteractionKind::Water;
        let water_height = u16::from(water) * 16;
        ctx.water_height = water_height;

        if !ctx.config.has(ViewFlags::CEILING_CUTAWAY) {
            let offset = if water_height <= height + 16 {
                water_image_offset(slope)
            } else {
                0
            };
            let plane = ImageId::new(SPR_WATER_MASK + offset).with_translucent_palette(PALETTE_WATER);
            sink.add_parent(ctx.primitive(plane, (0, 0), (32, 32, -1), water_height as i16));
            sink.attach(AttachedImage::new(ImageId::new(SPR_WATER_OVERLAY + offset)));

            ctx.tunnels = tunnels;
            if edge_style_known {
                for edge in [Edge::TopLeft, Edge::TopRight] {
                    paint_water_side_top(ctx, sink, edge, water, edge_style, &own, neighbour(edge));
                }
                for edge in [Edge::BottomLeft, Edge::BottomRight] {
                    paint_water_side_bottom(
                        ctx,
                        sink,
                        edge,
                        water,
                        edge_style,
                        &own,
                        neighbour(edge),
                    );
                }
            }
        }
    }

    if !ctx.config.has(ViewFlags::CEILING_CUTAWAY) {
        paint_park_fences(ctx, sink, element, slope, height);
    }
    ctx.interaction = InteractionKind::Terrain;

    publish_surface_supports(&mut ctx.supports, slope, height);
    trace!(x = ctx.tile.x, y = ctx.tile.y, slope, height, "surface_tile_painted");
}

fn across(descriptors: &[TileDescriptor; 5], edge: Edge) -> &TileDescriptor {
    &descriptors[edge.descriptor_slot()]
}

fn paint_vertical_tunnel(ctx: &PaintContext, sink: &mut impl PaintSink, height: u16) {
    let z = height as i16;
    for (image, length, (x, y, dz)) in VERTICAL_TUNNEL_WALLS {
        let primitive = ctx
            .primitive(ImageId::new(image), (0, 0), length, z)
            .with_bound_offset((x, y, z + dz));
        sink.add_parent(primitive);
    }
    trace!(x = ctx.tile.x, y = ctx.tile.y, height, "vertical_tunnel_painted");
}

/// Base terrain image for the tile, including the grass growth variants.
fn base_terrain_image(ctx: &PaintContext, element: &SurfaceElement, slope: u8) -> ImageId {
    let config = &ctx.config;
    let rotation = config.rotation();
    let gridlines = config.has(ViewFlags::GRIDLINES);
    let offset = slope_image_offset(slope);

    let grass_stage = (element.is_plain_grass() && config.zoom() == 0 && !config.is_see_through())
        .then(|| element.grass_stage());
    let quadrant = || {
        let (x, y) = ctx.tile_world();
        (((y & 32) | ((x & 32) << 1)) >> 5) as usize
    };

    match grass_stage {
        Some(0) => grass_mowed_images(rotation).pick(gridlines).offset(offset),
        Some(4 | 5) => grass_length_4_images(quadrant()).pick(gridlines).offset(offset),
        Some(6) => grass_length_6_images(quadrant()).pick(gridlines).offset(offset),
        _ => {
            let terrain = rotated_terrain(element.terrain_kind(), rotation);
            let image = if config.screen_mode.is_track_designer() {
                ImageId::new(SPR_TERRAIN_TRACK_DESIGNER)
            } else {
                terrain_images(terrain).pick(gridlines).offset(offset)
            };
            if config.is_see_through() {
                image.with_translucent_palette(PALETTE_UNDERGROUND_GHOST)
            } else {
                image
            }
        }
    }
}
