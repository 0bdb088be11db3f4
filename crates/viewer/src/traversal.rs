use std::collections::BTreeMap;

use paint::{
    paint_ride_track_tile, paint_surface_tile, MapQuery, PaintContext, PaintList, RideLookup,
    TileCoord, TileElement, TunnelRuns,
};
use tracing::debug;

/// Below-ground passages cut through the terrain during a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Passages {
    /// Tunnel runs each screen column starts from.
    pub(crate) tunnels: TunnelRuns,
    /// Land step of the vertical shaft on tiles that have one.
    pub(crate) shafts: BTreeMap<TileCoord, u8>,
}

/// Tiles of a `width` x `height` map in back-to-front order for `rotation`.
///
/// Tiles are grouped into diagonal rows by screen depth, each row running
/// left to right across the screen.
pub(crate) fn tile_order(width: u32, height: u32, rotation: u8) -> Vec<TileCoord> {
    let mut tiles: Vec<TileCoord> = (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| TileCoord::new(x, y)))
        .collect();
    tiles.sort_by_key(|tile| screen_key(*tile, rotation));
    tiles
}

/// (depth, across) of a tile's origin on screen.
fn screen_key(tile: TileCoord, rotation: u8) -> (i32, i32) {
    let TileCoord { x, y } = tile;
    match rotation & 3 {
        0 => (x + y, y - x),
        1 => (y - x, -y - x),
        2 => (-x - y, x - y),
        _ => (x - y, x + y),
    }
}

/// Runs one viewport pass. `ctx` carries the display config and any tool
/// overlays; per-tile state is reset as the pass moves on.
///
/// Every screen column consumes its own copy of `passages.tunnels`, walked
/// back to front down the column.
pub(crate) fn paint_viewport(
    map: &impl MapQuery,
    rides: &(impl RideLookup + ?Sized),
    passages: &Passages,
    mut ctx: PaintContext,
) -> PaintList {
    let rotation = ctx.rotation();
    let (width, height) = map.size();
    let mut list = PaintList::new();
    let mut columns: BTreeMap<i32, TunnelRuns> = BTreeMap::new();

    let order = tile_order(width, height, rotation);
    for &tile in &order {
        let (_, column) = screen_key(tile, rotation);
        ctx.tunnels = *columns.entry(column).or_insert(passages.tunnels);
        ctx.begin_tile(tile);
        ctx.vertical_tunnel_height = passages.shafts.get(&tile).copied();
        list.begin_tile();
        for element in map.elements_at(tile) {
            match element {
                TileElement::Surface(surface) => {
                    paint_surface_tile(&mut ctx, &mut list, map, surface.world_z(), surface);
                }
                TileElement::Track(track) => {
                    let direction = track.direction.wrapping_add(rotation) & 3;
                    paint_ride_track_tile(
                        &mut ctx,
                        &mut list,
                        map,
                        rides,
                        track,
                        direction,
                        track.world_z(),
                    );
                }
            }
        }
        columns.insert(column, ctx.tunnels);
    }

    debug!(
        tiles = order.len(),
        columns = columns.len(),
        rotation,
        shafts = passages.shafts.len(),
        primitives = list.len(),
        "viewport_traversed"
    );
    list
}
