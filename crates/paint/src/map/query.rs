use super::element::{SurfaceElement, TileCoord, TileElement};

/// Read-only view of the tile map used while painting.
pub trait MapQuery {
    /// Map size in tiles.
    fn size(&self) -> (u32, u32);

    /// Elements stacked on a tile, bottom first. Off-map tiles are empty.
    fn elements_at(&self, tile: TileCoord) -> &[TileElement];

    /// Land height in world units at a world position.
    fn height_at(&self, world_x: i32, world_y: i32) -> u16;

    fn surface_at(&self, tile: TileCoord) -> Option<&SurfaceElement> {
        self.elements_at(tile).iter().find_map(|element| match element {
            TileElement::Surface(surface) => Some(surface),
            TileElement::Track(_) => None,
        })
    }

    fn contains(&self, tile: TileCoord) -> bool {
        let (width, height) = self.size();
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < width && (tile.y as u32) < height
    }
}
