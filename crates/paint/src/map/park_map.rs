use thiserror::Error;

use crate::geometry::tables::{corner_heights, EDGE_STYLE_COUNT, TERRAIN_KIND_COUNT};

use super::element::{SurfaceElement, TileCoord, TileElement, TILE_SIZE};
use super::query::MapQuery;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkMapError {
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[error("tile ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("tile ({x}, {y}) has unknown terrain kind {terrain}")]
    InvalidTerrain { x: i32, y: i32, terrain: u8 },
    #[error("tile ({x}, {y}) has unknown edge style {style}")]
    InvalidEdgeStyle { x: i32, y: i32, style: u8 },
    #[error("tile ({x}, {y}) has more than one surface element")]
    DuplicateSurface { x: i32, y: i32 },
}

/// In-memory tile map: one bottom-first element stack per tile.
#[derive(Debug, Clone)]
pub struct ParkMap {
    width: u32,
    height: u32,
    tiles: Vec<Vec<TileElement>>,
}

impl ParkMap {
    pub fn new(width: u32, height: u32, tiles: Vec<Vec<TileElement>>) -> Result<Self, ParkMapError> {
        let expected = width as usize * height as usize;
        let actual = tiles.len();
        if expected != actual {
            return Err(ParkMapError::TileCountMismatch { expected, actual });
        }
        let map = Self {
            width,
            height,
            tiles,
        };
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                map.validate_tile(TileCoord::new(x, y))?;
            }
        }
        Ok(map)
    }

    /// Map where every tile carries the same surface.
    pub fn filled(width: u32, height: u32, surface: SurfaceElement) -> Result<Self, ParkMapError> {
        let tiles = vec![vec![TileElement::Surface(surface)]; width as usize * height as usize];
        Self::new(width, height, tiles)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index_of(&self, tile: TileCoord) -> Option<usize> {
        if !self.contains(tile) {
            return None;
        }
        Some(tile.y as usize * self.width as usize + tile.x as usize)
    }

    pub fn set_surface(
        &mut self,
        tile: TileCoord,
        surface: SurfaceElement,
    ) -> Result<(), ParkMapError> {
        let index = self.require_index(tile)?;
        validate_surface(tile, &surface)?;
        let stack = &mut self.tiles[index];
        match stack
            .iter_mut()
            .find(|element| matches!(element, TileElement::Surface(_)))
        {
            Some(existing) => *existing = TileElement::Surface(surface),
            None => stack.insert(0, TileElement::Surface(surface)),
        }
        Ok(())
    }

    /// Adds an element above the existing stack, keeping it sorted by height.
    pub fn push_element(
        &mut self,
        tile: TileCoord,
        element: TileElement,
    ) -> Result<(), ParkMapError> {
        let index = self.require_index(tile)?;
        if let TileElement::Surface(surface) = &element {
            if self.surface_at(tile).is_some() {
                return Err(ParkMapError::DuplicateSurface {
                    x: tile.x,
                    y: tile.y,
                });
            }
            validate_surface(tile, surface)?;
        }
        let stack = &mut self.tiles[index];
        let position = stack
            .iter()
            .position(|existing| existing.base_height() > element.base_height())
            .unwrap_or(stack.len());
        stack.insert(position, element);
        Ok(())
    }

    fn require_index(&self, tile: TileCoord) -> Result<usize, ParkMapError> {
        self.index_of(tile).ok_or(ParkMapError::OutOfBounds {
            x: tile.x,
            y: tile.y,
            width: self.width,
            height: self.height,
        })
    }

    fn validate_tile(&self, tile: TileCoord) -> Result<(), ParkMapError> {
        let mut surfaces = 0;
        for element in self.elements_at(tile) {
            let TileElement::Surface(surface) = element else {
                continue;
            };
            surfaces += 1;
            if surfaces > 1 {
                return Err(ParkMapError::DuplicateSurface {
                    x: tile.x,
                    y: tile.y,
                });
            }
            validate_surface(tile, surface)?;
        }
        Ok(())
    }
}

fn validate_surface(tile: TileCoord, surface: &SurfaceElement) -> Result<(), ParkMapError> {
    let terrain = surface.terrain_kind();
    if terrain >= TERRAIN_KIND_COUNT {
        return Err(ParkMapError::InvalidTerrain {
            x: tile.x,
            y: tile.y,
            terrain,
        });
    }
    let style = surface.edge_style();
    if style >= EDGE_STYLE_COUNT {
        return Err(ParkMapError::InvalidEdgeStyle {
            x: tile.x,
            y: tile.y,
            style,
        });
    }
    Ok(())
}

impl MapQuery for ParkMap {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn elements_at(&self, tile: TileCoord) -> &[TileElement] {
        self.index_of(tile)
            .and_then(|index| self.tiles.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Bilinear blend of the four corner heights across the tile.
    fn height_at(&self, world_x: i32, world_y: i32) -> u16 {
        let tile = TileCoord::new(world_x.div_euclid(TILE_SIZE), world_y.div_euclid(TILE_SIZE));
        let Some(surface) = self.surface_at(tile) else {
            return 0;
        };
        let corners = corner_heights(surface.slope_code());
        let fx = world_x.rem_euclid(TILE_SIZE);
        let fy = world_y.rem_euclid(TILE_SIZE);
        let span = TILE_SIZE;
        let weighted = i32::from(corners.top) * (span - fx) * (span - fy)
            + i32::from(corners.left) * fx * (span - fy)
            + i32::from(corners.right) * (span - fx) * fy
            + i32::from(corners.bottom) * fx * fy;
        let rise = weighted * 16 / (span * span);
        surface.world_z() + rise as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_tile_count() {
        let err = ParkMap::new(2, 2, vec![Vec::new(); 3]).expect_err("count mismatch");
        assert_eq!(
            err,
            ParkMapError::TileCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_unknown_terrain() {
        let surface = SurfaceElement::new(14, 0).with_terrain(20);
        let err = ParkMap::filled(1, 1, surface).expect_err("terrain out of range");
        assert!(matches!(err, ParkMapError::InvalidTerrain { terrain: 20, .. }));
    }

    #[test]
    fn off_map_tiles_have_no_elements() {
        let map = ParkMap::filled(2, 2, SurfaceElement::new(14, 0)).expect("map");
        assert!(map.elements_at(TileCoord::new(-1, 0)).is_empty());
        assert!(map.surface_at(TileCoord::new(2, 1)).is_none());
        assert!(map.surface_at(TileCoord::new(1, 1)).is_some());
    }

    #[test]
    fn push_element_keeps_height_order() {
        let mut map = ParkMap::filled(1, 1, SurfaceElement::new(14, 0)).expect("map");
        let tile = TileCoord::new(0, 0);
        let track = crate::map::TrackElement {
            base_height: 20,
            ..Default::default()
        };
        map.push_element(tile, TileElement::Track(track)).expect("push");
        let stack = map.elements_at(tile);
        assert_eq!(stack.len(), 2);
        assert!(matches!(stack[0], TileElement::Surface(_)));
    }

    #[test]
    fn height_at_centre_of_flat_tile_is_base() {
        let map = ParkMap::filled(1, 1, SurfaceElement::new(14, 0)).expect("map");
        assert_eq!(map.height_at(16, 16), 112);
        let raised = ParkMap::filled(1, 1, SurfaceElement::new(14, 15)).expect("map");
        assert_eq!(raised.height_at(16, 16), 128);
    }
}
