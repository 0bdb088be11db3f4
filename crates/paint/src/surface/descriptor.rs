use crate::geometry::tables::corner_heights;
use crate::geometry::{CornerHeights, Edge};
use crate::map::{MapQuery, SurfaceElement, TileCoord};

/// Corner height assumed for a missing neighbour, in land steps.
pub const ABSENT_NEIGHBOUR_HEIGHT: u8 = 1;

/// Land shape of one tile as seen from the current camera rotation.
///
/// `surface` is `None` past the edge of the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileDescriptor {
    pub surface: Option<SurfaceElement>,
    pub terrain: u8,
    pub slope: u8,
    pub corners: CornerHeights,
}

impl TileDescriptor {
    pub fn exists(&self) -> bool {
        self.surface.is_some()
    }
}

/// Corner heights along one edge, ordered the way the edge is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCorners {
    pub own: (u8, u8),
    pub neighbour: (u8, u8),
}

impl EdgeCorners {
    pub fn of(edge: Edge, own: &CornerHeights, neighbour: &CornerHeights) -> Self {
        match edge {
            Edge::BottomLeft => Self {
                own: (own.left, own.bottom),
                neighbour: (neighbour.top, neighbour.right),
            },
            Edge::BottomRight => Self {
                own: (own.right, own.bottom),
                neighbour: (neighbour.top, neighbour.left),
            },
            Edge::TopLeft => Self {
                own: (own.top, own.left),
                neighbour: (neighbour.right, neighbour.bottom),
            },
            Edge::TopRight => Self {
                own: (own.top, own.right),
                neighbour: (neighbour.left, neighbour.bottom),
            },
        }
    }
}

/// Descriptor of the painted tile followed by its four neighbours in
/// `Edge::descriptor_slot` order.
pub fn build_descriptors(
    map: &impl MapQuery,
    tile: TileCoord,
    rotation: u8,
    height: u16,
    element: &SurfaceElement,
) -> [TileDescriptor; 5] {
    let slope = element.relative_slope(rotation);
    let mut descriptors = [TileDescriptor::default(); 5];
    descriptors[0] = TileDescriptor {
        surface: Some(*element),
        terrain: element.terrain_kind(),
        slope,
        corners: corner_heights(slope).raised_by((height / 16) as u8),
    };

    for edge in Edge::ALL {
        let neighbour_tile = tile.offset(edge.neighbour_offset(rotation));
        let Some(neighbour) = map.surface_at(neighbour_tile) else {
            continue;
        };
        let neighbour_slope = neighbour.relative_slope(rotation);
        descriptors[edge.descriptor_slot()] = TileDescriptor {
            surface: Some(*neighbour),
            terrain: neighbour.terrain_kind(),
            slope: neighbour_slope,
            corners: corner_heights(neighbour_slope).raised_by(neighbour.base_height / 2),
        };
    }
    descriptors
}
