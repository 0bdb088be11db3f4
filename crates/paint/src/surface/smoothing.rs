//! Blends the terrain texture across tile edges whose corners line up.

use crate::geometry::tables::{
    edge_mask_base, neighbour_tint, own_tint, slope_image_offset, terrain_pattern_image,
    terrain_smoothing,
};
use crate::geometry::{Edge, ImageId, TerrainSmoothing};
use crate::session::{AttachedImage, PaintSink};

use super::descriptor::{EdgeCorners, TileDescriptor};

/// Stencil and texture drawn over the tile to soften one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeBlend {
    pub mask: ImageId,
    pub pattern: ImageId,
}

impl EdgeBlend {
    pub fn attachment(self) -> AttachedImage {
        AttachedImage::masked(self.mask, self.pattern)
    }
}

/// Decides whether `edge` gets a blend and which images it uses.
pub fn resolve_edge_blend(
    edge: Edge,
    own: &TileDescriptor,
    neighbour: &TileDescriptor,
) -> Option<EdgeBlend> {
    if !neighbour.exists() {
        return None;
    }

    let corners = EdgeCorners::of(edge, &own.corners, &neighbour.corners);
    if corners.own != corners.neighbour {
        return None;
    }

    let own_shade = own_tint(edge, own.slope);
    let neighbour_shade = neighbour_tint(edge, neighbour.slope);

    if own.terrain == neighbour.terrain {
        if own_shade == neighbour_shade {
            return None;
        }
        if terrain_smoothing(own.terrain).contains(TerrainSmoothing::SUPPRESS_SELF_BLEND) {
            return None;
        }
    } else if terrain_smoothing(own.terrain).contains(TerrainSmoothing::SUPPRESS_BLEND)
        || terrain_smoothing(neighbour.terrain).contains(TerrainSmoothing::SUPPRESS_BLEND)
    {
        return None;
    }

    Some(EdgeBlend {
        mask: ImageId::new(edge_mask_base(edge) + slope_image_offset(own.slope)),
        pattern: ImageId::new(terrain_pattern_image(neighbour.terrain) + u32::from(neighbour_shade)),
    })
}

/// Attaches the blend for `edge` to the current terrain primitive.
pub fn smooth_edge(
    sink: &mut impl PaintSink,
    edge: Edge,
    own: &TileDescriptor,
    neighbour: &TileDescriptor,
) -> bool {
    match resolve_edge_blend(edge, own, neighbour) {
        Some(blend) => sink.attach(blend.attachment()),
        None => false,
    }
}
