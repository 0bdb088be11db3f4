use serde::Serialize;

use crate::geometry::ImageId;
use crate::map::TileCoord;

/// What a primitive represents when the player clicks on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    #[default]
    Terrain,
    Water,
    Park,
    Ride,
    Sprite,
}

/// World-space box used to sort primitives back to front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoundBox {
    pub length: (i16, i16, i16),
    pub offset: (i16, i16, i16),
}

impl BoundBox {
    pub const fn new(length: (i16, i16, i16), offset: (i16, i16, i16)) -> Self {
        Self { length, offset }
    }
}

/// Image drawn in the same slot as a parent primitive.
///
/// With `blend` set, `image` is a stencil and `blend` is drawn through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttachedImage {
    pub image: ImageId,
    pub offset: (i16, i16),
    pub blend: Option<ImageId>,
}

impl AttachedImage {
    pub const fn new(image: ImageId) -> Self {
        Self {
            image,
            offset: (0, 0),
            blend: None,
        }
    }

    pub const fn at(mut self, offset: (i16, i16)) -> Self {
        self.offset = offset;
        self
    }

    pub const fn masked(mask: ImageId, blend: ImageId) -> Self {
        Self {
            image: mask,
            offset: (0, 0),
            blend: Some(blend),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintPrimitive {
    pub image: ImageId,
    pub offset: (i16, i16),
    pub z_offset: i16,
    pub bounds: BoundBox,
    pub attached: Vec<AttachedImage>,
    /// Index of the primitive this one is sorted with, if it is a child.
    pub parent: Option<usize>,
    pub tile: TileCoord,
    pub rotation: u8,
    pub interaction: InteractionKind,
}

impl PaintPrimitive {
    /// Bounding box in the same plane as the image offset, starting at `z_offset`.
    pub fn new(image: ImageId, offset: (i16, i16), length: (i16, i16, i16), z_offset: i16) -> Self {
        Self {
            image,
            offset,
            z_offset,
            bounds: BoundBox::new(length, (offset.0, offset.1, z_offset)),
            attached: Vec::new(),
            parent: None,
            tile: TileCoord::default(),
            rotation: 0,
            interaction: InteractionKind::default(),
        }
    }

    pub fn with_bound_offset(mut self, offset: (i16, i16, i16)) -> Self {
        self.bounds.offset = offset;
        self
    }

    pub fn located(mut self, tile: TileCoord, rotation: u8, interaction: InteractionKind) -> Self {
        self.tile = tile;
        self.rotation = rotation;
        self.interaction = interaction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_offset_defaults_to_image_offset() {
        let primitive = PaintPrimitive::new(ImageId::new(10), (3, 4), (32, 32, 1), 40);
        assert_eq!(primitive.bounds.offset, (3, 4, 40));
        let moved = primitive.with_bound_offset((0, 0, 41));
        assert_eq!(moved.bounds.offset, (0, 0, 41));
        assert_eq!(moved.bounds.length, (32, 32, 1));
    }
}
