use sha2::{Digest, Sha256};

use super::primitive::{InteractionKind, PaintPrimitive};

/// Stable hex digest of a paint list, sensitive to order and every field
/// that affects the drawn frame.
pub fn digest_paint_list(primitives: &[PaintPrimitive]) -> String {
    let mut hasher = Sha256::new();
    for primitive in primitives {
        hasher.update(primitive.image.raw().to_le_bytes());
        hash_pair(&mut hasher, primitive.offset);
        hasher.update(primitive.z_offset.to_le_bytes());
        hash_triple(&mut hasher, primitive.bounds.length);
        hash_triple(&mut hasher, primitive.bounds.offset);
        let parent = primitive.parent.map_or(u64::MAX, |index| index as u64);
        hasher.update(parent.to_le_bytes());
        hasher.update(primitive.tile.x.to_le_bytes());
        hasher.update(primitive.tile.y.to_le_bytes());
        hasher.update([primitive.rotation, interaction_tag(primitive.interaction)]);
        for attached in &primitive.attached {
            hasher.update(attached.image.raw().to_le_bytes());
            hash_pair(&mut hasher, attached.offset);
            if let Some(blend) = attached.blend {
                hasher.update([1u8]);
                hasher.update(blend.raw().to_le_bytes());
            }
        }
        hasher.update([0u8]);
    }
    to_hex_lower(&hasher.finalize())
}

fn hash_pair(hasher: &mut Sha256, (x, y): (i16, i16)) {
    hasher.update(x.to_le_bytes());
    hasher.update(y.to_le_bytes());
}

fn hash_triple(hasher: &mut Sha256, (x, y, z): (i16, i16, i16)) {
    hash_pair(hasher, (x, y));
    hasher.update(z.to_le_bytes());
}

fn interaction_tag(kind: InteractionKind) -> u8 {
    match kind {
        InteractionKind::Terrain => 1,
        InteractionKind::Water => 2,
        InteractionKind::Park => 3,
        InteractionKind::Ride => 4,
        InteractionKind::Sprite => 5,
    }
}

fn to_hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}
