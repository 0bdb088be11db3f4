/// One of the four screen-space edges of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

/// Unit offsets of the four neighbours at camera rotation 0, in descriptor
/// slot order (slot 0 is the tile itself).
const BASE_NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (0, -1), (-1, 0)];

impl Edge {
    pub const ALL: [Edge; 4] = [
        Edge::BottomLeft,
        Edge::BottomRight,
        Edge::TopLeft,
        Edge::TopRight,
    ];

    /// Order in which edge blends are evaluated for a tile.
    pub const SMOOTHING_ORDER: [Edge; 4] = [
        Edge::TopLeft,
        Edge::TopRight,
        Edge::BottomLeft,
        Edge::BottomRight,
    ];

    /// Slot of the neighbour across this edge in a descriptor array.
    pub const fn descriptor_slot(self) -> usize {
        match self {
            Edge::BottomLeft => 1,
            Edge::BottomRight => 2,
            Edge::TopLeft => 3,
            Edge::TopRight => 4,
        }
    }

    pub const fn is_top(self) -> bool {
        matches!(self, Edge::TopLeft | Edge::TopRight)
    }

    /// Tile offset of the neighbour across this edge for a camera rotation.
    pub fn neighbour_offset(self, rotation: u8) -> (i32, i32) {
        rotate_offset(BASE_NEIGHBOUR_OFFSETS[self.descriptor_slot() - 1], rotation)
    }
}

/// Rotates a tile offset by quarter turns.
pub fn rotate_offset((x, y): (i32, i32), rotation: u8) -> (i32, i32) {
    match rotation & 3 {
        0 => (x, y),
        1 => (-y, x),
        2 => (-x, -y),
        _ => (y, -x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbour_offsets_follow_camera_rotation() {
        assert_eq!(Edge::BottomLeft.neighbour_offset(0), (1, 0));
        assert_eq!(Edge::BottomLeft.neighbour_offset(1), (0, 1));
        assert_eq!(Edge::BottomLeft.neighbour_offset(2), (-1, 0));
        assert_eq!(Edge::BottomLeft.neighbour_offset(3), (0, -1));
        assert_eq!(Edge::TopRight.neighbour_offset(0), (-1, 0));
    }

    #[test]
    fn opposite_edges_point_away_from_each_other() {
        for rotation in 0..4 {
            let (bx, by) = Edge::BottomLeft.neighbour_offset(rotation);
            let (tx, ty) = Edge::TopRight.neighbour_offset(rotation);
            assert_eq!((bx + tx, by + ty), (0, 0));
            let (bx, by) = Edge::BottomRight.neighbour_offset(rotation);
            let (tx, ty) = Edge::TopLeft.neighbour_offset(rotation);
            assert_eq!((bx + tx, by + ty), (0, 0));
        }
    }
}
