use thiserror::Error;

use crate::config::DisplayConfig;
use crate::geometry::tables::TUNNEL_KIND_COUNT;
use crate::geometry::ImageId;
use crate::map::TileCoord;
use crate::surface::OverlayState;

use super::primitive::{InteractionKind, PaintPrimitive};

pub const TUNNEL_RUN_CAPACITY: usize = 65;
pub const TUNNEL_SENTINEL: u8 = 0xFF;

/// A pending tunnel opening: the land step it starts at and its tunnel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelEntry {
    pub height: u8,
    pub kind: u8,
}

impl TunnelEntry {
    pub const END: Self = Self {
        height: TUNNEL_SENTINEL,
        kind: TUNNEL_SENTINEL,
    };

    pub fn is_end(&self) -> bool {
        self.height == TUNNEL_SENTINEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TunnelRunError {
    #[error("tunnel run holds at most {max} openings, got {count}")]
    TooMany { count: usize, max: usize },
    #[error("tunnel opening {index} has unknown tunnel type {kind}")]
    UnknownKind { index: usize, kind: u8 },
    #[error("tunnel opening {index} at height {height} is reserved or below the one before it")]
    BadHeight { index: usize, height: u8 },
}

/// Tunnel openings queued along one edge axis, ordered by height and ended
/// by a sentinel entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelRun {
    entries: [TunnelEntry; TUNNEL_RUN_CAPACITY],
}

impl Default for TunnelRun {
    fn default() -> Self {
        Self {
            entries: [TunnelEntry::END; TUNNEL_RUN_CAPACITY],
        }
    }
}

impl TunnelRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run holding `openings` as `(height, kind)` pairs, lowest first.
    pub fn from_entries(openings: &[(u8, u8)]) -> Result<Self, TunnelRunError> {
        let max = TUNNEL_RUN_CAPACITY - 1;
        if openings.len() > max {
            return Err(TunnelRunError::TooMany {
                count: openings.len(),
                max,
            });
        }
        let mut run = Self::new();
        let mut floor = 0;
        for (index, &(height, kind)) in openings.iter().enumerate() {
            if kind >= TUNNEL_KIND_COUNT {
                return Err(TunnelRunError::UnknownKind { index, kind });
            }
            if height == TUNNEL_SENTINEL || height < floor {
                return Err(TunnelRunError::BadHeight { index, height });
            }
            floor = height;
            run.entries[index] = TunnelEntry { height, kind };
        }
        Ok(run)
    }

    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .position(TunnelEntry::is_end)
            .unwrap_or(TUNNEL_RUN_CAPACITY)
    }

    pub fn is_empty(&self) -> bool {
        self.entries[0].is_end()
    }

    /// Queues an opening. The last slot always stays a sentinel, so a full
    /// run drops the entry and returns false.
    pub fn push(&mut self, height: u8, kind: u8) -> bool {
        let len = self.len();
        if len + 1 >= TUNNEL_RUN_CAPACITY {
            return false;
        }
        self.entries[len] = TunnelEntry { height, kind };
        true
    }

    pub fn front(&self) -> TunnelEntry {
        self.entries[0]
    }

    /// Drops the front entry by shifting the whole buffer left one slot.
    pub fn advance(&mut self) {
        self.entries.copy_within(1.., 0);
        self.entries[TUNNEL_RUN_CAPACITY - 1] = TunnelEntry::END;
    }

    pub fn clear(&mut self) {
        self.entries = [TunnelEntry::END; TUNNEL_RUN_CAPACITY];
    }

    pub fn entries(&self) -> &[TunnelEntry] {
        &self.entries
    }
}

/// The two tunnel runs, one per screen edge axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TunnelRuns {
    pub left: TunnelRun,
    pub right: TunnelRun,
}

impl TunnelRuns {
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

/// One of the nine zones of a tile footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Top,
    Left,
    Right,
    Bottom,
    Centre,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Segment {
    pub const ALL: [Segment; 9] = [
        Segment::Top,
        Segment::Left,
        Segment::Right,
        Segment::Bottom,
        Segment::Centre,
        Segment::TopLeft,
        Segment::TopRight,
        Segment::BottomLeft,
        Segment::BottomRight,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn bit(self) -> SegmentSet {
        SegmentSet(1 << self as u16)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentSet(u16);

impl SegmentSet {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0x01FF);

    pub const fn of(segments: &[Segment]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < segments.len() {
            bits |= segments[i].bit().0;
            i += 1;
        }
        Self(bits)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn contains(self, segment: Segment) -> bool {
        self.0 & segment.bit().0 != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Segment> {
        Segment::ALL
            .into_iter()
            .filter(move |segment| self.contains(*segment))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSupport {
    pub height: u16,
    pub slope: u8,
}

impl SegmentSupport {
    pub const BLOCKED_HEIGHT: u16 = 0xFFFF;
    pub const UNSET_SLOPE: u8 = 0xFF;
    pub const CLEARANCE_SLOPE: u8 = 0x20;

    pub const UNSET: Self = Self {
        height: 0,
        slope: Self::UNSET_SLOPE,
    };

    pub fn is_blocked(&self) -> bool {
        self.height == Self::BLOCKED_HEIGHT
    }
}

/// Per-tile support heights published for the support renderer and for
/// clearance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportHeights {
    pub segments: [SegmentSupport; 9],
    pub general: SegmentSupport,
}

impl Default for SupportHeights {
    fn default() -> Self {
        Self {
            segments: [SegmentSupport::UNSET; 9],
            general: SegmentSupport::UNSET,
        }
    }
}

impl SupportHeights {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn segment(&self, segment: Segment) -> SegmentSupport {
        self.segments[segment.index()]
    }

    pub fn set_segments(&mut self, set: SegmentSet, height: u16, slope: u8) {
        for segment in set.iter() {
            self.segments[segment.index()] = SegmentSupport { height, slope };
        }
    }

    pub fn block_segments(&mut self, set: SegmentSet) {
        self.set_segments(set, SegmentSupport::BLOCKED_HEIGHT, 0);
    }

    pub fn set_general(&mut self, height: u16, slope: u8) {
        self.general = SegmentSupport { height, slope };
    }

    /// Raises the general height to `height` if it is below it.
    pub fn raise_clearance(&mut self, height: u16) {
        if self.general.height < height {
            self.general = SegmentSupport {
                height,
                slope: SegmentSupport::CLEARANCE_SLOPE,
            };
        }
    }
}

/// Mutable state threaded through the paint routines of one viewport pass.
#[derive(Debug, Clone)]
pub struct PaintContext {
    pub config: DisplayConfig,
    pub overlays: OverlayState,
    pub tunnels: TunnelRuns,
    pub supports: SupportHeights,
    /// World z of the water plane on the current tile, zero when dry.
    pub water_height: u16,
    /// Land step at which a vertical shaft is cut through the current tile.
    pub vertical_tunnel_height: Option<u8>,
    pub tile: TileCoord,
    pub interaction: InteractionKind,
}

impl PaintContext {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            overlays: OverlayState::default(),
            tunnels: TunnelRuns::default(),
            supports: SupportHeights::default(),
            water_height: 0,
            vertical_tunnel_height: None,
            tile: TileCoord::default(),
            interaction: InteractionKind::Terrain,
        }
    }

    pub fn with_overlays(mut self, overlays: OverlayState) -> Self {
        self.overlays = overlays;
        self
    }

    /// Clears per-tile state. Tunnel runs carry over between tiles.
    pub fn begin_tile(&mut self, tile: TileCoord) {
        self.tile = tile;
        self.supports.reset();
        self.water_height = 0;
        self.vertical_tunnel_height = None;
        self.interaction = InteractionKind::Terrain;
    }

    pub fn rotation(&self) -> u8 {
        self.config.rotation()
    }

    /// World position of the current tile's origin corner.
    pub fn tile_world(&self) -> (i32, i32) {
        self.tile.world()
    }

    /// Primitive stamped with the current tile, rotation and interaction.
    pub fn primitive(
        &self,
        image: ImageId,
        offset: (i16, i16),
        length: (i16, i16, i16),
        z_offset: i16,
    ) -> PaintPrimitive {
        PaintPrimitive::new(image, offset, length, z_offset).located(
            self.tile,
            self.rotation(),
            self.interaction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_a_pure_left_shift() {
        let mut run = TunnelRun::new();
        for step in 0..10u8 {
            assert!(run.push(step * 2, step % 16));
        }
        let reference = run;
        for shift in 1..=4usize {
            run.advance();
            for (index, entry) in run.entries().iter().enumerate() {
                let expected = reference
                    .entries()
                    .get(index + shift)
                    .copied()
                    .unwrap_or(TunnelEntry::END);
                assert_eq!(*entry, expected, "shift {shift} slot {index}");
            }
        }
        assert_eq!(run.len(), 6);
    }

    #[test]
    fn runs_built_from_openings_are_checked() {
        let run = TunnelRun::from_entries(&[(4, 0), (4, 3), (9, 15)]).expect("run");
        assert_eq!(run.len(), 3);
        assert_eq!(run.front(), TunnelEntry { height: 4, kind: 0 });

        assert_eq!(
            TunnelRun::from_entries(&[(4, 16)]),
            Err(TunnelRunError::UnknownKind { index: 0, kind: 16 })
        );
        assert_eq!(
            TunnelRun::from_entries(&[(9, 0), (4, 0)]),
            Err(TunnelRunError::BadHeight {
                index: 1,
                height: 4
            })
        );
        assert_eq!(
            TunnelRun::from_entries(&[(TUNNEL_SENTINEL, 0)]),
            Err(TunnelRunError::BadHeight {
                index: 0,
                height: TUNNEL_SENTINEL
            })
        );
        let too_many = vec![(1u8, 0u8); TUNNEL_RUN_CAPACITY];
        assert!(matches!(
            TunnelRun::from_entries(&too_many),
            Err(TunnelRunError::TooMany { .. })
        ));
    }

    #[test]
    fn full_run_keeps_its_sentinel() {
        let mut run = TunnelRun::new();
        for _ in 0..TUNNEL_RUN_CAPACITY - 1 {
            assert!(run.push(1, 0));
        }
        assert!(!run.push(1, 0));
        assert!(run.entries()[TUNNEL_RUN_CAPACITY - 1].is_end());
    }

    #[test]
    fn advancing_an_empty_run_stays_empty() {
        let mut run = TunnelRun::new();
        run.advance();
        assert!(run.is_empty());
        assert!(run.front().is_end());
    }

    #[test]
    fn clearance_only_raises() {
        let mut supports = SupportHeights::default();
        supports.set_general(64, 0);
        supports.raise_clearance(48);
        assert_eq!(supports.general, SegmentSupport { height: 64, slope: 0 });
        supports.raise_clearance(96);
        assert_eq!(supports.general.height, 96);
        assert_eq!(supports.general.slope, SegmentSupport::CLEARANCE_SLOPE);
    }

    #[test]
    fn segment_sets_cover_named_zones() {
        let corners = SegmentSet::of(&[Segment::TopLeft, Segment::BottomRight]);
        assert_eq!(corners.iter().count(), 2);
        assert_eq!(SegmentSet::ALL.iter().count(), 9);
        assert!(!SegmentSet::ALL.without(corners).contains(Segment::TopLeft));
    }

    #[test]
    fn begin_tile_keeps_tunnels() {
        let mut ctx = PaintContext::new(DisplayConfig::default());
        ctx.tunnels.left.push(3, 1);
        ctx.supports.set_general(10, 0);
        ctx.water_height = 64;
        ctx.begin_tile(TileCoord::new(2, 3));
        assert_eq!(ctx.tunnels.left.len(), 1);
        assert_eq!(ctx.supports, SupportHeights::default());
        assert_eq!(ctx.water_height, 0);
        let primitive = ctx.primitive(ImageId::new(5), (0, 0), (1, 1, 1), 0);
        assert_eq!(primitive.tile, TileCoord::new(2, 3));
    }
}
