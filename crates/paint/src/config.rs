use thiserror::Error;

pub const MAX_ZOOM: u8 = 3;

/// Viewport display toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ViewFlags(u32);

impl ViewFlags {
    pub const NONE: Self = Self(0);
    pub const UNDERGROUND_INSIDE: Self = Self(1 << 0);
    pub const GRIDLINES: Self = Self(1 << 1);
    pub const LAND_HEIGHTS: Self = Self(1 << 2);
    pub const LAND_OWNERSHIP: Self = Self(1 << 3);
    pub const CONSTRUCTION_RIGHTS: Self = Self(1 << 4);
    pub const HIDE_VERTICAL: Self = Self(1 << 5);
    /// Peeking through the ceiling of an underground view hides water and fences.
    pub const CEILING_CUTAWAY: Self = Self(1 << 6);
    pub const HIDE_BASE: Self = Self(1 << 12);

    const NAMED: [(&'static str, ViewFlags); 8] = [
        ("underground_inside", Self::UNDERGROUND_INSIDE),
        ("gridlines", Self::GRIDLINES),
        ("land_heights", Self::LAND_HEIGHTS),
        ("land_ownership", Self::LAND_OWNERSHIP),
        ("construction_rights", Self::CONSTRUCTION_RIGHTS),
        ("hide_vertical", Self::HIDE_VERTICAL),
        ("ceiling_cutaway", Self::CEILING_CUTAWAY),
        ("hide_base", Self::HIDE_BASE),
    ];

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, flag)| *flag)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScreenMode {
    #[default]
    Play,
    ScenarioEditor,
    TrackDesigner,
    TrackManager,
}

impl ScreenMode {
    pub fn is_track_designer(self) -> bool {
        matches!(self, ScreenMode::TrackDesigner | ScreenMode::TrackManager)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DisplayConfigError {
    #[error("rotation must be in 0..=3, got {0}")]
    Rotation(u8),
    #[error("zoom must be in 0..={max}, got {zoom}")]
    Zoom { zoom: u8, max: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    rotation: u8,
    zoom: u8,
    pub flags: ViewFlags,
    pub screen_mode: ScreenMode,
    pub smoothing_enabled: bool,
    /// Selects the unit set of height-marker sprites.
    pub height_marker_offset: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rotation: 0,
            zoom: 0,
            flags: ViewFlags::NONE,
            screen_mode: ScreenMode::Play,
            smoothing_enabled: true,
            height_marker_offset: 0,
        }
    }
}

impl DisplayConfig {
    pub fn new(rotation: u8, zoom: u8) -> Result<Self, DisplayConfigError> {
        let mut config = Self::default();
        config.set_rotation(rotation)?;
        config.set_zoom(zoom)?;
        Ok(config)
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn set_rotation(&mut self, rotation: u8) -> Result<(), DisplayConfigError> {
        if rotation > 3 {
            return Err(DisplayConfigError::Rotation(rotation));
        }
        self.rotation = rotation;
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: u8) -> Result<(), DisplayConfigError> {
        if zoom > MAX_ZOOM {
            return Err(DisplayConfigError::Zoom {
                zoom,
                max: MAX_ZOOM,
            });
        }
        self.zoom = zoom;
        Ok(())
    }

    pub fn with_flags(mut self, flags: ViewFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn has(&self, flag: ViewFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Underground cutaway or hidden base; both draw terrain as a ghost.
    pub fn is_see_through(&self) -> bool {
        self.flags
            .intersects(ViewFlags::UNDERGROUND_INSIDE.union(ViewFlags::HIDE_BASE))
    }
}
