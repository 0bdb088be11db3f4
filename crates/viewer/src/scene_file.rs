//! JSON park descriptions loaded by the viewer.
//!
//! A scene starts from a flat map of `ground` tiles; `tiles` entries then
//! replace single surfaces and stack track pieces on top. Rides are indexed
//! by their position in `rides`. `tunnels` seeds the openings cut into
//! front cliff faces, and a tile's `vertical_tunnel_height` sinks a shaft at
//! that land step.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use paint::surface::{
    ConstructionHighlight, MapSelection, PatrolArea, PatrolHighlight, PeepSpawn, SelectionKind,
    MAX_PEEP_SPAWNS,
};
use paint::{
    DisplayConfig, DisplayConfigError, OverlayState, ParkMap, ParkMapError, RideState,
    ScreenMode, SurfaceElement, TileCoord, TileElement, TrackElement, TunnelRun, TunnelRuns,
    ViewFlags,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::traversal::Passages;

#[derive(Debug, Error)]
pub(crate) enum SceneFileError {
    #[error("failed to read scene file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse scene file {path} at {field}: {source}")]
    ParseAt {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("validation failed for scene file {path} at {field}: {message}")]
    Validation {
        path: PathBuf,
        field: String,
        message: String,
    },
    #[error("scene file {path} has an invalid display config: {source}")]
    Display {
        path: PathBuf,
        #[source]
        source: DisplayConfigError,
    },
    #[error("scene file {path} describes an invalid map: {source}")]
    InvalidMap {
        path: PathBuf,
        #[source]
        source: ParkMapError,
    },
}

/// Everything one viewport pass needs.
#[derive(Debug, Clone)]
pub(crate) struct Scene {
    pub(crate) map: ParkMap,
    pub(crate) rides: Vec<RideState>,
    pub(crate) config: DisplayConfig,
    pub(crate) overlays: OverlayState,
    pub(crate) passages: Passages,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    width: u32,
    height: u32,
    #[serde(default)]
    ground: SurfaceSpec,
    #[serde(default)]
    tiles: Vec<TileSpec>,
    #[serde(default)]
    rides: Vec<RideState>,
    #[serde(default)]
    display: DisplaySpec,
    #[serde(default)]
    overlays: OverlaySpec,
    #[serde(default)]
    tunnels: TunnelSpec,
}

/// Tunnel openings as `[height, tunnel_type]` pairs, lowest first.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TunnelSpec {
    left: Vec<(u8, u8)>,
    right: Vec<(u8, u8)>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SurfaceSpec {
    base_height: u8,
    slope: u8,
    terrain: u8,
    edge_style: u8,
    water_height: u8,
    ownership: u8,
    grass_length: u8,
}

impl Default for SurfaceSpec {
    fn default() -> Self {
        Self {
            base_height: 14,
            slope: 0,
            terrain: 0,
            edge_style: 0,
            water_height: 0,
            ownership: 0,
            grass_length: 0,
        }
    }
}

impl SurfaceSpec {
    fn to_element(self) -> SurfaceElement {
        SurfaceElement::new(self.base_height, self.slope)
            .with_terrain(self.terrain)
            .with_edge_style(self.edge_style)
            .with_water_height(self.water_height)
            .with_ownership(self.ownership)
            .with_grass_length(self.grass_length)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TileSpec {
    x: i32,
    y: i32,
    #[serde(default)]
    surface: Option<SurfaceSpec>,
    #[serde(default)]
    tracks: Vec<TrackSpec>,
    #[serde(default)]
    vertical_tunnel_height: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TrackSpec {
    ride: u8,
    track_type: u8,
    sequence: u8,
    station: u8,
    direction: u8,
    base_height: u8,
    maze_entry: u16,
    ghost: bool,
}

impl TrackSpec {
    fn to_element(self) -> TrackElement {
        TrackElement {
            ride_index: self.ride,
            track_type: self.track_type,
            sequence: self.sequence,
            station_index: self.station,
            direction: self.direction,
            base_height: self.base_height,
            maze_entry: self.maze_entry,
            ghost: self.ghost,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScreenModeSpec {
    #[default]
    Play,
    ScenarioEditor,
    TrackDesigner,
    TrackManager,
}

impl From<ScreenModeSpec> for ScreenMode {
    fn from(mode: ScreenModeSpec) -> Self {
        match mode {
            ScreenModeSpec::Play => ScreenMode::Play,
            ScreenModeSpec::ScenarioEditor => ScreenMode::ScenarioEditor,
            ScreenModeSpec::TrackDesigner => ScreenMode::TrackDesigner,
            ScreenModeSpec::TrackManager => ScreenMode::TrackManager,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DisplaySpec {
    rotation: u8,
    zoom: u8,
    flags: Vec<String>,
    screen_mode: ScreenModeSpec,
    smoothing: bool,
    height_marker_offset: u32,
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self {
            rotation: 0,
            zoom: 0,
            flags: Vec::new(),
            screen_mode: ScreenModeSpec::Play,
            smoothing: true,
            height_marker_offset: 0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OverlaySpec {
    peep_spawns: Vec<PeepSpawnSpec>,
    selection: Option<SelectionSpec>,
    construction: Option<ConstructionSpec>,
    patrol: Option<PatrolSpec>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct PeepSpawnSpec {
    x: i32,
    y: i32,
    z: u8,
    #[serde(default)]
    direction: u8,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SelectionKindSpec {
    Corner(u8),
    Full,
    WaterTool,
    Quarter(u8),
    Edge(u8),
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct SelectionSpec {
    from: TileCoord,
    to: TileCoord,
    kind: SelectionKindSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConstructionSpec {
    tiles: Vec<TileCoord>,
    placeable: bool,
}

/// Patrol areas listed as tiles; each tile marks its whole 4x4 block.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PatrolSpec {
    staff_type: Vec<TileCoord>,
    individual: Option<Vec<TileCoord>>,
}

pub(crate) fn load_scene(path: &Path) -> Result<Scene, SceneFileError> {
    let raw = fs::read_to_string(path).map_err(|source| SceneFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scene(path, &raw)
}

pub(crate) fn parse_scene(path: &Path, raw: &str) -> Result<Scene, SceneFileError> {
    let file = parse_scene_json(path, raw)?;
    let loader = SceneLoader { path };
    let map = loader.build_map(&file)?;
    let config = loader.build_config(&file.display)?;
    let passages = loader.build_passages(&file)?;
    let overlays = loader.build_overlays(file.overlays)?;
    debug!(
        path = %path.display(),
        width = file.width,
        height = file.height,
        edited_tiles = file.tiles.len(),
        rides = file.rides.len(),
        shafts = passages.shafts.len(),
        "scene_file_loaded"
    );
    Ok(Scene {
        map,
        rides: file.rides,
        config,
        overlays,
        passages,
    })
}

fn parse_scene_json(path: &Path, raw: &str) -> Result<SceneFile, SceneFileError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, SceneFile>(&mut deserializer) {
        Ok(file) => Ok(file),
        Err(error) => {
            let field = error.path().to_string();
            let source = error.into_inner();
            if field.is_empty() || field == "." {
                Err(SceneFileError::Parse {
                    path: path.to_path_buf(),
                    source,
                })
            } else {
                Err(SceneFileError::ParseAt {
                    path: path.to_path_buf(),
                    field,
                    source,
                })
            }
        }
    }
}

struct SceneLoader<'a> {
    path: &'a Path,
}

impl SceneLoader<'_> {
    fn validation_err(&self, field: String, message: impl Into<String>) -> SceneFileError {
        SceneFileError::Validation {
            path: self.path.to_path_buf(),
            field,
            message: message.into(),
        }
    }

    fn map_err(&self, source: ParkMapError) -> SceneFileError {
        SceneFileError::InvalidMap {
            path: self.path.to_path_buf(),
            source,
        }
    }

    fn build_map(&self, file: &SceneFile) -> Result<ParkMap, SceneFileError> {
        let mut map = ParkMap::filled(file.width, file.height, file.ground.to_element())
            .map_err(|source| self.map_err(source))?;
        for (tile_index, spec) in file.tiles.iter().enumerate() {
            let tile = TileCoord::new(spec.x, spec.y);
            if let Some(surface) = spec.surface {
                map.set_surface(tile, surface.to_element())
                    .map_err(|source| self.map_err(source))?;
            }
            for (track_index, track) in spec.tracks.iter().enumerate() {
                if track.direction > 3 {
                    return Err(self.validation_err(
                        format!("tiles[{tile_index}].tracks[{track_index}].direction"),
                        format!("expected 0..=3, got {}", track.direction),
                    ));
                }
                map.push_element(tile, TileElement::Track(track.to_element()))
                    .map_err(|source| self.map_err(source))?;
            }
        }
        Ok(map)
    }

    fn build_passages(&self, file: &SceneFile) -> Result<Passages, SceneFileError> {
        let run = |side: &str, openings: &[(u8, u8)]| {
            TunnelRun::from_entries(openings)
                .map_err(|err| self.validation_err(format!("tunnels.{side}"), err.to_string()))
        };
        let tunnels = TunnelRuns {
            left: run("left", &file.tunnels.left)?,
            right: run("right", &file.tunnels.right)?,
        };

        let mut shafts = BTreeMap::new();
        for (tile_index, spec) in file.tiles.iter().enumerate() {
            let Some(step) = spec.vertical_tunnel_height else {
                continue;
            };
            let on_map = (0..file.width as i32).contains(&spec.x)
                && (0..file.height as i32).contains(&spec.y);
            if !on_map {
                return Err(self.validation_err(
                    format!("tiles[{tile_index}].vertical_tunnel_height"),
                    format!("tile ({}, {}) is off the map", spec.x, spec.y),
                ));
            }
            shafts.insert(TileCoord::new(spec.x, spec.y), step);
        }
        Ok(Passages { tunnels, shafts })
    }

    fn build_config(&self, display: &DisplaySpec) -> Result<DisplayConfig, SceneFileError> {
        let mut config =
            DisplayConfig::new(display.rotation, display.zoom).map_err(|source| {
                SceneFileError::Display {
                    path: self.path.to_path_buf(),
                    source,
                }
            })?;
        let mut flags = ViewFlags::NONE;
        for (index, name) in display.flags.iter().enumerate() {
            let flag = ViewFlags::from_name(name).ok_or_else(|| {
                self.validation_err(
                    format!("display.flags[{index}]"),
                    format!("unknown view flag '{name}'"),
                )
            })?;
            flags.insert(flag);
        }
        config.flags = flags;
        config.screen_mode = display.screen_mode.into();
        config.smoothing_enabled = display.smoothing;
        config.height_marker_offset = display.height_marker_offset;
        Ok(config)
    }

    fn build_overlays(&self, spec: OverlaySpec) -> Result<OverlayState, SceneFileError> {
        if spec.peep_spawns.len() > MAX_PEEP_SPAWNS {
            return Err(self.validation_err(
                "overlays.peep_spawns".to_string(),
                format!(
                    "expected at most {MAX_PEEP_SPAWNS} spawns, got {}",
                    spec.peep_spawns.len()
                ),
            ));
        }
        let peep_spawns = spec
            .peep_spawns
            .iter()
            .map(|spawn| PeepSpawn {
                world_x: spawn.x,
                world_y: spawn.y,
                z: spawn.z,
                direction: spawn.direction & 3,
            })
            .collect();

        let selection = spec
            .selection
            .map(|selection| self.build_selection(selection))
            .transpose()?;

        let construction = spec.construction.map(|construction| ConstructionHighlight {
            tiles: construction.tiles,
            placeable: construction.placeable,
        });

        let patrol = spec.patrol.map(|patrol| PatrolHighlight {
            staff_type_area: patrol_area(&patrol.staff_type),
            individual: patrol.individual.as_deref().map(patrol_area),
        });

        Ok(OverlayState {
            patrol,
            peep_spawns,
            selection,
            construction,
        })
    }

    fn build_selection(&self, spec: SelectionSpec) -> Result<MapSelection, SceneFileError> {
        let kind = match spec.kind {
            SelectionKindSpec::Full => SelectionKind::Full,
            SelectionKindSpec::WaterTool => SelectionKind::WaterTool,
            SelectionKindSpec::Corner(index) => SelectionKind::Corner(self.quarter(index)?),
            SelectionKindSpec::Quarter(index) => SelectionKind::Quarter(self.quarter(index)?),
            SelectionKindSpec::Edge(index) => SelectionKind::Edge(self.quarter(index)?),
        };
        Ok(MapSelection {
            from: spec.from,
            to: spec.to,
            kind,
        })
    }

    fn quarter(&self, index: u8) -> Result<u8, SceneFileError> {
        if index > 3 {
            return Err(self.validation_err(
                "overlays.selection.kind".to_string(),
                format!("expected 0..=3, got {index}"),
            ));
        }
        Ok(index)
    }
}

fn patrol_area(tiles: &[TileCoord]) -> PatrolArea {
    let mut area = PatrolArea::default();
    for tile in tiles {
        let (x, y) = tile.world();
        area.insert(x, y);
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use paint::{MapQuery, RideType};
    use tempfile::TempDir;

    fn parse(raw: &str) -> Result<Scene, SceneFileError> {
        parse_scene(Path::new("park.json"), raw)
    }

    #[test]
    fn minimal_scene_is_a_flat_map() {
        let scene = parse(r#"{ "width": 3, "height": 2 }"#).expect("scene");
        assert_eq!(scene.map.size(), (3, 2));
        let surface = scene.map.surface_at(TileCoord::new(2, 1)).expect("surface");
        assert_eq!(surface.base_height, 14);
        assert!(scene.rides.is_empty());
        assert_eq!(scene.config, DisplayConfig::default());
        assert_eq!(scene.overlays, OverlayState::default());
    }

    #[test]
    fn tiles_override_ground_and_stack_tracks() {
        let scene = parse(
            r#"{
                "width": 4, "height": 4,
                "ground": { "base_height": 10, "terrain": 1 },
                "tiles": [
                    { "x": 1, "y": 2, "surface": { "base_height": 12, "slope": 1, "water_height": 3 },
                      "tracks": [ { "ride": 0, "track_type": 101, "base_height": 12, "maze_entry": 4369 } ] }
                ],
                "rides": [ { "ride_type": "maze", "track_colour_supports": 1 } ]
            }"#,
        )
        .expect("scene");

        let tile = TileCoord::new(1, 2);
        let surface = scene.map.surface_at(tile).expect("surface");
        assert_eq!(surface.base_height, 12);
        assert_eq!(surface.slope_code(), 1);
        assert_eq!(surface.water_height(), 3);
        assert_eq!(
            scene.map.surface_at(TileCoord::new(0, 0)).expect("ground").terrain_kind(),
            1
        );

        let elements = scene.map.elements_at(tile);
        assert_eq!(elements.len(), 2);
        let TileElement::Track(track) = elements[1] else {
            panic!("expected a track element above the surface");
        };
        assert_eq!(track.track_type, 101);
        assert_eq!(track.maze_entry, 0x1111);
        assert_eq!(scene.rides[0].ride_type, RideType::Maze);
    }

    #[test]
    fn display_block_builds_the_config() {
        let scene = parse(
            r#"{
                "width": 1, "height": 1,
                "display": { "rotation": 2, "zoom": 1, "flags": ["gridlines", "land_heights"],
                             "screen_mode": "track_designer", "smoothing": false }
            }"#,
        )
        .expect("scene");
        assert_eq!(scene.config.rotation(), 2);
        assert_eq!(scene.config.zoom(), 1);
        assert!(scene.config.has(ViewFlags::GRIDLINES));
        assert!(scene.config.has(ViewFlags::LAND_HEIGHTS));
        assert!(!scene.config.has(ViewFlags::HIDE_BASE));
        assert!(scene.config.screen_mode.is_track_designer());
        assert!(!scene.config.smoothing_enabled);
    }

    #[test]
    fn overlays_are_built_from_their_specs() {
        let scene = parse(
            r#"{
                "width": 8, "height": 8,
                "overlays": {
                    "peep_spawns": [ { "x": 48, "y": 16, "z": 14, "direction": 5 } ],
                    "selection": { "from": { "x": 1, "y": 1 }, "to": { "x": 2, "y": 3 }, "kind": { "corner": 2 } },
                    "construction": { "tiles": [ { "x": 4, "y": 4 } ], "placeable": true },
                    "patrol": { "staff_type": [ { "x": 0, "y": 0 } ] }
                }
            }"#,
        )
        .expect("scene");
        let overlays = scene.overlays;
        assert_eq!(overlays.peep_spawns.len(), 1);
        assert_eq!(overlays.peep_spawns[0].direction, 1);
        let selection = overlays.selection.expect("selection");
        assert_eq!(selection.kind, SelectionKind::Corner(2));
        assert!(selection.contains(TileCoord::new(2, 2)));
        assert!(overlays.construction.expect("construction").placeable);
        let patrol = overlays.patrol.expect("patrol");
        assert!(patrol.staff_type_area.contains(64, 64));
        assert!(!patrol.staff_type_area.contains(160, 0));
        assert!(patrol.individual.is_none());
    }

    #[test]
    fn parse_errors_carry_the_field_path() {
        let err = parse(
            r#"{ "width": 2, "height": 2, "tiles": [ { "x": 0, "y": 0, "tracks": [ { "direction": "north" } ] } ] }"#,
        )
        .expect_err("bad direction type");
        match err {
            SceneFileError::ParseAt { field, .. } => {
                assert_eq!(field, "tiles[0].tracks[0].direction");
            }
            other => panic!("expected ParseAt, got {other:?}"),
        }

        let err = parse("{ not json").expect_err("syntax");
        assert!(matches!(err, SceneFileError::Parse { .. }));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse(r#"{ "width": 1, "height": 1, "colour": 3 }"#).expect_err("unknown field");
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn validation_errors_name_the_field() {
        let err = parse(
            r#"{ "width": 2, "height": 2, "tiles": [ { "x": 1, "y": 1, "tracks": [ { "direction": 4 } ] } ] }"#,
        )
        .expect_err("direction out of range");
        assert_eq!(
            err.to_string(),
            "validation failed for scene file park.json at tiles[0].tracks[0].direction: expected 0..=3, got 4"
        );

        let err = parse(r#"{ "width": 1, "height": 1, "display": { "flags": ["xray"] } }"#)
            .expect_err("unknown flag");
        assert!(err.to_string().contains("display.flags[0]"));

        let err = parse(r#"{ "width": 1, "height": 1, "display": { "rotation": 7 } }"#)
            .expect_err("rotation");
        assert!(matches!(
            err,
            SceneFileError::Display {
                source: DisplayConfigError::Rotation(7),
                ..
            }
        ));
    }

    #[test]
    fn off_map_tiles_are_invalid() {
        let err = parse(r#"{ "width": 2, "height": 2, "tiles": [ { "x": 5, "y": 0, "surface": {} } ] }"#)
            .expect_err("off map");
        assert!(matches!(
            err,
            SceneFileError::InvalidMap {
                source: ParkMapError::OutOfBounds { x: 5, .. },
                ..
            }
        ));
    }

    #[test]
    fn tunnels_and_shafts_become_passages() {
        let scene = parse(
            r#"{
                "width": 2, "height": 2,
                "tunnels": { "left": [[3, 0], [7, 1]] },
                "tiles": [ { "x": 1, "y": 0, "vertical_tunnel_height": 7 } ]
            }"#,
        )
        .expect("scene");
        let passages = scene.passages;
        assert_eq!(passages.tunnels.left.len(), 2);
        assert_eq!(passages.tunnels.left.front().height, 3);
        assert!(passages.tunnels.right.is_empty());
        assert_eq!(passages.shafts.get(&TileCoord::new(1, 0)), Some(&7));
        assert_eq!(passages.shafts.len(), 1);

        let minimal = parse(r#"{ "width": 2, "height": 2, "tunnels": { "left": [[7, 0]] } }"#)
            .expect("tunnels only");
        assert_eq!(minimal.passages.tunnels.left.front().height, 7);
    }

    #[test]
    fn bad_passages_are_rejected() {
        let err = parse(r#"{ "width": 2, "height": 2, "tunnels": { "right": [[7, 0], [3, 0]] } }"#)
            .expect_err("descending heights");
        assert!(err.to_string().contains("tunnels.right"));

        let err = parse(r#"{ "width": 2, "height": 2, "tunnels": { "left": [[3, 20]] } }"#)
            .expect_err("unknown tunnel type");
        assert!(err.to_string().contains("unknown tunnel type 20"));

        let err = parse(
            r#"{ "width": 2, "height": 2, "tiles": [ { "x": 2, "y": 0, "vertical_tunnel_height": 7 } ] }"#,
        )
        .expect_err("shaft off the map");
        assert!(err.to_string().contains("tiles[0].vertical_tunnel_height"));
    }

    #[test]
    fn demo_park_parses() {
        let scene = parse(include_str!("../../../demos/park.json")).expect("demo scene");
        assert_eq!(scene.map.size(), (9, 9));
        assert_eq!(scene.rides.len(), 4);
        assert_eq!(scene.rides[0].ride_type, RideType::TopSpin);
        assert!(scene.rides[0].vehicle.is_some());
        assert!(scene.overlays.selection.is_some());
        assert!(!scene.passages.tunnels.left.is_empty());
        assert_eq!(scene.passages.shafts.len(), 1);
    }

    #[test]
    fn loads_from_disk() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("park.json");
        fs::write(&path, r#"{ "width": 2, "height": 2 }"#).expect("write scene");
        let scene = load_scene(&path).expect("load");
        assert_eq!(scene.map.size(), (2, 2));

        let missing = temp.path().join("missing.json");
        assert!(matches!(
            load_scene(&missing).expect_err("missing"),
            SceneFileError::Read { .. }
        ));
    }
}
