use std::path::Path;
use std::process::ExitCode;

use paint::{
    digest_paint_list, DisplayConfig, DisplayConfigError, InteractionKind, MapQuery,
    PaintContext, PaintList, PaintPrimitive,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::atomic_io::{write_output, OutputWriteError};
use crate::preview::{write_preview, PreviewError};
use crate::scene_file::{load_scene, SceneFileError};
use crate::traversal::paint_viewport;

use super::bootstrap::ViewerWiring;

#[derive(Debug, Error)]
pub(crate) enum ViewerError {
    #[error(transparent)]
    Scene(#[from] SceneFileError),
    #[error("display override rejected: {0}")]
    Override(#[from] DisplayConfigError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error("failed to serialize paint list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write paint list: {0}")]
    WritePaintList(#[source] OutputWriteError),
}

/// Primitive counts per interaction kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct PaintStats {
    pub(crate) terrain: usize,
    pub(crate) water: usize,
    pub(crate) park: usize,
    pub(crate) ride: usize,
    pub(crate) sprite: usize,
    pub(crate) children: usize,
    pub(crate) attachments: usize,
}

impl PaintStats {
    fn collect(primitives: &[PaintPrimitive]) -> Self {
        let mut stats = Self::default();
        for primitive in primitives {
            let slot = match primitive.interaction {
                InteractionKind::Terrain => &mut stats.terrain,
                InteractionKind::Water => &mut stats.water,
                InteractionKind::Park => &mut stats.park,
                InteractionKind::Ride => &mut stats.ride,
                InteractionKind::Sprite => &mut stats.sprite,
            };
            *slot += 1;
            if primitive.parent.is_some() {
                stats.children += 1;
            }
            stats.attachments += primitive.attached.len();
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderSummary {
    pub(crate) digest: String,
    pub(crate) primitives: usize,
    pub(crate) stats: PaintStats,
}

#[derive(Serialize)]
struct PaintListReport<'a> {
    scene: String,
    rotation: u8,
    zoom: u8,
    digest: &'a str,
    primitive_count: usize,
    stats: PaintStats,
    primitives: &'a [PaintPrimitive],
}

pub(crate) fn run(app: ViewerWiring) -> ExitCode {
    match render(&app) {
        Ok(summary) => {
            info!(
                digest = %summary.digest,
                primitives = summary.primitives,
                children = summary.stats.children,
                "viewer_finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "render_failed");
            ExitCode::FAILURE
        }
    }
}

pub(crate) fn render(app: &ViewerWiring) -> Result<RenderSummary, ViewerError> {
    let scene = load_scene(&app.scene_path)?;
    let mut config = scene.config;
    app.overrides.apply(&mut config)?;

    let (width, height) = scene.map.size();
    let ctx = PaintContext::new(config).with_overlays(scene.overlays);
    let list = paint_viewport(&scene.map, &scene.rides, &scene.passages, ctx);
    let digest = digest_paint_list(list.primitives());
    let stats = PaintStats::collect(list.primitives());
    info!(
        width,
        height,
        rotation = config.rotation(),
        zoom = config.zoom(),
        primitives = list.len(),
        terrain = stats.terrain,
        water = stats.water,
        park = stats.park,
        ride = stats.ride,
        sprite = stats.sprite,
        children = stats.children,
        attachments = stats.attachments,
        "viewport_painted"
    );

    if let Some(path) = &app.paint_list_path {
        write_paint_list(path, &app.scene_path, config, &digest, stats, &list)?;
        info!(path = %path.display(), "paint_list_written");
    }
    if let Some(path) = &app.preview_path {
        let (preview_width, preview_height) =
            write_preview(path, list.primitives(), config.zoom())?;
        info!(
            path = %path.display(),
            width = preview_width,
            height = preview_height,
            "preview_exported"
        );
    }

    Ok(RenderSummary {
        digest,
        primitives: list.len(),
        stats,
    })
}

fn write_paint_list(
    path: &Path,
    scene_path: &Path,
    config: DisplayConfig,
    digest: &str,
    stats: PaintStats,
    list: &PaintList,
) -> Result<(), ViewerError> {
    let report = PaintListReport {
        scene: scene_path.display().to_string(),
        rotation: config.rotation(),
        zoom: config.zoom(),
        digest,
        primitive_count: list.len(),
        stats,
        primitives: list.primitives(),
    };
    let mut text = serde_json::to_string_pretty(&report)?;
    text.push('\n');
    write_output(path, text.as_bytes()).map_err(ViewerError::WritePaintList)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bootstrap::DisplayOverrides;
    use std::fs;
    use tempfile::TempDir;

    const MAZE_SCENE: &str = r#"{
        "width": 3, "height": 3,
        "tiles": [
            { "x": 1, "y": 1, "tracks": [ { "track_type": 101, "base_height": 14, "maze_entry": 257 } ] },
            { "x": 2, "y": 0, "surface": { "base_height": 4, "water_height": 3 } }
        ],
        "rides": [ { "ride_type": "maze", "track_colour_supports": 1 } ]
    }"#;

    fn wiring(temp: &TempDir) -> ViewerWiring {
        let scene_path = temp.path().join("park.json");
        fs::write(&scene_path, MAZE_SCENE).expect("write scene");
        ViewerWiring {
            scene_path,
            paint_list_path: None,
            preview_path: None,
            overrides: DisplayOverrides::default(),
        }
    }

    #[test]
    fn stats_split_primitives_by_kind() {
        let temp = TempDir::new().expect("tempdir");
        let summary = render(&wiring(&temp)).expect("render");
        assert!(summary.stats.terrain >= 9);
        assert!(summary.stats.ride > 0);
        assert!(summary.stats.water > 0);
        assert_eq!(summary.digest.len(), 64);
    }

    #[test]
    fn writes_paint_list_and_preview() {
        let temp = TempDir::new().expect("tempdir");
        let mut app = wiring(&temp);
        let list_path = temp.path().join("out").join("paint_list.json");
        let preview_path = temp.path().join("out").join("park.png");
        app.paint_list_path = Some(list_path.clone());
        app.preview_path = Some(preview_path.clone());

        let summary = render(&app).expect("render");

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&list_path).expect("read list"))
                .expect("report json");
        assert_eq!(report["digest"], summary.digest.as_str());
        assert_eq!(report["primitive_count"], summary.primitives);
        assert_eq!(
            report["primitives"].as_array().expect("primitives").len(),
            summary.primitives
        );
        assert!(preview_path.exists());
    }

    #[test]
    fn rotation_override_changes_the_digest() {
        let temp = TempDir::new().expect("tempdir");
        let mut app = wiring(&temp);
        let front = render(&app).expect("render").digest;
        app.overrides.rotation = Some(2);
        let back = render(&app).expect("render rotated").digest;
        assert_ne!(front, back);
    }

    #[test]
    fn failures_surface_as_errors() {
        let temp = TempDir::new().expect("tempdir");
        let mut app = wiring(&temp);
        app.overrides.zoom = Some(8);
        assert!(matches!(render(&app), Err(ViewerError::Override(_))));

        app.overrides.zoom = None;
        app.scene_path = temp.path().join("missing.json");
        assert!(matches!(
            render(&app),
            Err(ViewerError::Scene(SceneFileError::Read { .. }))
        ));
    }
}
