use std::path::PathBuf;

use paint::{DisplayConfig, DisplayConfigError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

const ROTATION_ENV_VAR: &str = "ISOPAINT_ROTATION";
const ZOOM_ENV_VAR: &str = "ISOPAINT_ZOOM";
const PREVIEW_ENV_VAR: &str = "ISOPAINT_PREVIEW";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum BootstrapError {
    #[error("usage: viewer <scene.json> [paint-list.json]")]
    MissingScenePath,
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("{var} must be a whole number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Camera settings from the environment that win over the scene file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DisplayOverrides {
    pub(crate) rotation: Option<u8>,
    pub(crate) zoom: Option<u8>,
}

impl DisplayOverrides {
    pub(crate) fn apply(&self, config: &mut DisplayConfig) -> Result<(), DisplayConfigError> {
        if let Some(rotation) = self.rotation {
            config.set_rotation(rotation)?;
        }
        if let Some(zoom) = self.zoom {
            config.set_zoom(zoom)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ViewerWiring {
    pub(crate) scene_path: PathBuf,
    /// Where to dump the paint list as JSON, if anywhere.
    pub(crate) paint_list_path: Option<PathBuf>,
    pub(crate) preview_path: Option<PathBuf>,
    pub(crate) overrides: DisplayOverrides,
}

pub(crate) fn build_app() -> Result<ViewerWiring, BootstrapError> {
    init_tracing();
    info!("=== Isopaint Viewer Startup ===");

    let wiring = wiring_from(std::env::args().skip(1), |var| std::env::var(var).ok())?;
    info!(
        scene = %wiring.scene_path.display(),
        rotation = ?wiring.overrides.rotation,
        zoom = ?wiring.overrides.zoom,
        preview = wiring.preview_path.is_some(),
        "viewer_configured"
    );
    Ok(wiring)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn wiring_from(
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ViewerWiring, BootstrapError> {
    let mut args = args.into_iter();
    let scene_path = args
        .next()
        .map(PathBuf::from)
        .ok_or(BootstrapError::MissingScenePath)?;
    let paint_list_path = args.next().map(PathBuf::from);
    if let Some(extra) = args.next() {
        return Err(BootstrapError::UnexpectedArgument(extra));
    }

    Ok(ViewerWiring {
        scene_path,
        paint_list_path,
        preview_path: non_empty(env(PREVIEW_ENV_VAR)).map(PathBuf::from),
        overrides: DisplayOverrides {
            rotation: parse_number_env(ROTATION_ENV_VAR, env(ROTATION_ENV_VAR))?,
            zoom: parse_number_env(ZOOM_ENV_VAR, env(ZOOM_ENV_VAR))?,
        },
    })
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number_env(var: &'static str, raw: Option<String>) -> Result<Option<u8>, BootstrapError> {
    non_empty(raw)
        .map(|value| {
            value
                .parse::<u8>()
                .map_err(|_| BootstrapError::InvalidNumber { var, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn wiring(args: &[&str], env: &[(&str, &str)]) -> Result<ViewerWiring, BootstrapError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        wiring_from(args.iter().map(ToString::to_string), |var| env.get(var).cloned())
    }

    #[test]
    fn scene_path_is_required() {
        assert_eq!(wiring(&[], &[]), Err(BootstrapError::MissingScenePath));
    }

    #[test]
    fn positional_arguments_and_env_overrides() {
        let wiring = wiring(
            &["park.json", "out/list.json"],
            &[
                (ROTATION_ENV_VAR, "3"),
                (ZOOM_ENV_VAR, " 1 "),
                (PREVIEW_ENV_VAR, "out/park.png"),
            ],
        )
        .expect("wiring");
        assert_eq!(wiring.scene_path, PathBuf::from("park.json"));
        assert_eq!(wiring.paint_list_path, Some(PathBuf::from("out/list.json")));
        assert_eq!(wiring.preview_path, Some(PathBuf::from("out/park.png")));
        assert_eq!(
            wiring.overrides,
            DisplayOverrides {
                rotation: Some(3),
                zoom: Some(1),
            }
        );
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let wiring = wiring(&["park.json"], &[(ROTATION_ENV_VAR, "  "), (PREVIEW_ENV_VAR, "")])
            .expect("wiring");
        assert_eq!(wiring.overrides, DisplayOverrides::default());
        assert!(wiring.preview_path.is_none());
        assert!(wiring.paint_list_path.is_none());
    }

    #[test]
    fn bad_numbers_and_extra_arguments_are_rejected() {
        assert_eq!(
            wiring(&["park.json"], &[(ZOOM_ENV_VAR, "far")]),
            Err(BootstrapError::InvalidNumber {
                var: ZOOM_ENV_VAR,
                value: "far".to_string(),
            })
        );
        assert_eq!(
            wiring(&["park.json", "list.json", "more"], &[]),
            Err(BootstrapError::UnexpectedArgument("more".to_string()))
        );
    }

    #[test]
    fn overrides_are_validated_when_applied() {
        let mut config = DisplayConfig::default();
        DisplayOverrides {
            rotation: Some(2),
            zoom: None,
        }
        .apply(&mut config)
        .expect("valid rotation");
        assert_eq!(config.rotation(), 2);

        let err = DisplayOverrides {
            rotation: None,
            zoom: Some(9),
        }
        .apply(&mut config)
        .expect_err("zoom out of range");
        assert!(matches!(err, DisplayConfigError::Zoom { zoom: 9, .. }));
    }
}
