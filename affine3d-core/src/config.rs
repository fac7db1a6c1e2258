//! Configuration system.
//!
//! Loads viewer configuration from JSON strings (file IO left to the app).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{LetterParams, WireMesh};
use crate::input::ControlConfig;
use crate::projection::Camera;

/// Which mesh the viewer shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshKind {
    LetterK3d(LetterParams),
    LetterK { height: f64, width: f64 },
    Cube { size: f64 },
}

impl Default for MeshKind {
    fn default() -> Self {
        MeshKind::LetterK3d(LetterParams::default())
    }
}

impl MeshKind {
    pub fn build(&self) -> WireMesh {
        match self {
            MeshKind::LetterK3d(params) => WireMesh::letter_k_3d(params),
            MeshKind::LetterK { height, width } => WireMesh::letter_k(*height, *width),
            MeshKind::Cube { size } => WireMesh::cube(*size),
        }
    }
}

/// Root configuration shared by the front-ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Animation/redraw ticks per second.
    pub tick_hz: u32,
    pub camera: Camera,
    pub controls: ControlConfig,
    pub mesh: MeshKind,
    /// Seed for the jump sampler; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            camera: Camera::default(),
            controls: ControlConfig::default(),
            mesh: MeshKind::default(),
            seed: None,
        }
    }
}

impl ViewerConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_empty_object_gives_defaults() {
        let cfg = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = ViewerConfig::from_json_str(
            r#"{
                "tick_hz": 30,
                "seed": 9,
                "camera": { "fov_degrees": 45.0 },
                "mesh": { "kind": "cube", "size": 2.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.tick_hz, 30);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.camera.fov_degrees, 45.0);
        assert_eq!(cfg.camera.distance, 6.0);
        assert_eq!(cfg.mesh, MeshKind::Cube { size: 2.0 });
        assert_eq!(cfg.mesh.build().vertices().len(), 8);
    }

    #[test]
    fn test_letter_mesh_params() {
        let cfg = ViewerConfig::from_json_str(
            r#"{ "mesh": { "kind": "letter_k3d", "stroke": 0.5 } }"#,
        )
        .unwrap();
        match cfg.mesh {
            MeshKind::LetterK3d(params) => {
                assert_eq!(params.stroke, 0.5);
                assert_eq!(params.height, 2.0);
            }
            other => panic!("unexpected mesh {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = ViewerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
