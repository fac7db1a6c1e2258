//! Interactive viewer session.
//!
//! Owns everything that changes while the viewer runs: the pose, the jump
//! animation, the drag state and the random source. Front-ends feed it
//! input events and ticks, then ask it for a frame to draw.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::animation::JumpAnimation;
use crate::config::ViewerConfig;
use crate::geometry::WireMesh;
use crate::input::{ControlConfig, DragMode, InputEvent, Key};
use crate::projection::{Camera, Frame, Viewport};
use crate::transform::{Mat4, Pose, Transform, Vec3};

/// Pose values for an on-screen readout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub position: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, r, s) = (self.position, self.rotation, self.scale);
        writeln!(
            f,
            "global position: x{:+.2} y{:+.2} z{:+.2}",
            p.x, p.y, p.z
        )?;
        writeln!(f, "local rotation: x{:+.1} y{:+.1} z{:+.1}", r.x, r.y, r.z)?;
        write!(f, "scale: x{:+.3} y{:+.3} z{:+.3}", s.x, s.y, s.z)
    }
}

/// Viewer state driven by a single event thread
pub struct Session<R: Rng = StdRng> {
    mesh: WireMesh,
    camera: Camera,
    controls: ControlConfig,
    pose: Pose,
    jump: JumpAnimation,
    drag: Option<DragMode>,
    viewport: Viewport,
    rng: R,
}

impl Session<StdRng> {
    /// Build a session from configuration; the RNG is seeded from `seed`
    /// when present, otherwise from entropy
    pub fn from_config(config: &ViewerConfig, viewport: Viewport) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mesh = config.mesh.build();
        info!(
            vertices = mesh.vertices().len(),
            edges = mesh.edges().len(),
            "session ready"
        );
        Session::new(mesh, config.camera, config.controls, viewport, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn new(
        mesh: WireMesh,
        camera: Camera,
        controls: ControlConfig,
        viewport: Viewport,
        rng: R,
    ) -> Self {
        Self {
            mesh,
            camera,
            controls,
            pose: Pose::default(),
            jump: JumpAnimation::new(),
            drag: None,
            viewport,
            rng,
        }
    }

    pub fn mesh(&self) -> &WireMesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn jump(&self) -> &JumpAnimation {
        &self.jump
    }

    pub fn drag(&self) -> Option<DragMode> {
        self.drag
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Apply one input event to the pose
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(mode) => self.drag = Some(mode),
            InputEvent::PointerUp => self.drag = None,
            InputEvent::PointerMove { dx, dy } => self.drag_by(dx, dy),
            InputEvent::Wheel(delta) => {
                let step = self.controls.wheel_multiplier(delta);
                self.pose.scale_by(step);
            }
            InputEvent::Key(key) => self.press(key),
        }
    }

    fn drag_by(&mut self, dx: f64, dy: f64) {
        match self.drag {
            None => {}
            Some(DragMode::Pan) => {
                let scale = self
                    .controls
                    .pan_scale(self.viewport.width, self.viewport.height);
                self.pose.position.x += dx * scale;
                self.pose.position.y -= dy * scale;
            }
            Some(DragMode::Rotate) => {
                let speed = self.controls.rotate_speed;
                self.pose.rotation.rotate(dy * speed, dx * speed, 0.0);
            }
        }
    }

    fn press(&mut self, key: Key) {
        let step = self.controls.move_step;
        let rot = self.controls.rotate_step;
        match key {
            Key::Left => self.pose.position.x -= step,
            Key::Right => self.pose.position.x += step,
            Key::Up => self.pose.position.y += step,
            Key::Down => self.pose.position.y -= step,
            Key::Forward => self.pose.position.z += step,
            Key::Back => self.pose.position.z -= step,
            Key::RollLeft => self.pose.rotation.rotate(0.0, 0.0, -rot),
            Key::RollRight => self.pose.rotation.rotate(0.0, 0.0, rot),
            Key::ScaleUp => self.pose.scale_by(self.controls.key_scale),
            Key::ScaleDown => self.pose.scale_by(1.0 / self.controls.key_scale),
            Key::Jump => self.start_jump(),
            Key::Reset => self.reset(),
        }
    }

    /// Start (or restart) the jump animation from a random scale
    pub fn start_jump(&mut self) {
        self.jump.trigger(&mut self.rng);
        self.pose.anim_scale = self.jump.scale();
    }

    /// Put the pose and animation back to their defaults
    pub fn reset(&mut self) {
        self.pose = Pose::default();
        self.jump.reset();
        debug!("pose reset");
    }

    /// Advance time by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        self.pose.anim_scale = self.jump.tick(dt);
    }

    /// Model matrix for the current pose; rebuilt on every call
    pub fn model_matrix(&self) -> Mat4 {
        Transform::model_matrix(&self.pose)
    }

    /// Project the mesh for the current pose and viewport
    pub fn frame(&self) -> Frame {
        self.camera
            .project_mesh(&self.mesh, &self.model_matrix(), &self.viewport)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            position: self.pose.position,
            rotation: self.pose.rotation.to_degrees(),
            scale: self.pose.total_scale(),
        }
    }
}
