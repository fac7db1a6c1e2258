//! Input handling.
//!
//! Front-ends translate their native mouse/keyboard events into
//! `InputEvent`s; the session applies them to the pose using the speeds in
//! `ControlConfig`.

use serde::{Deserialize, Serialize};

/// What a pointer drag does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Horizontal drag turns about Y, vertical about X
    Rotate,
    /// Drag moves the model in the X-Y plane
    Pan,
}

/// Logical keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Toward the camera
    Forward,
    /// Away from the camera
    Back,
    RollLeft,
    RollRight,
    ScaleUp,
    ScaleDown,
    Jump,
    Reset,
}

/// One input sample from the front-end
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(DragMode),
    /// Pointer motion since the previous event, in screen pixels
    PointerMove { dx: f64, dy: f64 },
    PointerUp,
    /// Signed wheel delta, 120 per notch
    Wheel(i32),
    Key(Key),
}

/// Control speeds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Pan speed: world units per pixel is this over the smaller viewport side
    pub pan_factor: f64,
    /// Radians per pixel of rotating drag
    pub rotate_speed: f64,
    /// Units per movement key press
    pub move_step: f64,
    /// Radians per roll key press
    pub rotate_step: f64,
    /// Multiplier per scale key press
    pub key_scale: f64,
    /// Exponent per wheel notch: `exp(notches * wheel_scale)`
    pub wheel_scale: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            pan_factor: 8.0,
            rotate_speed: std::f64::consts::PI / 500.0,
            move_step: 0.1,
            rotate_step: std::f64::consts::PI / 90.0,
            key_scale: 1.05,
            wheel_scale: 0.1,
        }
    }
}

impl ControlConfig {
    /// World units per pixel of panning drag for a viewport
    pub fn pan_scale(&self, width: f64, height: f64) -> f64 {
        self.pan_factor / width.min(height).max(1.0)
    }

    /// Scale multiplier for a wheel delta
    pub fn wheel_multiplier(&self, delta: i32) -> f64 {
        (delta as f64 / 120.0 * self.wheel_scale).exp()
    }
}
