//! Jump animation.
//!
//! A jump snaps the animated scale to a random value and eases it back to
//! unit scale over a fixed duration.

use rand::Rng;
use tracing::debug;

use crate::transform::{lerp, Vec3};

/// Seconds a jump takes to settle
pub const JUMP_DURATION: f64 = 1.0;
/// Lower bound of each sampled jump scale component
pub const JUMP_SCALE_MIN: f64 = 0.6;
/// Width of the sampling range, so components fall in [0.6, 1.8)
pub const JUMP_SCALE_RANGE: f64 = 1.2;

/// Cubic ease `t^2 (3 - 2t)`, flat at both ends
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Where the animation currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpState {
    Idle,
    Jumping {
        /// Randomized scale the jump started from
        from: Vec3,
        /// Seconds since the jump started
        elapsed: f64,
    },
}

/// One-shot ease back to unit scale, re-triggerable at any time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpAnimation {
    state: JumpState,
    scale: Vec3,
    duration: f64,
}

impl Default for JumpAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpAnimation {
    pub fn new() -> Self {
        Self {
            state: JumpState::Idle,
            scale: Vec3::repeat(1.0),
            duration: JUMP_DURATION,
        }
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, JumpState::Jumping { .. })
    }

    /// Current animated scale; exactly one on every axis while idle
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Start a jump from a freshly sampled scale, discarding any jump
    /// already in flight
    pub fn trigger<R: Rng>(&mut self, rng: &mut R) {
        let mut sample = || JUMP_SCALE_MIN + rng.gen::<f64>() * JUMP_SCALE_RANGE;
        let from = Vec3::new(sample(), sample(), sample());
        self.start_from(from);
    }

    /// Start a jump from a known scale
    pub fn start_from(&mut self, from: Vec3) {
        debug!(x = from.x, y = from.y, z = from.z, "jump started");
        self.state = JumpState::Jumping { from, elapsed: 0.0 };
        self.scale = from;
    }

    /// Advance by `dt` seconds. Returns the animated scale after the step.
    pub fn tick(&mut self, dt: f64) -> Vec3 {
        if let JumpState::Jumping { from, elapsed } = self.state {
            let elapsed = elapsed + dt;
            let t = elapsed / self.duration;
            if t >= 1.0 {
                self.finish();
            } else {
                self.scale = lerp(&from, &Vec3::repeat(1.0), smoothstep(t));
                self.state = JumpState::Jumping { from, elapsed };
            }
        }
        self.scale
    }

    fn finish(&mut self) {
        debug!("jump settled");
        self.reset();
    }

    /// Back to idle at unit scale
    pub fn reset(&mut self) {
        self.state = JumpState::Idle;
        self.scale = Vec3::repeat(1.0);
    }
}
