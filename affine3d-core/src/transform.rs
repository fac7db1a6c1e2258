/// 3D transformation matrices, pose state and the model matrix pipeline
use nalgebra::{Matrix4, Point3, Vector3};

/// Double precision vector used throughout the core
pub type Vec3 = Vector3<f64>;
/// Double precision homogeneous matrix, element (row, col)
pub type Mat4 = Matrix4<f64>;

/// Component-wise interpolation `a + (b - a) * t`, not clamped
pub fn lerp(a: &Vec3, b: &Vec3, t: f64) -> Vec3 {
    a + (b - a) * t
}

/// Rotation state around three axes (in radians), applied X then Y then Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Angles converted to degrees, for display
    pub fn to_degrees(&self) -> Vec3 {
        Vec3::new(self.x.to_degrees(), self.y.to_degrees(), self.z.to_degrees())
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Where the model sits in the world and how it is scaled.
///
/// `user_scale` persists across frames and is driven by the wheel and scale
/// keys; `anim_scale` is transient and owned by the jump animation. The
/// effective scale is their component-wise product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: RotationState,
    pub user_scale: Vec3,
    pub anim_scale: Vec3,
}

impl Pose {
    pub fn total_scale(&self) -> Vec3 {
        self.user_scale.component_mul(&self.anim_scale)
    }

    /// Multiply the persistent scale uniformly on every axis
    pub fn scale_by(&mut self, factor: f64) {
        self.user_scale *= factor;
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: RotationState::zero(),
            user_scale: Vec3::repeat(1.0),
            anim_scale: Vec3::repeat(1.0),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Mat4 {
        Mat4::identity()
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz))
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    /// Rotation about X; positive angles turn +Y towards +Z
    #[rustfmt::skip]
    pub fn rotation_x(radians: f64) -> Mat4 {
        let (s, c) = radians.sin_cos();
        Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0,   c,  -s, 0.0,
            0.0,   s,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about Y; positive angles turn +Z towards +X
    #[rustfmt::skip]
    pub fn rotation_y(radians: f64) -> Mat4 {
        let (s, c) = radians.sin_cos();
        Mat4::new(
              c, 0.0,   s, 0.0,
            0.0, 1.0, 0.0, 0.0,
             -s, 0.0,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about Z; positive angles turn +X towards +Y
    #[rustfmt::skip]
    pub fn rotation_z(radians: f64) -> Mat4 {
        let (s, c) = radians.sin_cos();
        Mat4::new(
              c,  -s, 0.0, 0.0,
              s,   c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// `a * b`: applies `b` first, then `a`
    pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
        a * b
    }

    /// Transform a point with an implicit w = 1.
    ///
    /// The result is divided by the resulting w unless it is exactly zero.
    pub fn transform_point(m: &Mat4, v: &Vec3) -> Vec3 {
        let h = m * Point3::from(*v).to_homogeneous();
        let w = h.w;
        if w != 0.0 {
            Vec3::new(h.x / w, h.y / w, h.z / w)
        } else {
            Vec3::new(h.x, h.y, h.z)
        }
    }

    /// Compose the model matrix for a pose.
    ///
    /// Steps are folded by left-multiplying onto the accumulator so scale
    /// reaches the mesh first and translation last.
    pub fn model_matrix(pose: &Pose) -> Mat4 {
        let s = pose.total_scale();
        let p = pose.position;
        let steps = [
            Self::scale_matrix(s.x, s.y, s.z),
            Self::rotation_x(pose.rotation.x),
            Self::rotation_y(pose.rotation.y),
            Self::rotation_z(pose.rotation.z),
            Self::translation_matrix(p.x, p.y, p.z),
        ];
        steps
            .iter()
            .fold(Self::identity(), |acc, step| Self::multiply(step, &acc))
    }

    /// Apply one matrix to every vertex, yielding camera-space points
    pub fn apply(m: &Mat4, vertices: &[Vec3]) -> Vec<Vec3> {
        vertices.iter().map(|v| Self::transform_point(m, v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: &Vec3, b: &Vec3) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-12);
        assert!((state.y - 0.2).abs() < 1e-12);
        assert!((state.z - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_default_pose_is_identity() {
        let matrix = Transform::model_matrix(&Pose::default());
        assert!((matrix - Mat4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_axis_rotations_follow_trig_layout() {
        for &theta in &[0.0, 0.3, PI / 2.0, 2.0, -1.1, PI] {
            let (s, c) = theta.sin_cos();

            let rx = Transform::transform_point(&Transform::rotation_x(theta), &Vec3::y());
            assert!(close(&rx, &Vec3::new(0.0, c, s)));

            let ry = Transform::transform_point(&Transform::rotation_y(theta), &Vec3::z());
            assert!(close(&ry, &Vec3::new(s, 0.0, c)));

            let rz = Transform::transform_point(&Transform::rotation_z(theta), &Vec3::x());
            assert!(close(&rz, &Vec3::new(c, s, 0.0)));
        }
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Transform::rotation_y(0.7) * Transform::translation_matrix(1.0, -2.0, 3.0);
        let i = Transform::identity();
        assert!((Transform::multiply(&i, &m) - m).norm() < 1e-12);
        assert!((Transform::multiply(&m, &i) - m).norm() < 1e-12);
    }

    #[test]
    fn test_multiply_is_not_commutative() {
        let t = Transform::translation_matrix(1.0, 0.0, 0.0);
        let r = Transform::rotation_z(PI / 2.0);
        let p = Vec3::zeros();

        // rotate first, then translate
        let a = Transform::transform_point(&Transform::multiply(&t, &r), &p);
        assert!(close(&a, &Vec3::new(1.0, 0.0, 0.0)));

        // translate first, then rotate
        let b = Transform::transform_point(&Transform::multiply(&r, &t), &p);
        assert!(close(&b, &Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_scale_then_translate_without_rotation() {
        let pose = Pose {
            position: Vec3::new(0.5, -1.0, 2.0),
            user_scale: Vec3::new(2.0, 3.0, 4.0),
            ..Pose::default()
        };
        let m = Transform::model_matrix(&pose);
        let p = Vec3::new(1.0, 1.0, -1.0);
        let out = Transform::transform_point(&m, &p);
        assert!(close(&out, &Vec3::new(2.5, 2.0, -2.0)));
    }

    #[test]
    fn test_model_matrix_rotates_before_translating() {
        let pose = Pose {
            position: Vec3::new(0.0, 0.0, 1.0),
            rotation: RotationState::new(0.0, 0.0, PI / 2.0),
            ..Pose::default()
        };
        let out = Transform::transform_point(&Transform::model_matrix(&pose), &Vec3::x());
        assert!(close(&out, &Vec3::new(0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_transform_point_divides_by_w() {
        let mut m = Transform::identity();
        m[(3, 3)] = 2.0;
        let out = Transform::transform_point(&m, &Vec3::new(2.0, 4.0, 6.0));
        assert!(close(&out, &Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_transform_point_skips_divide_for_zero_w() {
        let mut m = Transform::identity();
        m[(3, 3)] = 0.0;
        let out = Transform::transform_point(&m, &Vec3::new(2.0, 4.0, 6.0));
        assert!(close(&out, &Vec3::new(2.0, 4.0, 6.0)));
    }

    #[test]
    fn test_total_scale_is_component_product() {
        let pose = Pose {
            user_scale: Vec3::new(2.0, 1.0, 0.5),
            anim_scale: Vec3::new(1.5, 0.8, 4.0),
            ..Pose::default()
        };
        assert!(close(&pose.total_scale(), &Vec3::new(3.0, 0.8, 2.0)));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(0.6, 1.8, 1.0);
        let b = Vec3::repeat(1.0);
        assert!(close(&lerp(&a, &b, 0.0), &a));
        assert!(close(&lerp(&a, &b, 1.0), &b));
        assert!(close(&lerp(&a, &b, 0.5), &Vec3::new(0.8, 1.4, 1.0)));
    }
}
