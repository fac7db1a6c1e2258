/// Pinhole camera and per-frame projection of wire meshes to 2D segments
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::{Edge, WireMesh};
use crate::transform::{Mat4, Transform, Vec3};

/// Length of each coordinate axis drawn by the gizmo, in model units
pub const AXIS_LENGTH: f64 = 1.5;
/// Arrowhead barb length, in screen pixels
pub const ARROW_LENGTH: f64 = 10.0;
/// Arrowhead barb angle from the shaft (30 degrees)
pub const ARROW_ANGLE: f64 = std::f64::consts::PI / 6.0;

pub type ScreenPoint = Point2<f64>;

/// Drawable area in screen pixels; Y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width * 0.5, self.height * 0.5)
    }
}

/// A 2D line segment in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

impl Segment {
    pub fn new(from: ScreenPoint, to: ScreenPoint) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        (self.to - self.from).norm()
    }
}

/// Camera configuration for 3D rendering.
///
/// The camera looks down +Z from `distance` units in front of the origin,
/// so a camera-space point sits at view depth `z + distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Field of view, in degrees
    pub fov_degrees: f64,
    /// Standoff added to camera-space Z
    pub distance: f64,
    /// Points at or closer than this view depth are culled
    pub near: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            distance: 6.0,
            near: 0.1,
        }
    }
}

impl Camera {
    /// Focal length in pixels for a viewport
    pub fn focal(&self, viewport: &Viewport) -> f64 {
        (viewport.height * 0.5) / (self.fov_degrees.to_radians() * 0.5).tan()
    }

    pub fn view_depth(&self, point: &Vec3) -> f64 {
        point.z + self.distance
    }

    /// Project a camera-space point to screen space, or `None` when it lies
    /// on or behind the near plane.
    pub fn project(&self, point: &Vec3, viewport: &Viewport) -> Option<ScreenPoint> {
        self.project_with(point, viewport.center(), self.focal(viewport))
    }

    fn project_with(&self, point: &Vec3, center: ScreenPoint, focal: f64) -> Option<ScreenPoint> {
        let zc = self.view_depth(point);
        if zc <= self.near {
            return None;
        }
        Some(ScreenPoint::new(
            center.x + point.x * focal / zc,
            center.y - point.y * focal / zc,
        ))
    }

    /// Transform every vertex with `model` and project the mesh's edges.
    ///
    /// An edge gets a segment only when both endpoints are in range and
    /// visible this frame; no partial clipping is done.
    pub fn project_mesh(&self, mesh: &WireMesh, model: &Mat4, viewport: &Viewport) -> Frame {
        let center = viewport.center();
        let focal = self.focal(viewport);

        let points: Vec<Option<ScreenPoint>> = Transform::apply(model, mesh.vertices())
            .iter()
            .map(|v| self.project_with(v, center, focal))
            .collect();

        let edges: Vec<ProjectedEdge> = mesh
            .edges()
            .iter()
            .map(|&edge| {
                let segment = match (points.get(edge.a), points.get(edge.b)) {
                    (Some(Some(a)), Some(Some(b))) => Some(Segment::new(*a, *b)),
                    _ => None,
                };
                ProjectedEdge { edge, segment }
            })
            .collect();

        let axes = self.project_axes_with(model, center, focal);

        let frame = Frame {
            points,
            edges,
            axes,
        };
        trace!(
            culled_points = frame.culled_points(),
            hidden_edges = frame.hidden_edges(),
            "projected frame"
        );
        frame
    }

    /// Project the model's coordinate axes (origin to `AXIS_LENGTH` along
    /// each axis). Nothing is produced when the origin is culled.
    pub fn project_axes(&self, model: &Mat4, viewport: &Viewport) -> Vec<AxisSegment> {
        self.project_axes_with(model, viewport.center(), self.focal(viewport))
    }

    fn project_axes_with(&self, model: &Mat4, center: ScreenPoint, focal: f64) -> Vec<AxisSegment> {
        let project = |p: &Vec3| {
            self.project_with(&Transform::transform_point(model, p), center, focal)
        };

        let Some(origin) = project(&Vec3::zeros()) else {
            return Vec::new();
        };

        Axis::ALL
            .iter()
            .filter_map(|&axis| {
                project(&(axis.unit() * AXIS_LENGTH)).map(|tip| AxisSegment {
                    axis,
                    segment: Segment::new(origin, tip),
                })
            })
            .collect()
    }
}

/// One mesh edge after projection; `segment` is `None` when the edge is
/// not drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEdge {
    pub edge: Edge,
    pub segment: Option<Segment>,
}

/// Coordinate axis identity, for the gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::x(),
            Axis::Y => Vec3::y(),
            Axis::Z => Vec3::z(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSegment {
    pub axis: Axis,
    pub segment: Segment,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Screen position per mesh vertex, `None` when culled
    pub points: Vec<Option<ScreenPoint>>,
    /// One entry per mesh edge, in mesh order
    pub edges: Vec<ProjectedEdge>,
    pub axes: Vec<AxisSegment>,
}

impl Frame {
    /// Visible edge segments
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.edges.iter().filter_map(|e| e.segment.as_ref())
    }

    pub fn culled_points(&self) -> usize {
        self.points.iter().filter(|p| p.is_none()).count()
    }

    pub fn hidden_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.segment.is_none()).count()
    }
}

/// The two barbs of an arrowhead at `segment.to`, each `length` long and
/// `angle` radians off the shaft. `None` for a degenerate segment.
pub fn arrowhead(segment: &Segment, length: f64, angle: f64) -> Option<[Segment; 2]> {
    let len = segment.length();
    if len < 1e-6 {
        return None;
    }
    let dir = (segment.to - segment.from) / len;
    let end = segment.to;

    let barb = |a: f64| {
        let (s, c) = a.sin_cos();
        ScreenPoint::new(
            end.x - length * (dir.x * c - dir.y * s),
            end.y - length * (dir.y * c + dir.x * s),
        )
    };

    Some([
        Segment::new(end, barb(angle)),
        Segment::new(end, barb(-angle)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LetterParams;
    use crate::transform::Pose;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 700.0)
    }

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.fov_degrees, 60.0);
        assert_eq!(camera.distance, 6.0);
        let focal = camera.focal(&viewport());
        assert!((focal - 350.0 / (30.0f64).to_radians().tan()).abs() < 1e-9);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::default();
        let p = camera.project(&Vec3::zeros(), &viewport()).unwrap();
        assert!((p - ScreenPoint::new(500.0, 350.0)).norm() < 1e-12);
    }

    #[test]
    fn test_screen_y_is_flipped() {
        let camera = Camera::default();
        let vp = viewport();
        let focal = camera.focal(&vp);
        let p = camera.project(&Vec3::new(1.0, 1.0, 0.0), &vp).unwrap();
        assert!((p.x - (500.0 + focal / 6.0)).abs() < 1e-9);
        assert!((p.y - (350.0 - focal / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_near_plane_culling() {
        let camera = Camera::default();
        let vp = viewport();
        // z + 6.0 == 0.1 is culled
        assert!(camera.project(&Vec3::new(0.0, 0.0, 0.1 - 6.0), &vp).is_none());
        assert!(camera.project(&Vec3::new(0.0, 0.0, -7.0), &vp).is_none());
        assert!(camera.project(&Vec3::new(0.0, 0.0, -5.9 + 1e-9), &vp).is_some());
    }

    #[test]
    fn test_project_mesh_all_visible_by_default() {
        let camera = Camera::default();
        let mesh = WireMesh::letter_k_3d(&LetterParams::default());
        let model = Transform::model_matrix(&Pose::default());
        let frame = camera.project_mesh(&mesh, &model, &viewport());
        assert_eq!(frame.points.len(), 24);
        assert_eq!(frame.edges.len(), 36);
        assert_eq!(frame.segments().count(), 36);
        assert_eq!(frame.culled_points(), 0);
        assert_eq!(frame.axes.len(), 3);
    }

    #[test]
    fn test_edges_with_culled_endpoint_are_hidden() {
        let camera = Camera::default();
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -10.0),
        ];
        let edges = vec![Edge::new(0, 1), Edge::new(1, 2)];
        let mesh = WireMesh::from_parts(vertices, edges).unwrap();
        let frame = camera.project_mesh(&mesh, &Transform::identity(), &viewport());

        assert_eq!(frame.culled_points(), 1);
        assert!(frame.edges[0].segment.is_some());
        assert!(frame.edges[1].segment.is_none());
        assert_eq!(frame.hidden_edges(), 1);
    }

    #[test]
    fn test_axes_vanish_with_origin() {
        let camera = Camera::default();
        let model = Transform::translation_matrix(0.0, 0.0, -6.0);
        assert!(camera.project_axes(&model, &viewport()).is_empty());
    }

    #[test]
    fn test_axis_with_culled_tip_is_dropped() {
        let camera = Camera::default();
        // origin at depth 1.0; the Z tip lands at depth -0.5
        let model = Transform::translation_matrix(0.0, 0.0, -5.0) * Transform::rotation_y(std::f64::consts::PI);
        let axes = camera.project_axes(&model, &viewport());
        assert_eq!(axes.len(), 2);
        assert!(axes.iter().all(|a| a.axis != Axis::Z));
    }

    #[test]
    fn test_arrowhead() {
        let seg = Segment::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 0.0));
        let [a, b] = arrowhead(&seg, ARROW_LENGTH, ARROW_ANGLE).unwrap();
        let c = ARROW_ANGLE.cos() * ARROW_LENGTH;
        let s = ARROW_ANGLE.sin() * ARROW_LENGTH;
        assert!((a.to - ScreenPoint::new(100.0 - c, -s)).norm() < 1e-9);
        assert!((b.to - ScreenPoint::new(100.0 - c, s)).norm() < 1e-9);
        assert_eq!(a.from, seg.to);

        let dot = Segment::new(ScreenPoint::new(3.0, 3.0), ScreenPoint::new(3.0, 3.0));
        assert!(arrowhead(&dot, ARROW_LENGTH, ARROW_ANGLE).is_none());
    }
}
