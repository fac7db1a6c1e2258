/// Wireframe geometry: vertices joined by index-pair edges
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::transform::Vec3;

/// Segments shorter than this produce no bar
const MIN_BAR_LENGTH: f64 = 1e-6;

/// An edge between two vertices, by index into `WireMesh::vertices`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// Dimensions of the extruded letter mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterParams {
    pub height: f64,
    pub width: f64,
    pub stroke: f64,
    pub depth: f64,
}

impl Default for LetterParams {
    fn default() -> Self {
        Self {
            height: 2.0,
            width: 1.6,
            stroke: 0.24,
            depth: 0.6,
        }
    }
}

/// The five skeleton points of the letter, in the X-Y plane:
/// bottom-left, top-left, mid-left, top-right, bottom-right
fn letter_skeleton(height: f64, width: f64) -> [Vec3; 5] {
    let x_left = -width * 0.4;
    let x_right = width * 0.5;
    let y_top = height * 0.5;
    let y_bot = -height * 0.5;
    let y_mid = 0.0;

    [
        Vec3::new(x_left, y_bot, 0.0),
        Vec3::new(x_left, y_top, 0.0),
        Vec3::new(x_left, y_mid, 0.0),
        Vec3::new(x_right, y_top, 0.0),
        Vec3::new(x_right, y_bot, 0.0),
    ]
}

/// A wireframe mesh: ordered vertices plus edges between them.
///
/// Every builder recenters the mesh on its centroid exactly once, after all
/// geometry is in place.
#[derive(Debug, Clone, Default)]
pub struct WireMesh {
    vertices: Vec<Vec3>,
    edges: Vec<Edge>,
}

impl WireMesh {
    fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from raw parts, rejecting edges that point past the
    /// vertex list. The parts are taken as-is (no recentering).
    pub fn from_parts(vertices: Vec<Vec3>, edges: Vec<Edge>) -> Result<Self> {
        let vertex_count = vertices.len();
        for (i, edge) in edges.iter().enumerate() {
            for index in [edge.a, edge.b] {
                if index >= vertex_count {
                    return Err(Error::EdgeOutOfBounds {
                        edge: i,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn add_vertex(&mut self, v: Vec3) -> usize {
        self.vertices.push(v);
        self.vertices.len() - 1
    }

    /// Arithmetic mean of all vertices; zero for an empty mesh
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::zeros();
        }
        let sum = self.vertices.iter().fold(Vec3::zeros(), |acc, v| acc + v);
        sum / self.vertices.len() as f64
    }

    fn recenter(&mut self) {
        let c = self.centroid();
        for v in &mut self.vertices {
            *v -= c;
        }
    }

    /// Create an axis-aligned cube wireframe
    pub fn cube(size: f64) -> Self {
        let s = size * 0.5;
        let mut mesh = Self::new();
        for z in [-s, s] {
            mesh.add_vertex(Vec3::new(-s, -s, z));
            mesh.add_vertex(Vec3::new(s, -s, z));
            mesh.add_vertex(Vec3::new(s, s, z));
            mesh.add_vertex(Vec3::new(-s, s, z));
        }
        mesh.append_box_edges(0, 4);
        mesh.recenter();
        debug!(size, vertices = mesh.vertices.len(), "built cube mesh");
        mesh
    }

    /// Create the flat letter skeleton: one edge per stroke
    pub fn letter_k(height: f64, width: f64) -> Self {
        let mut mesh = Self::new();
        for p in letter_skeleton(height, width) {
            mesh.add_vertex(p);
        }
        mesh.edges.push(Edge::new(0, 1));
        mesh.edges.push(Edge::new(2, 3));
        mesh.edges.push(Edge::new(2, 4));
        mesh.recenter();
        debug!(height, width, "built flat letter mesh");
        mesh
    }

    /// Create the letter as three extruded bars: the left stroke plus the
    /// upper and lower diagonals meeting at the middle of the left stroke.
    ///
    /// All parameters are expected to be positive; nothing is enforced.
    pub fn letter_k_3d(params: &LetterParams) -> Self {
        let [p0, p1, p2, p3, p4] = letter_skeleton(params.height, params.width);

        let mut mesh = Self::new();
        mesh.append_bar(&p0, &p1, params.stroke, params.depth);
        mesh.append_bar(&p2, &p3, params.stroke, params.depth);
        mesh.append_bar(&p2, &p4, params.stroke, params.depth);
        mesh.recenter();

        debug!(
            vertices = mesh.vertices.len(),
            edges = mesh.edges.len(),
            "built extruded letter mesh"
        );
        mesh
    }

    /// Append a rectangular tube around the 2D segment `p -> q`, `stroke`
    /// wide and `depth` deep: 8 vertices and 12 edges, no caps or diagonals.
    fn append_bar(&mut self, p: &Vec3, q: &Vec3, stroke: f64, depth: f64) {
        let dx = q.x - p.x;
        let dy = q.y - p.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < MIN_BAR_LENGTH {
            return;
        }

        let nx = -dy / len;
        let ny = dx / len;
        let r = stroke * 0.5;
        let hd = depth * 0.5;

        let footprint = [
            (p.x + nx * r, p.y + ny * r), // pL
            (p.x - nx * r, p.y - ny * r), // pR
            (q.x - nx * r, q.y - ny * r), // qR
            (q.x + nx * r, q.y + ny * r), // qL
        ];

        let front = self.vertices.len();
        for z in [-hd, hd] {
            for &(x, y) in &footprint {
                self.add_vertex(Vec3::new(x, y, z));
            }
        }
        self.append_box_edges(front, front + 4);
    }

    /// Two 4-corner loops starting at `front` and `back`, plus the four
    /// edges joining corresponding corners
    fn append_box_edges(&mut self, front: usize, back: usize) {
        for i in 0..4 {
            self.edges.push(Edge::new(front + i, front + (i + 1) % 4));
        }
        for i in 0..4 {
            self.edges.push(Edge::new(back + i, back + (i + 1) % 4));
        }
        for i in 0..4 {
            self.edges.push(Edge::new(front + i, back + i));
        }
    }
}
