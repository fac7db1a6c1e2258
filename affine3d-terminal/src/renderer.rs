/// ASCII line rasterizer for terminal rendering
use affine3d_core::projection::{arrowhead, Axis, ScreenPoint, ARROW_ANGLE, ARROW_LENGTH};
use affine3d_core::{Frame, Segment, Viewport};
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Virtual pixels per terminal cell, horizontally
pub const CELL_WIDTH: f64 = 8.0;
/// Virtual pixels per terminal cell, vertically
pub const CELL_HEIGHT: f64 = 16.0;

const EDGE_COLOR: Color = Color::Cyan;

fn axis_color(axis: Axis) -> Color {
    match axis {
        Axis::X => Color::Red,
        Axis::Y => Color::Green,
        Axis::Z => Color::Blue,
    }
}

/// Character that best follows a segment's direction on screen
fn slope_char(segment: &Segment) -> char {
    let d = segment.to - segment.from;
    // screen Y grows downward
    let angle = (-d.y).atan2(d.x).to_degrees().rem_euclid(180.0);
    match angle {
        a if a < 22.5 || a >= 157.5 => '-',
        a if a < 67.5 => '/',
        a if a < 112.5 => '|',
        _ => '\\',
    }
}

/// Clip a segment to `[0, w] x [0, h]` (Liang-Barsky); `None` when it lies
/// entirely outside
fn clip(from: (f64, f64), to: (f64, f64), w: f64, h: f64) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let bounds = [
        (-dx, from.0),
        (dx, w - from.0),
        (-dy, from.1),
        (dy, h - from.1),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

/// ASCII renderer that draws projected wireframes as terminal characters
pub struct LineRenderer {
    width: usize,
    height: usize,
    cells: Vec<(char, Color)>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', Color::Reset); width * height],
        }
    }

    /// Virtual pixel viewport covered by the character grid
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.width as f64 * CELL_WIDTH,
            self.height as f64 * CELL_HEIGHT,
        )
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![(' ', Color::Reset); width * height];
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = (' ', Color::Reset);
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x].0)
        } else {
            None
        }
    }

    /// Draw the visible mesh edges, then the coordinate axes on top
    pub fn render_frame(&mut self, frame: &Frame) {
        for segment in frame.segments() {
            self.draw_segment(segment, EDGE_COLOR);
        }
        for axis in &frame.axes {
            let color = axis_color(axis.axis);
            self.draw_segment(&axis.segment, color);
            if let Some(barbs) = arrowhead(&axis.segment, ARROW_LENGTH, ARROW_ANGLE) {
                for barb in &barbs {
                    self.draw_segment(barb, color);
                }
            }
        }
    }

    /// Rasterize a pixel-space segment with Bresenham's algorithm
    pub fn draw_segment(&mut self, segment: &Segment, color: Color) {
        let to_cells = |p: &ScreenPoint| (p.x / CELL_WIDTH, p.y / CELL_HEIGHT);
        let w = self.width as f64 - 1.0;
        let h = self.height as f64 - 1.0;
        if w < 0.0 || h < 0.0 {
            return;
        }
        let Some((a, b)) = clip(to_cells(&segment.from), to_cells(&segment.to), w, h) else {
            return;
        };

        let ch = slope_char(segment);
        let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
        let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, ch, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, ch: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = (ch, color);
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = Color::Reset;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let (c, color) = self.cells[y * self.width + x];
                if color != current {
                    writer.queue(SetForegroundColor(color))?;
                    current = color;
                }
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
