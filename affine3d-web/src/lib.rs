/// Affine3D Web - WASM bindings drawing the wireframe into a 2D canvas
///
/// JavaScript owns the event loop: it forwards pointer, wheel and key
/// events, calls `tick` from `requestAnimationFrame` and then `render`.
use affine3d_core::projection::{arrowhead, Axis, ARROW_ANGLE, ARROW_LENGTH};
use affine3d_core::{DragMode, InputEvent, Key, Segment, Session, Viewport, ViewerConfig};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const EDGE_STYLE: &str = "#283c5a";
const BACKGROUND_STYLE: &str = "#fafcff";

/// Map a `KeyboardEvent.key` value to a viewer key
pub fn key_from_name(name: &str) -> Option<Key> {
    let key = match name {
        "ArrowLeft" | "a" | "A" => Key::Left,
        "ArrowRight" | "d" | "D" => Key::Right,
        "ArrowUp" | "w" | "W" => Key::Up,
        "ArrowDown" | "s" | "S" => Key::Down,
        "PageUp" => Key::Forward,
        "PageDown" => Key::Back,
        "q" | "Q" => Key::RollLeft,
        "e" | "E" => Key::RollRight,
        "+" | "=" => Key::ScaleUp,
        "-" | "_" => Key::ScaleDown,
        "Tab" => Key::Jump,
        "r" | "R" => Key::Reset,
        _ => return None,
    };
    Some(key)
}

fn axis_style(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "red",
        Axis::Y => "green",
        Axis::Z => "blue",
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    session: Session,
    context: Option<CanvasRenderingContext2d>,
}

#[wasm_bindgen]
impl WebViewer {
    /// Create a viewer, optionally from a JSON configuration string
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebViewer, JsValue> {
        let config = match config_json {
            Some(json) => ViewerConfig::from_json_str(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => ViewerConfig::default(),
        };
        Ok(Self::with_config(&config))
    }

    /// Attach to a canvas element and size the viewport to it
    pub fn init(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id}")))?
            .dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        self.resize(canvas.width(), canvas.height());
        self.context = Some(context);
        debug!(canvas_id, "web viewer attached");
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.session
            .resize(Viewport::new(width as f64, height as f64));
    }

    pub fn pointer_down(&mut self, pan: bool) {
        let mode = if pan { DragMode::Pan } else { DragMode::Rotate };
        self.session.handle(InputEvent::PointerDown(mode));
    }

    pub fn pointer_move(&mut self, dx: f64, dy: f64) {
        self.session.handle(InputEvent::PointerMove { dx, dy });
    }

    pub fn pointer_up(&mut self) {
        self.session.handle(InputEvent::PointerUp);
    }

    /// Wheel delta in the classic 120-per-notch convention
    pub fn wheel(&mut self, delta: i32) {
        self.session.handle(InputEvent::Wheel(delta));
    }

    /// Returns whether the key was used, so the page can suppress defaults
    pub fn key(&mut self, name: &str) -> bool {
        match key_from_name(name) {
            Some(key) => {
                self.session.handle(InputEvent::Key(key));
                true
            }
            None => false,
        }
    }

    /// Advance animation time, in seconds
    pub fn tick(&mut self, dt: f64) {
        self.session.tick(dt);
    }

    /// Visible edges as flat `[x0, y0, x1, y1, ...]` screen coordinates
    pub fn segments(&self) -> Vec<f64> {
        self.session
            .frame()
            .segments()
            .flat_map(|s| [s.from.x, s.from.y, s.to.x, s.to.y])
            .collect()
    }

    /// Pose readout for the page overlay
    pub fn hud(&self) -> String {
        self.session.hud().to_string()
    }

    /// Draw the current frame
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = &self.context else {
            return Err(JsValue::from_str("viewer is not attached to a canvas"));
        };
        let viewport = self.session.viewport();
        let frame = self.session.frame();

        ctx.set_fill_style(&JsValue::from_str(BACKGROUND_STYLE));
        ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

        ctx.set_line_width(2.0);
        ctx.set_stroke_style(&JsValue::from_str(EDGE_STYLE));
        ctx.begin_path();
        for segment in frame.segments() {
            trace_segment(ctx, segment);
        }
        ctx.stroke();

        ctx.set_line_width(3.0);
        for axis in &frame.axes {
            ctx.set_stroke_style(&JsValue::from_str(axis_style(axis.axis)));
            ctx.begin_path();
            trace_segment(ctx, &axis.segment);
            if let Some(barbs) = arrowhead(&axis.segment, ARROW_LENGTH, ARROW_ANGLE) {
                for barb in &barbs {
                    trace_segment(ctx, barb);
                }
            }
            ctx.stroke();
        }
        Ok(())
    }
}

impl WebViewer {
    pub fn with_config(config: &ViewerConfig) -> Self {
        Self {
            session: Session::from_config(config, Viewport::new(1000.0, 700.0)),
            context: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

fn trace_segment(ctx: &CanvasRenderingContext2d, segment: &Segment) {
    ctx.move_to(segment.from.x, segment.from.y);
    ctx.line_to(segment.to.x, segment.to.y);
}
