/// Terminal front-end for the affine wireframe viewer
use affine3d_core::{Session, ViewerConfig};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod input;
pub mod renderer;

pub use input::{Action, EventTranslator};
pub use renderer::LineRenderer;

const HINT: &str = "Drag: rotate | Shift+drag: pan | Wheel, +/-: scale | WASD/Arrows: move XY | \
PgUp/PgDn: move Z | Q/E: roll | Tab: jump | R: reset | Esc: quit";

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    session: Session,
    renderer: LineRenderer,
    translator: EventTranslator,
    tick_interval: Duration,
    running: bool,
    last_tick: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let renderer = LineRenderer::new(width as usize, height as usize);
        let session = Session::from_config(config, renderer.viewport());
        let now = Instant::now();

        Ok(Self {
            session,
            renderer,
            translator: EventTranslator::new(),
            tick_interval: Duration::from_secs_f64(1.0 / config.tick_hz.max(1) as f64),
            running: true,
            last_tick: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        info!(interval = ?self.tick_interval, "entering main loop");

        while self.running {
            // Handle input until the next tick is due
            let deadline = self.last_tick + self.tick_interval;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if !event::poll(remaining)? {
                    break;
                }
                self.handle_event(&event::read()?);
                if !self.running {
                    return Ok(());
                }
            }

            // Update
            let now = Instant::now();
            let dt = (now - self.last_tick).as_secs_f64();
            self.last_tick = now;
            self.session.tick(dt);

            // Render
            self.render()?;

            // Update FPS counter
            self.frame_count += 1;
            let since = now - self.last_fps_sample;
            if since.as_secs() >= 1 {
                self.fps = self.frame_count as f32 / since.as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &event::Event) {
        match self.translator.translate(event) {
            Some(Action::Input(input)) => self.session.handle(input),
            Some(Action::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
                self.renderer.resize(width as usize, height as usize);
                self.session.resize(self.renderer.viewport());
            }
            Some(Action::Quit) => self.running = false,
            None => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.session.frame();

        self.renderer.clear();
        self.renderer.render_frame(&frame);

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let (width, _) = terminal::size()?;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!("Affine3D | FPS: {:.1}", self.fps)),
            cursor::MoveTo(0, 1),
            Print(HINT)
        )?;

        let hud = self.session.hud().to_string();
        for (row, line) in hud.lines().enumerate() {
            let col = width.saturating_sub(line.len() as u16 + 1);
            queue!(
                stdout,
                cursor::MoveTo(col, row as u16 + 2),
                SetForegroundColor(Color::White),
                Print(line)
            )?;
        }
        queue!(stdout, ResetColor)?;

        stdout.flush()?;
        Ok(())
    }
}
