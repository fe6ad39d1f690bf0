/// Terminal front end: the three-shape scene as ASCII with a keyboard panel
use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self},
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use spin3d_core::{Camera, ControlPanel, SceneConfig, SceneHost};

pub mod logging;
pub mod panel;
pub mod renderer;

pub use panel::{PanelAction, PanelView, PANEL_ROWS};
pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Options the binary passes in from the command line
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub fps: u32,
    pub scene: SceneConfig,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            scene: SceneConfig::default(),
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    panel: ControlPanel,
    view: PanelView,
    scene: SceneHost,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    frame_interval: Duration,
    last_tick: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(options: AppOptions) -> anyhow::Result<Self> {
        let (width, height) = terminal::size().context("failed to query terminal size")?;
        let panel = ControlPanel::new();
        let scene = SceneHost::new(&options.scene, &panel);
        let (camera, renderer) = Self::viewport(&options.scene.camera, width, height);

        Ok(Self {
            panel,
            view: PanelView::new(),
            scene,
            camera,
            renderer,
            running: true,
            frame_interval: Duration::from_secs(1) / options.fps.max(1),
            last_tick: Instant::now(),
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Camera and framebuffer for the area below the panel.
    fn viewport(base: &Camera, width: u16, height: u16) -> (Camera, AsciiRenderer) {
        let rows = height.saturating_sub(PANEL_ROWS).max(1) as usize;
        let cols = width.max(1) as usize;
        let mut camera = base.clone();
        camera.aspect = cols as f32 / (rows as f32 * CELL_ASPECT);
        (camera, AsciiRenderer::new(cols, rows))
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .context("failed to enter alternate screen")?;
        log::info!("terminal session started");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)
            .context("failed to leave alternate screen")?;
        log::info!("terminal session ended");

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        self.last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input until the next frame is due
            let deadline = frame_start + self.frame_interval;
            loop {
                let timeout = deadline.saturating_duration_since(Instant::now());
                if !event::poll(timeout)? {
                    break;
                }
                self.handle_event(event::read()?);
                if !self.running {
                    return Ok(());
                }
            }

            // Update
            let now = Instant::now();
            let delta = (now - self.last_tick).as_secs_f32();
            self.last_tick = now;
            self.scene.frame(&self.panel, delta);

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

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.view.handle_key(key, &mut self.panel) == PanelAction::Quit {
                    self.running = false;
                }
                self.scene.apply(&self.panel);
            }
            Event::Resize(width, height) => {
                log::debug!("resize to {}x{}", width, height);
                let (camera, renderer) = Self::viewport(&self.camera, width, height);
                self.camera = camera;
                self.renderer = renderer;
            }
            _ => {}
        }
    }

    fn render(&mut self) -> anyhow::Result<()> {
        // Clear renderer
        self.renderer.clear();

        for instance in self.scene.instances() {
            self.renderer
                .render_instance(&instance, &self.camera, self.scene.lighting());
        }

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout, PANEL_ROWS)?;
        self.view
            .draw(&mut stdout, &self.panel, self.renderer.width(), self.fps)?;

        stdout.flush()?;
        Ok(())
    }
}
