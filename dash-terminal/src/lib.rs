/// Terminal viewer driving the dash-core matrix pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use dash_core::{Camera, ProjectionError, ProjectionMode, Transform, Vec3};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod mesh;
pub mod renderer;

pub use mesh::Mesh;
pub use renderer::AsciiRenderer;

use renderer::CELL_ASPECT;

/// How the viewer frames the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub fps: u32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub distance: f32,
    pub mode: ProjectionMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            fov: std::f32::consts::FRAC_PI_4,
            distance: 5.0,
            mode: ProjectionMode::Perspective,
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    transform: Transform,
    camera: Camera,
    renderer: AsciiRenderer,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(mesh, config, width, height))
    }

    fn with_size(mesh: Mesh, config: ViewerConfig, width: u16, height: u16) -> Self {
        let mut camera = Camera::new(width as u32, height as u32);
        camera.aspect *= CELL_ASPECT;
        camera.eye = Vec3::new(0.0, 0.0, config.distance);
        camera.fov = config.fov;
        camera.mode = config.mode;

        let mut transform = Transform::default();
        transform.rotate(0.3, 0.3, 0.0);

        Self {
            mesh,
            transform,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            frame_time: Duration::from_millis(1000 / config.fps.max(1) as u64),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        tracing::info!(mode = ?self.camera.mode, "viewer started");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        tracing::info!("viewer stopped");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            self.update();
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => {
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
                self.camera.set_viewport(width as u32, height as u32);
                self.camera.aspect *= CELL_ASPECT;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('w') | KeyCode::Up => self.transform.rotate(0.1, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.transform.rotate(-0.1, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.transform.rotate(0.0, -0.1, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.transform.rotate(0.0, 0.1, 0.0),
            KeyCode::Char('e') => self.transform.rotate(0.0, 0.0, 0.1),
            KeyCode::Char('r') => self.transform.rotate(0.0, 0.0, -0.1),
            KeyCode::Char('p') => {
                self.camera.mode = self.camera.mode.toggled();
                tracing::debug!(mode = ?self.camera.mode, "projection switched");
            }
            _ => {}
        }
    }

    fn update(&mut self) {
        // Continuous slow rotation for demo effect
        self.transform.rotate(0.01, 0.015, 0.0);
    }

    /// Rasterize the current frame into the renderer's buffers
    fn draw_frame(&mut self) -> Result<(), ProjectionError> {
        self.renderer.clear();
        self.renderer
            .render_mesh(&self.mesh, &self.transform.matrix(), &self.camera)
    }

    fn render(&mut self) -> io::Result<()> {
        self.draw_frame()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        let mode = match self.camera.mode {
            ProjectionMode::Perspective => "perspective",
            ProjectionMode::Orthographic => "orthographic",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "dash viewer | {mode} | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll P=Projection Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_drive_transform_and_mode() {
        let mut app = TerminalApp::with_size(Mesh::cube(2.0), ViewerConfig::default(), 40, 20);
        let start = app.transform.rotation;

        app.handle_key(KeyCode::Char('w'));
        assert!((app.transform.rotation.x - start.x - 0.1).abs() < 1e-6);

        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.camera.mode, ProjectionMode::Orthographic);

        app.handle_key(KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_frame_renders_in_both_modes() {
        let mut app = TerminalApp::with_size(Mesh::cube(2.0), ViewerConfig::default(), 40, 20);
        app.draw_frame().unwrap();
        assert_ne!(app.renderer.cell(20, 10), ' ');

        app.handle_key(KeyCode::Char('p'));
        app.draw_frame().unwrap();
        assert_ne!(app.renderer.cell(20, 10), ' ');
    }

    #[test]
    fn test_config_applies_to_camera() {
        let config = ViewerConfig {
            fps: 0,
            distance: 8.0,
            mode: ProjectionMode::Orthographic,
            ..Default::default()
        };
        let app = TerminalApp::with_size(Mesh::cube(1.0), config, 80, 24);
        assert_eq!(app.camera.eye, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(app.camera.mode, ProjectionMode::Orthographic);
        assert_eq!(app.frame_time, Duration::from_millis(1000));
    }
}
