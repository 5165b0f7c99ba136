/// Dash Terminal Demo - Rotating Cube
///
/// Renders a cube through the dash-core model / view / projection pipeline.
/// Controls:
///   - WASD / Arrow Keys: Rotate the cube
///   - E/R: Roll rotation
///   - P: Toggle perspective / orthographic
///   - Q/ESC: Quit
use clap::Parser;
use dash_core::ProjectionMode;
use dash_terminal::{Mesh, TerminalApp, ViewerConfig};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Render a rotating cube in the terminal")]
struct Cli {
    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 45.0)]
    fov: f32,
    /// Distance from the camera to the cube
    #[arg(long, default_value_t = 5.0)]
    distance: f32,
    /// Edge length of the cube
    #[arg(long, default_value_t = 2.0)]
    size: f32,
    /// Start with an orthographic projection
    #[arg(long)]
    orthographic: bool,
}

fn main() -> io::Result<()> {
    // stderr keeps log lines off the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ViewerConfig {
        fps: cli.fps,
        fov: cli.fov.to_radians(),
        distance: cli.distance,
        mode: if cli.orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        },
    };
    tracing::debug!(?config, "starting viewer");

    let mut app = TerminalApp::new(Mesh::cube(cli.size), config)?;
    app.run()?;

    println!("Thank you for using the dash terminal viewer!");
    Ok(())
}
