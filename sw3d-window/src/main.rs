/// SW3D Window Demo - Rotating Sphere Sector
///
/// Opens a fixed 800x600 window and spins a wireframe sphere-sector:
/// rings in green, meridians in cyan, point markers in yellow. Close
/// the window to quit.
use sw3d_window::{AppError, SceneConfig, WindowApp};

fn main() -> Result<(), AppError> {
    env_logger::init();

    log::info!("starting rotating sector viewer");
    let app = WindowApp::new(SceneConfig::default())?;
    app.run()?;
    log::info!("window closed, exiting");

    Ok(())
}
