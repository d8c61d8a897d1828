/// Desktop frontend for the rotating sector wireframe
///
/// One winit event loop owns the window, the canvas, and the GPU
/// presenter; one background timer thread posts `Tick` events through
/// the event-loop proxy. All point mutation happens on the event-loop
/// thread inside the repaint.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use winit::window::{Window, WindowBuilder};

pub mod canvas;
pub mod present;
pub mod scene;

pub use canvas::{Canvas, Color};
pub use present::{CanvasPresenter, PresentInitError};
pub use scene::{SceneConfig, SectorScene};

/// Fixed client-area size, physical pixels.
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const WINDOW_TITLE: &str = "Rotating sector";

/// Tick cadence of the animation timer.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(200);
/// How long shutdown waits for the timer thread before detaching it.
pub const SHUTDOWN_WAIT: Duration = Duration::from_millis(500);

/// Events posted to the event loop from outside the winit callback.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// One animation step: advance the spin and repaint.
    Tick,
}

/// Fatal startup errors, surfaced from `main`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU presenter initialization failed: {0}")]
    Present(#[from] PresentInitError),
}

/// Main application: window, scene, canvas, presenter, and the timer.
pub struct WindowApp {
    event_loop: EventLoop<AppEvent>,
    window: Arc<Window>,
    scene: SectorScene,
    canvas: Canvas,
    presenter: CanvasPresenter,
    running: Arc<AtomicBool>,
}

impl WindowApp {
    pub fn new(config: SceneConfig) -> Result<Self, AppError> {
        let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build()?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(WINDOW_TITLE)
                .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
                .with_resizable(false)
                .build(&event_loop)?,
        );

        let presenter = pollster::block_on(CanvasPresenter::new(
            window.clone(),
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        ))?;

        Ok(Self {
            event_loop,
            window,
            scene: SectorScene::new(config, WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Canvas::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            presenter,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Run until the window is closed. Blocks on the event loop, then
    /// performs the bounded cooperative shutdown of the timer thread.
    pub fn run(self) -> Result<(), AppError> {
        let Self {
            event_loop,
            window,
            mut scene,
            mut canvas,
            mut presenter,
            running,
        } = self;

        let timer = spawn_frame_timer(event_loop.create_proxy(), running.clone(), FRAME_INTERVAL);
        let running_outer = running.clone();

        log::info!("entering event loop");
        let result = event_loop.run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::Resumed => window.request_redraw(),

                Event::UserEvent(AppEvent::Tick) => {
                    // Ticks arriving after the animation froze are consumed
                    // without advancing anything.
                    if running.load(Ordering::Relaxed) {
                        scene.tick();
                        window.request_redraw();
                    }
                }

                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        running.store(false, Ordering::Relaxed);
                        elwt.exit();
                    }
                    WindowEvent::Resized(size) => {
                        presenter.resize(size.width, size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        scene.render(&mut canvas);
                        match presenter.present(&canvas) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                                log::warn!("surface lost, reconfiguring");
                                presenter.reconfigure();
                            }
                            Err(wgpu::SurfaceError::Timeout) => {
                                log::warn!("surface frame timed out, skipping");
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                // Fatal to the animation only: the window
                                // stays open, frozen on the last frame.
                                log::error!("out of GPU memory, freezing animation");
                                running.store(false, Ordering::Relaxed);
                            }
                        }
                    }
                    _ => {}
                },

                _ => {}
            }
        });

        running_outer.store(false, Ordering::Relaxed);
        join_with_timeout(timer, SHUTDOWN_WAIT);
        log::info!("event loop finished");

        result.map_err(AppError::from)
    }
}

/// Post a `Tick` every `interval` until the running flag clears or the
/// event loop goes away. The post never blocks on the repaint.
fn spawn_frame_timer(
    proxy: EventLoopProxy<AppEvent>,
    running: Arc<AtomicBool>,
    interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while running.load(Ordering::Relaxed) {
            if proxy.send_event(AppEvent::Tick).is_err() {
                break;
            }
            thread::sleep(interval);
        }
    })
}

/// Best-effort join: waits up to `timeout`, then detaches. The timer
/// thread holds no resources, so detaching is safe.
fn join_with_timeout(handle: JoinHandle<()>, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            log::warn!("frame timer did not stop within {:?}, detaching", timeout);
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    let _ = handle.join();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_with_timeout_reaps_finished_thread() {
        let start = Instant::now();
        let handle = thread::spawn(|| {});
        join_with_timeout(handle, Duration::from_millis(500));
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_timer_loop_stops_on_flag() {
        // The cooperative flag alone must stop the loop body; exercised
        // without an event loop by mirroring the timer's exit condition.
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let handle = thread::spawn(move || {
            let mut iterations = 0u32;
            while flag.load(Ordering::Relaxed) {
                iterations += 1;
                thread::sleep(Duration::from_millis(1));
            }
            iterations
        });
        thread::sleep(Duration::from_millis(20));
        running.store(false, Ordering::Relaxed);
        let iterations = handle.join().unwrap();
        assert!(iterations > 0);
    }
}
