pub mod app;
pub mod geometry_view;
pub mod plot_view;
pub mod renderer;
pub mod ui;

use app::App;
use nozzle_core::{NozzleAnalysis, NozzleParams};
use thiserror::Error;
use winit::event_loop::EventLoop;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Graphics setup failed at {stage}: {reason}")]
    Setup { stage: &'static str, reason: String },
}

/// Open the chart window for a finished analysis and block until it is closed.
pub fn run(params: NozzleParams, analysis: NozzleAnalysis) -> Result<(), RenderError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(params, analysis);
    event_loop.run_app(&mut app)?;
    app.finish()
}
