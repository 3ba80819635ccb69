// ApplicationHandler, event loop and frame orchestration.

use egui_winit_vulkano::{Gui, GuiConfig};
use nozzle_core::{NozzleAnalysis, NozzleParams};
use tracing::error;
use winit::{
    application::ApplicationHandler, event::WindowEvent, event_loop::ActiveEventLoop,
    window::WindowId,
};

use crate::plot_view::{self, ChartKind, ChartSpec};
use crate::{geometry_view, renderer::Renderer, ui, ui::UiState, RenderError};

pub struct App {
    renderer: Option<Renderer>,
    gui: Option<Gui>,
    params: NozzleParams,
    analysis: NozzleAnalysis,
    /// Chart descriptions, built once since the analysis never changes.
    charts: Vec<ChartSpec>,
    ui_state: UiState,
    /// First setup failure; reported once the event loop has exited.
    failure: Option<RenderError>,
}

impl App {
    pub fn new(params: NozzleParams, analysis: NozzleAnalysis) -> Self {
        let charts = ChartKind::ALL
            .iter()
            .map(|&kind| ChartSpec::build(kind, &analysis))
            .collect();

        Self {
            renderer: None,
            gui: None,
            params,
            analysis,
            charts,
            ui_state: UiState::default(),
            failure: None,
        }
    }

    /// Consume the app after the event loop returns.
    pub fn finish(self) -> Result<(), RenderError> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        let renderer = match Renderer::new(event_loop) {
            Ok(r) => r,
            Err(e) => {
                error!("{e}");
                self.failure = Some(e);
                event_loop.exit();
                return;
            }
        };

        let gui = Gui::new(
            event_loop,
            renderer.surface.clone(),
            renderer.queue.clone(),
            renderer.swapchain_format(),
            GuiConfig {
                is_overlay: false,
                ..Default::default()
            },
        );

        renderer.window.request_redraw();
        self.renderer = Some(renderer);
        self.gui = Some(gui);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gui) = self.gui.as_mut() {
            gui.update(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(_) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.recreate_swapchain = true;
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                return;
            }
            _ => {}
        }

        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }
}

impl App {
    fn render_frame(&mut self) {
        let (Some(renderer), Some(gui)) = (self.renderer.as_mut(), self.gui.as_mut()) else {
            return;
        };

        let Some((image_index, acquire_future)) = renderer.begin_frame() else {
            return;
        };
        let before_future = renderer.take_previous_frame_end().join(acquire_future);

        let params = &self.params;
        let analysis = &self.analysis;
        let charts = &self.charts;
        let ui_state = &mut self.ui_state;
        let mut chart_changed = false;

        gui.immediate_ui(|gui| {
            let ctx = gui.context();
            chart_changed = ui::draw_sidebar(&ctx, params, analysis, ui_state);
            geometry_view::draw_geometry(&ctx, &analysis.grid, analysis.selected_profile());
            if let Some(spec) = charts.iter().find(|c| c.kind == ui_state.chart) {
                plot_view::draw_chart(&ctx, spec);
            }
        });

        let image_view = renderer.image_views[image_index as usize].clone();
        let after_future = gui.draw_on_image(before_future, image_view);
        renderer.present(after_future, image_index);

        // The chart was laid out before the click landed; show the new one now.
        if chart_changed {
            renderer.window.request_redraw();
        }
    }
}
