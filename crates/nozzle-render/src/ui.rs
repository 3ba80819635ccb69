// Side panel: chart selection plus read-only parameter and result readouts.

use nozzle_core::{NozzleAnalysis, NozzleParams};

use crate::plot_view::ChartKind;

/// Extra UI-only state that doesn't belong in the analysis.
pub struct UiState {
    pub chart: ChartKind,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            chart: ChartKind::Profiles,
        }
    }
}

/// Label/value rows describing the inputs and the exit-plane results.
pub fn summary_rows(params: &NozzleParams, analysis: &NozzleAnalysis) -> Vec<(&'static str, String)> {
    fn last(values: &[f64]) -> f64 {
        values.last().copied().unwrap_or(f64::NAN)
    }
    let [converging, diverging, exit] = params.initial_angles;

    vec![
        ("Heat capacity ratio k", format!("{:.3}", params.heat_capacity_ratio)),
        ("Gas constant R", format!("{:.4} J/(mol·K)", params.gas_constant)),
        ("Chamber temperature", format!("{:.1} K", params.chamber_temperature)),
        ("Chamber density", format!("{:.4} kg/m³", params.chamber_density)),
        ("Throat radius", format!("{:.2} mm", params.throat_radius)),
        ("Exit radius", format!("{:.2} mm", params.exit_radius())),
        ("Expansion ratio", format!("{:.1}", params.expansion_ratio)),
        ("Throat area", format!("{:.1} mm²", params.throat_area())),
        ("Length", format!("{:.1} mm", params.length)),
        ("Wall angles", format!("{converging}° / {diverging}° / {exit}°")),
        ("Samples", analysis.grid.len().to_string()),
        ("Exit Mach", format!("{:.3}", last(&analysis.flow.mach))),
        ("Exit temperature", format!("{:.1} K", last(&analysis.flow.temperature))),
        ("Exit density", format!("{:.5} kg/m³", last(&analysis.flow.density))),
    ]
}

/// Draw the left-side panel. Returns `true` if the selected chart changed.
pub fn draw_sidebar(
    ctx: &egui::Context,
    params: &NozzleParams,
    analysis: &NozzleAnalysis,
    ui_state: &mut UiState,
) -> bool {
    let before = ui_state.chart;

    egui::SidePanel::left("sidebar")
        .min_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Charts");
            for kind in ChartKind::ALL {
                ui.selectable_value(&mut ui_state.chart, kind, kind.title());
            }

            ui.separator();
            ui.heading("Nozzle");
            egui::Grid::new("summary")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (label, value) in summary_rows(params, analysis) {
                        ui.label(label);
                        ui.label(value);
                        ui.end_row();
                    }
                });
        });

    ui_state.chart != before
}
