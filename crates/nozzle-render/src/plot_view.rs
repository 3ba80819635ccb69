// Line charts via egui_plot. Every chart goes through `ChartSpec` and `draw_chart`.

use egui_plot::{Legend, Line, Plot};
use nozzle_core::NozzleAnalysis;

const LENGTH_LABEL: &str = "Length x (mm)";
const LINE_WIDTH: f32 = 2.0;

/// The charts the presenter can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Profiles,
    Selected,
    Temperature,
    Mach,
    Density,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Profiles,
        ChartKind::Selected,
        ChartKind::Temperature,
        ChartKind::Mach,
        ChartKind::Density,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Profiles => "Candidate nozzle profiles",
            ChartKind::Selected => "Selected profile",
            ChartKind::Temperature => "Temperature along the nozzle",
            ChartKind::Mach => "Mach number along the nozzle",
            ChartKind::Density => "Density along the nozzle",
        }
    }

    fn plot_id(self) -> &'static str {
        match self {
            ChartKind::Profiles => "profiles_plot",
            ChartKind::Selected => "selected_plot",
            ChartKind::Temperature => "temperature_plot",
            ChartKind::Mach => "mach_plot",
            ChartKind::Density => "density_plot",
        }
    }

    fn y_label(self) -> &'static str {
        match self {
            ChartKind::Profiles | ChartKind::Selected => "Radius y (mm)",
            ChartKind::Temperature => "T (K)",
            ChartKind::Mach => "M",
            ChartKind::Density => "ρ (kg/m³)",
        }
    }
}

/// One named polyline of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend entry; `None` keeps the line out of the legend.
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw one chart, independent of egui.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn build(kind: ChartKind, analysis: &NozzleAnalysis) -> Self {
        let grid = &analysis.grid;
        let single = |name: &str, values: &[f64]| {
            vec![Series {
                name: Some(name.to_string()),
                points: grid.points(values),
            }]
        };

        let series = match kind {
            ChartKind::Profiles => analysis
                .profiles
                .iter()
                .map(|p| Series {
                    name: Some(p.label.clone()),
                    points: grid.points(&p.radius),
                })
                .collect(),
            ChartKind::Selected => {
                let selected = analysis.selected_profile();
                let mirror: Vec<f64> = selected.iter().map(|r| -r).collect();
                vec![
                    Series {
                        name: Some("Selected profile".to_string()),
                        points: grid.points(selected),
                    },
                    Series {
                        name: None,
                        points: grid.points(&mirror),
                    },
                ]
            }
            ChartKind::Temperature => single("Temperature", &analysis.flow.temperature),
            ChartKind::Mach => single("Mach number", &analysis.flow.mach),
            ChartKind::Density => single("Density", &analysis.flow.density),
        };

        Self {
            kind,
            title: kind.title(),
            x_label: LENGTH_LABEL,
            y_label: kind.y_label(),
            series,
        }
    }
}

/// Draw `spec` as a line chart filling the central panel.
pub fn draw_chart(ctx: &egui::Context, spec: &ChartSpec) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(spec.title);

        Plot::new(spec.kind.plot_id())
            .x_axis_label(spec.x_label)
            .y_axis_label(spec.y_label)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for series in &spec.series {
                    let mut line = Line::new(series.points.clone()).width(LINE_WIDTH);
                    if let Some(name) = &series.name {
                        line = line.name(name);
                    }
                    plot_ui.line(line);
                }
            });
    });
}
