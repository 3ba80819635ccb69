// Symmetric nozzle cross-section drawn with the egui painter.

use egui::{pos2, Color32, Pos2, Rect, Stroke};
use nozzle_core::grid::AxialGrid;

const PADDING: f32 = 16.0;

/// Map the contour and its mirror into `rect`, keeping the aspect ratio so
/// the exit bell is not distorted. Returns `(upper, lower)` wall polylines.
pub fn outline_points(grid: &AxialGrid, radius: &[f64], rect: Rect) -> (Vec<Pos2>, Vec<Pos2>) {
    let max_radius = radius.iter().cloned().fold(0.0f64, f64::max);
    if grid.length() <= 0.0 || max_radius <= 0.0 {
        return (Vec::new(), Vec::new());
    }

    let draw_width = (rect.width() - 2.0 * PADDING).max(0.0);
    let draw_height = (rect.height() - 2.0 * PADDING).max(0.0);
    let scale = (draw_width / grid.length() as f32).min(draw_height / (2.0 * max_radius as f32));

    let left = rect.center().x - 0.5 * grid.length() as f32 * scale;
    let center_y = rect.center().y;

    grid.positions()
        .iter()
        .zip(radius)
        .map(|(&x, &r)| {
            let px = left + x as f32 * scale;
            let dy = r as f32 * scale;
            (pos2(px, center_y - dy), pos2(px, center_y + dy))
        })
        .unzip()
}

/// Draw the selected contour as a cross-section in a top panel.
pub fn draw_geometry(ctx: &egui::Context, grid: &AxialGrid, radius: &[f64]) {
    egui::TopBottomPanel::top("geometry")
        .min_height(140.0)
        .show(ctx, |ui| {
            ui.heading("Nozzle Cross-Section");

            let available = ui.available_size();
            let (response, painter) = ui.allocate_painter(available, egui::Sense::hover());
            let rect = response.rect;

            let (upper, lower) = outline_points(grid, radius, rect);
            let (Some(first), Some(last)) = (upper.first().copied(), upper.last().copied()) else {
                return;
            };

            let wall = Stroke::new(2.0, Color32::from_rgb(220, 120, 60));
            let axis = Stroke::new(1.0, Color32::GRAY);

            painter.line_segment([pos2(first.x, rect.center().y), pos2(last.x, rect.center().y)], axis);
            painter.add(egui::Shape::line(upper, wall));
            painter.add(egui::Shape::line(lower, wall));
        });
}
