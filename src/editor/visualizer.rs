use super::colors;

/// Map samples to screen points across `rect`, clamped to ±1.
pub fn waveform_points(samples: &[f32], rect: egui::Rect) -> Vec<egui::Pos2> {
    let len = samples.len();
    if len < 2 {
        return Vec::new();
    }
    let half_height = rect.height() / 2.0;
    let center_y = rect.center().y;
    let step = rect.width() / (len - 1) as f32;

    samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let x = rect.left() + i as f32 * step;
            let y = center_y - s.clamp(-1.0, 1.0) * half_height;
            egui::pos2(x, y)
        })
        .collect()
}

/// Draw the input waveform, filling the available space.
pub fn draw(ui: &mut egui::Ui, samples: &[f32]) {
    let desired_size = ui.available_size().max(egui::vec2(32.0, 32.0));
    let (rect, _response) = ui.allocate_exact_size(desired_size, egui::Sense::hover());

    if !ui.is_rect_visible(rect) {
        return;
    }
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 2.0, colors::CRUST);

    let center_y = rect.center().y;
    painter.line_segment(
        [
            egui::pos2(rect.left(), center_y),
            egui::pos2(rect.right(), center_y),
        ],
        egui::Stroke::new(0.5, colors::SURFACE1),
    );

    let points = waveform_points(samples, rect);
    if !points.is_empty() {
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(1.0, colors::TEAL.gamma_multiply(0.8)),
        ));
    }
}
