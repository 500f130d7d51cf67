use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Stroke, Ui};
use treechart_core::color::parse_hex;
use treechart_core::dataset::DatasetKey;
use treechart_core::{html, svg, ChartLayout};

use crate::state::AppState;

const TEXT: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);
const TOOLTIP_BG: Color32 = Color32::from_rgb(0xff, 0xff, 0xe0);

pub fn draw(app: &mut AppState, ctx: &egui::Context) {
    if app.poll_load() {
        ctx.request_repaint();
    }
    // Keep polling while a fetch is outstanding
    if app.loading {
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        top_bar(ui, app);
    });

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::from_rgb(0xfa, 0xfa, 0xfa)))
        .show(ctx, |ui| {
            if let Some(err) = app.error.clone() {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.colored_label(Color32::from_rgb(0xc0, 0x20, 0x20), "Could not load dataset");
                    ui.label(err);
                    if ui.button("Retry").clicked() {
                        app.start_load();
                    }
                });
                return;
            }
            if app.loading {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                chart_view(ui, app);
            });
        });

    tooltip_overlay(ctx, app);
}

fn top_bar(ui: &mut Ui, app: &mut AppState) {
    ui.horizontal(|ui| {
        let mut selected = app.dataset;
        egui::ComboBox::from_label("Dataset")
            .selected_text(selected.descriptor().title)
            .show_ui(ui, |ui| {
                for key in DatasetKey::ALL {
                    ui.selectable_value(&mut selected, key, key.descriptor().title);
                }
            });
        if selected != app.dataset {
            app.select_dataset(selected);
        }
        if ui.button("Reload").clicked() {
            app.start_load();
        }
        if ui.button("Open File…").clicked() {
            if let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() {
                app.open_file(path);
            }
        }
        ui.separator();
        let chart = app.chart.as_ref();
        if ui.add_enabled(chart.is_some(), egui::Button::new("Export SVG…")).clicked() {
            if let Some(chart) = chart {
                save_as(chart, "svg", svg::render(chart));
            }
        }
        if ui.add_enabled(chart.is_some(), egui::Button::new("Export HTML…")).clicked() {
            if let Some(chart) = chart {
                save_as(chart, "html", html::render_page(chart));
            }
        }
        ui.separator();
        if let Some(when) = app.loaded_at {
            ui.label(format!("Loaded {}", when.format("%H:%M:%S")));
        }
        if let Some(path) = &app.input {
            ui.label(path.display().to_string());
        }
    });
}

fn save_as(chart: &ChartLayout, ext: &str, contents: String) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter(ext, &[ext])
        .set_file_name(format!("{}.{ext}", chart.dataset.key))
        .save_file()
    else {
        return;
    };
    if let Err(e) = std::fs::write(&path, contents) {
        tracing::error!(path = %path.display(), error = %e, "export failed");
    }
}

fn chart_view(ui: &mut Ui, app: &mut AppState) {
    let container_width = ui.available_width() as f64;
    let Some(chart) = app.layout_for(container_width) else {
        return;
    };
    if chart.dims.is_degenerate() {
        ui.label("Window too narrow to draw the chart");
        return;
    }

    let (vw, vh) = chart.dims.view_box();
    let (response, painter) =
        ui.allocate_painter(egui::vec2(vw as f32, vh as f32), egui::Sense::hover());
    let origin = response.rect.min
        + egui::vec2(chart.dims.margins.left as f32, chart.dims.margins.top as f32);
    paint_chart(&painter, origin, chart);

    // Pointer events drive the tooltip state machine; last event wins.
    let hovered = response.hover_pos().and_then(|pos| {
        let local = pos - origin;
        chart
            .hit(local.x as f64, local.y as f64)
            .map(|cell| (cell.tooltip(), pos))
    });
    match hovered {
        Some((content, pos)) => app.tooltip.on_pointer_move(content, pos.x as f64, pos.y as f64),
        None => app.tooltip.on_pointer_out(),
    }
}

fn color(hex: &str) -> Color32 {
    let [r, g, b] = parse_hex(hex).unwrap_or([0x80, 0x80, 0x80]);
    Color32::from_rgb(r, g, b)
}

fn at(origin: Pos2, x: f64, y: f64) -> Pos2 {
    origin + egui::vec2(x as f32, y as f32)
}

fn paint_chart(painter: &Painter, origin: Pos2, chart: &ChartLayout) {
    let h = &chart.header;
    painter.text(
        at(origin, h.title.x, h.title.y),
        Align2::CENTER_BOTTOM,
        &h.title.text,
        FontId::proportional(h.title.font_size as f32),
        TEXT,
    );
    painter.text(
        at(origin, h.description.x, h.description.y),
        Align2::CENTER_BOTTOM,
        &h.description.text,
        FontId::proportional(h.description.font_size as f32),
        TEXT,
    );

    for cell in &chart.cells {
        let rect = egui::Rect::from_min_max(
            at(origin, cell.rect.x0, cell.rect.y0),
            at(origin, cell.rect.x1, cell.rect.y1),
        );
        painter.rect_filled(rect, 0.0, color(cell.fill));
        // Labels never spill outside their tile.
        let clipped = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
        let font = FontId::proportional(cell.font_size as f32);
        for line in &cell.lines {
            // Lines are positioned by baseline; egui anchors by the glyph box.
            clipped.text(
                rect.min + egui::vec2(line.x as f32, line.y as f32),
                Align2::LEFT_BOTTOM,
                &line.text,
                font.clone(),
                TEXT,
            );
        }
    }

    let legend = &chart.legend;
    let legend_origin = at(origin, legend.origin.0, legend.origin.1);
    let s = legend.swatch_size as f32;
    for e in &legend.entries {
        let min = legend_origin + egui::vec2(e.x as f32, e.y as f32);
        let swatch = egui::Rect::from_min_size(min, egui::vec2(s, s));
        painter.rect_filled(swatch, 0.0, color(e.color));
        painter.rect_stroke(swatch, 0.0, Stroke::new(0.5, TEXT));
        painter.text(
            min + egui::vec2(s + 3.0, s - 2.0),
            Align2::LEFT_BOTTOM,
            &e.category,
            FontId::proportional(legend.text_size as f32),
            TEXT,
        );
    }
}

fn tooltip_overlay(ctx: &egui::Context, app: &AppState) {
    let (Some(content), Some((x, y))) = (app.tooltip.content(), app.tooltip.position()) else {
        return;
    };
    let alpha = (app.tooltip.opacity() * 255.0).round() as u8;
    egui::Area::new(egui::Id::new("treemap-tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(egui::pos2(x as f32, y as f32))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(Color32::from_rgba_unmultiplied(
                    TOOLTIP_BG.r(),
                    TOOLTIP_BG.g(),
                    TOOLTIP_BG.b(),
                    alpha,
                ))
                .stroke(Stroke::new(1.0, Color32::from_gray(0x99)))
                .rounding(4.0)
                .inner_margin(6.0)
                .show(ui, |ui| {
                    for line in content.lines() {
                        ui.label(egui::RichText::new(line).color(TEXT).size(12.0));
                    }
                });
        });
}
