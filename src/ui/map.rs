use eframe::egui::{self, Color32, Rect, Ui, Vec2};
use egui_plot::{Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::chart::hit::{nearest_circle, present};
use crate::chart::tooltip::{popup, Tooltip};
use crate::color::{self, hex_to_color32};
use crate::state::MapView;

const MARKER_RADIUS: f32 = 7.0;
const GRATICULE_STEP: i32 = 30;
/// Flag icon size on the map, matching the 40px flag CDN images.
const FLAG_SIZE: Vec2 = Vec2::new(40.0, 27.0);

/// Lat/lon plane with one flag marker per known country. Hovering a
/// marker shows its popup and records it as `MapView::hovered`.
pub fn map_view(ui: &mut Ui, map: &mut MapView, tooltip: &mut dyn Tooltip) {
    let mut plot = Plot::new("covid_map")
        .data_aspect(1.0)
        .show_x(false)
        .show_y(false)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(80.0);
    if map.take_reset() {
        plot = plot.reset();
    }

    let marker_color = hex_to_color32(color::MARKER_FILL);
    let markers = map.markers();
    let response = plot.show(ui, |plot_ui| {
        let grid = Color32::from_gray(190);
        for lon in (-180..=180).step_by(GRATICULE_STEP as usize) {
            let meridian: PlotPoints = vec![[f64::from(lon), -85.0], [f64::from(lon), 85.0]].into();
            plot_ui.line(Line::new(meridian).color(grid).width(0.5));
        }
        for lat in (-60..=60).step_by(GRATICULE_STEP as usize) {
            let parallel: PlotPoints = vec![[-180.0, f64::from(lat)], [180.0, f64::from(lat)]].into();
            plot_ui.line(Line::new(parallel).color(grid).width(0.5));
        }

        for marker in markers {
            plot_ui.points(
                Points::new(vec![[marker.lon(), marker.lat()]])
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(MARKER_RADIUS)
                    .color(marker_color)
                    .name(&marker.record.location),
            );
        }
    });

    // Flags sit over the plot, centred on each marker dot.
    let plot_rect = response.response.rect;
    for marker in markers {
        let centre = response
            .transform
            .position_from_point(&PlotPoint::new(marker.lon(), marker.lat()));
        let rect = Rect::from_center_size(centre, FLAG_SIZE);
        if plot_rect.contains_rect(rect) {
            egui::Image::new(marker.flag_url()).paint_at(ui, rect);
        }
    }

    let Some(pos) = response.response.hover_pos() else {
        map.hovered = None;
        tooltip.hide();
        return;
    };
    let circles: Vec<([f32; 2], f32)> = markers
        .iter()
        .map(|m| {
            let p = response
                .transform
                .position_from_point(&PlotPoint::new(m.lon(), m.lat()));
            ([p.x, p.y], FLAG_SIZE.x * 0.5)
        })
        .collect();
    let hovered = nearest_circle(&circles, [pos.x, pos.y]);
    present(tooltip, hovered.map(|i| popup(&markers[i])), [pos.x, pos.y]);
    map.hovered = hovered;
}
