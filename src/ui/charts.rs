use std::ops::RangeInclusive;

use eframe::egui::{Color32, Pos2, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints,
    PlotResponse, Points, Polygon,
};

use crate::chart::format::compact;
use crate::chart::hit::{bar_at, nearest_circle, present};
use crate::chart::pie::{angle_of, pie_layout, slice_at, wedge_outline};
use crate::chart::scale::{LinearScale, SqrtScale};
use crate::chart::tooltip::{cases_tooltip, deaths_tooltip, Tooltip, TooltipContent};
use crate::color::{self, hex_to_color32, ColorMap};
use crate::data::model::Record;

const BAR_WIDTH: f64 = 0.8;
const LINE_POINT_RADIUS: f32 = 4.0;
const SCATTER_RADIUS: f32 = 5.0;
/// Extra pointer slack around small markers.
const HOVER_SLACK: f32 = 3.0;
const Y_TICKS: usize = 10;

// ---------------------------------------------------------------------------
// Shared plot setup
// ---------------------------------------------------------------------------

/// A plot with navigation disabled; these charts are fixed views.
fn fixed_plot<'a>(id: &str) -> Plot<'a> {
    Plot::new(id)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show_x(false)
        .show_y(false)
}

/// Axis labels for location-indexed x values; non-integer marks stay blank.
fn location_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let i = mark.value.round();
        if i < 0.0 || (mark.value - i).abs() > 1e-6 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

fn compact_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    compact(mark.value)
}

fn locations(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.location.clone()).collect()
}

/// Top of the value axis: the data maximum rounded up to a tick.
fn nice_max(records: &[Record], metric: impl Fn(&Record) -> f64) -> f64 {
    let max = records.iter().map(metric).fold(0.0, f64::max);
    LinearScale::new([0.0, max], [0.0, 1.0]).nice(Y_TICKS).domain[1]
}

/// Pointer position in plot and screen coordinates, while hovered.
fn pointer(response: &PlotResponse<()>) -> Option<(PlotPoint, Pos2)> {
    let pos = response.response.hover_pos()?;
    Some((response.transform.value_from_position(pos), pos))
}

fn screen_circle(response: &PlotResponse<()>, x: f64, y: f64, radius: f32) -> ([f32; 2], f32) {
    let pos = response.transform.position_from_point(&PlotPoint::new(x, y));
    ([pos.x, pos.y], radius)
}

/// Tooltip for the circle under the pointer, if any.
fn hover_circles(
    response: &PlotResponse<()>,
    circles: &[([f32; 2], f32)],
    records: &[Record],
    content: fn(&Record) -> TooltipContent,
    tooltip: &mut dyn Tooltip,
) {
    let Some((_, pos)) = pointer(response) else {
        tooltip.hide();
        return;
    };
    let hit = nearest_circle(circles, [pos.x, pos.y]).map(|i| content(&records[i]));
    present(tooltip, hit, [pos.x, pos.y]);
}

fn empty_notice(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No country rows to chart");
    });
}

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, records: &[Record], tooltip: &mut dyn Tooltip) {
    if records.is_empty() {
        return empty_notice(ui);
    }
    let fill = hex_to_color32(color::BAR_FILL);
    let bars: Vec<Bar> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.total_cases)
                .width(BAR_WIDTH)
                .name(&r.location)
                .fill(fill)
        })
        .collect();

    let response = fixed_plot("bar_chart")
        .x_axis_formatter(location_axis(locations(records)))
        .y_axis_formatter(compact_axis)
        .y_axis_label("Total Cases")
        .include_x(-0.5)
        .include_x(records.len() as f64 - 0.5)
        .include_y(0.0)
        .include_y(nice_max(records, |r| r.total_cases))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(fill));
        });

    let values: Vec<f64> = records.iter().map(|r| r.total_cases).collect();
    let hit = pointer(&response).and_then(|(value, pos)| {
        bar_at(&values, value.x, value.y, BAR_WIDTH).map(|i| (cases_tooltip(&records[i]), pos))
    });
    match hit {
        Some((content, pos)) => tooltip.show(&content, [pos.x, pos.y]),
        None => tooltip.hide(),
    }
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Draw the pie; returns the index of a slice clicked this frame.
pub fn pie_chart(ui: &mut Ui, records: &[Record], selected: Option<usize>) -> Option<usize> {
    if records.is_empty() {
        empty_notice(ui);
        return None;
    }
    let values: Vec<f64> = records.iter().map(|r| r.total_cases).collect();
    let slices = pie_layout(&values);
    let colors = ColorMap::new(records.iter().map(|r| r.location.as_str()));

    let response = fixed_plot("pie_chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            for slice in slices.iter().filter(|s| s.span() > 0.0) {
                let record = &records[slice.index];
                let radius = if selected == Some(slice.index) { 1.08 } else { 1.0 };
                let outline: PlotPoints = wedge_outline(slice, radius).into_iter().collect();
                plot_ui.polygon(
                    Polygon::new(outline)
                        .name(&record.location)
                        .fill_color(colors.color_for(&record.location))
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
            }
        });

    if !response.response.clicked() {
        return None;
    }
    let pos = response.response.interact_pointer_pos()?;
    let value = response.transform.value_from_position(pos);
    if value.x.hypot(value.y) > 1.0 {
        return None;
    }
    slice_at(&slices, angle_of(value.x, value.y)).map(|s| s.index)
}

// ---------------------------------------------------------------------------
// Line / Area
// ---------------------------------------------------------------------------

fn case_points(records: &[Record]) -> PlotPoints {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| [i as f64, r.total_cases])
        .collect()
}

pub fn line_chart(ui: &mut Ui, records: &[Record], tooltip: &mut dyn Tooltip) {
    if records.is_empty() {
        return empty_notice(ui);
    }
    let response = fixed_plot("line_chart")
        .x_axis_formatter(location_axis(locations(records)))
        .y_axis_formatter(compact_axis)
        .y_axis_label("Total Cases")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(case_points(records))
                    .color(hex_to_color32(color::LINE_STROKE))
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(case_points(records))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(LINE_POINT_RADIUS)
                    .color(hex_to_color32(color::LINE_POINT)),
            );
        });

    let circles: Vec<([f32; 2], f32)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| screen_circle(&response, i as f64, r.total_cases, LINE_POINT_RADIUS + HOVER_SLACK))
        .collect();
    hover_circles(&response, &circles, records, cases_tooltip, tooltip);
}

pub fn area_chart(ui: &mut Ui, records: &[Record]) {
    if records.is_empty() {
        return empty_notice(ui);
    }
    let fill = hex_to_color32(color::AREA_FILL);
    fixed_plot("area_chart")
        .x_axis_formatter(location_axis(locations(records)))
        .y_axis_formatter(compact_axis)
        .y_axis_label("Total Cases")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(case_points(records)).color(fill).fill(0.0_f32));
        });
}

// ---------------------------------------------------------------------------
// Bubble / Scatter
// ---------------------------------------------------------------------------

pub fn bubble_chart(ui: &mut Ui, records: &[Record], tooltip: &mut dyn Tooltip) {
    if records.is_empty() {
        return empty_notice(ui);
    }
    let max_cases = records.iter().map(|r| r.total_cases).fold(0.0, f64::max);
    let radius = SqrtScale::new([0.0, max_cases], [5.0, 40.0]);
    let base = hex_to_color32(color::BUBBLE_FILL);
    let fill = Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), 178);

    let response = fixed_plot("bubble_chart")
        .x_axis_formatter(compact_axis)
        .y_axis_formatter(compact_axis)
        .x_axis_label("Population")
        .y_axis_label("Total Cases")
        .include_x(0.0)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for r in records {
                plot_ui.points(
                    Points::new(vec![[r.population, r.total_cases]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(radius.apply(r.total_cases) as f32)
                        .color(fill)
                        .name(&r.location),
                );
            }
        });

    let circles: Vec<([f32; 2], f32)> = records
        .iter()
        .map(|r| {
            screen_circle(&response, r.population, r.total_cases, radius.apply(r.total_cases) as f32)
        })
        .collect();
    hover_circles(&response, &circles, records, cases_tooltip, tooltip);
}

pub fn scatter_chart(ui: &mut Ui, records: &[Record], tooltip: &mut dyn Tooltip) {
    if records.is_empty() {
        return empty_notice(ui);
    }
    let points: PlotPoints = records
        .iter()
        .map(|r| [r.population, r.total_deaths])
        .collect();

    let response = fixed_plot("scatter_chart")
        .x_axis_formatter(compact_axis)
        .y_axis_formatter(compact_axis)
        .x_axis_label("Population")
        .y_axis_label("Total Deaths")
        .include_x(0.0)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(SCATTER_RADIUS)
                    .color(hex_to_color32(color::SCATTER_FILL)),
            );
        });

    let circles: Vec<([f32; 2], f32)> = records
        .iter()
        .map(|r| screen_circle(&response, r.population, r.total_deaths, SCATTER_RADIUS + HOVER_SLACK))
        .collect();
    hover_circles(&response, &circles, records, deaths_tooltip, tooltip);
}
