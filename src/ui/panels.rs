use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};

use crate::chart::format::thousands;
use crate::data::loader::DataSource;
use crate::state::{DashboardState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – tabs and ranking
// ---------------------------------------------------------------------------

/// Render the left panel: chart tabs, then the ranking or marker list.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("COVID-19 Dashboard");
    ui.separator();

    let active = state.active_tab();
    for tab in Tab::ALL {
        if ui.selectable_label(active == tab, tab.label()).clicked() && active != tab {
            state.activate(tab);
        }
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.active_tab() == Tab::Map {
                marker_list(ui, state);
            } else {
                ranking_table(ui, state);
            }
        });
}

fn ranking_table(ui: &mut Ui, state: &DashboardState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    if dataset.is_empty() {
        ui.label(format!("No valid rows ({} dropped).", dataset.dropped));
        return;
    }

    ui.strong(format!("Top {} by total cases", dataset.top.len()));
    Grid::new("ranking")
        .striped(true)
        .num_columns(3)
        .show(ui, |ui: &mut Ui| {
            for (rank, record) in dataset.top.iter().enumerate() {
                let mut name = RichText::new(&record.location);
                if state.selected_slice == Some(rank) {
                    name = name.strong();
                }
                ui.label(format!("{}.", rank + 1));
                ui.label(name);
                ui.label(thousands(record.total_cases));
                ui.end_row();
            }
        });
}

fn marker_list(ui: &mut Ui, state: &DashboardState) {
    let Some(map) = state.map() else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Countries on the map");
    for (i, marker) in map.markers().iter().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(marker.flag_url())
                    .max_width(40.0)
                    .max_height(27.0),
            );
            let mut name = RichText::new(&marker.record.location);
            if map.hovered == Some(i) {
                name = name.strong().color(Color32::LIGHT_BLUE);
            }
            ui.label(name);
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            if ui.button("Reload from web").clicked() {
                let source = state.config.source();
                start_load(ui.ctx(), state, source);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.is_loading() {
            ui.spinner();
            ui.label("Loading…");
        } else if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} countries loaded, {} rows skipped",
                ds.len(),
                ds.dropped
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Kick off a background load that repaints the UI when it finishes.
pub fn start_load(ctx: &egui::Context, state: &mut DashboardState, source: DataSource) {
    let ctx = ctx.clone();
    state.begin_fetch(source, move || ctx.request_repaint());
}

pub fn open_file_dialog(ctx: &egui::Context, state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open COVID-19 dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        start_load(ctx, state, DataSource::File(path));
    }
}
