use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::Usage;
use crate::state::AppState;

const BUDGET_MIN: i64 = 20_000;
const BUDGET_MAX: i64 = 200_000;
const BUDGET_STEP: f64 = 5_000.0;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.  Recomputes the results when any widget
/// changed this frame.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter your preferences");
    ui.separator();

    // The Arc keeps the option lists alive while `state.criteria` is edited.
    let Some(table) = state.table.clone() else {
        ui.label("No listings loaded.");
        return;
    };

    let currency = state.settings.target_currency.clone();
    let criteria = &mut state.criteria;
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Budget & usage ----
            ui.strong(format!("Max budget ({currency})"));
            changed |= ui
                .add(egui::Slider::new(&mut criteria.max_budget, BUDGET_MIN..=BUDGET_MAX).step_by(BUDGET_STEP))
                .changed();

            ui.strong("Primary use");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for usage in Usage::ALL {
                    changed |= ui.radio_value(&mut criteria.usage, usage, usage.label()).changed();
                }
            });
            ui.separator();

            // ---- Brand / CPU / RAM ----
            egui::CollapsingHeader::new(RichText::new(format!("Brands ({})", criteria.brands.len())).strong())
                .id_salt("brands")
                .show(ui, |ui: &mut Ui| {
                    for brand in &table.brands {
                        changed |= checkbox_for(ui, &mut criteria.brands, brand, brand);
                    }
                });

            egui::CollapsingHeader::new(RichText::new(format!("CPU type ({})", criteria.cpu_families.len())).strong())
                .id_salt("cpu_families")
                .show(ui, |ui: &mut Ui| {
                    for family in &table.cpu_families {
                        changed |= checkbox_for(ui, &mut criteria.cpu_families, family, family.label());
                    }
                });

            ui.strong("Minimum RAM");
            egui::ComboBox::from_id_salt("min_ram")
                .selected_text(format!("{} GB", criteria.min_ram))
                .show_ui(ui, |ui: &mut Ui| {
                    for &ram in &table.ram_sizes {
                        changed |= ui
                            .selectable_value(&mut criteria.min_ram, ram, format!("{ram} GB"))
                            .changed();
                    }
                });
            ui.separator();

            // ---- Storage / screen / search ----
            egui::CollapsingHeader::new(
                RichText::new(format!("Storage type ({})", criteria.storage_types.len())).strong(),
            )
            .id_salt("storage_types")
            .show(ui, |ui: &mut Ui| {
                for kind in &table.storage_types {
                    changed |= checkbox_for(ui, &mut criteria.storage_types, kind, kind);
                }
            });

            if let Some((lo, hi)) = table.screen_bounds {
                ui.strong("Screen size (inches)");
                let (low, high) = criteria.screen_range.get_or_insert((lo, hi));
                changed |= ui.add(egui::Slider::new(low, lo..=hi).text("from")).changed();
                changed |= ui.add(egui::Slider::new(high, lo..=hi).text("to")).changed();
            }
            ui.separator();

            ui.strong("Search by product name");
            changed |= ui.text_edit_singleline(&mut criteria.product_query).changed();
        });

    if changed {
        state.refilter();
    }
}

/// One multi-select checkbox.  Returns whether it was toggled.
fn checkbox_for<T: Ord + Clone>(ui: &mut Ui, set: &mut BTreeSet<T>, value: &T, label: &str) -> bool {
    let mut checked = set.contains(value);
    if !ui.checkbox(&mut checked, label).changed() {
        return false;
    }
    if checked {
        set.insert(value.clone());
    } else {
        set.remove(value);
    }
    true
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                // Errors are already in `status_message`.
                let _ = state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(report) = &state.report {
            ui.label(format!(
                "{} laptops loaded ({} skipped), {} matching",
                report.loaded, report.skipped, state.total_matches
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open laptop listings")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        // Errors are already in `status_message`.
        let _ = state.open(&path);
    }
}
