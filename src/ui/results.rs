use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 8] = ["Company", "Product", "Ram", "CPU", "Gpu", "Storage", "Inches", "Price"];

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Render the top recommendations for the current criteria.
pub fn results_view(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a listings file to get started  (File → Open…)");
        });
        return;
    }

    ui.heading("Top laptop recommendations");
    ui.label(
        RichText::new(format!(
            "Showing {} of {} matches. Prices are based on past data and may differ in stores.",
            state.results.len(),
            state.total_matches
        ))
        .italics(),
    );
    ui.add_space(4.0);

    if state.results.is_empty() {
        ui.label(
            RichText::new("No matching laptops found. Try changing your filters.")
                .color(Color32::from_rgb(200, 140, 0)),
        );
    } else {
        let currency = &state.settings.target_currency;
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto(), HEADERS.len() - 1)
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for listing in &state.results {
                    body.row(18.0, |mut row| {
                        let cells = [
                            listing.company.clone(),
                            listing.product.clone().unwrap_or_default(),
                            format!("{} GB", listing.ram_gb),
                            listing.cpu_family.to_string(),
                            listing.gpu_text.clone(),
                            listing.storage.to_string(),
                            format!("{:.1}", listing.screen_inches),
                            format!("{} {currency}", listing.price_converted),
                        ];
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    }
}
