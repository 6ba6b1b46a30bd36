use shared::domain::{Resolution, ResolutionId, MAX_PROGRESS};

use crate::ui::theme::{self, category_style};

pub const CARD_WIDTH: f32 = 320.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardIntent {
    Edit(ResolutionId),
    Delete(ResolutionId),
    /// Emitted for every slider movement, not only on release.
    ProgressChanged(ResolutionId, u8),
}

/// One intent per frame in which the slider moved to a new value; a drag
/// therefore produces a stream of them.
fn slider_intent(resolution: &Resolution, changed: bool, value: u8) -> Option<CardIntent> {
    (changed && value != resolution.progress)
        .then(|| CardIntent::ProgressChanged(resolution.id.clone(), value))
}

pub fn show(ui: &mut egui::Ui, resolution: &Resolution) -> Option<CardIntent> {
    let style = category_style(resolution.category);
    let mut intent = None;

    egui::Frame::new()
        .fill(style.card_fill())
        .stroke(egui::Stroke::new(1.0, style.card_stroke()))
        .corner_radius(14.0)
        .inner_margin(egui::Margin::symmetric(16, 14))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(style.icon).size(28.0));
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(&resolution.title)
                            .strong()
                            .size(18.0)
                            .color(egui::Color32::WHITE),
                    );
                    ui.label(
                        egui::RichText::new(resolution.category.label().to_uppercase())
                            .small()
                            .color(theme::MUTED_TEXT),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui
                        .small_button(egui::RichText::new("🗑").color(theme::DANGER))
                        .on_hover_text("Delete resolution")
                        .clicked()
                    {
                        intent = Some(CardIntent::Delete(resolution.id.clone()));
                    }
                    if ui
                        .small_button("✏")
                        .on_hover_text("Edit resolution")
                        .clicked()
                    {
                        intent = Some(CardIntent::Edit(resolution.id.clone()));
                    }
                });
            });

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("📈 Progress").color(theme::MUTED_TEXT));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{}%", resolution.progress))
                            .strong()
                            .size(16.0),
                    );
                });
            });

            let mut progress = resolution.progress;
            ui.spacing_mut().slider_width = CARD_WIDTH - 8.0;
            let response = ui.add(egui::Slider::new(&mut progress, 0..=MAX_PROGRESS).show_value(false));
            if let Some(changed) = slider_intent(resolution, response.changed(), progress) {
                intent = Some(changed);
            }

            ui.add_space(10.0);
            egui::Frame::new()
                .fill(egui::Color32::from_black_alpha(60))
                .corner_radius(10.0)
                .inner_margin(egui::Margin::symmetric(12, 10))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new("Why this matters:")
                            .strong()
                            .color(theme::MUTED_TEXT),
                    );
                    ui.label(&resolution.why);
                });
        });

    intent
}
