use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use shared::domain::BoardStats;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::board::BoardController;
use crate::controller::events::UiEvent;
use crate::ui::card::{self, CardIntent};
use crate::ui::form::{self, FormIntent, ResolutionForm};
use crate::ui::theme;

pub const APP_TITLE: &str = "Resolution Radar 2026";

pub struct RadarApp {
    controller: BoardController,
    ui_rx: Receiver<UiEvent>,
    form: Option<ResolutionForm>,
    visuals_applied: bool,
}

impl RadarApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut controller = BoardController::new(cmd_tx);
        controller.initialize();
        Self {
            controller,
            ui_rx,
            form: None,
            visuals_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.apply_event(event);
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(APP_TITLE)
                        .size(30.0)
                        .strong()
                        .color(theme::PRIMARY_ACCENT),
                );
                ui.label(egui::RichText::new("Track your journey to greatness").color(theme::MUTED_TEXT));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(primary_button("➕ New Resolution")).clicked() {
                    self.form = Some(ResolutionForm::blank());
                }
            });
        });
    }

    fn show_empty_state(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(egui::RichText::new("🎯").size(48.0));
            ui.label(egui::RichText::new("No resolutions yet").size(20.0).strong());
            ui.label(
                egui::RichText::new("Start your journey by creating your first resolution")
                    .color(theme::MUTED_TEXT),
            );
            ui.add_space(12.0);
            if ui.add(primary_button("Create First Resolution")).clicked() {
                self.form = Some(ResolutionForm::blank());
            }
        });
    }

    fn show_board(&mut self, ui: &mut egui::Ui) {
        let mut intents = Vec::new();
        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
                for resolution in self.controller.resolutions() {
                    if let Some(intent) = card::show(ui, resolution) {
                        intents.push(intent);
                    }
                }
            });
        });

        for intent in intents {
            self.handle_card_intent(intent);
        }
    }

    fn handle_card_intent(&mut self, intent: CardIntent) {
        match intent {
            CardIntent::Edit(id) => {
                if let Some(resolution) = self.controller.find(&id) {
                    self.form = Some(ResolutionForm::editing(resolution));
                }
            }
            CardIntent::Delete(id) => self.controller.delete_one(id),
            CardIntent::ProgressChanged(id, progress) => {
                self.controller.set_progress(&id, i64::from(progress));
            }
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        let Some(form_state) = self.form.as_mut() else {
            return;
        };

        if let Some(intent) = form::show(ctx, form_state) {
            self.handle_form_intent(intent);
        }
    }

    fn handle_form_intent(&mut self, intent: FormIntent) {
        match intent {
            FormIntent::Submit { draft, editing } => {
                // Queued and closed together; the form does not wait on the store.
                self.controller.create_or_update(draft, editing);
                self.form = None;
            }
            FormIntent::Cancel => self.form = None,
        }
    }

    /// The form behaves as a modal: nothing behind it reacts while it is open.
    fn board_interactive(&self) -> bool {
        self.form.is_none()
    }
}

fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).strong().color(egui::Color32::WHITE))
        .fill(theme::PRIMARY_ACCENT)
        .corner_radius(10.0)
        .min_size(egui::vec2(0.0, 36.0))
}

fn stat_tile(ui: &mut egui::Ui, label: &str, value: String) {
    egui::Frame::new()
        .fill(theme::PANEL_FILL)
        .stroke(egui::Stroke::new(1.0, theme::PRIMARY_ACCENT.gamma_multiply(0.3)))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(18, 14))
        .show(ui, |ui| {
            ui.set_min_width(220.0);
            ui.label(egui::RichText::new(label).color(theme::MUTED_TEXT));
            ui.label(egui::RichText::new(value).size(28.0).strong());
        });
}

fn show_stats(ui: &mut egui::Ui, stats: BoardStats) {
    ui.horizontal(|ui| {
        stat_tile(ui, "Total Resolutions", stats.total.to_string());
        stat_tile(ui, "Avg Progress", format!("{}%", stats.average_progress));
    });
}

impl eframe::App for RadarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.visuals_applied {
            theme::apply_visuals(ctx);
            self.visuals_applied = true;
        }
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.is_loading() {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("Loading...").size(20.0).color(theme::MUTED_TEXT));
                });
                return;
            }

            if !self.board_interactive() {
                ui.disable();
            }
            self.show_header(ui);
            ui.add_space(16.0);
            show_stats(ui, self.controller.stats());
            ui.add_space(20.0);

            if self.controller.resolutions().is_empty() {
                self.show_empty_state(ui);
            } else {
                self.show_board(ui);
            }
        });

        self.show_form(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::{bounded, unbounded, Receiver};
    use shared::domain::{Category, ResolutionDraft, ResolutionId};

    use super::*;

    fn app() -> (RadarApp, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = unbounded();
        let (_ui_tx, ui_rx) = bounded(8);
        let app = RadarApp::new(cmd_tx, ui_rx);
        assert_eq!(cmd_rx.try_iter().collect::<Vec<_>>(), vec![BackendCommand::Refresh]);
        (app, cmd_rx)
    }

    #[test]
    fn submit_queues_one_save_and_closes_form_without_waiting() {
        let (mut app, cmd_rx) = app();
        let mut form = ResolutionForm::blank();
        form.title = "Run a marathon".to_string();
        form.why = "stay fit".to_string();
        let intent = form.submit().expect("complete form");
        app.form = Some(form);

        app.handle_form_intent(intent);

        assert!(app.form.is_none());
        assert_eq!(
            cmd_rx.try_iter().collect::<Vec<_>>(),
            vec![BackendCommand::Save {
                draft: ResolutionDraft::new("Run a marathon", Category::Health, 0, "stay fit"),
                editing_id: None,
            }]
        );
        assert!(app.controller.resolutions().is_empty());
    }

    #[test]
    fn submit_of_edit_carries_the_editing_id() {
        let (mut app, cmd_rx) = app();
        let draft = ResolutionDraft::new("Learn piano", Category::Growth, 60, "joy");
        app.form = Some(ResolutionForm::blank());

        app.handle_form_intent(FormIntent::Submit {
            draft: draft.clone(),
            editing: Some(ResolutionId::from("r-7")),
        });

        assert!(app.form.is_none());
        assert_eq!(
            cmd_rx.try_iter().collect::<Vec<_>>(),
            vec![BackendCommand::Save {
                draft,
                editing_id: Some(ResolutionId::from("r-7")),
            }]
        );
    }

    #[test]
    fn cancel_closes_form_without_queueing() {
        let (mut app, cmd_rx) = app();
        app.form = Some(ResolutionForm::blank());
        assert!(!app.board_interactive());

        app.handle_form_intent(FormIntent::Cancel);

        assert!(app.form.is_none());
        assert!(app.board_interactive());
        assert_eq!(cmd_rx.try_iter().count(), 0);
    }
}
