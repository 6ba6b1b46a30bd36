//! Create/edit dialog. Holds its own field state until submitted.

use shared::domain::{Category, Resolution, ResolutionDraft, ResolutionId, MAX_PROGRESS};

use crate::ui::theme::{self, category_style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    Submit {
        draft: ResolutionDraft,
        editing: Option<ResolutionId>,
    },
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionForm {
    pub title: String,
    pub category: Category,
    pub progress: u8,
    pub why: String,
    pub editing: Option<ResolutionId>,
    missing_title: bool,
    missing_why: bool,
}

impl ResolutionForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn editing(resolution: &Resolution) -> Self {
        Self {
            title: resolution.title.clone(),
            category: resolution.category,
            progress: resolution.progress,
            why: resolution.why.clone(),
            editing: Some(resolution.id.clone()),
            ..Self::default()
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Resolution"
        } else {
            "New Resolution"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update"
        } else {
            "Create"
        }
    }

    /// Presence check only. On failure the offending fields are flagged and
    /// the form stays open.
    pub fn submit(&mut self) -> Option<FormIntent> {
        self.missing_title = self.title.trim().is_empty();
        self.missing_why = self.why.trim().is_empty();
        if self.missing_title || self.missing_why {
            return None;
        }

        let draft = ResolutionDraft::new(
            self.title.clone(),
            self.category,
            self.progress,
            self.why.clone(),
        );
        Some(FormIntent::Submit {
            draft,
            editing: self.editing.clone(),
        })
    }

    pub fn missing_title(&self) -> bool {
        self.missing_title
    }

    pub fn missing_why(&self) -> bool {
        self.missing_why
    }
}

fn required_hint(ui: &mut egui::Ui, missing: bool) {
    if missing {
        ui.label(
            egui::RichText::new("This field is required")
                .small()
                .color(theme::DANGER),
        );
    }
}

pub fn show(ctx: &egui::Context, form: &mut ResolutionForm) -> Option<FormIntent> {
    let mut open = true;
    let mut intent = None;

    egui::Window::new(form.heading())
        .id(egui::Id::new("resolution_form"))
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("Title").strong());
            ui.add_sized(
                [ui.available_width(), 30.0],
                egui::TextEdit::singleline(&mut form.title).hint_text("e.g., Run a marathon"),
            );
            required_hint(ui, form.missing_title);

            ui.add_space(8.0);
            ui.label(egui::RichText::new("Category").strong());
            egui::ComboBox::from_id_salt("resolution_category")
                .selected_text(category_option(form.category))
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for category in Category::ALL {
                        ui.selectable_value(&mut form.category, category, category_option(category));
                    }
                });

            ui.add_space(8.0);
            ui.label(egui::RichText::new(format!("Initial Progress: {}%", form.progress)).strong());
            ui.add(egui::Slider::new(&mut form.progress, 0..=MAX_PROGRESS).show_value(false));

            ui.add_space(8.0);
            ui.label(egui::RichText::new("Why this matters to you").strong());
            ui.add_sized(
                [ui.available_width(), 90.0],
                egui::TextEdit::multiline(&mut form.why)
                    .hint_text("Share your motivation and why this resolution is important...")
                    .desired_rows(4),
            );
            required_hint(ui, form.missing_why);

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    intent = Some(FormIntent::Cancel);
                }
                let submit = egui::Button::new(
                    egui::RichText::new(form.submit_label()).color(egui::Color32::WHITE),
                )
                .fill(theme::PRIMARY_ACCENT);
                if ui.add(submit).clicked() {
                    intent = form.submit();
                }
            });
        });

    if !open {
        return Some(FormIntent::Cancel);
    }
    intent
}

fn category_option(category: Category) -> String {
    format!("{} {}", category_style(category).icon, category.label())
}
