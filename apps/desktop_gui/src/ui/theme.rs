use egui::Color32;
use shared::domain::Category;

pub const PAGE_FILL: Color32 = Color32::from_rgb(15, 18, 28);
pub const PANEL_FILL: Color32 = Color32::from_rgb(26, 30, 44);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(160, 166, 182);
pub const PRIMARY_ACCENT: Color32 = Color32::from_rgb(34, 184, 207);
pub const DANGER: Color32 = Color32::from_rgb(240, 96, 96);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub icon: &'static str,
    pub accent: Color32,
}

impl CategoryStyle {
    pub fn card_fill(self) -> Color32 {
        blend(PANEL_FILL, self.accent, 0.14)
    }

    pub fn card_stroke(self) -> Color32 {
        blend(PANEL_FILL, self.accent, 0.45)
    }
}

pub fn category_style(category: Category) -> CategoryStyle {
    match category {
        Category::Health => CategoryStyle {
            icon: "🏃",
            accent: Color32::from_rgb(16, 185, 129),
        },
        Category::Wealth => CategoryStyle {
            icon: "💰",
            accent: Color32::from_rgb(245, 158, 11),
        },
        Category::Tech => CategoryStyle {
            icon: "💻",
            accent: Color32::from_rgb(59, 130, 246),
        },
        Category::Growth => CategoryStyle {
            icon: "🌱",
            accent: Color32::from_rgb(168, 85, 247),
        },
    }
}

fn blend(base: Color32, tint: Color32, amount: f32) -> Color32 {
    let t = amount.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| -> u8 { (a as f32 + (b as f32 - a as f32) * t).round() as u8 };
    Color32::from_rgb(
        mix(base.r(), tint.r()),
        mix(base.g(), tint.g()),
        mix(base.b(), tint.b()),
    )
}

pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = PAGE_FILL;
    visuals.window_fill = PANEL_FILL;
    visuals.selection.bg_fill = PRIMARY_ACCENT.gamma_multiply(0.6);
    ctx.set_visuals(visuals);
}
