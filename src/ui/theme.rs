//! Theme and styling for the UI

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

use crate::core::settings;
use crate::core::RunState;

/// Application color palette
pub struct Theme;

impl Theme {
    // Accent - console cyan
    pub const PRIMARY: Color32 = Color32::from_rgb(0, 255, 204);
    pub const PRIMARY_DARK: Color32 = Color32::from_rgb(0, 170, 136);

    // Status colors
    pub const SUCCESS: Color32 = Color32::from_rgb(16, 185, 129); // Emerald-500
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11); // Amber-500
    pub const ERROR: Color32 = Color32::from_rgb(244, 63, 94); // Rose-500

    // Neutral colors (dark theme) - deep navy
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(10, 10, 35);
    pub const BG_SECONDARY: Color32 = Color32::from_rgb(18, 18, 48);
    pub const BG_TERTIARY: Color32 = Color32::from_rgb(32, 32, 66);
    pub const BG_CONSOLE: Color32 = Color32::from_rgb(28, 37, 38);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0, 255, 204);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(113, 113, 132);

    pub const BORDER: Color32 = Color32::from_rgb(50, 50, 90);

    /// Apply the configured theme
    pub fn apply(ctx: &egui::Context, theme: settings::Theme) {
        match theme {
            settings::Theme::Dark => Self::apply_dark(ctx),
            settings::Theme::Light => Self::apply_light(ctx),
        }
    }

    /// Apply dark theme to egui
    pub fn apply_dark(ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.panel_fill = Self::BG_PRIMARY;
        visuals.window_fill = Self::BG_SECONDARY;
        visuals.extreme_bg_color = Self::BG_CONSOLE;
        visuals.faint_bg_color = Self::BG_TERTIARY;

        visuals.widgets.noninteractive.bg_fill = Self::BG_SECONDARY;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Self::BORDER);

        // Buttons at rest
        visuals.widgets.inactive.bg_fill = Self::BG_TERTIARY;
        visuals.widgets.inactive.weak_bg_fill = Self::BG_TERTIARY;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.inactive.rounding = Rounding::same(6.0);

        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.6));
        visuals.widgets.hovered.rounding = Rounding::same(6.0);

        visuals.widgets.active.bg_fill = Self::PRIMARY_DARK;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.rounding = Rounding::same(6.0);

        visuals.selection.bg_fill = Self::PRIMARY.linear_multiply(0.25);
        visuals.selection.stroke = Stroke::new(1.0, Self::PRIMARY);

        Self::apply_visuals(ctx, visuals);
    }

    /// Apply light theme to egui
    pub fn apply_light(ctx: &egui::Context) {
        let mut visuals = Visuals::light();

        let text_primary = Color32::from_rgb(17, 24, 39); // Gray-900
        visuals.panel_fill = Color32::from_rgb(249, 250, 251); // Gray-50
        visuals.window_fill = Color32::WHITE;
        visuals.extreme_bg_color = Color32::WHITE;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.inactive.rounding = Rounding::same(6.0);
        visuals.widgets.hovered.rounding = Rounding::same(6.0);
        visuals.widgets.active.bg_fill = Self::PRIMARY_DARK;
        visuals.widgets.active.rounding = Rounding::same(6.0);
        visuals.selection.stroke = Stroke::new(1.0, Self::PRIMARY_DARK);

        Self::apply_visuals(ctx, visuals);
    }

    fn apply_visuals(ctx: &egui::Context, visuals: Visuals) {
        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;

        style.text_styles = [
            (
                TextStyle::Small,
                FontId::new(11.0, FontFamily::Proportional),
            ),
            (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
            (
                TextStyle::Button,
                FontId::new(14.0, FontFamily::Proportional),
            ),
            (
                TextStyle::Heading,
                FontId::new(22.0, FontFamily::Proportional),
            ),
            (
                TextStyle::Monospace,
                FontId::new(13.0, FontFamily::Monospace),
            ),
        ]
        .into();

        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(14.0, 10.0);

        ctx.set_style(style);
    }

    /// Card background and border for the active visuals
    pub fn card_frame(visuals: &Visuals) -> egui::Frame {
        egui::Frame::none()
            .fill(visuals.window_fill)
            .rounding(Rounding::same(8.0))
            .stroke(visuals.widgets.noninteractive.bg_stroke)
    }

    pub fn console_frame(visuals: &Visuals) -> egui::Frame {
        egui::Frame::none()
            .fill(visuals.extreme_bg_color)
            .rounding(Rounding::same(6.0))
    }

    /// Header accent color
    pub fn accent(visuals: &Visuals) -> Color32 {
        visuals.selection.stroke.color
    }

    /// Get color for the core run state
    pub fn status_color(state: RunState) -> Color32 {
        match state {
            RunState::Running => Self::SUCCESS,
            RunState::Stopped => Self::TEXT_MUTED,
        }
    }
}

/// Icon characters (using Unicode symbols)
pub struct Icons;

impl Icons {
    pub const PLAY: &'static str = "▶";
    pub const STOP: &'static str = "⏹";
    pub const DIAGNOSTICS: &'static str = "⚙";
    pub const CORE: &'static str = "◈";
}
