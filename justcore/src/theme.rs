//! Calculator theme
//!
//! Flat fills, square corners and 1px outlines. Dark is the default; light is
//! available through settings.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Colours for one variant of the theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub surface: Color32,
    pub text: Color32,
    pub placeholder: Color32,
    pub outline: Color32,
    pub function: Color32,
    pub destructive: Color32,
    pub suggested: Color32,
    pub error: Color32,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color32::from_rgb(30, 30, 30),
        surface: Color32::from_rgb(45, 45, 45),
        text: Color32::from_rgb(240, 240, 240),
        placeholder: Color32::from_rgb(130, 130, 130),
        outline: Color32::from_rgb(80, 80, 80),
        function: Color32::from_rgb(60, 60, 70),
        destructive: Color32::from_rgb(150, 40, 40),
        suggested: Color32::from_rgb(40, 100, 170),
        error: Color32::from_rgb(240, 90, 90),
    };

    pub const LIGHT: Palette = Palette {
        background: Color32::from_rgb(250, 250, 250),
        surface: Color32::from_rgb(255, 255, 255),
        text: Color32::from_rgb(20, 20, 20),
        placeholder: Color32::from_rgb(150, 150, 150),
        outline: Color32::from_rgb(0, 0, 0),
        function: Color32::from_rgb(225, 225, 235),
        destructive: Color32::from_rgb(220, 70, 70),
        suggested: Color32::from_rgb(50, 120, 200),
        error: Color32::from_rgb(190, 20, 20),
    };
}

/// Theme configuration for the calculator window
#[derive(Debug, Clone)]
pub struct CalcTheme {
    pub dark: bool,
    pub font_size_body: f32,
    pub font_size_display: f32,
    pub font_size_button: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for CalcTheme {
    fn default() -> Self {
        Self {
            dark: true,
            font_size_body: 14.0,
            font_size_display: 28.0,
            font_size_button: 16.0,
            window_padding: 10.0,
            item_spacing: 5.0,
        }
    }
}

impl CalcTheme {
    pub fn new(dark: bool) -> Self {
        Self { dark, ..Self::default() }
    }

    pub fn palette(&self) -> &'static Palette {
        if self.dark {
            &Palette::DARK
        } else {
            &Palette::LIGHT
        }
    }

    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let palette = self.palette();
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_body - 3.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_button, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_display, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = if self.dark { Visuals::dark() } else { Visuals::light() };

        visuals.window_fill = palette.background;
        visuals.panel_fill = palette.background;
        visuals.faint_bg_color = palette.surface;
        visuals.extreme_bg_color = palette.surface;

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, palette.outline);

        let flat = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = palette.surface;
            ws.weak_bg_fill = palette.surface;
            ws.bg_stroke = Stroke::new(1.0, palette.outline);
            ws.fg_stroke = Stroke::new(1.0, palette.text);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.noninteractive);
        flat(&mut visuals.widgets.inactive);
        flat(&mut visuals.widgets.hovered);
        flat(&mut visuals.widgets.active);
        flat(&mut visuals.widgets.open);

        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Central panel frame: background fill with the window padding
    pub fn panel_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.palette().background)
            .inner_margin(egui::Margin::same(self.window_padding))
    }

    /// Display frame: surface fill, 1px outline
    pub fn display_frame(&self) -> egui::Frame {
        let palette = self.palette();
        egui::Frame::none()
            .fill(palette.surface)
            .stroke(Stroke::new(1.0, palette.outline))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }
}

/// Drop keyboard focus from whatever widget holds it.
///
/// Keypad buttons become focused when clicked and egui then treats Enter or
/// Space as another click on them. Calculator keys are handled globally, so
/// nothing should keep focus between frames.
pub fn release_focus(ctx: &egui::Context) {
    if let Some(id) = ctx.memory(|mem| mem.focused()) {
        ctx.memory_mut(|mem| mem.surrender_focus(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        let theme = CalcTheme::default();
        assert!(theme.dark);
        assert_eq!(theme.palette(), &Palette::DARK);
    }

    #[test]
    fn test_light_palette() {
        let theme = CalcTheme::new(false);
        assert_eq!(theme.palette(), &Palette::LIGHT);
        assert_eq!(theme.font_size_display, CalcTheme::default().font_size_display);
    }

    #[test]
    fn test_error_colour_stands_out() {
        for palette in [Palette::DARK, Palette::LIGHT] {
            assert_ne!(palette.error, palette.text);
            assert_ne!(palette.error, palette.surface);
        }
    }

    #[test]
    fn test_apply_sets_visuals() {
        let ctx = egui::Context::default();
        CalcTheme::new(false).apply(&ctx);
        assert!(!ctx.style().visuals.dark_mode);

        CalcTheme::new(true).apply(&ctx);
        assert!(ctx.style().visuals.dark_mode);
        assert_eq!(ctx.style().visuals.panel_fill, Palette::DARK.background);
    }
}
