//! Keypad widgets

use crate::theme::{CalcTheme, Palette};
use egui::{Response, Ui, Widget};

/// Visual role of a keypad key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Digits, point and arithmetic operators
    Plain,
    /// Grouping, power and square root
    Function,
    /// Clear and delete
    Destructive,
    /// Equals
    Suggested,
}

impl KeyStyle {
    /// Fill colour for this key in the given palette
    pub fn fill(self, palette: &Palette) -> egui::Color32 {
        match self {
            KeyStyle::Plain => palette.surface,
            KeyStyle::Function => palette.function,
            KeyStyle::Destructive => palette.destructive,
            KeyStyle::Suggested => palette.suggested,
        }
    }
}

/// A keypad key: flat fill, 1px outline, colours inverted while pressed.
pub struct KeypadButton<'a> {
    label: &'a str,
    style: KeyStyle,
    size: egui::Vec2,
    palette: &'a Palette,
    font_size: f32,
}

impl<'a> KeypadButton<'a> {
    pub fn new(label: &'a str, theme: &'a CalcTheme) -> Self {
        Self {
            label,
            style: KeyStyle::Plain,
            size: egui::vec2(60.0, 32.0),
            palette: theme.palette(),
            font_size: theme.font_size_button,
        }
    }

    pub fn style(mut self, style: KeyStyle) -> Self {
        self.style = style;
        self
    }

    pub fn size(mut self, size: egui::Vec2) -> Self {
        self.size = size;
        self
    }
}

impl<'a> Widget for KeypadButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let fill = self.style.fill(self.palette);

            let pressed = response.is_pointer_button_down_on();
            let (bg, fg) = if pressed {
                (self.palette.text, fill)
            } else {
                (fill, self.palette.text)
            };

            painter.rect_filled(rect, 0.0, bg);
            let outline = if response.hovered() { 2.0 } else { 1.0 };
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(outline, self.palette.outline));

            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.label,
                egui::FontId::proportional(self.font_size),
                fg,
            );
        }

        response
    }
}

/// Right-aligned calculator display. Empty text shows a `0` placeholder and
/// error text is drawn smaller in the error colour.
pub fn display_panel(ui: &mut Ui, theme: &CalcTheme, text: &str, error: bool) {
    let palette = theme.palette();
    let display_height = 44.0;

    let (shown, color, size) = if text.is_empty() {
        ("0", palette.placeholder, theme.font_size_display)
    } else if error {
        (text, palette.error, theme.font_size_body)
    } else {
        (text, palette.text, theme.font_size_display)
    };

    theme.display_frame().show(ui, |ui| {
        ui.set_min_height(display_height);
        ui.set_max_height(display_height);
        ui.set_min_width(ui.available_width());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(shown)
                    .font(egui::FontId::proportional(size))
                    .color(color),
            );
        });
    });
}
