//! JustCalc application

use egui::{Context, Event, Key};
use justcalc::settings::AppContext;
use justcalc::{Accumulator, Token};
use justcore::theme::release_focus;
use justcore::widgets::{display_panel, KeyStyle, KeypadButton};

/// Keypad rows, each entry a token and how many columns it spans.
const KEYPAD: &[&[(Token, usize)]] = &[
    &[(Token::OpenParen, 1), (Token::CloseParen, 1), (Token::Power, 1), (Token::SquareRoot, 1)],
    &[(Token::Clear, 1), (Token::Delete, 1), (Token::Percent, 1), (Token::Divide, 1)],
    &[(Token::Digit(7), 1), (Token::Digit(8), 1), (Token::Digit(9), 1), (Token::Multiply, 1)],
    &[(Token::Digit(4), 1), (Token::Digit(5), 1), (Token::Digit(6), 1), (Token::Subtract, 1)],
    &[(Token::Digit(1), 1), (Token::Digit(2), 1), (Token::Digit(3), 1), (Token::Add, 1)],
    &[(Token::Digit(0), 2), (Token::Point, 1), (Token::Equals, 1)],
];

const KEYPAD_COLUMNS: f32 = 4.0;
const BUTTON_HEIGHT: f32 = 32.0;

pub struct JustCalcApp {
    calc: Accumulator,
    context: AppContext,
}

impl JustCalcApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, context: AppContext) -> Self {
        Self {
            calc: context.accumulator(),
            context,
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let tokens: Vec<Token> = ctx.input(|i| i.events.iter().flat_map(tokens_for_event).collect());
        for token in tokens {
            self.calc.process_input(token);
        }
    }

    fn render_keypad(&mut self, ui: &mut egui::Ui) {
        let spacing = ui.spacing().item_spacing.x;
        let btn_w = (ui.available_width() - spacing * (KEYPAD_COLUMNS - 1.0)) / KEYPAD_COLUMNS;
        let theme = &self.context.theme;
        let mut pressed = None;

        for row in KEYPAD {
            ui.horizontal(|ui| {
                for &(token, span) in row.iter() {
                    let span = span as f32;
                    let width = btn_w * span + spacing * (span - 1.0);
                    let button = KeypadButton::new(token.label(), theme)
                        .style(key_style(token))
                        .size(egui::vec2(width, BUTTON_HEIGHT));
                    if ui.add(button).clicked() {
                        pressed = Some(token);
                    }
                }
            });
        }

        if let Some(token) = pressed {
            self.calc.process_input(token);
        }
    }
}

impl eframe::App for JustCalcApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        release_focus(ctx);

        let frame = self.context.theme.panel_frame();
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let display = self.calc.display();
            display_panel(ui, &self.context.theme, display.text, display.error);
            ui.add_space(6.0);
            self.render_keypad(ui);
        });
    }
}

fn key_style(token: Token) -> KeyStyle {
    match token {
        Token::OpenParen | Token::CloseParen | Token::Power | Token::SquareRoot => KeyStyle::Function,
        Token::Clear | Token::Delete => KeyStyle::Destructive,
        Token::Equals => KeyStyle::Suggested,
        _ => KeyStyle::Plain,
    }
}

/// Typed characters go through [`Token::from_char`]; Enter, Backspace and
/// Escape are the only named keys.
fn tokens_for_event(event: &Event) -> Vec<Token> {
    match event {
        Event::Text(text) => text.chars().filter_map(Token::from_char).collect(),
        Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } if !modifiers.command => match key {
            Key::Enter => vec![Token::Equals],
            Key::Backspace => vec![Token::Delete],
            Key::Escape => vec![Token::Clear],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
