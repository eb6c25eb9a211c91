pub use druid::theme::*;
use druid::{Color, Env, FontDescriptor, FontFamily, FontWeight, Insets, Key};

use crate::data::AppState;

pub fn grid(m: f64) -> f64 {
    GRID * m
}

pub const GRID: f64 = 8.0;

pub const WHITE: Color = Color::WHITE;
pub const BLACK: Color = Color::BLACK;
pub const GREY_100: Color = Color::grey8(0x33);
pub const GREY_200: Color = Color::grey8(0x4f);
pub const GREY_300: Color = Color::grey8(0x82);
pub const GREY_400: Color = Color::grey8(0xbd);
pub const GREY_500: Color = Color::grey8(0xe0);
pub const GREY_600: Color = Color::grey8(0xf2);
pub const ORANGE: Color = Color::rgb8(0xff, 0x6b, 0x00);
pub const ORANGE_LIGHT: Color = Color::rgb8(0xff, 0xef, 0xe3);
pub const RED: Color = Color::rgb8(0xd9, 0x30, 0x25);
pub const AMBER: Color = Color::rgb8(0xb2, 0x6a, 0x00);

pub const HIGHLIGHT_COLOR: Key<Color> = Key::new("app.highlight-color");
pub const ERROR_COLOR: Key<Color> = Key::new("app.error-color");
pub const WARNING_COLOR: Key<Color> = Key::new("app.warning-color");

pub const LINK_HOT_COLOR: Key<Color> = Key::new("app.link-hot-color");
pub const LINK_ACTIVE_COLOR: Key<Color> = Key::new("app.link-active-color");
pub const LINK_COLD_COLOR: Key<Color> = Key::new("app.link-cold-color");

pub const UI_FONT_MEDIUM: Key<FontDescriptor> = Key::new("app.ui-font-medium");
pub const TEXT_SIZE_SMALL: Key<f64> = Key::new("app.text-size-small");
pub const TEXT_SIZE_HUGE: Key<f64> = Key::new("app.text-size-huge");

pub const CARD_WIDTH: f64 = 260.0;

pub fn setup(env: &mut Env, _state: &AppState) {
    env.set(WINDOW_BACKGROUND_COLOR, WHITE);
    env.set(TEXT_COLOR, GREY_100);
    env.set(PLACEHOLDER_COLOR, GREY_300);
    env.set(PRIMARY_LIGHT, ORANGE);
    env.set(PRIMARY_DARK, ORANGE);

    env.set(HIGHLIGHT_COLOR, ORANGE);
    env.set(ERROR_COLOR, RED);
    env.set(WARNING_COLOR, AMBER);

    env.set(BACKGROUND_LIGHT, WHITE);
    env.set(BACKGROUND_DARK, GREY_600);
    env.set(FOREGROUND_LIGHT, GREY_100);
    env.set(FOREGROUND_DARK, BLACK);

    env.set(BUTTON_DARK, GREY_500);
    env.set(BUTTON_LIGHT, GREY_600);
    env.set(BUTTON_BORDER_RADIUS, 4.0);
    env.set(BUTTON_BORDER_WIDTH, 1.0);

    env.set(BORDER_DARK, GREY_400);
    env.set(BORDER_LIGHT, GREY_500);

    env.set(SELECTION_TEXT_COLOR, BLACK);
    env.set(CURSOR_COLOR, BLACK);

    env.set(LINK_HOT_COLOR, GREY_500);
    env.set(LINK_ACTIVE_COLOR, ORANGE_LIGHT);
    env.set(LINK_COLD_COLOR, Color::TRANSPARENT);

    env.set(
        UI_FONT,
        FontDescriptor::new(FontFamily::SYSTEM_UI).with_size(14.0),
    );
    env.set(
        UI_FONT_MEDIUM,
        FontDescriptor::new(FontFamily::SYSTEM_UI)
            .with_size(14.0)
            .with_weight(FontWeight::MEDIUM),
    );
    env.set(TEXT_SIZE_SMALL, 12.0);
    env.set(TEXT_SIZE_NORMAL, 14.0);
    env.set(TEXT_SIZE_LARGE, 18.0);
    env.set(TEXT_SIZE_HUGE, 28.0);

    env.set(BASIC_WIDGET_HEIGHT, 16.0);
    env.set(WIDE_WIDGET_WIDTH, grid(12.0));
    env.set(BORDERED_WIDGET_HEIGHT, grid(4.0));

    env.set(TEXTBOX_BORDER_RADIUS, 4.0);
    env.set(TEXTBOX_BORDER_WIDTH, 1.0);
    env.set(TEXTBOX_INSETS, Insets::uniform_xy(grid(1.2), grid(0.5)));

    env.set(SCROLLBAR_COLOR, GREY_400);
    env.set(SCROLLBAR_BORDER_COLOR, GREY_400);
    env.set(SCROLLBAR_MAX_OPACITY, 0.8);
    env.set(SCROLLBAR_FADE_DELAY, 1500u64);
    env.set(SCROLLBAR_WIDTH, 6.0);
    env.set(SCROLLBAR_PAD, 2.0);
    env.set(SCROLLBAR_RADIUS, 5.0);
    env.set(SCROLLBAR_EDGE_WIDTH, 1.0);

    env.set(WIDGET_PADDING_VERTICAL, grid(0.5));
    env.set(WIDGET_PADDING_HORIZONTAL, grid(1.0));
    env.set(WIDGET_CONTROL_COMPONENT_PADDING, grid(1.0));
}
