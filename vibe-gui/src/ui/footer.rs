use druid::{
    widget::{CrossAxisAlignment, Flex, Label},
    Widget, WidgetExt,
};

use crate::{cmd, data::AppState, ui::theme, widget::MyWidgetExt};

const EMAIL: &str = "Enquiry@VibeStrings.com";

const SOCIAL_LINKS: &[(&str, &str)] = &[
    ("Facebook", "https://www.facebook.com"),
    ("Twitter", "https://twitter.com"),
    ("Instagram", "https://www.instagram.com"),
];

pub fn footer_widget() -> impl Widget<AppState> {
    let company = Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(Label::new("VibeStrings").with_font(theme::UI_FONT_MEDIUM))
        .with_child(small_link(EMAIL, format!("mailto:{EMAIL}")))
        .with_child(small(Label::new("San Francisco, CA")));

    let mut social = Flex::row();
    for &(name, url) in SOCIAL_LINKS {
        social.add_child(small_link(name, url.to_string()));
    }

    Flex::row()
        .with_child(company)
        .with_flex_spacer(1.0)
        .with_child(social)
        .padding(theme::grid(2.0))
        .background(theme::BACKGROUND_DARK)
        .expand_width()
}

fn small(label: Label<AppState>) -> Label<AppState> {
    label
        .with_text_size(theme::TEXT_SIZE_SMALL)
        .with_text_color(theme::PLACEHOLDER_COLOR)
}

fn small_link(text: &str, url: String) -> impl Widget<AppState> {
    small(Label::new(text))
        .padding((theme::grid(0.5), theme::grid(0.25)))
        .link()
        .on_click(move |ctx, _, _| {
            ctx.submit_command(cmd::OPEN_LINK.with(url.clone()));
        })
}
