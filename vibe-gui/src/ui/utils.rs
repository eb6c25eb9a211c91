use std::f64::consts::PI;

use druid::{
    kurbo::Circle,
    widget::{prelude::*, Button, CrossAxisAlignment, Flex, Label, LineBreaking},
    Data, Vec2, Widget, WidgetExt,
};
use vibe_core::{error::Error, route::Param};

use super::theme;

struct Spinner {
    t: f64,
}

impl Spinner {
    pub fn new() -> Self {
        Self { t: 0.0 }
    }
}

impl<T: Data> Widget<T> for Spinner {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, _data: &mut T, _env: &Env) {
        if let Event::AnimFrame(interval) = event {
            self.t += (*interval as f64) * 1e-9;
            if self.t >= 1.0 {
                self.t = 0.0;
            }
            ctx.request_anim_frame();
            ctx.request_paint();
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, _data: &T, _env: &Env) {
        if let LifeCycle::WidgetAdded = event {
            ctx.request_anim_frame();
            ctx.request_paint();
        }
    }

    fn update(&mut self, _ctx: &mut UpdateCtx, _old_data: &T, _data: &T, _env: &Env) {}

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &T, _env: &Env) -> Size {
        bc.constrain(Size::new(theme::grid(6.0), theme::grid(16.0)))
    }

    fn paint(&mut self, ctx: &mut PaintCtx, _data: &T, env: &Env) {
        let center = ctx.size().to_rect().center();
        let idle = theme::GREY_500;
        let lit = env.get(theme::HIGHLIGHT_COLOR);
        let active = 7 - (1 + (6.0 * self.t).floor() as i32);
        for i in 1..=6 {
            let step = f64::from(i);
            let angle = Vec2::from_angle((step / 6.0) * -2.0 * PI);
            let dot = Circle::new(center + angle * theme::grid(2.0), theme::grid(0.8));
            ctx.fill(dot, if i == active { &lit } else { &idle });
        }
    }
}

pub fn spinner_widget<T: Data>() -> impl Widget<T> {
    Spinner::new().center()
}

/// Centered, muted one-liner for empty and not-found states.
pub fn message_widget<T: Data>(text: impl Into<String>) -> impl Widget<T> {
    Label::new(text.into())
        .with_text_color(theme::PLACEHOLDER_COLOR)
        .padding((0.0, theme::grid(6.0)))
        .center()
}

fn error_block<T: Data>(title: &str, detail: String) -> Flex<T> {
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(
            Label::new(title)
                .with_font(theme::UI_FONT_MEDIUM)
                .with_text_color(theme::ERROR_COLOR),
        )
        .with_child(
            Label::new(detail)
                .with_line_break_mode(LineBreaking::WordWrap)
                .with_text_size(theme::TEXT_SIZE_SMALL)
                .with_text_color(theme::PLACEHOLDER_COLOR),
        )
}

/// Failed request, with a button that re-issues it.
pub fn error_widget<T: Data>(
    err: &Error,
    on_retry: impl Fn(&mut EventCtx, &mut T, &Env) + 'static,
) -> impl Widget<T> {
    error_block("Error:", err.to_string())
        .with_default_spacer()
        .with_child(Button::new("Try Again").on_click(on_retry))
        .padding((0.0, theme::grid(6.0)))
        .center()
}

/// The location lacks an id, so there is nothing to retry.
pub fn missing_param_widget<T: Data>(param: Param) -> impl Widget<T> {
    error_block(
        "Error:",
        format!("{param} is missing. Go back and pick one from the list."),
    )
    .padding((0.0, theme::grid(6.0)))
    .center()
}

/// GraphQL errors that came back next to usable data.
pub fn warnings_widget<T: Data>(warnings: &[String]) -> Box<dyn Widget<T>> {
    if warnings.is_empty() {
        return druid::widget::SizedBox::empty().boxed();
    }
    Label::new(format!("Some data could not be loaded: {}", warnings.join("; ")))
        .with_line_break_mode(LineBreaking::WordWrap)
        .with_text_size(theme::TEXT_SIZE_SMALL)
        .with_text_color(theme::WARNING_COLOR)
        .padding((0.0, theme::grid(1.0)))
        .boxed()
}
