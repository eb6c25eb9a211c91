use druid::{
    widget::{Button, CrossAxisAlignment, Either, Flex, Label, LineBreaking, Scroll, SizedBox, ViewSwitcher},
    Env, Widget, WidgetExt, WindowDesc,
};
use vibe_core::{
    model::{Brand, Model},
    view::Ticket,
};

use crate::{
    cmd,
    controller::NavController,
    data::{AppState, Nav},
    webapi::WebApi,
    widget::MyWidgetExt,
};

pub mod brand;
pub mod footer;
pub mod home;
pub mod model;
pub mod pagination;
pub mod theme;
pub mod utils;

pub fn main_window() -> WindowDesc<AppState> {
    WindowDesc::new(root_widget())
        .title(|data: &AppState, _env: &Env| match &data.nav {
            Nav::Home => "VibeStrings".to_string(),
            nav => format!("{} - VibeStrings", nav.title()),
        })
        .with_min_size((theme::grid(60.0), theme::grid(50.0)))
        .window_size((theme::grid(130.0), theme::grid(100.0)))
}

fn root_widget() -> impl Widget<AppState> {
    let main = Flex::column()
        .must_fill_main_axis(true)
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(topbar_widget())
        .with_flex_child(route_widget(), 1.0)
        .with_child(footer::footer_widget());

    Either::new(|data: &AppState, _| data.fault.is_some(), fault_widget(), main)
        .on_command_async(
            home::LOAD_BRANDS,
            |ticket: Ticket| ticket.run::<Vec<Brand>>(WebApi::global().api()),
            |_, _, _| {},
            |_, data, (ticket, result)| {
                data.brands.complete(&ticket, result);
            },
        )
        .on_command_async(
            brand::LOAD_MODELS,
            |ticket: Ticket| ticket.run::<Vec<Model>>(WebApi::global().api()),
            |_, _, _| {},
            |_, data, (ticket, result)| {
                data.models.complete(&ticket, result);
            },
        )
        .on_command_async(
            model::LOAD_MODEL,
            |ticket: Ticket| ticket.run::<Option<Model>>(WebApi::global().api()),
            |_, _, _| {},
            |_, data, (ticket, result)| {
                data.model_detail.complete(&ticket, result);
            },
        )
        .controller(NavController)
}

fn topbar_widget() -> impl Widget<AppState> {
    Flex::row()
        .with_child(back_button_widget())
        .with_default_spacer()
        .with_child(
            Label::dynamic(|data: &AppState, _| data.nav.title())
                .with_text_size(theme::TEXT_SIZE_LARGE)
                .with_font(theme::UI_FONT_MEDIUM),
        )
        .padding(theme::grid(1.0))
}

fn back_button_widget() -> impl Widget<AppState> {
    let back = Label::dynamic(|data: &AppState, _| {
        format!("← {}", data.nav.back_label().unwrap_or_default())
    })
    .padding((theme::grid(1.0), theme::grid(0.5)))
    .link()
    .on_click(|ctx, data: &mut AppState, _| {
        if let Some(parent) = data.nav.parent() {
            ctx.submit_command(cmd::NAVIGATE.with(parent));
        }
    });
    Either::new(
        |data: &AppState, _| data.nav.parent().is_none(),
        SizedBox::empty(),
        back,
    )
}

fn route_widget() -> impl Widget<AppState> {
    let switcher = ViewSwitcher::new(
        |data: &AppState, _| data.nav.clone(),
        |nav: &Nav, _, _| match nav {
            Nav::Home => home::home_widget().boxed(),
            Nav::BrandModels(_) => brand::models_widget().boxed(),
            Nav::ModelDetail(_) => model::detail_widget().boxed(),
        },
    )
    .padding(theme::grid(3.0));

    Scroll::new(switcher).vertical().expand()
}

fn fault_widget() -> impl Widget<AppState> {
    Flex::column()
        .with_child(
            Label::dynamic(|data: &AppState, _| {
                format!(
                    "Something went wrong: {}",
                    data.fault.as_deref().unwrap_or_default()
                )
            })
            .with_line_break_mode(LineBreaking::WordWrap)
            .with_text_color(theme::ERROR_COLOR),
        )
        .with_default_spacer()
        .with_child(Button::new("Try Again").on_click(|ctx, data: &mut AppState, _| {
            data.clear_fault();
            ctx.submit_command(cmd::NAVIGATE_REFRESH);
        }))
        .padding(theme::grid(4.0))
        .center()
}
