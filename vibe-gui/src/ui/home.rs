use druid::{
    widget::{CrossAxisAlignment, Flex, Label, LineBreaking, ViewSwitcher},
    Selector, Widget, WidgetExt,
};
use vibe_core::{
    model::Brand,
    view::{ListPage, Status, Ticket},
};

use crate::{
    cmd,
    data::{AppState, BrandLink, Nav},
    ui::{
        pagination::{pagination_widget, PageMove},
        theme, utils,
    },
    widget::MyWidgetExt,
};

pub const LOAD_BRANDS: Selector<Ticket> = Selector::new("app.home.load-brands");

const BRANDS_PER_ROW: usize = 4;

pub fn home_widget() -> impl Widget<AppState> {
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(hero_widget())
        .with_spacer(theme::grid(4.0))
        .with_child(
            Label::new("Featuring the Best Brands")
                .with_text_size(theme::TEXT_SIZE_LARGE)
                .with_font(theme::UI_FONT_MEDIUM),
        )
        .with_child(
            Label::new("Select your preferred brand and explore our exquisite collection.")
                .with_text_color(theme::PLACEHOLDER_COLOR),
        )
        .with_default_spacer()
        .with_child(brands_widget())
}

fn hero_widget() -> impl Widget<AppState> {
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(
            Label::new("Browse top quality Guitars online")
                .with_text_size(theme::TEXT_SIZE_HUGE)
                .with_font(theme::UI_FONT_MEDIUM),
        )
        .with_default_spacer()
        .with_child(
            Label::new("Explore the latest collections of branded guitars with VibeStrings.")
                .with_line_break_mode(LineBreaking::WordWrap)
                .with_text_color(theme::PLACEHOLDER_COLOR),
        )
}

fn brands_widget() -> impl Widget<AppState> {
    ViewSwitcher::new(
        |data: &AppState, _| {
            (
                data.brands.status().kind(),
                data.brands.awaiting().map(Ticket::id),
                data.brands.page(),
            )
        },
        |_, data: &AppState, _| match data.brands.status() {
            Status::Loading => utils::spinner_widget().boxed(),
            Status::Failed(err) => utils::error_widget(err, |ctx, data: &mut AppState, _| {
                if let Some(ticket) = data.brands.retry() {
                    ctx.submit_command(LOAD_BRANDS.with(ticket));
                }
            })
            .boxed(),
            Status::MissingParam(param) => utils::missing_param_widget(param).boxed(),
            Status::NotFound => utils::message_widget("No brands found.").boxed(),
            Status::Ready(page) => brand_grid_widget(&page),
        },
    )
}

fn brand_grid_widget(page: &ListPage<'_, Brand>) -> Box<dyn Widget<AppState>> {
    if page.items.is_empty() {
        return utils::message_widget("No brands found.").boxed();
    }
    let mut grid = Flex::column().cross_axis_alignment(CrossAxisAlignment::Start);
    for row in page.items.chunks(BRANDS_PER_ROW) {
        let mut flex = Flex::row();
        for brand in row {
            flex.add_child(brand_widget(brand));
            flex.add_default_spacer();
        }
        grid.add_child(flex);
        grid.add_default_spacer();
    }
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(utils::warnings_widget(page.warnings))
        .with_child(grid)
        .with_child(pagination_widget(
            page.info,
            page.window,
            |data: &mut AppState, page_move| match page_move {
                PageMove::Previous => data.brands.previous_page(),
                PageMove::Next => data.brands.next_page(),
                PageMove::To(page) => data.brands.go_to_page(page),
            },
        ))
        .boxed()
}

fn brand_widget(brand: &Brand) -> impl Widget<AppState> {
    let link = BrandLink::new(&brand.id, &brand.name);
    Label::new(brand.name.as_str())
        .with_font(theme::UI_FONT_MEDIUM)
        .center()
        .fix_size(theme::grid(18.0), theme::grid(8.0))
        .border(theme::BORDER_LIGHT, 1.0)
        .link()
        .on_click(move |ctx, _, _| {
            ctx.submit_command(cmd::NAVIGATE.with(Nav::BrandModels(link.clone())));
        })
}
