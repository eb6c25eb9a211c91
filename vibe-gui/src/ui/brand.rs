use std::time::Instant;

use druid::{
    lens,
    widget::{Button, CrossAxisAlignment, Flex, Label, LineBreaking, TextBox, ViewSwitcher},
    Selector, Widget, WidgetExt,
};
use vibe_core::{
    filter::TYPE_OPTIONS,
    model::Model,
    view::{ListPage, Status, Ticket},
};

use crate::{
    cmd,
    controller::InputController,
    data::{AppState, BrandLink, ModelLink, Nav},
    ui::{
        pagination::{pagination_widget, PageMove},
        theme, utils,
    },
    widget::MyWidgetExt,
};

pub const LOAD_MODELS: Selector<Ticket> = Selector::new("app.brand.load-models");

pub fn models_widget() -> impl Widget<AppState> {
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(
            Label::new("Check out the Selection")
                .with_text_size(theme::TEXT_SIZE_LARGE)
                .with_font(theme::UI_FONT_MEDIUM),
        )
        .with_default_spacer()
        .with_child(controls_widget())
        .with_default_spacer()
        .with_child(results_widget())
}

fn controls_widget() -> impl Widget<AppState> {
    Flex::row()
        .with_child(search_widget())
        .with_default_spacer()
        .with_child(type_filter_widget())
}

fn search_widget() -> impl Widget<AppState> {
    let input = TextBox::new()
        .with_placeholder("Search by name")
        .controller(InputController)
        .fix_width(theme::grid(30.0))
        .lens(lens::Map::new(
            |data: &AppState| data.models.search().live().to_string(),
            |data: &mut AppState, term: String| {
                if term != data.models.search().live() {
                    data.models.update_search(term, Instant::now());
                }
            },
        ));
    let clear = Button::new("Clear")
        .on_click(|_, data: &mut AppState, _| data.models.clear_search(Instant::now()))
        .disabled_if(|data: &AppState, _| data.models.search().live().is_empty());

    Flex::row()
        .with_child(input)
        .with_spacer(theme::grid(0.5))
        .with_child(clear)
        .on_debounce(
            |data: &AppState| data.models.search_deadline(),
            |ctx, data, _| {
                if let Some(ticket) = data.models.poll_search(Instant::now()) {
                    ctx.submit_command(LOAD_MODELS.with(ticket));
                }
            },
        )
}

fn type_filter_widget() -> impl Widget<AppState> {
    let mut row = Flex::row();
    for option in TYPE_OPTIONS {
        row.add_child(
            Label::new(option.label)
                .padding((theme::grid(1.0), theme::grid(0.5)))
                .link()
                .active(move |data: &AppState, _| data.models.type_filter().value() == option.value)
                .on_click(move |_, data: &mut AppState, _| {
                    data.models.set_type_filter(option.value);
                }),
        );
    }
    row
}

fn results_widget() -> impl Widget<AppState> {
    ViewSwitcher::new(
        |data: &AppState, _| {
            (
                data.models.status().kind(),
                data.models.awaiting().map(Ticket::id),
                data.models.page(),
                data.models.type_filter().value().to_string(),
                data.models.search().settled().to_string(),
            )
        },
        |_, data: &AppState, _| match data.models.status() {
            Status::Loading => utils::spinner_widget().boxed(),
            Status::Failed(err) => utils::error_widget(err, |ctx, data: &mut AppState, _| {
                if let Some(ticket) = data.models.retry() {
                    ctx.submit_command(LOAD_MODELS.with(ticket));
                }
            })
            .boxed(),
            Status::MissingParam(param) => utils::missing_param_widget(param).boxed(),
            Status::NotFound => utils::message_widget("No models found.").boxed(),
            Status::Ready(page) => {
                let brand = match &data.nav {
                    Nav::BrandModels(link) => link.clone(),
                    _ => BrandLink::default(),
                };
                model_list_widget(&page, &brand)
            }
        },
    )
}

fn model_list_widget(page: &ListPage<'_, Model>, brand: &BrandLink) -> Box<dyn Widget<AppState>> {
    if page.items.is_empty() {
        return utils::message_widget("No models found.").boxed();
    }
    let mut list = Flex::column().cross_axis_alignment(CrossAxisAlignment::Start);
    for model in &page.items {
        list.add_child(model_card_widget(model, brand));
        list.add_default_spacer();
    }
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(utils::warnings_widget(page.warnings))
        .with_child(list)
        .with_child(pagination_widget(
            page.info,
            page.window,
            |data: &mut AppState, page_move| match page_move {
                PageMove::Previous => data.models.previous_page(),
                PageMove::Next => data.models.next_page(),
                PageMove::To(page) => data.models.go_to_page(page),
            },
        ))
        .boxed()
}

fn model_card_widget(model: &Model, brand: &BrandLink) -> impl Widget<AppState> {
    let link = ModelLink::new(brand.clone(), &model.id, &model.name);
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(Label::new(model.name.as_str()).with_font(theme::UI_FONT_MEDIUM))
        .with_child(
            Label::new(model.kind.as_str())
                .with_text_size(theme::TEXT_SIZE_SMALL)
                .with_text_color(theme::PLACEHOLDER_COLOR),
        )
        .with_child(Label::new(model.price_label()).with_text_color(theme::HIGHLIGHT_COLOR))
        .with_child(
            Label::new(model.description())
                .with_line_break_mode(LineBreaking::WordWrap)
                .with_text_size(theme::TEXT_SIZE_SMALL),
        )
        .padding(theme::grid(1.5))
        .fix_width(theme::CARD_WIDTH * 2.0)
        .border(theme::BORDER_LIGHT, 1.0)
        .link()
        .on_click(move |ctx, _, _| {
            ctx.submit_command(cmd::NAVIGATE.with(Nav::ModelDetail(link.clone())));
        })
}
