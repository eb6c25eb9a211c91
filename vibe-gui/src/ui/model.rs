use druid::{
    widget::{CrossAxisAlignment, Flex, Label, LineBreaking, ViewSwitcher},
    Selector, Widget, WidgetExt,
};
use vibe_core::view::{DetailTab, DetailView, Status, Ticket};

use crate::{
    data::AppState,
    ui::{
        pagination::{pagination_widget, PageMove},
        theme, utils,
    },
    widget::MyWidgetExt,
};

pub const LOAD_MODEL: Selector<Ticket> = Selector::new("app.model.load-detail");

pub fn detail_widget() -> impl Widget<AppState> {
    ViewSwitcher::new(
        |data: &AppState, _| {
            (
                data.model_detail.status().kind(),
                data.model_detail.awaiting().map(Ticket::id),
                data.model_detail.tab(),
                data.model_detail.musicians_page(),
            )
        },
        |_, data: &AppState, _| match data.model_detail.status() {
            Status::Loading => utils::spinner_widget().boxed(),
            Status::Failed(err) => utils::error_widget(err, |ctx, data: &mut AppState, _| {
                if let Some(ticket) = data.model_detail.retry() {
                    ctx.submit_command(LOAD_MODEL.with(ticket));
                }
            })
            .boxed(),
            Status::MissingParam(param) => utils::missing_param_widget(param).boxed(),
            Status::NotFound => utils::message_widget("Model not found.").boxed(),
            Status::Ready(view) => model_widget(&view).boxed(),
        },
    )
}

fn model_widget(view: &DetailView<'_>) -> impl Widget<AppState> {
    let model = view.model;
    let tab_body = match view.tab {
        DetailTab::Specs => specs_widget(view).boxed(),
        DetailTab::Musicians => musicians_widget(view).boxed(),
    };
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(utils::warnings_widget(view.warnings))
        .with_child(
            Label::new(model.name.as_str())
                .with_text_size(theme::TEXT_SIZE_HUGE)
                .with_font(theme::UI_FONT_MEDIUM),
        )
        .with_child(
            Label::new(model.kind.as_str())
                .with_text_size(theme::TEXT_SIZE_SMALL)
                .with_text_color(theme::PLACEHOLDER_COLOR),
        )
        .with_child(
            Label::new(model.price_label())
                .with_text_size(theme::TEXT_SIZE_LARGE)
                .with_text_color(theme::HIGHLIGHT_COLOR),
        )
        .with_default_spacer()
        .with_child(
            Label::new(model.description())
                .with_line_break_mode(LineBreaking::WordWrap)
                .fix_width(theme::CARD_WIDTH * 2.5),
        )
        .with_spacer(theme::grid(3.0))
        .with_child(tabs_widget())
        .with_default_spacer()
        .with_child(tab_body)
}

fn tabs_widget() -> impl Widget<AppState> {
    let tab = |tab: DetailTab| {
        Label::new(tab.label())
            .with_font(theme::UI_FONT_MEDIUM)
            .padding((theme::grid(2.0), theme::grid(1.0)))
            .link()
            .active(move |data: &AppState, _| data.model_detail.tab() == tab)
            .on_click(move |_, data: &mut AppState, _| {
                data.model_detail.set_tab(tab);
            })
    };
    Flex::row()
        .with_child(tab(DetailTab::Specs))
        .with_child(tab(DetailTab::Musicians))
}

fn specs_widget(view: &DetailView<'_>) -> impl Widget<AppState> {
    let specs = view.model.specs.clone().unwrap_or_default();
    let mut rows = Flex::column().cross_axis_alignment(CrossAxisAlignment::Start);
    for (label, value) in specs.rows() {
        rows.add_child(
            Flex::row()
                .with_child(
                    Label::new(format!("{label}:"))
                        .with_font(theme::UI_FONT_MEDIUM)
                        .fix_width(theme::grid(16.0)),
                )
                .with_child(Label::new(value)),
        );
        rows.add_spacer(theme::grid(0.5));
    }
    rows
}

fn musicians_widget(view: &DetailView<'_>) -> Box<dyn Widget<AppState>> {
    if view.info.total_items == 0 {
        return utils::message_widget("No musicians listed for this model.").boxed();
    }
    let mut list = Flex::column().cross_axis_alignment(CrossAxisAlignment::Start);
    for musician in view.musicians {
        list.add_child(
            Label::new(musician.name.as_str())
                .padding(theme::grid(1.5))
                .fix_width(theme::CARD_WIDTH)
                .border(theme::BORDER_LIGHT, 1.0),
        );
        list.add_spacer(theme::grid(0.5));
    }
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(list)
        .with_child(pagination_widget(
            view.info,
            view.window,
            |data: &mut AppState, page_move| match page_move {
                PageMove::Previous => data.model_detail.previous_musicians_page(),
                PageMove::Next => data.model_detail.next_musicians_page(),
                PageMove::To(page) => data.model_detail.go_to_musicians_page(page),
            },
        ))
        .boxed()
}
