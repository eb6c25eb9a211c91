use std::rc::Rc;

use druid::{
    widget::{Button, CrossAxisAlignment, Flex, Label, SizedBox},
    Data, Widget, WidgetExt,
};
use vibe_core::pagination::{PageInfo, PageWindow};

use crate::{ui::theme, widget::MyWidgetExt};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageMove {
    Previous,
    Next,
    To(usize),
}

type MoveFn<T> = Rc<dyn Fn(&mut T, PageMove) -> bool>;

/// Previous/next buttons around the page-number window, plus the "Showing"
/// summary.  Renders nothing without a window.
pub fn pagination_widget<T: Data>(
    info: PageInfo,
    window: Option<PageWindow>,
    on_move: impl Fn(&mut T, PageMove) -> bool + 'static,
) -> Box<dyn Widget<T>> {
    let Some(window) = window else {
        return SizedBox::empty().boxed();
    };
    let on_move: MoveFn<T> = Rc::new(on_move);

    let mut buttons = Flex::row().with_child(
        move_button("Previous", PageMove::Previous, on_move.clone())
            .disabled_if(move |_, _| !info.has_previous),
    );
    if window.leading_ellipsis {
        buttons.add_child(ellipsis());
    }
    for page in window.pages() {
        let current = page == info.current_page;
        buttons.add_child(page_number(page, current, on_move.clone()));
    }
    if window.trailing_ellipsis {
        buttons.add_child(ellipsis());
    }
    buttons.add_child(
        move_button("Next", PageMove::Next, on_move).disabled_if(move |_, _| !info.has_next),
    );

    let mut column = Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .with_child(buttons);
    if let Some(summary) = info.summary() {
        column.add_spacer(theme::grid(0.5));
        column.add_child(
            Label::new(summary)
                .with_text_size(theme::TEXT_SIZE_SMALL)
                .with_text_color(theme::PLACEHOLDER_COLOR),
        );
    }
    column.padding((0.0, theme::grid(2.0))).center().boxed()
}

fn move_button<T: Data>(label: &str, page_move: PageMove, on_move: MoveFn<T>) -> impl Widget<T> {
    Button::new(label)
        .on_click(move |_, data, _| {
            on_move(data, page_move);
        })
        .padding((theme::grid(0.5), 0.0))
}

fn page_number<T: Data>(page: usize, current: bool, on_move: MoveFn<T>) -> impl Widget<T> {
    let color = if current {
        theme::HIGHLIGHT_COLOR
    } else {
        theme::TEXT_COLOR
    };
    let label = Label::new((page + 1).to_string())
        .with_text_color(color)
        .padding((theme::grid(1.2), theme::grid(0.6)));
    label
        .link()
        .active(move |_, _| current)
        .on_click(move |_, data, _| {
            on_move(data, PageMove::To(page));
        })
}

fn ellipsis<T: Data>() -> impl Widget<T> {
    Label::new("…")
        .with_text_color(theme::PLACEHOLDER_COLOR)
        .padding((theme::grid(0.5), 0.0))
}
