use druid::{widget::prelude::*, Data, Point, WidgetPod};

use crate::ui::theme;

/// Clickable surface that lights up on hover and can be marked active.
pub struct Link<T> {
    inner: WidgetPod<T, Box<dyn Widget<T>>>,
    is_active: Option<Box<dyn Fn(&T, &Env) -> bool>>,
}

impl<T: Data> Link<T> {
    pub fn new(inner: impl Widget<T> + 'static) -> Self {
        Self {
            inner: WidgetPod::new(inner).boxed(),
            is_active: None,
        }
    }

    pub fn active(mut self, predicate: impl Fn(&T, &Env) -> bool + 'static) -> Self {
        self.is_active = Some(Box::new(predicate));
        self
    }
}

impl<T: Data> Widget<T> for Link<T> {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut T, env: &Env) {
        if let Event::MouseMove(_) = event {
            ctx.set_cursor(&druid::Cursor::Pointer);
        }
        self.inner.event(ctx, event, data, env);
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &T, env: &Env) {
        if let LifeCycle::HotChanged(_) = event {
            ctx.request_paint();
        }
        self.inner.lifecycle(ctx, event, data, env)
    }

    fn update(&mut self, ctx: &mut UpdateCtx, _old_data: &T, data: &T, env: &Env) {
        if self.is_active.is_some() {
            ctx.request_paint();
        }
        self.inner.update(ctx, data, env);
    }

    fn layout(&mut self, ctx: &mut LayoutCtx, bc: &BoxConstraints, data: &T, env: &Env) -> Size {
        let size = self.inner.layout(ctx, bc, data, env);
        self.inner.set_origin(ctx, Point::ORIGIN);
        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &T, env: &Env) {
        let is_active = self
            .is_active
            .as_ref()
            .is_some_and(|predicate| predicate(data, env));
        let background = if is_active {
            env.get(theme::LINK_ACTIVE_COLOR)
        } else if ctx.is_hot() {
            env.get(theme::LINK_HOT_COLOR)
        } else {
            env.get(theme::LINK_COLD_COLOR)
        };
        let rounded_rect = ctx
            .size()
            .to_rect()
            .to_rounded_rect(env.get(theme::BUTTON_BORDER_RADIUS));
        ctx.fill(rounded_rect, &background);
        self.inner.paint(ctx, data, env);
    }
}
