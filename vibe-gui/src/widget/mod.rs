mod link;

use std::{sync::Arc, time::Instant};

use druid::{widget::ControllerHost, Data, Env, EventCtx, Selector, Widget};

use crate::controller::{OnCommandAsync, OnDebounce};

pub use link::Link;

pub trait MyWidgetExt<T: Data>: Widget<T> + Sized + 'static {
    fn link(self) -> Link<T> {
        Link::new(self)
    }

    fn on_debounce(
        self,
        deadline: impl Fn(&T) -> Option<Instant> + 'static,
        handler: impl Fn(&mut EventCtx, &mut T, &Env) + 'static,
    ) -> ControllerHost<Self, OnDebounce<T>> {
        ControllerHost::new(self, OnDebounce::trailing(deadline, handler))
    }

    fn on_command_async<U: Send + Clone + 'static, V: Send + 'static>(
        self,
        selector: Selector<U>,
        request: impl Fn(U) -> V + Sync + Send + 'static,
        preflight: impl Fn(&mut EventCtx, &mut T, U) + 'static,
        response: impl Fn(&mut EventCtx, &mut T, (U, V)) + 'static,
    ) -> OnCommandAsync<Self, T, U, V> {
        OnCommandAsync::new(
            self,
            selector,
            Box::new(preflight),
            Arc::new(request),
            Box::new(response),
        )
    }
}

impl<T: Data, W: Widget<T> + 'static> MyWidgetExt<T> for W {}
