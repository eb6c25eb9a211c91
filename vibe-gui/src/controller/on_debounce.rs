use std::time::Instant;

use druid::{widget::Controller, Data, Env, Event, EventCtx, TimerToken, UpdateCtx, Widget};

type DeadlineFn<T> = Box<dyn Fn(&T) -> Option<Instant>>;
type DebounceHandler<T> = Box<dyn Fn(&mut EventCtx, &mut T, &Env)>;

/// Fires `handler` once the deadline read from the data has passed.  The
/// deadline itself lives in the data, so every change to it re-arms the timer
/// and only the last one fires.
pub struct OnDebounce<T> {
    deadline: DeadlineFn<T>,
    timer: TimerToken,
    handler: DebounceHandler<T>,
}

impl<T> OnDebounce<T> {
    pub fn trailing(
        deadline: impl Fn(&T) -> Option<Instant> + 'static,
        handler: impl Fn(&mut EventCtx, &mut T, &Env) + 'static,
    ) -> Self {
        Self {
            deadline: Box::new(deadline),
            timer: TimerToken::INVALID,
            handler: Box::new(handler),
        }
    }
}

impl<T, W> Controller<T, W> for OnDebounce<T>
where
    T: Data,
    W: Widget<T>,
{
    fn event(&mut self, child: &mut W, ctx: &mut EventCtx, event: &Event, data: &mut T, env: &Env) {
        match event {
            Event::Timer(token) if token == &self.timer => {
                self.timer = TimerToken::INVALID;
                if let Some(deadline) = (self.deadline)(data) {
                    let now = Instant::now();
                    if deadline > now {
                        self.timer = ctx.request_timer(deadline - now);
                    } else {
                        (self.handler)(ctx, data, env);
                    }
                }
                ctx.set_handled();
            }
            _ => child.event(ctx, event, data, env),
        }
    }

    fn update(&mut self, child: &mut W, ctx: &mut UpdateCtx, old_data: &T, data: &T, env: &Env) {
        let deadline = (self.deadline)(data);
        if deadline != (self.deadline)(old_data) {
            if let Some(deadline) = deadline {
                self.timer = ctx.request_timer(deadline.saturating_duration_since(Instant::now()));
            }
        }
        child.update(ctx, old_data, data, env)
    }
}
