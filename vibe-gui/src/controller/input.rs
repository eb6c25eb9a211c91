use druid::{
    widget::{prelude::*, Controller, TextBox},
    HotKey, KbKey,
};

/// Keyboard handling for the search box: Enter leaves the field, Escape
/// empties it.
pub struct InputController;

impl Controller<String, TextBox<String>> for InputController {
    fn event(
        &mut self,
        child: &mut TextBox<String>,
        ctx: &mut EventCtx,
        event: &Event,
        data: &mut String,
        env: &Env,
    ) {
        match event {
            Event::KeyDown(k_e) if HotKey::new(None, KbKey::Enter).matches(k_e) => {
                ctx.resign_focus();
                ctx.request_paint();
                ctx.set_handled();
            }
            Event::KeyDown(k_e) if k_e.key == KbKey::Escape => {
                if !data.is_empty() {
                    data.clear();
                }
                ctx.resign_focus();
                ctx.set_handled();
            }
            _ => {
                child.event(ctx, event, data, env);
            }
        }
    }
}
