use druid::widget::{prelude::*, Controller};
use vibe_core::view::{DetailController, ListController};

use crate::{
    cmd,
    data::{owned_id, AppState, Nav},
    ui::{brand, home, model},
};

pub struct NavController;

impl NavController {
    /// Mounts the view for the current location.  Whatever the other views
    /// were waiting for is dropped, and the mounted one starts over from its
    /// route parameters.
    fn load_route_data(&self, ctx: &mut EventCtx, data: &mut AppState) {
        data.close_views();
        match &data.nav {
            Nav::Home => {
                data.brands = ListController::brands(&data.config);
                if let Some(ticket) = data.brands.open() {
                    ctx.submit_command(home::LOAD_BRANDS.with(ticket));
                }
            }
            Nav::BrandModels(link) => {
                data.models = ListController::models(owned_id(&link.id), &data.config);
                if let Some(ticket) = data.models.open() {
                    ctx.submit_command(brand::LOAD_MODELS.with(ticket));
                }
            }
            Nav::ModelDetail(link) => {
                data.model_detail =
                    DetailController::new(owned_id(&link.brand.id), owned_id(&link.id), &data.config);
                if let Some(ticket) = data.model_detail.open() {
                    ctx.submit_command(model::LOAD_MODEL.with(ticket));
                }
            }
        }
    }
}

impl<W> Controller<AppState, W> for NavController
where
    W: Widget<AppState>,
{
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut EventCtx,
        event: &Event,
        data: &mut AppState,
        env: &Env,
    ) {
        match event {
            Event::Command(cmd) if cmd.is(cmd::NAVIGATE) => {
                let nav = cmd.get_unchecked(cmd::NAVIGATE);
                data.navigate(nav);
                ctx.set_handled();
                self.load_route_data(ctx, data);
            }
            Event::Command(cmd) if cmd.is(cmd::NAVIGATE_BACK) => {
                let count = cmd.get_unchecked(cmd::NAVIGATE_BACK);
                for _ in 0..*count {
                    data.navigate_back();
                }
                ctx.set_handled();
                self.load_route_data(ctx, data);
            }
            Event::Command(cmd) if cmd.is(cmd::NAVIGATE_REFRESH) => {
                data.clear_fault();
                ctx.set_handled();
                self.load_route_data(ctx, data);
            }
            Event::MouseDown(cmd) if cmd.button.is_x1() => {
                data.navigate_back();
                ctx.set_handled();
                self.load_route_data(ctx, data);
            }
            _ => {
                child.event(ctx, event, data, env);
            }
        }
    }

    fn lifecycle(
        &mut self,
        child: &mut W,
        ctx: &mut LifeCycleCtx,
        event: &LifeCycle,
        data: &AppState,
        env: &Env,
    ) {
        if let LifeCycle::WidgetAdded = event {
            ctx.submit_command(cmd::NAVIGATE_REFRESH);
        }
        child.lifecycle(ctx, event, data, env)
    }
}
