mod nav;

use std::{mem, sync::Arc};

use druid::{im::Vector, Data, Lens};
use vibe_core::{
    config::Config,
    model::{Brand, Model},
    view::{DetailController, ListController},
};

pub use crate::data::nav::{owned_id, BrandLink, ModelLink, Nav};

#[derive(Clone, Data, Lens)]
pub struct AppState {
    pub nav: Nav,
    pub history: Vector<Nav>,
    pub config: Arc<Config>,
    #[data(eq)]
    pub brands: ListController<Brand>,
    #[data(eq)]
    pub models: ListController<Model>,
    #[data(eq)]
    pub model_detail: DetailController,
    pub fault: Option<Arc<str>>,
}

impl AppState {
    pub fn new(config: Config, nav: Nav) -> Self {
        Self {
            nav,
            history: Vector::new(),
            brands: ListController::brands(&config),
            models: ListController::models(None, &config),
            model_detail: DetailController::new(None, None, &config),
            config: Arc::new(config),
            fault: None,
        }
    }

    pub fn navigate(&mut self, nav: &Nav) {
        if &self.nav != nav {
            let previous = mem::replace(&mut self.nav, nav.to_owned());
            self.history.push_back(previous);
        }
    }

    pub fn navigate_back(&mut self) {
        if let Some(nav) = self.history.pop_back() {
            self.nav = nav;
        }
    }

    /// Leaves every view with nothing in flight.
    pub fn close_views(&mut self) {
        self.brands.close();
        self.models.close();
        self.model_detail.close();
    }

    pub fn set_fault(&mut self, message: &str) {
        self.fault = Some(message.into());
    }

    pub fn clear_fault(&mut self) {
        self.fault = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_records_only_real_moves() {
        let mut state = AppState::new(Config::default(), Nav::Home);
        let brand = Nav::BrandModels(BrandLink::new("3", "Gibson"));
        state.navigate(&brand);
        state.navigate(&brand);
        assert_eq!(state.history.len(), 1);

        state.navigate_back();
        assert_eq!(state.nav, Nav::Home);
        state.navigate_back();
        assert_eq!(state.nav, Nav::Home);
    }

    #[test]
    fn closing_views_abandons_pending_requests() {
        let mut state = AppState::new(Config::default(), Nav::Home);
        let ticket = state.brands.open().unwrap();
        state.close_views();
        assert!(state.brands.awaiting().is_none());
        assert!(!state
            .brands
            .complete(&ticket, Ok(vibe_core::graphql::Fetched::clean(Vec::new()))));
    }
}
