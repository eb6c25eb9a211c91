use std::sync::Arc;

use once_cell::sync::OnceCell;
use vibe_core::{api::Api, config::Config};

pub struct WebApi {
    api: Api,
}

impl WebApi {
    pub fn new(config: &Config) -> Self {
        Self {
            api: Api::new(config),
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }
}

static GLOBAL_WEBAPI: OnceCell<Arc<WebApi>> = OnceCell::new();

/// Global instance.
impl WebApi {
    pub fn install_as_global(self) {
        if GLOBAL_WEBAPI.set(Arc::new(self)).is_err() {
            log::warn!("WebApi already installed, keeping the first one");
        }
    }

    pub fn global() -> Arc<Self> {
        GLOBAL_WEBAPI
            .get()
            .cloned()
            .expect("WebApi is installed before the app launches")
    }
}
