#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cmd;
mod controller;
mod data;
mod delegate;
mod ui;
mod webapi;
mod widget;

use std::{env, process};

use druid::AppLauncher;
use env_logger::{Builder, Env};
use vibe_core::{config::Config, route::Route};
use webapi::WebApi;

use crate::{
    data::{AppState, Nav},
    delegate::Delegate,
};

const ENV_LOG: &str = "VIBE_LOG";
const ENV_LOG_STYLE: &str = "VIBE_LOG_STYLE";

fn main() {
    // Setup logging from the env variables, with defaults.
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid configuration: {}", err);
            process::exit(1);
        }
    };

    // Optional start location, e.g. `/brands/3/models`.
    let nav = match env::args().nth(1) {
        Some(path) => match Route::parse(&path) {
            Some(route) => Nav::from_route(route),
            None => {
                log::warn!("unknown location {:?}, starting at home", path);
                Nav::Home
            }
        },
        None => Nav::Home,
    };

    log::info!("catalog endpoint: {}", config.endpoint);
    WebApi::new(&config).install_as_global();

    let state = AppState::new(config, nav);
    let window = ui::main_window();
    let launcher = AppLauncher::with_window(window).configure_env(ui::theme::setup);

    if let Err(err) = launcher.delegate(Delegate).launch(state) {
        log::error!("application failed to launch: {}", err);
        process::exit(1);
    }
}
