mod render;

use std::{fmt, process};

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use vibe_core::{
    api::Api,
    config::Config,
    error::Error,
    route::Route,
    view::{DetailController, ListController, Status},
};

const ENV_LOG: &str = "VIBE_LOG";
const ENV_LOG_STYLE: &str = "VIBE_LOG_STYLE";

#[derive(Parser)]
#[command(name = "vibe-cli")]
#[command(about = "Browse the VibeStrings guitar catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// GraphQL endpoint, overrides the configured one.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List guitar brands.
    Brands {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List the models of a brand.
    Models {
        brand_id: String,
        /// Server-side name search.
        #[arg(long, default_value = "")]
        search: String,
        /// Type filter, e.g. electric or bass.
        #[arg(long = "type", default_value = "")]
        kind: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one model.
    Model {
        brand_id: String,
        model_id: String,
        #[arg(long, default_value_t = 1)]
        musicians_page: usize,
    },
    /// Show whatever lives at an app location, e.g. /brands/3/models.
    Open { path: String },
    /// Print the effective configuration.
    Config,
}

enum CliError {
    Core(Error),
    NoSuchPage(usize),
    UnknownPath(String),
    NotFound(&'static str),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(err) => err.fmt(f),
            Self::NoSuchPage(page) => write!(f, "Page {page} does not exist"),
            Self::UnknownPath(path) => write!(f, "Unknown location: {path}"),
            Self::NotFound(what) => write!(f, "{what} not found"),
        }
    }
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        CliError::Core(err)
    }
}

fn main() {
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "warn")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{}", err);
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = Config::load()?;
    config.apply_overrides(cli.endpoint);
    config.validate()?;

    if let Command::Config = cli.command {
        println!("{}", render::config(&config).map_err(Error::from)?);
        return Ok(());
    }

    let api = Api::new(&config);
    match cli.command {
        Command::Brands { page } => brands(&api, &config, page),
        Command::Models {
            brand_id,
            search,
            kind,
            page,
        } => models(&api, &config, Some(brand_id), &search, &kind, page),
        Command::Model {
            brand_id,
            model_id,
            musicians_page,
        } => model(&api, &config, Some(brand_id), Some(model_id), musicians_page),
        Command::Open { path } => match Route::parse(&path) {
            Some(Route::Home) => brands(&api, &config, 1),
            Some(Route::BrandModels { brand_id }) => models(&api, &config, brand_id, "", "", 1),
            Some(Route::ModelDetail { brand_id, model_id }) => {
                model(&api, &config, brand_id, model_id, 1)
            }
            None => Err(CliError::UnknownPath(path)),
        },
        Command::Config => Ok(()),
    }
}

/// One-based page from the command line to the zero-based index.
fn page_index(page: usize) -> Result<usize, CliError> {
    page.checked_sub(1).ok_or(CliError::NoSuchPage(page))
}

/// Turns anything but a ready view into the error that explains it.
fn ensure_ready<V>(status: Status<'_, V>, what: &'static str) -> Result<V, CliError> {
    match status {
        Status::Ready(view) => Ok(view),
        Status::Failed(err) => Err(err.clone().into()),
        Status::MissingParam(param) => Err(Error::MissingParam(param).into()),
        Status::NotFound | Status::Loading => Err(CliError::NotFound(what)),
    }
}

fn brands(api: &Api, config: &Config, page: usize) -> Result<(), CliError> {
    let mut list = ListController::brands(config);
    if let Some(ticket) = list.open() {
        let result = ticket.run(api);
        list.complete(&ticket, result);
    }
    ensure_ready(list.status(), "Brands")?;
    let index = page_index(page)?;
    if index > 0 && !list.go_to_page(index) {
        return Err(CliError::NoSuchPage(page));
    }
    let view = ensure_ready(list.status(), "Brands")?;
    print!("{}", render::brands(&view));
    Ok(())
}

fn models(
    api: &Api,
    config: &Config,
    brand_id: Option<String>,
    search: &str,
    kind: &str,
    page: usize,
) -> Result<(), CliError> {
    let mut list = ListController::models(brand_id, config)
        .with_search(search)
        .with_type_filter(kind);
    if let Some(ticket) = list.open() {
        let result = ticket.run(api);
        list.complete(&ticket, result);
    }
    ensure_ready(list.status(), "Models")?;
    let index = page_index(page)?;
    if index > 0 && !list.go_to_page(index) {
        return Err(CliError::NoSuchPage(page));
    }
    let view = ensure_ready(list.status(), "Models")?;
    print!("{}", render::models(&view, list.type_filter()));
    Ok(())
}

fn model(
    api: &Api,
    config: &Config,
    brand_id: Option<String>,
    model_id: Option<String>,
    musicians_page: usize,
) -> Result<(), CliError> {
    let mut detail = DetailController::new(brand_id, model_id, config);
    if let Some(ticket) = detail.open() {
        let result = ticket.run(api);
        detail.complete(&ticket, result);
    }
    ensure_ready(detail.status(), "Model")?;
    let index = page_index(musicians_page)?;
    if index > 0 && !detail.go_to_musicians_page(index) {
        return Err(CliError::NoSuchPage(musicians_page));
    }
    let view = ensure_ready(detail.status(), "Model")?;
    print!("{}", render::model(&view));
    Ok(())
}
