//! View controllers.
//!
//! A controller owns everything one screen derives its output from: the
//! outstanding request, the search term, the type filter and the page.  It
//! never performs I/O itself.  Operations that need data hand back a
//! [`Ticket`], the caller runs it against an [`Api`] wherever it likes and
//! feeds the result to `complete`, which ignores anything but the most
//! recently issued ticket.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use serde::de::DeserializeOwned;

use crate::{
    api::{Api, FetchPolicy, Request},
    config::Config,
    error::Error,
    filter::{Categorized, TypeFilter},
    graphql::Fetched,
    model::{Brand, Model, Musician},
    pagination::{PageInfo, PageWindow, Paginator},
    promise::Promise,
    route::Param,
    search::SearchState,
};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identity of one issued request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    id: u64,
    pub request: Request,
    pub policy: FetchPolicy,
}

impl Ticket {
    fn issue(request: Request, policy: FetchPolicy) -> Self {
        Self {
            id: NEXT_TICKET.fetch_add(1, Ordering::Relaxed),
            request,
            policy,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn run<T: DeserializeOwned + Default>(&self, api: &Api) -> Result<Fetched<T>, Error> {
        api.load(&self.request, self.policy)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Fetch<T> {
    promise: Promise<Fetched<T>, Ticket>,
    last: Option<Request>,
}

impl<T> Fetch<T> {
    fn new() -> Self {
        Self {
            promise: Promise::Empty,
            last: None,
        }
    }

    fn issue(&mut self, request: Request, policy: FetchPolicy) -> Ticket {
        let ticket = Ticket::issue(request.clone(), policy);
        log::debug!("issuing ticket {} for {:?}", ticket.id, request);
        self.last = Some(request);
        self.promise.defer(ticket.clone());
        ticket
    }

    fn retry(&mut self) -> Option<Ticket> {
        let request = self.last.clone()?;
        Some(self.issue(request, FetchPolicy::NetworkOnly))
    }

    fn complete(&mut self, ticket: &Ticket, result: Result<Fetched<T>, Error>) -> bool {
        if let Err(err) = &result {
            log::error!("{:?} failed: {}", ticket.request, err);
        }
        let applied = self.promise.update((ticket.clone(), result));
        if !applied {
            log::debug!("discarding stale result of ticket {}", ticket.id);
        }
        applied
    }

    fn cancel(&mut self) {
        if self.promise.deferred().is_some() {
            self.promise.clear();
        }
    }

    fn resolved(&self) -> Option<&Fetched<T>> {
        self.promise.resolved()
    }

    fn status<'a, V>(
        &'a self,
        missing: Option<Param>,
        ready: impl FnOnce(&'a Fetched<T>) -> Status<'a, V>,
    ) -> Status<'a, V> {
        match (&self.promise, missing) {
            (Promise::Deferred(_), _) => Status::Loading,
            (Promise::Rejected(err), _) => Status::Failed(err),
            (_, Some(param)) => Status::MissingParam(param),
            (Promise::Empty, None) => Status::Loading,
            (Promise::Resolved(fetched), None) => ready(fetched),
        }
    }
}

/// What a screen should render, in priority order.
#[derive(Debug)]
pub enum Status<'a, V> {
    Loading,
    /// Recoverable with `retry`.
    Failed(&'a Error),
    /// Permanent: nothing is ever requested.
    MissingParam(Param),
    NotFound,
    Ready(V),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Loading,
    Failed,
    MissingParam,
    NotFound,
    Ready,
}

impl<V> Status<'_, V> {
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Loading => StatusKind::Loading,
            Self::Failed(_) => StatusKind::Failed,
            Self::MissingParam(_) => StatusKind::MissingParam,
            Self::NotFound => StatusKind::NotFound,
            Self::Ready(_) => StatusKind::Ready,
        }
    }

    pub fn ready(self) -> Option<V> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListSource {
    Brands,
    Models { brand_id: Option<String> },
}

impl ListSource {
    fn request(&self, term: &str) -> Result<Request, Param> {
        match self {
            Self::Brands => Ok(Request::Brands),
            Self::Models { brand_id } => brand_id
                .as_ref()
                .map(|brand_id| Request::Models {
                    brand_id: brand_id.clone(),
                    name: term.to_string(),
                })
                .ok_or(Param::BrandId),
        }
    }

    fn missing_param(&self) -> Option<Param> {
        match self {
            Self::Models { brand_id: None } => Some(Param::BrandId),
            _ => None,
        }
    }
}

/// One page of a filtered list.
#[derive(Debug)]
pub struct ListPage<'a, T> {
    pub items: Vec<&'a T>,
    pub info: PageInfo,
    /// Absent when the list fits on one page.
    pub window: Option<PageWindow>,
    pub warnings: &'a [String],
}

/// Brand list and model list screens.
#[derive(Clone, Debug, PartialEq)]
pub struct ListController<T> {
    source: ListSource,
    fetch: Fetch<Vec<T>>,
    search: SearchState,
    filter: TypeFilter,
    paginator: Paginator,
    window: usize,
}

impl ListController<Brand> {
    pub fn brands(config: &Config) -> Self {
        Self::new(ListSource::Brands, config.brands_per_page, config)
    }
}

impl ListController<Model> {
    pub fn models(brand_id: Option<String>, config: &Config) -> Self {
        Self::new(
            ListSource::Models { brand_id },
            config.models_per_page,
            config,
        )
    }
}

impl<T> ListController<T> {
    fn new(source: ListSource, per_page: usize, config: &Config) -> Self {
        Self {
            source,
            fetch: Fetch::new(),
            search: SearchState::new(config.search_debounce()),
            filter: TypeFilter::all(),
            paginator: Paginator::new(per_page),
            window: config.page_window,
        }
    }

    /// Starts with `term` already settled, so `open` searches for it.
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = SearchState::with_term(term, self.search.quiet_period());
        self
    }

    pub fn with_type_filter(mut self, selection: &str) -> Self {
        self.filter = TypeFilter::new(selection);
        self
    }

    pub fn source(&self) -> &ListSource {
        &self.source
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn type_filter(&self) -> &TypeFilter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    pub fn awaiting(&self) -> Option<&Ticket> {
        self.fetch.promise.deferred()
    }

    fn issue(&mut self, policy: FetchPolicy) -> Option<Ticket> {
        match self.source.request(self.search.settled()) {
            Ok(request) => Some(self.fetch.issue(request, policy)),
            Err(param) => {
                log::warn!("{} is missing, nothing to request", param);
                self.fetch.promise.clear();
                None
            }
        }
    }

    /// Initial request when the screen is mounted.
    pub fn open(&mut self) -> Option<Ticket> {
        self.issue(FetchPolicy::CacheFirst)
    }

    /// Drops the outstanding request, its result will be ignored.
    pub fn close(&mut self) {
        self.fetch.cancel();
    }

    /// Re-issues the failed request, skipping the cache.
    pub fn retry(&mut self) -> Option<Ticket> {
        if self.fetch.promise.is_rejected() {
            self.fetch.retry()
        } else {
            None
        }
    }

    pub fn update_search(&mut self, term: impl Into<String>, now: Instant) {
        self.search.update(term, now);
    }

    pub fn clear_search(&mut self, now: Instant) {
        self.search.clear(now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Settles the search term if it is due.  A changed term goes back to the
    /// first page and issues a new request.
    pub fn poll_search(&mut self, now: Instant) -> Option<Ticket> {
        self.search.poll(now)?;
        self.paginator.reset();
        self.issue(FetchPolicy::CacheFirst)
    }
}

impl<T: Categorized> ListController<T> {
    fn filtered_len(&self) -> usize {
        self.fetch
            .resolved()
            .map_or(0, |fetched| self.filter.apply(&fetched.data).len())
    }

    /// Changes the type filter and returns to the first page.  Filtering is
    /// local, nothing is requested.
    pub fn set_type_filter(&mut self, selection: &str) -> bool {
        let filter = TypeFilter::new(selection);
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.paginator.reset();
        true
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.filtered_len();
        self.paginator.go_to_page(page, total)
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.filtered_len();
        self.paginator.next(total)
    }

    pub fn previous_page(&mut self) -> bool {
        let total = self.filtered_len();
        self.paginator.previous(total)
    }

    pub fn complete(&mut self, ticket: &Ticket, result: Result<Fetched<Vec<T>>, Error>) -> bool {
        let applied = self.fetch.complete(ticket, result);
        if applied {
            let total = self.filtered_len();
            self.paginator.clamp(total);
        }
        applied
    }

    pub fn status(&self) -> Status<'_, ListPage<'_, T>> {
        self.fetch.status(self.source.missing_param(), |fetched| {
            let filtered = self.filter.apply(&fetched.data);
            let info = self.paginator.info(filtered.len());
            let window = if info.shows_controls() {
                info.window(self.window)
            } else {
                None
            };
            Status::Ready(ListPage {
                items: filtered[info.range()].to_vec(),
                info,
                window,
                warnings: &fetched.warnings,
            })
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DetailTab {
    Specs,
    Musicians,
}

impl DetailTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Specs => "Specifications",
            Self::Musicians => "Who plays it?",
        }
    }
}

#[derive(Debug)]
pub struct DetailView<'a> {
    pub model: &'a Model,
    pub tab: DetailTab,
    /// The current page of musicians.
    pub musicians: &'a [Musician],
    pub info: PageInfo,
    pub window: Option<PageWindow>,
    pub warnings: &'a [String],
}

/// Model detail screen.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailController {
    brand_id: Option<String>,
    model_id: Option<String>,
    fetch: Fetch<Option<Model>>,
    tab: DetailTab,
    musicians: Paginator,
    window: usize,
}

impl DetailController {
    pub fn new(brand_id: Option<String>, model_id: Option<String>, config: &Config) -> Self {
        Self {
            brand_id,
            model_id,
            fetch: Fetch::new(),
            tab: DetailTab::Specs,
            musicians: Paginator::new(config.musicians_per_page),
            window: config.page_window,
        }
    }

    pub fn brand_id(&self) -> Option<&str> {
        self.brand_id.as_deref()
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn awaiting(&self) -> Option<&Ticket> {
        self.fetch.promise.deferred()
    }

    fn missing_param(&self) -> Option<Param> {
        if self.brand_id.is_none() {
            Some(Param::BrandId)
        } else if self.model_id.is_none() {
            Some(Param::ModelId)
        } else {
            None
        }
    }

    pub fn open(&mut self) -> Option<Ticket> {
        match (&self.brand_id, &self.model_id) {
            (Some(brand_id), Some(model_id)) => {
                let request = Request::Model {
                    brand_id: brand_id.clone(),
                    model_id: model_id.clone(),
                };
                Some(self.fetch.issue(request, FetchPolicy::CacheFirst))
            }
            _ => {
                log::warn!("model route is incomplete, nothing to request");
                None
            }
        }
    }

    pub fn close(&mut self) {
        self.fetch.cancel();
    }

    pub fn retry(&mut self) -> Option<Ticket> {
        if self.fetch.promise.is_rejected() {
            self.fetch.retry()
        } else {
            None
        }
    }

    pub fn set_tab(&mut self, tab: DetailTab) -> bool {
        if self.tab == tab {
            false
        } else {
            self.tab = tab;
            true
        }
    }

    fn musician_count(&self) -> usize {
        self.fetch
            .resolved()
            .and_then(|fetched| fetched.data.as_ref())
            .map_or(0, |model| model.musicians.len())
    }

    pub fn musicians_page(&self) -> usize {
        self.musicians.page()
    }

    pub fn go_to_musicians_page(&mut self, page: usize) -> bool {
        let total = self.musician_count();
        self.musicians.go_to_page(page, total)
    }

    pub fn next_musicians_page(&mut self) -> bool {
        let total = self.musician_count();
        self.musicians.next(total)
    }

    pub fn previous_musicians_page(&mut self) -> bool {
        let total = self.musician_count();
        self.musicians.previous(total)
    }

    pub fn complete(
        &mut self,
        ticket: &Ticket,
        result: Result<Fetched<Option<Model>>, Error>,
    ) -> bool {
        // A null model next to errors means the lookup failed, not that the
        // model is absent.
        let result = result.and_then(|fetched| match fetched.data {
            None if !fetched.warnings.is_empty() => Err(Error::Graphql(fetched.warnings)),
            _ => Ok(fetched),
        });
        let applied = self.fetch.complete(ticket, result);
        if applied {
            let total = self.musician_count();
            self.musicians.clamp(total);
        }
        applied
    }

    pub fn status(&self) -> Status<'_, DetailView<'_>> {
        self.fetch
            .status(self.missing_param(), |fetched| match &fetched.data {
                None => Status::NotFound,
                Some(model) => {
                    let info = self.musicians.info(model.musicians.len());
                    let window = if info.shows_controls() {
                        info.window(self.window)
                    } else {
                        None
                    };
                    Status::Ready(DetailView {
                        model,
                        tab: self.tab,
                        musicians: info.slice(&model.musicians),
                        info,
                        window,
                        warnings: &fetched.warnings,
                    })
                }
            })
    }
}
