//! Catalog query orchestration.
//!
//! The engine owns the current criteria/sort/page triple and turns it into a
//! rendered [`PageResult`]. It prefers the remote source; if the first remote
//! answer of the session fails or is empty it switches to the local
//! collection for good and evaluates every later query in memory.
//!
//! Remote requests are identified by a [`RequestGeneration`]. Only the
//! response to the most recently issued request is applied; anything older
//! is discarded when it arrives.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::criteria::FilterCriteria;
use crate::domain::item::CatalogItem;
use crate::pagination::{
    DEFAULT_ITEMS_PER_PAGE, DEFAULT_WINDOW_SIZE, PageRequest, Paginated, paginate,
};
use crate::query::remote::RemoteQuery;
use crate::query::run_local;
use crate::query::sort::SortMode;
use crate::source::errors::{SourceError, SourceResult};
use crate::source::{CatalogPage, LocalCatalog, RemoteCatalog};

pub type PageResult = Paginated<CatalogItem>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Local catalog unavailable: {0}")]
    FallbackUnavailable(#[source] SourceError),

    #[error("No result page is available")]
    NotReady,
}

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Where results currently come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceMode {
    Remote,
    /// Local collection; never switches back within a session.
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineSettings {
    pub page_size: usize,
    pub window_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_ITEMS_PER_PAGE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// The criteria/sort/page triple. Always replaced as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogQuery {
    pub criteria: FilterCriteria,
    pub sort: SortMode,
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortMode::default(),
            page: 1,
        }
    }
}

/// A single user action on the query.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryChange {
    Criteria(FilterCriteria),
    Sort(SortMode),
    Page(usize),
}

impl CatalogQuery {
    /// Returns the query that replaces `self` after `change`.
    ///
    /// Criteria and sort changes go back to page 1.
    pub fn with_change(&self, change: QueryChange) -> Self {
        match change {
            QueryChange::Criteria(criteria) => Self {
                criteria,
                sort: self.sort,
                page: 1,
            },
            QueryChange::Sort(sort) => Self {
                criteria: self.criteria.clone(),
                sort,
                page: 1,
            },
            QueryChange::Page(page) => Self {
                criteria: self.criteria.clone(),
                sort: self.sort,
                page: page.max(1),
            },
        }
    }
}

/// Monotonic id of an issued remote request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A remote request issued by [`QueryEngine::begin`].
#[derive(Clone, Debug)]
pub struct FetchTicket {
    generation: RequestGeneration,
    query: CatalogQuery,
    remote_query: RemoteQuery,
}

impl FetchTicket {
    pub const fn generation(&self) -> RequestGeneration {
        self.generation
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn remote_query(&self) -> &RemoteQuery {
        &self.remote_query
    }

    /// Performs the request. Does not touch engine state, so several tickets
    /// may be in flight at once.
    pub async fn fetch<R>(self, remote: &R) -> FetchOutcome
    where
        R: RemoteCatalog + ?Sized,
    {
        let result = remote.fetch_page(&self.remote_query).await;
        FetchOutcome {
            ticket: self,
            result,
        }
    }
}

/// Response to a [`FetchTicket`], waiting to be handed to [`QueryEngine::complete`].
#[derive(Debug)]
pub struct FetchOutcome {
    ticket: FetchTicket,
    result: SourceResult<CatalogPage>,
}

impl FetchOutcome {
    pub const fn generation(&self) -> RequestGeneration {
        self.ticket.generation
    }
}

/// What [`QueryEngine::complete`] did with a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Response rendered as the current page.
    Applied,
    /// Requested page was past the end; the query now points at the last
    /// valid page and needs another fetch.
    Clamped,
    /// Response belonged to a superseded request and was dropped.
    Stale,
    /// First remote answer was unusable; local fallback is now active.
    FellBack,
    /// Remote request failed; the previous page stays on screen.
    Failed,
}

pub struct QueryEngine<R, L> {
    remote: Arc<R>,
    local: L,
    settings: EngineSettings,
    query: CatalogQuery,
    state: EngineState,
    mode: SourceMode,
    issued: RequestGeneration,
    remote_settled: bool,
    collection: Option<Vec<CatalogItem>>,
    current: Option<PageResult>,
}

impl<R, L> QueryEngine<R, L>
where
    R: RemoteCatalog,
    L: LocalCatalog,
{
    pub fn new(remote: R, local: L, settings: EngineSettings) -> Self {
        Self::with_shared_remote(Arc::new(remote), local, settings)
    }

    pub fn with_shared_remote(remote: Arc<R>, local: L, settings: EngineSettings) -> Self {
        Self {
            remote,
            local,
            settings,
            query: CatalogQuery::default(),
            state: EngineState::Idle,
            mode: SourceMode::Remote,
            issued: RequestGeneration::default(),
            remote_settled: false,
            collection: None,
            current: None,
        }
    }

    pub fn remote(&self) -> Arc<R> {
        Arc::clone(&self.remote)
    }

    pub const fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub const fn state(&self) -> EngineState {
        self.state
    }

    pub const fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn current(&self) -> Option<&PageResult> {
        self.current.as_ref()
    }

    /// Replaces the query and invalidates any in-flight request.
    pub fn apply(&mut self, change: QueryChange) {
        self.query = self.query.with_change(change);
        self.issued = self.issued.next();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.apply(QueryChange::Criteria(criteria));
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.apply(QueryChange::Sort(sort));
    }

    pub fn set_page(&mut self, page: usize) {
        self.apply(QueryChange::Page(page));
    }

    /// Starts a query cycle for the current query.
    ///
    /// In remote mode this issues a new request generation and returns the
    /// ticket to fetch. In fallback mode the page is recomputed synchronously
    /// and `None` is returned.
    pub fn begin(&mut self) -> Option<FetchTicket> {
        match self.mode {
            SourceMode::Fallback => {
                self.recompute_local();
                None
            }
            SourceMode::Remote => {
                self.issued = self.issued.next();
                self.state = EngineState::Loading;
                let remote_query = RemoteQuery::build(
                    &self.query.criteria,
                    self.query.sort,
                    self.query.page,
                    self.settings.page_size,
                );
                Some(FetchTicket {
                    generation: self.issued,
                    query: self.query.clone(),
                    remote_query,
                })
            }
        }
    }

    /// Applies a remote response if it answers the latest request.
    pub async fn complete(&mut self, outcome: FetchOutcome) -> EngineResult<Resolution> {
        let FetchOutcome { ticket, result } = outcome;
        if self.mode != SourceMode::Remote || ticket.generation != self.issued {
            log::debug!(
                "Discarding stale catalog response #{} (latest #{})",
                ticket.generation.get(),
                self.issued.get()
            );
            return Ok(Resolution::Stale);
        }

        let page = match result {
            Ok(page) => page,
            Err(err) if !self.remote_settled => {
                log::error!("Remote catalog failed on first load: {err}");
                self.state = EngineState::Failed;
                self.fall_back().await?;
                return Ok(Resolution::FellBack);
            }
            Err(err) => {
                log::warn!("Remote catalog request failed, keeping previous page: {err}");
                self.state = EngineState::Failed;
                return Ok(Resolution::Failed);
            }
        };

        let window = paginate(page.total, self.settings.page_size, ticket.query.page);
        if window.page != ticket.query.page {
            log::debug!(
                "Requested page {} is past the end, moving to page {}",
                ticket.query.page,
                window.page
            );
            self.query = self.query.with_change(QueryChange::Page(window.page));
            return Ok(Resolution::Clamped);
        }

        if !self.remote_settled && page.items.is_empty() {
            log::warn!("Remote catalog returned no items on first load, using local fallback");
            self.fall_back().await?;
            return Ok(Resolution::FellBack);
        }

        self.remote_settled = true;
        self.current = Some(Paginated::new(
            page.items,
            page.total,
            window,
            self.settings.window_size,
        ));
        self.state = EngineState::Ready;
        Ok(Resolution::Applied)
    }

    /// Runs one full query cycle for the current query.
    ///
    /// A failed remote request after the first successful one leaves the
    /// previous page in place with [`EngineState::Failed`].
    pub async fn refresh(&mut self) -> EngineResult<&PageResult> {
        // A clamped page costs one extra round trip at most.
        for _ in 0..2 {
            let Some(ticket) = self.begin() else {
                if self.collection.is_none() {
                    self.fall_back().await?;
                }
                break;
            };

            let remote = Arc::clone(&self.remote);
            let outcome = ticket.fetch(remote.as_ref()).await;
            if self.complete(outcome).await? != Resolution::Clamped {
                break;
            }
        }

        if self.state == EngineState::Loading {
            log::warn!(
                "Result set shrank again after clamping to page {}",
                self.query.page
            );
            self.state = EngineState::Failed;
        }

        self.current.as_ref().ok_or(EngineError::NotReady)
    }

    async fn fall_back(&mut self) -> EngineResult<()> {
        self.mode = SourceMode::Fallback;
        self.issued = self.issued.next();

        match self.local.fetch_all().await {
            Ok(items) => {
                log::info!("Serving catalog from local collection ({} items)", items.len());
                self.collection = Some(items);
                self.recompute_local();
                Ok(())
            }
            Err(err) => {
                log::error!("Local catalog failed to load: {err}");
                self.state = EngineState::Failed;
                Err(EngineError::FallbackUnavailable(err))
            }
        }
    }

    fn recompute_local(&mut self) {
        let Some(items) = &self.collection else {
            return;
        };

        let request = PageRequest::new(self.query.page, self.settings.page_size);
        let page = run_local(items, &self.query.criteria, self.query.sort, request);

        if page.window.page != self.query.page {
            self.query = self.query.with_change(QueryChange::Page(page.window.page));
        }
        self.current = Some(Paginated::new(
            page.items,
            page.total,
            page.window,
            self.settings.window_size,
        ));
        self.state = EngineState::Ready;
    }
}
