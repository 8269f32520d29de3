//! The boot / clear / display state machine
//!
//! Timing is tick-driven: the runtime reports elapsed milliseconds and
//! the sequencer counts its own holds down, so the whole machine runs
//! deterministically under test. There is exactly one pending timer at
//! any moment; re-navigation overwrites it instead of racing it.

use crate::cache::feed::{ArticleSet, FeedCache};
use crate::clock::TimeOfDay;
use crate::compose::{compose_page, format_header};
use crate::page::content::PageContent;
use crate::page::registry::{
    feed_article, feed_summary, not_found, service_unavailable, static_content, Category,
    PageStore, Route,
};

use super::output::{FetchRequest, Output, RenderRequest};

/// Hold in the boot screen before the first page turn
pub const BOOT_HOLD_MS: u32 = 1_000;

/// Blanked-screen hold during a page turn
pub const CLEAR_HOLD_MS: u32 = 100;

/// Hard ceiling on a page turn; a fetch still pending at this point is
/// treated as failed so the page always appears in time
pub const PAGE_TURN_BUDGET_MS: u32 = 500;

/// Top-level display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Power-on hold before the first page
    Booting,
    /// Blanked display while the next page is prepared
    Clearing,
    /// A page is on screen
    Displaying,
}

/// Progress of the fetch tied to the current page turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedWait {
    /// The target page needs no fetch
    None,
    /// Waiting on the gateway; presentation holds until this resolves
    /// or the budget runs out
    Pending { budget_ms: u32 },
    /// Outcome received and cached
    Ready,
    /// Fetch failed or timed out; fall back at presentation
    Failed,
}

/// The screen sequencer
///
/// Owns the page registry and the feed cache so that content
/// resolution, fallbacks and staleness all live behind one interface.
#[derive(Debug)]
pub struct Sequencer {
    store: PageStore,
    cache: FeedCache,
    phase: Phase,
    page: u16,
    /// The single pending-timer slot, counted down by ticks
    hold_ms: u32,
    feed: FeedWait,
    /// Bumped on every page turn; stale fetch outcomes carry an old value
    generation: u16,
}

impl Sequencer {
    /// Create a sequencer booting towards the configured home page
    pub fn new(store: PageStore) -> Self {
        let page = store.home_page();
        Self {
            store,
            cache: FeedCache::new(),
            phase: Phase::Booting,
            page,
            hold_ms: BOOT_HOLD_MS,
            feed: FeedWait::None,
            generation: 0,
        }
    }

    /// Current display phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The page being displayed or transitioned to
    pub fn page(&self) -> u16 {
        self.page
    }

    /// Current fetch generation
    pub fn generation(&self) -> u16 {
        self.generation
    }

    /// The configured home page
    pub fn home_page(&self) -> u16 {
        self.store.home_page()
    }

    /// Begin navigation to a page.
    ///
    /// Ignored during the boot hold; the keypad goes live with the
    /// first page. Navigating to the page already on screen is a no-op.
    /// Otherwise the display blanks, any in-flight transition is
    /// superseded, and a fetch request is returned when the target
    /// needs feed content that is not cached.
    pub fn navigate(&mut self, page: u16) -> Option<FetchRequest> {
        if self.phase == Phase::Booting {
            return None;
        }
        if self.phase == Phase::Displaying && self.page == page {
            return None;
        }
        self.begin_turn(page)
    }

    /// Report the outcome of a fetch. `None` means the fetch failed.
    ///
    /// Outcomes whose generation does not match the current page turn
    /// are dropped without touching the cache or the phase. When the
    /// clearing hold has already elapsed, the page presents immediately.
    pub fn feed_delivered(
        &mut self,
        category: Category,
        generation: u16,
        articles: Option<ArticleSet>,
        clock: TimeOfDay,
    ) -> Option<RenderRequest> {
        if generation != self.generation {
            return None;
        }
        if !matches!(self.feed, FeedWait::Pending { .. }) {
            return None;
        }
        match articles {
            Some(set) => {
                self.cache.store(category, set);
                self.feed = FeedWait::Ready;
            }
            None => self.feed = FeedWait::Failed,
        }
        if self.phase == Phase::Clearing && self.hold_ms == 0 {
            return Some(self.present(clock));
        }
        None
    }

    /// Advance time by `delta_ms`.
    ///
    /// Drives the boot hold, the clearing hold, the fetch budget and
    /// cache aging. Returns a fetch request when the boot hold elapses
    /// into a feed page, or a render request when a page turn completes.
    pub fn tick(&mut self, delta_ms: u32, clock: TimeOfDay) -> Option<Output> {
        self.cache.tick(delta_ms);

        match self.phase {
            Phase::Booting => {
                self.hold_ms = self.hold_ms.saturating_sub(delta_ms);
                if self.hold_ms > 0 {
                    return None;
                }
                let page = self.page;
                self.begin_turn(page).map(Output::Fetch)
            }
            Phase::Clearing => {
                self.hold_ms = self.hold_ms.saturating_sub(delta_ms);
                if let FeedWait::Pending { budget_ms } = self.feed {
                    let budget = budget_ms.saturating_sub(delta_ms);
                    self.feed = if budget == 0 {
                        FeedWait::Failed
                    } else {
                        FeedWait::Pending { budget_ms: budget }
                    };
                }
                if self.hold_ms == 0 && !matches!(self.feed, FeedWait::Pending { .. }) {
                    return Some(Output::Render(self.present(clock)));
                }
                None
            }
            Phase::Displaying => None,
        }
    }

    /// Enter `Clearing` towards `page`, superseding any pending turn
    fn begin_turn(&mut self, page: u16) -> Option<FetchRequest> {
        self.page = page;
        self.phase = Phase::Clearing;
        self.hold_ms = CLEAR_HOLD_MS;
        self.generation = self.generation.wrapping_add(1);
        self.feed = FeedWait::None;

        let category = match self.store.route(page) {
            Route::FeedIndex(i) | Route::FeedDetail { feed: i, .. } => self
                .store
                .feed(i)
                .map(|f| f.category)
                .filter(|&c| !self.cache.has_fresh(c)),
            _ => None,
        };

        category.map(|category| {
            self.feed = FeedWait::Pending {
                budget_ms: PAGE_TURN_BUDGET_MS,
            };
            FetchRequest {
                category,
                generation: self.generation,
            }
        })
    }

    /// Enter `Displaying` and build the render request
    fn present(&mut self, clock: TimeOfDay) -> RenderRequest {
        self.phase = Phase::Displaying;
        let (title, content) = self.resolve();
        let mut title_out = heapless::String::new();
        let _ = title_out.push_str(title);
        RenderRequest {
            page: self.page,
            header: format_header(title, self.page, clock),
            title: title_out,
            grid: compose_page(&content),
        }
    }

    /// Resolve the target page to a title and content block.
    ///
    /// Total: unknown pages, cache misses, failed fetches and bad
    /// article indices all resolve to in-grid fallback blocks.
    fn resolve(&self) -> (&str, PageContent) {
        let home = self.store.home_page();
        match self.store.route(self.page) {
            Route::Static(i) => match self.store.static_page(i) {
                Some(page) => (page.title.as_str(), static_content(page)),
                None => (self.store.service_name(), not_found(self.page, home)),
            },
            Route::FeedIndex(i) => match self.store.feed(i) {
                Some(route) => match self.cache.get(route.category) {
                    Some(articles) => (route.title.as_str(), feed_summary(route, articles)),
                    None => (self.store.service_name(), service_unavailable(home)),
                },
                None => (self.store.service_name(), not_found(self.page, home)),
            },
            Route::FeedDetail { feed: i, article } => match self.store.feed(i) {
                Some(route) => match self.cache.get(route.category) {
                    Some(articles) => {
                        let index = (article as usize).checked_sub(1);
                        match index.and_then(|idx| articles.get(idx)) {
                            Some(a) => (
                                route.title.as_str(),
                                feed_article(a, article, articles.len()),
                            ),
                            None => (self.store.service_name(), not_found(self.page, home)),
                        }
                    }
                    None => (self.store.service_name(), service_unavailable(home)),
                },
                None => (self.store.service_name(), not_found(self.page, home)),
            },
            Route::Unknown => (self.store.service_name(), not_found(self.page, home)),
        }
    }
}
