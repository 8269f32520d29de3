//! Page registry, routing and fallback pages
//!
//! The store is built once from the terminal configuration. Routing is
//! total: every page number resolves to static content, a feed index,
//! a feed article, or `Unknown` - which presents a "not found" page
//! rather than an error.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::cache::feed::{Article, MAX_ARTICLES};
use crate::config::types::{
    StaticPageConfig, TerminalConfig, MAX_FEEDS, MAX_PAGES, MAX_TITLE_LEN,
};
use crate::grid::COLUMNS;
use crate::page::content::{PageContent, MAX_SOURCE_LINE};

/// Feed categories served by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    News,
    Sport,
    Weather,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 3;

    /// All categories in wire-code order
    pub const ALL: [Category; Self::COUNT] = [Category::News, Category::Sport, Category::Weather];

    /// Slot index for per-category storage
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name, as used in the configuration
    pub fn name(self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Sport => "sport",
            Category::Weather => "weather",
        }
    }

    /// Look up a category by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        Category::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Wire code for the gateway link
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse a wire code back into a category
    pub fn from_code(code: u8) -> Option<Self> {
        Category::ALL.get(code as usize).copied()
    }
}

/// A configured feed route with its category resolved
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedRoute {
    pub category: Category,
    /// Index page number; articles live on the nine pages after it
    pub page: u16,
    pub title: String<MAX_TITLE_LEN>,
}

/// Where a page number leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// A configured static page (index into the store)
    Static(usize),
    /// A feed index page (index into the feed routes)
    FeedIndex(usize),
    /// A feed article page; `article` is 1-based
    FeedDetail { feed: usize, article: u8 },
    /// Nothing registered here
    Unknown,
}

/// The page registry
#[derive(Debug, Clone)]
pub struct PageStore {
    service_name: String<MAX_TITLE_LEN>,
    home_page: u16,
    pages: Vec<StaticPageConfig, MAX_PAGES>,
    feeds: Vec<FeedRoute, MAX_FEEDS>,
}

impl PageStore {
    /// Build the store from a parsed configuration.
    ///
    /// Feed routes naming an unknown category are dropped.
    pub fn from_config(config: TerminalConfig) -> Self {
        let mut feeds = Vec::new();
        for feed in &config.feeds {
            if let Some(category) = Category::from_name(feed.category.as_str()) {
                let _ = feeds.push(FeedRoute {
                    category,
                    page: feed.page,
                    title: feed.title.clone(),
                });
            }
        }
        Self {
            service_name: config.service_name,
            home_page: config.home_page,
            pages: config.pages,
            feeds,
        }
    }

    /// Service name used on fallback pages
    pub fn service_name(&self) -> &str {
        self.service_name.as_str()
    }

    /// The boot / index page number
    pub fn home_page(&self) -> u16 {
        self.home_page
    }

    /// Route a page number. Static pages win over feed bands.
    ///
    /// The article index of a detail page is the last digit of the page
    /// number, so article 1 of a band starting at 200 is page 201.
    pub fn route(&self, page: u16) -> Route {
        if let Some(i) = self.pages.iter().position(|p| p.number == page) {
            return Route::Static(i);
        }
        for (i, feed) in self.feeds.iter().enumerate() {
            if page == feed.page {
                return Route::FeedIndex(i);
            }
            if page > feed.page && page <= feed.page + MAX_ARTICLES as u16 {
                return Route::FeedDetail {
                    feed: i,
                    article: (page % 10) as u8,
                };
            }
        }
        Route::Unknown
    }

    /// Static page record by store index
    pub fn static_page(&self, index: usize) -> Option<&StaticPageConfig> {
        self.pages.get(index)
    }

    /// Feed route by store index
    pub fn feed(&self, index: usize) -> Option<&FeedRoute> {
        self.feeds.get(index)
    }
}

/// Centre a line within the grid width
fn centered(text: &str) -> String<MAX_SOURCE_LINE> {
    let mut out = String::new();
    let width = text.chars().count();
    for _ in 0..COLUMNS.saturating_sub(width) / 2 {
        let _ = out.push(' ');
    }
    let _ = out.push_str(text);
    out
}

/// Content of a configured static page
pub fn static_content(page: &StaticPageConfig) -> PageContent {
    let mut content = PageContent::new();
    for line in &page.lines {
        content.push_line(line.as_str());
    }
    for mark in &page.colors {
        let _ = content.colors.push(mark.clone());
    }
    content
}

/// The "page not found" block for an unregistered page number
pub fn not_found(page: u16, home: u16) -> PageContent {
    let mut content = PageContent::new();
    let mut headline: String<MAX_SOURCE_LINE> = String::new();
    let _ = write!(headline, "PAGE {} NOT FOUND", page);
    let mut hint: String<MAX_SOURCE_LINE> = String::new();
    let _ = write!(hint, "SEE PAGE {} FOR THE INDEX", home);

    content.push_line("");
    content.push_line(centered(headline.as_str()).as_str());
    content.push_line("");
    content.push_line(centered("THIS PAGE IS NOT IN SERVICE").as_str());
    content.push_line("");
    content.push_line(centered(hint.as_str()).as_str());
    content.mark(1, 0, "yellow");
    content.mark(5, 0, "cyan");
    content
}

/// The fallback block shown when a feed cannot be fetched
pub fn service_unavailable(home: u16) -> PageContent {
    let mut content = PageContent::new();
    let mut hint: String<MAX_SOURCE_LINE> = String::new();
    let _ = write!(hint, "SEE PAGE {} FOR THE INDEX", home);

    content.push_line("");
    content.push_line(centered("SERVICE TEMPORARILY UNAVAILABLE").as_str());
    content.push_line("");
    content.push_line(centered("PLEASE TRY AGAIN IN A MOMENT").as_str());
    content.push_line("");
    content.push_line(centered(hint.as_str()).as_str());
    content.mark(1, 0, "yellow");
    content.mark(5, 0, "cyan");
    content
}

/// The index page of a feed: numbered headlines plus a band hint
pub fn feed_summary(route: &FeedRoute, articles: &[Article]) -> PageContent {
    let mut content = PageContent::new();
    content.push_line("");

    for (i, article) in articles.iter().take(MAX_ARTICLES).enumerate() {
        let mut line: String<MAX_SOURCE_LINE> = String::new();
        let _ = write!(line, "{} ", i + 1);
        let _ = line.push_str(article.title.as_str());
        let row = content.line_count() as u8;
        content.push_line(line.as_str());
        content.mark(row, 0, "cyan");
        content.mark(row, 2, "white");
    }

    content.push_line("");
    let mut hint: String<MAX_SOURCE_LINE> = String::new();
    let _ = write!(
        hint,
        "ARTICLES ON PAGES {}-{}",
        route.page + 1,
        route.page + articles.len().max(1) as u16
    );
    let row = content.line_count() as u8;
    content.push_line(hint.as_str());
    content.mark(row, 0, "cyan");
    content
}

/// A single article page
pub fn feed_article(article: &Article, index: u8, count: usize) -> PageContent {
    let mut content = PageContent::new();
    content.push_line(article.title.as_str());
    content.mark(0, 0, "yellow");
    content.push_line("");
    for line in &article.lines {
        content.push_line(line.as_str());
    }
    content.push_line("");
    let mut footer: String<MAX_SOURCE_LINE> = String::new();
    let _ = write!(footer, "ARTICLE {} OF {}", index, count);
    let row = content.line_count() as u8;
    content.push_line(footer.as_str());
    content.mark(row, 0, "cyan");
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::FeedRouteConfig;

    fn title(text: &str) -> String<MAX_TITLE_LEN> {
        let mut t = String::new();
        let _ = t.push_str(text);
        t
    }

    fn category(text: &str) -> String<8> {
        let mut c = String::new();
        let _ = c.push_str(text);
        c
    }

    fn joined(content: &PageContent) -> String<512> {
        let mut out = String::new();
        for line in &content.lines {
            let _ = out.push_str(line.as_str());
            let _ = out.push('\n');
        }
        out
    }

    fn store_with_news() -> PageStore {
        let mut config = TerminalConfig::new();
        let _ = config.service_name.push_str("ANTIOPE");
        config.home_page = 100;

        let mut index = StaticPageConfig::default();
        index.number = 100;
        index.title = title("INDEX");
        let mut line: String<MAX_SOURCE_LINE> = String::new();
        let _ = line.push_str("NEWS....200");
        let _ = index.lines.push(line);
        let _ = config.pages.push(index);

        let _ = config.feeds.push(FeedRouteConfig {
            category: category("news"),
            page: 200,
            title: title("NEWS"),
        });
        PageStore::from_config(config)
    }

    #[test]
    fn test_static_route() {
        let store = store_with_news();
        assert_eq!(store.route(100), Route::Static(0));
    }

    #[test]
    fn test_feed_routes() {
        let store = store_with_news();
        assert_eq!(store.route(200), Route::FeedIndex(0));
        assert_eq!(
            store.route(201),
            Route::FeedDetail { feed: 0, article: 1 }
        );
        assert_eq!(
            store.route(209),
            Route::FeedDetail { feed: 0, article: 9 }
        );
        assert_eq!(store.route(210), Route::Unknown);
    }

    #[test]
    fn test_unknown_route() {
        let store = store_with_news();
        assert_eq!(store.route(999), Route::Unknown);
        assert_eq!(store.route(0), Route::Unknown);
    }

    #[test]
    fn test_unknown_category_dropped() {
        let mut config = TerminalConfig::new();
        let _ = config.feeds.push(FeedRouteConfig {
            category: category("stocks"),
            page: 500,
            title: title("STOCKS"),
        });
        let store = PageStore::from_config(config);
        assert_eq!(store.route(500), Route::Unknown);
    }

    #[test]
    fn test_not_found_names_the_page() {
        let text = joined(&not_found(999, 100));
        assert!(text.as_str().contains("NOT FOUND"));
        assert!(text.as_str().contains("999"));
        assert!(text.as_str().contains("100"));
    }

    #[test]
    fn test_unavailable_suggests_home() {
        let text = joined(&service_unavailable(100));
        assert!(text.as_str().contains("UNAVAILABLE"));
        assert!(text.as_str().contains("100"));
    }

    #[test]
    fn test_feed_summary_numbers_headlines() {
        let store = store_with_news();
        let route = store.feed(0).unwrap();
        let articles = [Article::new("FIRST"), Article::new("SECOND")];
        let content = feed_summary(route, &articles);
        assert!(content.lines[1].as_str().starts_with("1 FIRST"));
        assert!(content.lines[2].as_str().starts_with("2 SECOND"));
    }

    #[test]
    fn test_category_wire_codes() {
        for category in Category::ALL {
            assert_eq!(Category::from_code(category.code()), Some(category));
            assert_eq!(Category::from_name(category.name()), Some(category));
        }
        assert_eq!(Category::from_code(3), None);
        assert_eq!(Category::from_name("NEWS"), None);
    }
}
