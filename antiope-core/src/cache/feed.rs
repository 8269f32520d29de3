//! Per-category article cache with time-to-live

use heapless::{String, Vec};

use crate::grid::COLUMNS;
use crate::page::content::MAX_SOURCE_LINE;
use crate::page::registry::Category;

/// Articles per category; detail pages address 1-9
pub const MAX_ARTICLES: usize = 9;

/// Body lines per article
pub const MAX_ARTICLE_LINES: usize = 8;

/// Cache time-to-live in milliseconds (5 minutes)
pub const FEED_TTL_MS: u32 = 300_000;

/// One fetched article: a headline plus body lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Article {
    pub title: String<COLUMNS>,
    pub lines: Vec<String<MAX_SOURCE_LINE>, MAX_ARTICLE_LINES>,
}

impl Article {
    /// Build an article from a headline, clipping to capacity
    pub fn new(title: &str) -> Self {
        let mut t = String::new();
        for ch in title.chars() {
            if t.push(ch).is_err() {
                break;
            }
        }
        Self {
            title: t,
            lines: Vec::new(),
        }
    }

    /// Append a body line, clipping to capacity; excess lines dropped
    pub fn push_line(&mut self, text: &str) {
        let mut line: String<MAX_SOURCE_LINE> = String::new();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        let _ = self.lines.push(line);
    }
}

/// The articles of one category
pub type ArticleSet = Vec<Article, MAX_ARTICLES>;

#[derive(Debug, Clone)]
struct Slot {
    articles: ArticleSet,
    age_ms: u32,
}

/// Cache of fetched feed content, one slot per category
#[derive(Debug, Clone, Default)]
pub struct FeedCache {
    slots: [Option<Slot>; Category::COUNT],
}

impl FeedCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fetched article set, resetting its age
    pub fn store(&mut self, category: Category, articles: ArticleSet) {
        self.slots[category.index()] = Some(Slot {
            articles,
            age_ms: 0,
        });
    }

    /// The cached articles for a category, if still within the TTL
    pub fn get(&self, category: Category) -> Option<&ArticleSet> {
        self.slots[category.index()]
            .as_ref()
            .filter(|slot| slot.age_ms < FEED_TTL_MS)
            .map(|slot| &slot.articles)
    }

    /// Whether a category has fresh content
    pub fn has_fresh(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Age all slots; entries past the TTL are evicted
    pub fn tick(&mut self, delta_ms: u32) {
        for slot in self.slots.iter_mut() {
            if let Some(s) = slot {
                s.age_ms = s.age_ms.saturating_add(delta_ms);
                if s.age_ms >= FEED_TTL_MS {
                    *slot = None;
                }
            }
        }
    }

    /// Drop everything
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_article(title: &str) -> ArticleSet {
        let mut set = ArticleSet::new();
        let mut article = Article::new(title);
        article.push_line("body line");
        let _ = set.push(article);
        set
    }

    #[test]
    fn test_store_and_get() {
        let mut cache = FeedCache::new();
        assert!(cache.get(Category::News).is_none());
        cache.store(Category::News, one_article("HEADLINE"));
        let set = cache.get(Category::News).unwrap();
        assert_eq!(set[0].title.as_str(), "HEADLINE");
        // Other categories unaffected
        assert!(cache.get(Category::Sport).is_none());
    }

    #[test]
    fn test_ttl_expiry() {
        let mut cache = FeedCache::new();
        cache.store(Category::Weather, one_article("SUNNY"));
        cache.tick(FEED_TTL_MS - 1);
        assert!(cache.has_fresh(Category::Weather));
        cache.tick(1);
        assert!(!cache.has_fresh(Category::Weather));
    }

    #[test]
    fn test_store_resets_age() {
        let mut cache = FeedCache::new();
        cache.store(Category::News, one_article("OLD"));
        cache.tick(FEED_TTL_MS - 1);
        cache.store(Category::News, one_article("NEW"));
        cache.tick(FEED_TTL_MS - 1);
        let set = cache.get(Category::News).unwrap();
        assert_eq!(set[0].title.as_str(), "NEW");
    }

    #[test]
    fn test_article_capacity_clipped() {
        let mut article = Article::new("T");
        for _ in 0..MAX_ARTICLE_LINES + 4 {
            article.push_line("line");
        }
        assert_eq!(article.lines.len(), MAX_ARTICLE_LINES);
    }

    #[test]
    fn test_clear() {
        let mut cache = FeedCache::new();
        cache.store(Category::News, one_article("A"));
        cache.store(Category::Sport, one_article("B"));
        cache.clear();
        assert!(!cache.has_fresh(Category::News));
        assert!(!cache.has_fresh(Category::Sport));
    }
}
