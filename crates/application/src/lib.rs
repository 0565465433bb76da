//! Application state layer for BookVerse.
//!
//! [`AppContext`] is the root controller: it owns the active page, the book
//! picked for the detail page and the last header search. Views never mutate
//! it directly; they hand back an [`Intent`] that the UI applies here.

use bookverse_catalog::Catalog;
use bookverse_core::{Book, BookId, Page, Settings};

mod filter;
mod toggle;

pub use filter::{
    ACTIVE_MIN_BOOKS, BookFilter, FriendChip, POPULAR_MIN_BOOKS, PersonFilter,
    SIMILAR_TASTE_MIN_MATCH, SortOrder, group_matches, matches_query,
};
pub use toggle::ToggleSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Navigate(Page),
    OpenBook(BookId),
    /// Open a book known only by title (feed entries, group picks).
    OpenTitle(String),
    Search(String),
    /// Search page with no query.
    Browse,
}

#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub catalog: Catalog,
    pub page: Page,
    pub selected_book: Option<BookId>,
    pub search_query: String,
}

impl AppContext {
    pub fn new(settings: Settings, catalog: Catalog) -> Self {
        let page = settings.start_page;
        Self {
            settings,
            catalog,
            page,
            selected_book: None,
            search_query: String::new(),
        }
    }

    pub fn with_start_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn navigate(&mut self, page: Page) {
        tracing::debug!(from = %self.page, to = %page, "navigate");
        self.page = page;
    }

    /// String tags from outside (env, config) go through the home fallback.
    pub fn navigate_tag(&mut self, tag: &str) {
        self.navigate(Page::from_tag(tag));
    }

    pub fn open_book(&mut self, id: BookId) {
        self.selected_book = self.catalog.book(id).map(|b| b.id);
        self.navigate(Page::Book);
    }

    /// An unknown title clears the selection; the book page then shows its
    /// not-found state.
    pub fn open_title(&mut self, title: &str) {
        self.selected_book = self.catalog.find_by_title(title).map(|b| b.id);
        if self.selected_book.is_none() {
            tracing::debug!(title, "no catalog entry for title");
        }
        self.navigate(Page::Book);
    }

    /// Blank queries are ignored. Returns whether the search ran.
    pub fn submit_search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        tracing::info!(query, "search");
        self.search_query = query.to_string();
        self.navigate(Page::Search);
        true
    }

    pub fn browse(&mut self) {
        self.search_query.clear();
        self.navigate(Page::Search);
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Navigate(page) => self.navigate(page),
            Intent::OpenBook(id) => self.open_book(id),
            Intent::OpenTitle(title) => self.open_title(&title),
            Intent::Search(query) => {
                self.submit_search(&query);
            }
            Intent::Browse => self.browse(),
        }
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.selected_book.and_then(|id| self.catalog.book(id))
    }
}
