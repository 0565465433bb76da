//! One module per page. A view owns only its local state; it is built when
//! its page becomes active and dropped when another page is shown.

use bookverse_application::{AppContext, Intent};
use bookverse_core::Page;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

mod book;
mod friends;
mod groups;
mod home;
mod library;
mod search;
mod social;

pub(crate) use book::BookView;
pub(crate) use friends::FriendsView;
pub(crate) use groups::GroupsView;
pub(crate) use home::HomeView;
pub(crate) use library::LibraryView;
pub(crate) use search::SearchView;
pub(crate) use social::SocialView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewAction {
    Ignored,
    Handled,
    Intent(Intent),
}

impl From<Intent> for ViewAction {
    fn from(intent: Intent) -> Self {
        ViewAction::Intent(intent)
    }
}

#[derive(Debug)]
pub(crate) enum ActiveView {
    Home(HomeView),
    Search(SearchView),
    Book(BookView),
    Library(LibraryView),
    Social(SocialView),
    Groups(GroupsView),
    Friends(FriendsView),
}

impl ActiveView {
    pub(crate) fn mount(ctx: &AppContext) -> Self {
        tracing::debug!(page = %ctx.page, "mount view");
        match ctx.page {
            Page::Home => ActiveView::Home(HomeView::default()),
            Page::Search => ActiveView::Search(SearchView::default()),
            Page::Book => ActiveView::Book(BookView::new(ctx.selected_book)),
            Page::Library => ActiveView::Library(LibraryView::new(&ctx.catalog)),
            Page::Social => ActiveView::Social(SocialView::new(&ctx.catalog)),
            Page::Groups => ActiveView::Groups(GroupsView::new(&ctx.catalog)),
            Page::FriendRecommendations => ActiveView::Friends(FriendsView::new(&ctx.catalog)),
        }
    }

    pub(crate) fn page(&self) -> Page {
        match self {
            ActiveView::Home(_) => Page::Home,
            ActiveView::Search(_) => Page::Search,
            ActiveView::Book(_) => Page::Book,
            ActiveView::Library(_) => Page::Library,
            ActiveView::Social(_) => Page::Social,
            ActiveView::Groups(_) => Page::Groups,
            ActiveView::Friends(_) => Page::FriendRecommendations,
        }
    }

    /// Whether this view was mounted for the context's current page and book.
    pub(crate) fn is_current(&self, ctx: &AppContext) -> bool {
        match self {
            ActiveView::Book(view) => ctx.page == Page::Book && view.book() == ctx.selected_book,
            _ => self.page() == ctx.page,
        }
    }

    /// True while a text field inside the view has focus; global shortcuts
    /// are suspended so every key reaches the field.
    pub(crate) fn captures_input(&self) -> bool {
        match self {
            ActiveView::Social(view) => view.captures_input(),
            ActiveView::Groups(view) => view.captures_input(),
            ActiveView::Friends(view) => view.captures_input(),
            _ => false,
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        match self {
            ActiveView::Home(view) => view.handle_key(key, ctx),
            ActiveView::Search(view) => view.handle_key(key, ctx),
            ActiveView::Book(view) => view.handle_key(key, ctx),
            ActiveView::Library(view) => view.handle_key(key, ctx),
            ActiveView::Social(view) => view.handle_key(key, ctx),
            ActiveView::Groups(view) => view.handle_key(key, ctx),
            ActiveView::Friends(view) => view.handle_key(key, ctx),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        match self {
            ActiveView::Home(view) => view.draw(frame, area, ctx),
            ActiveView::Search(view) => view.draw(frame, area, ctx),
            ActiveView::Book(view) => view.draw(frame, area, ctx),
            ActiveView::Library(view) => view.draw(frame, area, ctx),
            ActiveView::Social(view) => view.draw(frame, area, ctx),
            ActiveView::Groups(view) => view.draw(frame, area, ctx),
            ActiveView::Friends(view) => view.draw(frame, area, ctx),
        }
    }

    pub(crate) fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            ActiveView::Home(view) => view.hints(),
            ActiveView::Search(view) => view.hints(),
            ActiveView::Book(view) => view.hints(),
            ActiveView::Library(view) => view.hints(),
            ActiveView::Social(view) => view.hints(),
            ActiveView::Groups(view) => view.hints(),
            ActiveView::Friends(view) => view.hints(),
        }
    }
}
