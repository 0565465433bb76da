use bookverse_application::{AppContext, BookFilter, Intent, SortOrder};
use bookverse_core::{Book, Genre};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph, Wrap};

use super::ViewAction;
use crate::widgets::{
    bold, book_item, cycle, highlight_style, list_state, muted, option_chip, star_span, step,
};

const FILTER_GENRES: [Genre; 8] = [
    Genre::Fiction,
    Genre::Mystery,
    Genre::Romance,
    Genre::SciFi,
    Genre::Biography,
    Genre::SelfHelp,
    Genre::Fantasy,
    Genre::History,
];

/// Sample results under rating and genre filters. The header query is only
/// echoed back; it never narrows the list.
#[derive(Debug)]
pub(crate) struct SearchView {
    filter: BookFilter,
    sort: SortOrder,
    show_filters: bool,
    genre_cursor: usize,
    selected: usize,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            filter: BookFilter::default(),
            sort: SortOrder::default(),
            show_filters: true,
            genre_cursor: 0,
            selected: 0,
        }
    }
}

impl SearchView {
    fn results<'a>(&self, ctx: &'a AppContext) -> Vec<&'a Book> {
        let mut books = self.filter.apply(&ctx.catalog.search_results());
        self.sort.sort(&mut books);
        books
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        match key.code {
            KeyCode::Up => {
                self.selected = step(self.selected, self.results(ctx).len(), -1);
                ViewAction::Handled
            }
            KeyCode::Down => {
                self.selected = step(self.selected, self.results(ctx).len(), 1);
                ViewAction::Handled
            }
            KeyCode::Enter => match self.results(ctx).get(self.selected) {
                Some(book) => Intent::OpenBook(book.id).into(),
                None => ViewAction::Handled,
            },
            KeyCode::Char('o') => {
                self.sort = self.sort.next();
                ViewAction::Handled
            }
            KeyCode::Char('f') => {
                self.show_filters = !self.show_filters;
                ViewAction::Handled
            }
            KeyCode::Char('c') => {
                self.filter.clear_filters();
                self.selected = 0;
                ViewAction::Handled
            }
            _ if self.show_filters => self.handle_filter_key(key),
            _ => ViewAction::Ignored,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> ViewAction {
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.filter.min_rating = self.filter.min_rating.step_up();
            }
            KeyCode::Char('-') => {
                self.filter.min_rating = self.filter.min_rating.step_down();
            }
            KeyCode::Left => {
                self.genre_cursor = cycle(self.genre_cursor, FILTER_GENRES.len(), -1);
                return ViewAction::Handled;
            }
            KeyCode::Right => {
                self.genre_cursor = cycle(self.genre_cursor, FILTER_GENRES.len(), 1);
                return ViewAction::Handled;
            }
            KeyCode::Char(' ') => {
                self.filter.genres.toggle(FILTER_GENRES[self.genre_cursor]);
            }
            _ => return ViewAction::Ignored,
        }
        self.selected = 0;
        ViewAction::Handled
    }

    pub(crate) fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = vec![("↑/↓", "move"), ("Enter", "open"), ("o", "sort")];
        if self.show_filters {
            hints.extend([("+/-", "rating"), ("←/→ Space", "genre"), ("c", "clear")]);
        }
        hints.push(("f", "filters"));
        hints
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.settings.theme;
        let results = self.results(ctx);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let query = ctx.search_query.trim();
        let summary = if query.is_empty() {
            "Browse all books".to_string()
        } else {
            format!("Showing results for \"{query}\"")
        };
        let header = Paragraph::new(Text::from(vec![
            Line::styled("Search Results", bold()),
            Line::from(vec![
                Span::raw(summary),
                Span::styled(format!(" ({} books found)", results.len()), muted()),
            ]),
            Line::from(vec![
                Span::styled("Sort: ", bold()),
                Span::raw(self.sort.label()),
            ]),
        ]));
        frame.render_widget(header, layout[0]);

        let results_area = if self.show_filters {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(30), Constraint::Min(0)])
                .split(layout[1]);
            self.draw_filters(frame, body[0], ctx);
            body[1]
        } else {
            layout[1]
        };

        if results.is_empty() {
            let empty = Paragraph::new(Text::from(vec![
                Line::raw(""),
                Line::styled("No books found", bold()),
                Line::styled("Try adjusting your filters or search terms", muted()),
                Line::raw(""),
                Line::raw("Press c to clear all filters"),
            ]))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, results_area);
            return;
        }

        let width = results_area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = results
            .iter()
            .map(|book| book_item(book, ctx.settings.star_style, width))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(highlight_style(theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = list_state(self.selected, results.len());
        frame.render_stateful_widget(list, results_area, &mut state);
    }

    fn draw_filters(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let rating = self.filter.min_rating;
        let rating_line = if rating.is_zero() {
            Line::styled("Any", muted())
        } else {
            Line::from(vec![
                star_span(rating.value(), ctx.settings.star_style),
                Span::raw(format!(" {rating}+ stars")),
            ])
        };

        let mut lines = vec![
            Line::styled("Minimum Rating", bold()),
            rating_line,
            Line::raw(""),
            Line::styled("Genres", bold()),
        ];
        for (idx, genre) in FILTER_GENRES.iter().enumerate() {
            let checked = self.filter.genres.contains(genre);
            let mark = if checked { "[x]" } else { "[ ]" };
            lines.push(Line::from(vec![
                Span::raw(format!("{mark} ")),
                option_chip(genre.label(), checked, idx == self.genre_cursor),
            ]));
        }
        if self.filter.has_filters() {
            lines.push(Line::raw(""));
            lines.push(Line::styled("c clear all filters", muted()));
        }

        let panel = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title("Filters"));
        frame.render_widget(panel, area);
    }
}
