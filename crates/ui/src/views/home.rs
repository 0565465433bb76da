use bookverse_application::{AppContext, BookFilter, Intent};
use bookverse_core::{Book, Genre};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
};

use super::ViewAction;
use crate::widgets::{
    accent_color, bold, book_item, cycle, highlight_style, muted, option_chip, step,
};

/// "For You" page. Chip 0 is "All"; the rest follow the configured genres.
#[derive(Debug, Default)]
pub(crate) struct HomeView {
    genre_idx: usize,
    selected: usize,
}

impl HomeView {
    fn selected_genre(&self, ctx: &AppContext) -> Option<Genre> {
        self.genre_idx
            .checked_sub(1)
            .and_then(|idx| ctx.settings.home_genres.get(idx).copied())
    }

    fn curated<'a>(&self, ctx: &'a AppContext) -> Vec<&'a Book> {
        let mut filter = BookFilter::default();
        filter.genres.select_only(self.selected_genre(ctx));
        filter.apply(&ctx.catalog.home_picks())
    }

    /// Curated picks followed by trending titles, in display order.
    fn entries<'a>(&self, ctx: &'a AppContext) -> Vec<&'a Book> {
        let mut books = self.curated(ctx);
        books.extend(ctx.catalog.trending());
        books
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        let chips = ctx.settings.home_genres.len() + 1;
        match key.code {
            KeyCode::Left => {
                self.genre_idx = cycle(self.genre_idx.min(chips - 1), chips, -1);
                self.selected = 0;
                ViewAction::Handled
            }
            KeyCode::Right => {
                self.genre_idx = cycle(self.genre_idx.min(chips - 1), chips, 1);
                self.selected = 0;
                ViewAction::Handled
            }
            KeyCode::Up => {
                self.selected = step(self.selected, self.entries(ctx).len(), -1);
                ViewAction::Handled
            }
            KeyCode::Down => {
                self.selected = step(self.selected, self.entries(ctx).len(), 1);
                ViewAction::Handled
            }
            KeyCode::Enter => match self.entries(ctx).get(self.selected) {
                Some(book) => Intent::OpenBook(book.id).into(),
                None => ViewAction::Handled,
            },
            KeyCode::Char('b') => Intent::Browse.into(),
            _ => ViewAction::Ignored,
        }
    }

    pub(crate) fn hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("←/→", "genre"),
            ("↑/↓", "move"),
            ("Enter", "open"),
            ("b", "browse books"),
        ]
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.settings.theme;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let hero = Paragraph::new(Text::from(vec![
            Line::styled(
                "Discover Your Next Great Read",
                bold().fg(accent_color(theme)),
            ),
            Line::styled(
                "Personalized recommendations powered by AI insights from millions of readers",
                muted(),
            ),
        ]))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(hero, layout[0]);

        let selected_genre = self.selected_genre(ctx);
        let mut chips = vec![option_chip("All", selected_genre.is_none(), false)];
        for genre in &ctx.settings.home_genres {
            chips.push(Span::raw(" "));
            chips.push(option_chip(
                genre.label(),
                selected_genre == Some(*genre),
                false,
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(chips)), layout[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[2]);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(body[1]);

        let curated = self.curated(ctx);
        let style = ctx.settings.star_style;
        let width = body[0].width.saturating_sub(6) as usize;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Curated For You", bold()))
            .title_bottom(Line::styled(
                " Based on your reading history and preferences ",
                muted(),
            ));
        if curated.is_empty() {
            let genre = selected_genre.map(|g| g.label()).unwrap_or("this genre");
            let empty = Paragraph::new(Line::styled(format!("No picks in {genre} yet."), muted()))
                .block(block);
            frame.render_widget(empty, body[0]);
        } else {
            let items: Vec<ListItem> = curated
                .iter()
                .map(|book| book_item(book, style, width))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(highlight_style(theme))
                .highlight_symbol("> ")
                .highlight_spacing(HighlightSpacing::Always);
            let mut state = ListState::default();
            state.select((self.selected < curated.len()).then_some(self.selected));
            frame.render_stateful_widget(list, body[0], &mut state);
        }

        let trending = ctx.catalog.trending();
        let width = body[1].width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = trending
            .iter()
            .map(|book| book_item(book, style, width))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Trending Now", bold()))
                    .title_bottom(Line::styled(" What everyone's reading this week ", muted())),
            )
            .highlight_style(highlight_style(theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = ListState::default();
        state.select(self.selected.checked_sub(curated.len()));
        frame.render_stateful_widget(list, side[0], &mut state);

        let stats: Vec<Line> = ctx
            .catalog
            .home_stats
            .iter()
            .map(|(value, label)| {
                Line::from(vec![
                    Span::styled(format!("{value:>6} "), bold().fg(accent_color(theme))),
                    Span::raw(label.clone()),
                ])
            })
            .collect();
        let stats = Paragraph::new(Text::from(stats))
            .block(Block::default().borders(Borders::ALL).title("Reading Stats"));
        frame.render_widget(stats, side[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{ctx, key, render};
    use bookverse_core::BookId;

    #[test]
    fn genre_chip_filters_curated_list() {
        let ctx = ctx();
        let mut view = HomeView::default();
        assert_eq!(view.curated(&ctx).len(), 4);

        // All, Fiction, Mystery, Romance, Sci-Fi
        for _ in 0..4 {
            view.handle_key(key(KeyCode::Right), &ctx);
        }
        assert_eq!(view.selected_genre(&ctx), Some(Genre::SciFi));
        let titles: Vec<&str> = view.curated(&ctx).iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Project Hail Mary"]);

        view.handle_key(key(KeyCode::Left), &ctx);
        view.handle_key(key(KeyCode::Left), &ctx);
        assert_eq!(view.selected_genre(&ctx), Some(Genre::Mystery));
        assert!(view.curated(&ctx).is_empty());
    }

    #[test]
    fn enter_opens_trending_after_curated() {
        let ctx = ctx();
        let mut view = HomeView::default();
        for _ in 0..4 {
            view.handle_key(key(KeyCode::Down), &ctx);
        }
        assert_eq!(
            view.handle_key(key(KeyCode::Enter), &ctx),
            ViewAction::Intent(Intent::OpenBook(BookId(4)))
        );
        assert_eq!(
            view.handle_key(key(KeyCode::Char('b')), &ctx),
            ViewAction::Intent(Intent::Browse)
        );
    }

    #[test]
    fn renders_sections() -> anyhow::Result<()> {
        let ctx = ctx();
        let view = HomeView::default();
        let screen = render(120, 40, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(screen.contains("Discover Your Next Great Read"));
        assert!(screen.contains("Curated For You"));
        assert!(screen.contains("Trending Now"));
        assert!(screen.contains("Recommendation Accuracy"));
        Ok(())
    }
}
