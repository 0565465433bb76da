use bookverse_application::{AppContext, Intent};
use bookverse_catalog::Catalog;
use bookverse_core::{LibraryEntry, Shelf};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, HighlightSpacing, List, ListItem, Paragraph};

use super::ViewAction;
use crate::widgets::{
    accent_color, bold, cycle, format_count, highlight_style, list_state, muted, progress_bar,
    star_span, step, tab_line,
};

/// Pages moved per progress key press.
const PROGRESS_STEP: i32 = 10;

/// Shelves over a local copy of the library; progress edits die with the view.
#[derive(Debug)]
pub(crate) struct LibraryView {
    entries: Vec<LibraryEntry>,
    shelf: Shelf,
    selected: usize,
}

impl LibraryView {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        Self {
            entries: catalog.library.clone(),
            shelf: Shelf::CurrentlyReading,
            selected: 0,
        }
    }

    fn shelf_entries(&self, shelf: Shelf) -> Vec<&LibraryEntry> {
        self.entries.iter().filter(|e| e.shelf == shelf).collect()
    }

    fn shelf_index(&self) -> usize {
        Shelf::ALL.iter().position(|s| *s == self.shelf).unwrap_or(0)
    }

    fn switch_shelf(&mut self, delta: isize) {
        self.shelf = Shelf::ALL[cycle(self.shelf_index(), Shelf::ALL.len(), delta)];
        self.selected = 0;
    }

    fn advance_selected(&mut self, delta: i32) {
        if self.shelf != Shelf::CurrentlyReading {
            return;
        }
        let shelf = self.shelf;
        let Some(entry) = self
            .entries
            .iter_mut()
            .filter(|e| e.shelf == shelf)
            .nth(self.selected)
        else {
            return;
        };
        if let Some(progress) = entry.progress.as_mut() {
            progress.advance(delta);
            tracing::debug!(book = entry.book.0, pages = progress.pages_read, "progress updated");
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        let len = self.shelf_entries(self.shelf).len();
        match key.code {
            KeyCode::Tab | KeyCode::Right => {
                self.switch_shelf(1);
                ViewAction::Handled
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.switch_shelf(-1);
                ViewAction::Handled
            }
            KeyCode::Up => {
                self.selected = step(self.selected, len, -1);
                ViewAction::Handled
            }
            KeyCode::Down => {
                self.selected = step(self.selected, len, 1);
                ViewAction::Handled
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.advance_selected(PROGRESS_STEP);
                ViewAction::Handled
            }
            KeyCode::Char('-') => {
                self.advance_selected(-PROGRESS_STEP);
                ViewAction::Handled
            }
            KeyCode::Enter => {
                let book = self
                    .shelf_entries(self.shelf)
                    .get(self.selected)
                    .and_then(|e| ctx.catalog.book(e.book));
                match book {
                    Some(book) => Intent::OpenBook(book.id).into(),
                    None => ViewAction::Handled,
                }
            }
            _ => ViewAction::Ignored,
        }
    }

    pub(crate) fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = vec![("Tab", "shelf"), ("↑/↓", "move"), ("Enter", "open")];
        if self.shelf == Shelf::CurrentlyReading {
            hints.push(("+/-", "update progress"));
        }
        hints
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.settings.theme;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Text::from(vec![
            Line::styled("My Library", bold()),
            Line::styled("Track your reading journey and discover new books", muted()),
        ]));
        frame.render_widget(title, layout[0]);

        let stats = ctx.catalog.library_stats;
        let cells = [
            (stats.total_books.to_string(), "Books Read"),
            (format_count(stats.pages_read), "Pages Read"),
            (format!("{:.1}", stats.average_rating), "Avg Rating"),
            (format!("{} days", stats.reading_streak_days), "Reading Streak"),
        ];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(layout[1]);
        for ((value, label), column) in cells.into_iter().zip(columns.iter()) {
            let cell = Paragraph::new(Line::from(vec![
                Span::styled(value, bold().fg(accent_color(theme))),
                Span::raw(format!(" {label}")),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(cell, *column);
        }

        let goal = ctx.catalog.reading_goal;
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} Reading Goal", goal.year)),
            )
            .gauge_style(accent_color(theme))
            .ratio((f64::from(goal.percent()) / 100.0).clamp(0.0, 1.0))
            .label(format!(
                "{} of {} books ({:.0}%)",
                goal.counted(),
                goal.target,
                goal.percent()
            ));
        frame.render_widget(gauge, layout[2]);

        let titles: Vec<String> = Shelf::ALL
            .iter()
            .map(|s| format!("{} ({})", s.label(), self.shelf_entries(*s).len()))
            .collect();
        frame.render_widget(
            Paragraph::new(tab_line(&titles, self.shelf_index(), theme)),
            layout[3],
        );

        let entries = self.shelf_entries(self.shelf);
        let bar_width = (layout[4].width as usize).saturating_sub(30).clamp(10, 40);
        let items: Vec<ListItem> = entries
            .iter()
            .filter_map(|entry| {
                let book = ctx.catalog.book(entry.book)?;
                let mut lines = vec![
                    Line::styled(book.title.clone(), bold()),
                    Line::styled(format!("by {}", book.author), muted()),
                ];
                match entry.shelf {
                    Shelf::CurrentlyReading => {
                        if let Some(progress) = entry.progress {
                            lines.push(Line::raw(format!(
                                "Progress {} {}/{} pages ({:.0}%)",
                                progress_bar(progress.ratio(), bar_width),
                                progress.pages_read,
                                progress.total_pages,
                                progress.percent()
                            )));
                        }
                    }
                    Shelf::WantToRead => {
                        if let Some(added) = &entry.added {
                            lines.push(Line::styled(format!("Added {added}"), muted()));
                        }
                    }
                    Shelf::Read => {
                        let mut spans = vec![star_span(
                            entry.display_rating(book),
                            ctx.settings.star_style,
                        )];
                        if let Some(finished) = &entry.finished {
                            spans.push(Span::styled(format!("  Finished {finished}"), muted()));
                        }
                        lines.push(Line::from(spans));
                    }
                }
                lines.push(Line::raw(""));
                Some(ListItem::new(Text::from(lines)))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(highlight_style(theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = list_state(self.selected, entries.len());
        frame.render_stateful_widget(list, layout[4], &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{ctx, key, render};
    use bookverse_core::BookId;

    #[test]
    fn progress_updates_stay_local() {
        let ctx = ctx();
        let mut view = LibraryView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Down), &ctx);
        view.handle_key(key(KeyCode::Char('+')), &ctx);
        let hail_mary = view.shelf_entries(Shelf::CurrentlyReading)[1];
        assert_eq!(hail_mary.progress.map(|p| p.pages_read), Some(99));
        assert_eq!(ctx.catalog.library[1].progress.map(|p| p.pages_read), Some(89));
    }

    #[test]
    fn progress_keys_ignored_off_reading_shelf() {
        let ctx = ctx();
        let mut view = LibraryView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Tab), &ctx);
        view.handle_key(key(KeyCode::Char('-')), &ctx);
        assert_eq!(view.entries, ctx.catalog.library);
    }

    #[test]
    fn shelves_cycle_and_open() {
        let ctx = ctx();
        let mut view = LibraryView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::BackTab), &ctx);
        assert_eq!(view.shelf, Shelf::Read);
        assert_eq!(
            view.handle_key(key(KeyCode::Enter), &ctx),
            ViewAction::Intent(Intent::OpenBook(BookId(6)))
        );
    }

    #[test]
    fn renders_goal_and_counts() -> anyhow::Result<()> {
        let ctx = ctx();
        let view = LibraryView::new(&ctx.catalog);
        let screen = render(120, 40, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(screen.contains("2024 Reading Goal"));
        assert!(screen.contains("10 of 24 books"));
        assert!(screen.contains("Currently Reading (2)"));
        assert!(screen.contains("4,250"));
        assert!(screen.contains("240/368 pages"));
        Ok(())
    }
}
