use bookverse_application::{AppContext, Intent};
use bookverse_core::{Book, BookId, Page, ReadingStatus};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph, Wrap};

use super::ViewAction;
use crate::widgets::{
    accent_color, bold, book_item, cycle, format_count, highlight_style, list_state, muted,
    option_chip, star_span, step, tab_line, wrap_text,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum BookTab {
    #[default]
    Description,
    Reviews,
    Details,
}

impl BookTab {
    const ALL: [BookTab; 3] = [BookTab::Description, BookTab::Reviews, BookTab::Details];

    fn label(&self) -> &'static str {
        match self {
            BookTab::Description => "Description",
            BookTab::Reviews => "Reviews",
            BookTab::Details => "Details",
        }
    }

    fn index(self) -> usize {
        BookTab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

#[derive(Debug)]
pub(crate) struct BookView {
    book: Option<BookId>,
    tab: BookTab,
    status: ReadingStatus,
    similar_selected: usize,
}

impl BookView {
    pub(crate) fn new(book: Option<BookId>) -> Self {
        Self {
            book,
            tab: BookTab::default(),
            status: ReadingStatus::default(),
            similar_selected: 0,
        }
    }

    pub(crate) fn book(&self) -> Option<BookId> {
        self.book
    }

    fn resolve<'a>(&self, ctx: &'a AppContext) -> Option<&'a Book> {
        self.book.and_then(|id| ctx.catalog.book(id))
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        let Some(book) = self.resolve(ctx) else {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('h') => Intent::Navigate(Page::Home).into(),
                _ => ViewAction::Ignored,
            };
        };

        let similar = ctx.catalog.similar_to(book.id);
        match key.code {
            KeyCode::Tab | KeyCode::Right => {
                self.tab = BookTab::ALL[cycle(self.tab.index(), BookTab::ALL.len(), 1)];
                ViewAction::Handled
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.tab = BookTab::ALL[cycle(self.tab.index(), BookTab::ALL.len(), -1)];
                ViewAction::Handled
            }
            KeyCode::Char('r') => {
                self.status = self.status.next();
                tracing::debug!(book = %book.title, status = self.status.as_str(), "reading status");
                ViewAction::Handled
            }
            KeyCode::Up => {
                self.similar_selected = step(self.similar_selected, similar.len(), -1);
                ViewAction::Handled
            }
            KeyCode::Down => {
                self.similar_selected = step(self.similar_selected, similar.len(), 1);
                ViewAction::Handled
            }
            KeyCode::Enter => match similar.get(self.similar_selected) {
                Some(next) => Intent::OpenBook(next.id).into(),
                None => ViewAction::Handled,
            },
            _ => ViewAction::Ignored,
        }
    }

    pub(crate) fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.book.is_none() {
            return vec![("Enter", "back to home")];
        }
        vec![
            ("Tab", "section"),
            ("r", "status"),
            ("↑/↓", "similar"),
            ("Enter", "open similar"),
        ]
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let Some(book) = self.resolve(ctx) else {
            draw_not_found(frame, area);
            return;
        };

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(area);
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(body[0]);

        self.draw_summary(frame, main[0], book, ctx);
        draw_insight(frame, main[1], ctx);

        let titles: Vec<String> = BookTab::ALL.iter().map(|t| t.label().to_string()).collect();
        frame.render_widget(
            Paragraph::new(tab_line(&titles, self.tab.index(), ctx.settings.theme)),
            main[2],
        );

        let width = main[3].width.saturating_sub(2) as usize;
        let lines = match self.tab {
            BookTab::Description => description_lines(book, width),
            BookTab::Reviews => review_lines(ctx, width),
            BookTab::Details => detail_lines(book),
        };
        let content = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        frame.render_widget(content, main[3]);

        let similar = ctx.catalog.similar_to(book.id);
        let width = body[1].width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = similar
            .iter()
            .map(|b| book_item(b, ctx.settings.star_style, width))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Similar Books You Might Like", bold())),
            )
            .highlight_style(highlight_style(ctx.settings.theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = list_state(self.similar_selected, similar.len());
        frame.render_stateful_widget(list, body[1], &mut state);
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect, book: &Book, ctx: &AppContext) {
        let counts = book
            .details
            .as_ref()
            .and_then(|d| d.ratings_count)
            .map(|n| format!(" ({} ratings)", format_count(n)))
            .unwrap_or_default();

        let mut status = vec![Span::styled("Status: ", bold())];
        for option in [
            ReadingStatus::WantToRead,
            ReadingStatus::CurrentlyReading,
            ReadingStatus::Read,
        ] {
            status.push(option_chip(option.label(), option == self.status, false));
            status.push(Span::raw(" "));
        }

        let mut lines = vec![
            Line::styled(book.title.clone(), bold().fg(accent_color(ctx.settings.theme))),
            Line::raw(format!("by {}", book.author)),
            Line::from(vec![
                star_span(book.rating.value(), ctx.settings.star_style),
                Span::raw(format!(" {}", book.rating)),
                Span::styled(counts, muted()),
            ]),
            Line::from(vec![
                Span::styled(book.genre.label().to_string(), Style::default().fg(Color::Cyan)),
                Span::styled(
                    book.reading_time
                        .as_ref()
                        .map(|t| format!("  {t}"))
                        .unwrap_or_default(),
                    muted(),
                ),
            ]),
        ];
        if let Some(details) = &book.details {
            if !details.labels.is_empty() {
                lines.push(Line::styled(details.labels.join(" · "), muted()));
            }
        }
        lines.push(Line::from(status));

        frame.render_widget(Paragraph::new(Text::from(lines)), area);
    }
}

fn draw_not_found(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::styled("Book not found", bold()),
        Line::styled("The book you're looking for isn't in the catalog.", muted()),
        Line::raw(""),
        Line::raw("Press Enter to go back to Home"),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_insight(frame: &mut Frame, area: Rect, ctx: &AppContext) {
    let insight = &ctx.catalog.insight;
    let accent = bold().fg(accent_color(ctx.settings.theme));
    let lines = vec![
        Line::from(vec![
            Span::styled(insight.recommend.clone(), accent),
            Span::raw(" Recommend   "),
            Span::styled(insight.emotional_impact.clone(), accent),
            Span::raw(" Emotional Impact   "),
            Span::styled(insight.writing_quality.clone(), accent),
            Span::raw(" Writing Quality"),
        ]),
        Line::styled(insight.blurb.clone(), muted()),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("AI Insight", bold())),
        );
    frame.render_widget(paragraph, area);
}

fn description_lines(book: &Book, width: usize) -> Vec<Line<'static>> {
    let paragraphs: Vec<&str> = match &book.details {
        Some(details) if !details.description.is_empty() => {
            details.description.iter().map(String::as_str).collect()
        }
        _ => vec![book.ai_summary.as_str()],
    };

    let mut lines = Vec::new();
    for (idx, paragraph) in paragraphs.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::raw(""));
        }
        lines.extend(wrap_text(paragraph, width).into_iter().map(Line::raw));
    }
    lines
}

fn review_lines(ctx: &AppContext, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for review in &ctx.catalog.reviews {
        lines.push(Line::from(vec![
            Span::styled(review.author.clone(), bold()),
            Span::raw("  "),
            star_span(f32::from(review.rating), ctx.settings.star_style),
            Span::styled(format!("  {}", review.date), muted()),
        ]));
        lines.extend(wrap_text(&review.text, width).into_iter().map(Line::raw));
        lines.push(Line::styled(format!("Helpful ({})", review.helpful), muted()));
        lines.push(Line::raw(""));
    }
    lines
}

fn detail_lines(book: &Book) -> Vec<Line<'static>> {
    let details = book.details.clone().unwrap_or_default();
    let row = |label: &str, value: Option<String>| {
        Line::from(vec![
            Span::styled(format!("{label:<22}"), bold()),
            Span::raw(value.unwrap_or_else(|| "n/a".to_string())),
        ])
    };

    vec![
        Line::styled("Book Information", bold()),
        row("Pages:", details.pages.map(|p| p.to_string())),
        row("Publisher:", details.publisher),
        row("Published:", details.published),
        row("Language:", details.language),
        row("ISBN:", details.isbn),
        row("Format:", details.format),
        row("Edition:", details.edition),
        Line::raw(""),
        Line::styled("Reading Stats", bold()),
        row("Average Reading Time:", book.reading_time.clone()),
        row("Difficulty Level:", details.difficulty),
        row("Genre Rank:", details.genre_rank),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{ctx, key, render};

    #[test]
    fn missing_book_renders_not_found() -> anyhow::Result<()> {
        let ctx = ctx();
        let mut view = BookView::new(None);
        let screen = render(100, 30, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(screen.contains("Book not found"));
        assert_eq!(
            view.handle_key(key(KeyCode::Enter), &ctx),
            ViewAction::Intent(Intent::Navigate(Page::Home))
        );
        Ok(())
    }

    #[test]
    fn unknown_id_is_not_found() -> anyhow::Result<()> {
        let ctx = ctx();
        let view = BookView::new(Some(BookId(404)));
        let screen = render(100, 30, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(screen.contains("Book not found"));
        Ok(())
    }

    #[test]
    fn tabs_and_status_cycle() -> anyhow::Result<()> {
        let ctx = ctx();
        let mut view = BookView::new(Some(BookId(1)));
        view.handle_key(key(KeyCode::Tab), &ctx);
        view.handle_key(key(KeyCode::Tab), &ctx);
        assert_eq!(view.tab, BookTab::Details);
        view.handle_key(key(KeyCode::Tab), &ctx);
        assert_eq!(view.tab, BookTab::Description);
        view.handle_key(key(KeyCode::BackTab), &ctx);
        assert_eq!(view.tab, BookTab::Details);

        view.handle_key(key(KeyCode::Char('r')), &ctx);
        assert_eq!(view.status, ReadingStatus::CurrentlyReading);

        let screen = render(120, 50, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(screen.contains("The Seven Husbands of Evelyn Hugo"));
        assert!(screen.contains("Book Information"));
        assert!(screen.contains("Atria Books"));
        Ok(())
    }

    #[test]
    fn similar_books_open() {
        let ctx = ctx();
        let mut view = BookView::new(Some(BookId(1)));
        view.handle_key(key(KeyCode::Down), &ctx);
        assert_eq!(
            view.handle_key(key(KeyCode::Enter), &ctx),
            ViewAction::Intent(Intent::OpenBook(ctx.catalog.similar[1]))
        );
    }
}
