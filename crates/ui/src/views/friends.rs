use bookverse_application::{AppContext, FriendChip, Intent, PersonFilter, ToggleSet};
use bookverse_catalog::Catalog;
use bookverse_core::{Cohort, Page, Person, PersonId};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph};

use super::ViewAction;
use crate::input::TextInput;
use crate::widgets::{
    accent_color, bold, cycle, highlight_style, input_line, list_state, muted, option_chip,
    star_span, step, tab_line,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FriendsTab {
    Recommended,
    Local,
    NewMembers,
}

impl FriendsTab {
    const ALL: [FriendsTab; 3] = [
        FriendsTab::Recommended,
        FriendsTab::Local,
        FriendsTab::NewMembers,
    ];

    fn label(&self) -> &'static str {
        match self {
            FriendsTab::Recommended => "Recommended",
            FriendsTab::Local => "Local Readers",
            FriendsTab::NewMembers => "New Members",
        }
    }

    fn cohort(&self) -> Cohort {
        match self {
            FriendsTab::Recommended => Cohort::Recommended,
            FriendsTab::Local => Cohort::Local,
            FriendsTab::NewMembers => Cohort::NewMember,
        }
    }

    fn index(self) -> usize {
        FriendsTab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Friend recommendations. Follow state is shared by all three tabs.
#[derive(Debug)]
pub(crate) struct FriendsView {
    tab: FriendsTab,
    chips: ToggleSet<FriendChip>,
    chip_cursor: usize,
    search: TextInput,
    following: ToggleSet<PersonId>,
    selected: usize,
}

impl FriendsView {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        Self {
            tab: FriendsTab::Recommended,
            chips: ToggleSet::new(),
            chip_cursor: 0,
            search: TextInput::default(),
            following: catalog
                .people
                .iter()
                .filter(|p| p.following)
                .map(|p| p.id)
                .collect(),
            selected: 0,
        }
    }

    pub(crate) fn captures_input(&self) -> bool {
        self.search.focused
    }

    fn filter(&self) -> PersonFilter {
        PersonFilter {
            chips: self.chips.clone(),
            query: self.search.value.clone(),
        }
    }

    fn visible<'a>(&self, ctx: &'a AppContext) -> Vec<&'a Person> {
        self.filter()
            .apply(&ctx.catalog.cohort(self.tab.cohort()), &ctx.catalog.viewer)
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        if self.search.focused {
            if matches!(key.code, KeyCode::Enter) {
                self.search.blur();
            } else {
                self.search.handle_key(key);
            }
            self.selected = 0;
            return ViewAction::Handled;
        }

        match key.code {
            KeyCode::Tab => {
                self.tab = FriendsTab::ALL[cycle(self.tab.index(), FriendsTab::ALL.len(), 1)];
                self.selected = 0;
                ViewAction::Handled
            }
            KeyCode::BackTab => {
                self.tab = FriendsTab::ALL[cycle(self.tab.index(), FriendsTab::ALL.len(), -1)];
                self.selected = 0;
                ViewAction::Handled
            }
            KeyCode::Left => {
                self.chip_cursor = cycle(self.chip_cursor, FriendChip::ALL.len(), -1);
                ViewAction::Handled
            }
            KeyCode::Right => {
                self.chip_cursor = cycle(self.chip_cursor, FriendChip::ALL.len(), 1);
                ViewAction::Handled
            }
            KeyCode::Char('t') => {
                self.chips.toggle(FriendChip::ALL[self.chip_cursor]);
                self.selected = 0;
                ViewAction::Handled
            }
            KeyCode::Char('c') => {
                self.chips.clear();
                self.selected = 0;
                ViewAction::Handled
            }
            KeyCode::Char('f') => {
                self.search.focus();
                ViewAction::Handled
            }
            KeyCode::Up => {
                self.selected = step(self.selected, self.visible(ctx).len(), -1);
                ViewAction::Handled
            }
            KeyCode::Down => {
                self.selected = step(self.selected, self.visible(ctx).len(), 1);
                ViewAction::Handled
            }
            KeyCode::Char(' ') => {
                if let Some(person) = self.visible(ctx).get(self.selected) {
                    let now = self.following.toggle(person.id);
                    tracing::debug!(person = %person.username, following = now, "follow toggled");
                }
                ViewAction::Handled
            }
            KeyCode::Enter => {
                let title = self
                    .visible(ctx)
                    .get(self.selected)
                    .and_then(|p| p.currently_reading.clone());
                match title {
                    Some(title) => Intent::OpenTitle(title).into(),
                    None => ViewAction::Handled,
                }
            }
            KeyCode::Char('b') => Intent::Navigate(Page::Social).into(),
            _ => ViewAction::Ignored,
        }
    }

    pub(crate) fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.search.focused {
            return vec![("Enter/Esc", "done"), ("Ctrl+u", "clear")];
        }
        vec![
            ("Tab", "tab"),
            ("←/→ t", "filter"),
            ("c", "clear"),
            ("f", "find"),
            ("Space", "follow"),
            ("b", "back to social"),
        ]
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.settings.theme;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Text::from(vec![
            Line::styled("Find Friends", bold()),
            Line::styled(
                "Discover readers with similar tastes and expand your reading community",
                muted(),
            ),
        ]));
        frame.render_widget(title, layout[0]);

        frame.render_widget(
            Paragraph::new(input_line(
                "Find",
                &self.search.value,
                "Search by name, username, or books...",
                self.search.focused,
            )),
            layout[1],
        );

        let mut chips = Vec::new();
        for (idx, chip) in FriendChip::ALL.iter().enumerate() {
            if idx > 0 {
                chips.push(Span::raw(" "));
            }
            chips.push(option_chip(
                chip.label(),
                self.chips.contains(chip),
                idx == self.chip_cursor,
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(chips)), layout[2]);

        let titles: Vec<String> = FriendsTab::ALL
            .iter()
            .map(|t| t.label().to_string())
            .collect();
        frame.render_widget(
            Paragraph::new(tab_line(&titles, self.tab.index(), theme)),
            layout[3],
        );

        let people = self.visible(ctx);
        let block = Block::default().borders(Borders::ALL);
        if people.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled("No readers match your filters.", muted()))
                    .block(block),
                layout[4],
            );
            return;
        }

        let items: Vec<ListItem> = people
            .iter()
            .map(|person| self.person_item(person, ctx))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = list_state(self.selected, people.len());
        frame.render_stateful_widget(list, layout[4], &mut state);
    }

    fn person_item(&self, person: &Person, ctx: &AppContext) -> ListItem<'static> {
        let follow = if self.following.contains(&person.id) {
            Span::styled(" Following ", Style::default().fg(Color::Green))
        } else {
            Span::styled(" Follow ", Style::default().fg(Color::Cyan))
        };
        let mut head = vec![
            Span::styled(person.name.clone(), bold()),
            Span::styled(format!(" {}", person.username), muted()),
        ];
        if let Some(score) = person.compatibility {
            head.push(Span::styled(
                format!("  {score}% match"),
                bold().fg(accent_color(ctx.settings.theme)),
            ));
        }
        head.push(Span::raw("  "));
        head.push(follow);

        let mut meta = Vec::new();
        if let Some(location) = &person.location {
            meta.push(location.clone());
        }
        match self.tab {
            FriendsTab::Local => meta.extend(person.distance.clone()),
            FriendsTab::NewMembers => {
                meta.extend(person.joined.as_ref().map(|j| format!("Joined {j}")));
            }
            FriendsTab::Recommended => {}
        }
        meta.push(format!("{} books", person.books_read));
        if person.mutual_friends > 0 {
            meta.push(format!("{} mutual", person.mutual_friends));
        }

        let mut lines = vec![Line::from(head), Line::styled(meta.join(" · "), muted())];
        if let Some(reading) = &person.currently_reading {
            lines.push(Line::raw(format!("Currently reading: {reading}")));
        }
        if !person.favorite_genres.is_empty() {
            let genres: Vec<&str> = person.favorite_genres.iter().map(|g| g.label()).collect();
            lines.push(Line::styled(
                format!("Favorite Genres: {}", genres.join(", ")),
                muted(),
            ));
        }
        if !person.recent_reads.is_empty() {
            let mut spans = vec![Span::styled("Recent Reads: ", muted())];
            for (idx, read) in person.recent_reads.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw(", "));
                }
                spans.push(Span::raw(format!("{} ", read.title)));
                spans.push(star_span(f32::from(read.rating), ctx.settings.star_style));
            }
            lines.push(Line::from(spans));
        }
        if let Some(reason) = &person.reason {
            lines.push(Line::styled(reason.clone(), Style::default().fg(Color::Magenta)));
        }
        lines.push(Line::raw(""));
        ListItem::new(Text::from(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{chars, ctx, key, render};

    fn names(view: &FriendsView, ctx: &AppContext) -> Vec<String> {
        view.visible(ctx).iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn tabs_switch_cohorts() {
        let ctx = ctx();
        let mut view = FriendsView::new(&ctx.catalog);
        assert_eq!(view.visible(&ctx).len(), 4);
        view.handle_key(key(KeyCode::Tab), &ctx);
        assert_eq!(names(&view, &ctx), vec!["Alex Thompson", "Sophie Chen"]);
        view.handle_key(key(KeyCode::Tab), &ctx);
        assert_eq!(names(&view, &ctx), vec!["Ryan O'Connor"]);
        view.handle_key(key(KeyCode::BackTab), &ctx);
        view.handle_key(key(KeyCode::BackTab), &ctx);
        assert_eq!(view.tab, FriendsTab::Recommended);
    }

    #[test]
    fn chips_filter_and_clear() {
        let ctx = ctx();
        let mut view = FriendsView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Char('t')), &ctx);
        assert_eq!(names(&view, &ctx), vec!["David Park", "Maria Garcia"]);
        view.handle_key(key(KeyCode::Char('c')), &ctx);
        assert_eq!(view.visible(&ctx).len(), 4);
    }

    #[test]
    fn search_matches_reading_title() {
        let ctx = ctx();
        let mut view = FriendsView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Char('f')), &ctx);
        for k in chars("silent") {
            view.handle_key(k, &ctx);
        }
        view.handle_key(key(KeyCode::Enter), &ctx);
        assert!(!view.captures_input());
        assert_eq!(names(&view, &ctx), vec!["James Wilson"]);
    }

    #[test]
    fn follow_state_is_shared_across_tabs() {
        let ctx = ctx();
        let mut view = FriendsView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Char(' ')), &ctx);
        assert!(view.following.contains(&PersonId(4)));
        view.handle_key(key(KeyCode::Tab), &ctx);
        view.handle_key(key(KeyCode::BackTab), &ctx);
        assert!(view.following.contains(&PersonId(4)));
        view.handle_key(key(KeyCode::Char(' ')), &ctx);
        assert!(!view.following.contains(&PersonId(4)));
    }

    #[test]
    fn back_goes_to_social() {
        let ctx = ctx();
        let mut view = FriendsView::new(&ctx.catalog);
        assert_eq!(
            view.handle_key(key(KeyCode::Char('b')), &ctx),
            ViewAction::Intent(Intent::Navigate(Page::Social))
        );
    }

    #[test]
    fn renders_cards() -> anyhow::Result<()> {
        let ctx = ctx();
        let view = FriendsView::new(&ctx.catalog);
        let screen = render(120, 50, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(screen.contains("Find Friends"));
        assert!(screen.contains("Similar Taste"));
        assert!(screen.contains("94% match"));
        assert!(screen.contains("Local Readers"));
        Ok(())
    }
}
