use bookverse_application::{AppContext, Intent, ToggleSet, matches_query};
use bookverse_catalog::Catalog;
use bookverse_core::{Activity, ActivityKind, Cohort, Page, Person, PersonId};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph};

use super::ViewAction;
use crate::input::{InputEvent, TextInput};
use crate::widgets::{
    accent_color, bold, highlight_style, input_line, list_state, muted, star_span, step,
    tab_line, wrap_text,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SocialTab {
    Feed,
    Friends,
}

#[derive(Debug)]
pub(crate) struct SocialView {
    tab: SocialTab,
    selected: usize,
    liked: ToggleSet<u32>,
    following: ToggleSet<PersonId>,
    search: TextInput,
}

impl SocialView {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        Self {
            tab: SocialTab::Feed,
            selected: 0,
            liked: ToggleSet::new(),
            following: catalog
                .people
                .iter()
                .filter(|p| p.following)
                .map(|p| p.id)
                .collect(),
            search: TextInput::default(),
        }
    }

    pub(crate) fn captures_input(&self) -> bool {
        self.search.focused
    }

    fn friends<'a>(&self, ctx: &'a AppContext) -> Vec<&'a Person> {
        ctx.catalog
            .cohort(Cohort::Friend)
            .into_iter()
            .filter(|p| {
                matches_query(&self.search.value, &[p.name.as_str(), p.username.as_str()])
            })
            .collect()
    }

    fn len(&self, ctx: &AppContext) -> usize {
        match self.tab {
            SocialTab::Feed => ctx.catalog.activity.len(),
            SocialTab::Friends => self.friends(ctx).len(),
        }
    }

    fn like_count(&self, activity: &Activity) -> u32 {
        activity.likes + u32::from(self.liked.contains(&activity.id))
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        if self.search.focused {
            if self.search.handle_key(key) == InputEvent::Submitted {
                self.search.blur();
            }
            self.selected = 0;
            return ViewAction::Handled;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = match self.tab {
                    SocialTab::Feed => SocialTab::Friends,
                    SocialTab::Friends => SocialTab::Feed,
                };
                self.selected = 0;
                ViewAction::Handled
            }
            KeyCode::Up => {
                self.selected = step(self.selected, self.len(ctx), -1);
                ViewAction::Handled
            }
            KeyCode::Down => {
                self.selected = step(self.selected, self.len(ctx), 1);
                ViewAction::Handled
            }
            KeyCode::Char('r') => Intent::Navigate(Page::FriendRecommendations).into(),
            KeyCode::Char('g') => Intent::Navigate(Page::Groups).into(),
            _ => match self.tab {
                SocialTab::Feed => self.handle_feed_key(key, ctx),
                SocialTab::Friends => self.handle_friends_key(key, ctx),
            },
        }
    }

    fn handle_feed_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        let Some(activity) = ctx.catalog.activity.get(self.selected) else {
            return ViewAction::Ignored;
        };
        match key.code {
            KeyCode::Char('l') => {
                self.liked.toggle(activity.id);
                ViewAction::Handled
            }
            KeyCode::Enter => match &activity.kind {
                ActivityKind::Book { book, .. } => Intent::OpenTitle(book.title.clone()).into(),
                ActivityKind::Group { .. } => Intent::Navigate(Page::Groups).into(),
            },
            _ => ViewAction::Ignored,
        }
    }

    fn handle_friends_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        match key.code {
            KeyCode::Char('f') => {
                self.search.focus();
                ViewAction::Handled
            }
            KeyCode::Char(' ') => {
                if let Some(person) = self.friends(ctx).get(self.selected) {
                    let now = self.following.toggle(person.id);
                    tracing::debug!(person = %person.username, following = now, "follow toggled");
                }
                ViewAction::Handled
            }
            KeyCode::Enter => {
                let title = self
                    .friends(ctx)
                    .get(self.selected)
                    .and_then(|p| p.currently_reading.clone());
                match title {
                    Some(title) => Intent::OpenTitle(title).into(),
                    None => ViewAction::Handled,
                }
            }
            _ => ViewAction::Ignored,
        }
    }

    pub(crate) fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.search.focused {
            return vec![("Enter/Esc", "done"), ("Ctrl+u", "clear")];
        }
        let mut hints = vec![("Tab", "switch"), ("↑/↓", "move")];
        match self.tab {
            SocialTab::Feed => hints.extend([("Enter", "open book"), ("l", "like")]),
            SocialTab::Friends => hints.extend([("f", "find"), ("Space", "follow")]),
        }
        hints.extend([("r", "find friends"), ("g", "groups")]);
        hints
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.settings.theme;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Text::from(vec![
            Line::styled("Social Hub", bold()),
            Line::styled("Connect with fellow readers and discover new books", muted()),
        ]));
        frame.render_widget(title, layout[0]);

        let friend_count = ctx.catalog.cohort(Cohort::Friend).len();
        let titles = vec![
            "Activity Feed".to_string(),
            format!("Friends ({friend_count})"),
        ];
        let active = match self.tab {
            SocialTab::Feed => 0,
            SocialTab::Friends => 1,
        };
        frame.render_widget(Paragraph::new(tab_line(&titles, active, theme)), layout[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(layout[2]);

        match self.tab {
            SocialTab::Feed => self.draw_feed(frame, body[0], ctx),
            SocialTab::Friends => self.draw_friends(frame, body[0], ctx),
        }
        self.draw_sidebar(frame, body[1], ctx);
    }

    fn draw_feed(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let width = area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = ctx
            .catalog
            .activity
            .iter()
            .map(|activity| {
                let mut lines = vec![Line::from(vec![
                    Span::styled(activity.author.name.clone(), bold()),
                    Span::styled(format!(" {}", activity.author.username), muted()),
                    Span::styled(format!("  {}", activity.timestamp), muted()),
                ])];
                match &activity.kind {
                    ActivityKind::Book {
                        action,
                        book,
                        rating,
                        review,
                    } => {
                        let mut spans = vec![
                            Span::raw(format!("{action} ")),
                            Span::styled(book.title.clone(), bold()),
                            Span::styled(format!(" by {}", book.author), muted()),
                        ];
                        if let Some(rating) = rating {
                            spans.push(Span::raw("  "));
                            spans.push(star_span(f32::from(*rating), ctx.settings.star_style));
                        }
                        lines.push(Line::from(spans));
                        if let Some(review) = review {
                            lines.extend(
                                wrap_text(&format!("\"{review}\""), width)
                                    .into_iter()
                                    .map(|l| Line::styled(l, muted())),
                            );
                        }
                    }
                    ActivityKind::Group { action, group } => {
                        lines.push(Line::from(vec![
                            Span::raw(format!("{action} ")),
                            Span::styled(group.clone(), bold()),
                        ]));
                    }
                }
                let heart = if self.liked.contains(&activity.id) {
                    Span::styled("♥", Style::default().fg(Color::Red))
                } else {
                    Span::raw("♡")
                };
                lines.push(Line::from(vec![
                    heart,
                    Span::raw(format!(
                        " {}   {} comments",
                        self.like_count(activity),
                        activity.comments
                    )),
                ]));
                lines.push(Line::raw(""));
                ListItem::new(Text::from(lines))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(highlight_style(ctx.settings.theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = list_state(self.selected, ctx.catalog.activity.len());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_friends(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        frame.render_widget(
            Paragraph::new(input_line(
                "Find",
                &self.search.value,
                "Search friends...",
                self.search.focused,
            )),
            layout[0],
        );

        let friends = self.friends(ctx);
        let items: Vec<ListItem> = friends
            .iter()
            .map(|person| {
                let follow = if self.following.contains(&person.id) {
                    Span::styled(" Following ", Style::default().fg(Color::Green))
                } else {
                    Span::styled(" Follow ", Style::default().fg(Color::Cyan))
                };
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(person.name.clone(), bold()),
                        Span::styled(format!(" {}", person.username), muted()),
                        Span::raw("  "),
                        follow,
                    ]),
                    Line::styled(
                        format!(
                            "{} books read · {} mutual friends",
                            person.books_read, person.mutual_friends
                        ),
                        muted(),
                    ),
                ];
                if let Some(status) = &person.status {
                    lines.push(Line::raw(status.clone()));
                }
                lines.push(Line::raw(""));
                ListItem::new(Text::from(lines))
            })
            .collect();

        let block = Block::default().borders(Borders::ALL);
        if items.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled("No friends match your search.", muted())).block(block),
                layout[1],
            );
            return;
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(ctx.settings.theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = list_state(self.selected, friends.len());
        frame.render_stateful_widget(list, layout[1], &mut state);
    }

    fn draw_sidebar(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let accent = bold().fg(accent_color(ctx.settings.theme));
        let network = ctx.catalog.network;
        let mut lines = vec![
            Line::styled("Your Network", bold()),
            Line::from(vec![
                Span::styled(network.following.to_string(), accent),
                Span::raw(" Following  "),
                Span::styled(network.followers.to_string(), accent),
                Span::raw(" Followers  "),
                Span::styled(network.reading_groups.to_string(), accent),
                Span::raw(" Reading Groups"),
            ]),
            Line::raw(""),
            Line::styled("Suggested Friends", bold()),
        ];
        for person in ctx.catalog.cohort(Cohort::Suggested) {
            let state = if self.following.contains(&person.id) {
                "Following"
            } else {
                "Follow"
            };
            lines.push(Line::from(vec![
                Span::raw(person.name.clone()),
                Span::styled(
                    format!("  {} mutual  [{state}]", person.mutual_friends),
                    muted(),
                ),
            ]));
        }
        lines.push(Line::styled("r find more friends", muted()));
        lines.push(Line::raw(""));
        lines.push(Line::styled("Active Groups", bold()));
        for group in ctx.catalog.my_groups() {
            let mut spans = vec![Span::raw(group.name.clone())];
            if group.unread_messages > 0 {
                spans.push(Span::styled(
                    format!("  {} new", group.unread_messages),
                    Style::default().fg(Color::Red),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::styled("g view all groups", muted()));

        let sidebar = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(sidebar, area);
    }
}
