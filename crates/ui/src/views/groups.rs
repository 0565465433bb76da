use std::collections::HashMap;

use bookverse_application::{AppContext, Intent, ToggleSet, group_matches};
use bookverse_catalog::Catalog;
use bookverse_core::{Group, GroupId, Message};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph, Wrap};

use super::ViewAction;
use crate::input::{InputEvent, TextInput};
use crate::widgets::{
    accent_color, bold, highlight_style, input_line, list_state, muted, step, tab_line, wrap_text,
};

const READING_SCHEDULE: [(&str, &str); 4] = [
    ("Chapters 1-5", "Complete"),
    ("Chapters 6-10", "In Progress"),
    ("Chapters 11-15", "Upcoming"),
    ("Final Discussion", "Upcoming"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupsTab {
    Mine,
    Discover,
}

#[derive(Debug)]
pub(crate) struct GroupsView {
    tab: GroupsTab,
    selected: usize,
    open_group: Option<GroupId>,
    discussion: Vec<Message>,
    threads: HashMap<GroupId, Vec<Message>>,
    compose: TextInput,
    search: TextInput,
    joined: ToggleSet<GroupId>,
}

impl GroupsView {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        Self {
            tab: GroupsTab::Mine,
            selected: 0,
            open_group: None,
            discussion: catalog.discussion.clone(),
            threads: HashMap::new(),
            compose: TextInput::default(),
            search: TextInput::default(),
            joined: ToggleSet::new(),
        }
    }

    pub(crate) fn captures_input(&self) -> bool {
        self.compose.focused || self.search.focused
    }

    fn visible<'a>(&self, ctx: &'a AppContext) -> Vec<&'a Group> {
        match self.tab {
            GroupsTab::Mine => ctx.catalog.my_groups(),
            GroupsTab::Discover => ctx
                .catalog
                .suggested_groups()
                .into_iter()
                .filter(|g| group_matches(g, &self.search.value))
                .collect(),
        }
    }

    /// Every group starts from the sample discussion; sends fork its own copy.
    fn thread(&self, group: GroupId) -> &[Message] {
        self.threads
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or(&self.discussion)
    }

    /// Appends the composed message to `group`. Blank input is dropped and
    /// nothing is sent.
    fn send_message(&mut self, group: GroupId) -> bool {
        let Some(text) = self.compose.submitted() else {
            return false;
        };
        let thread = self
            .threads
            .entry(group)
            .or_insert_with(|| self.discussion.clone());
        let id = thread.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let message = Message {
            id,
            author: "You".to_string(),
            text: text.to_string(),
            timestamp: "Just now".to_string(),
            likes: 0,
        };
        thread.push(message);
        self.compose.clear();
        true
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> ViewAction {
        if self.compose.focused {
            if self.compose.handle_key(key) == InputEvent::Submitted {
                if let Some(group) = self.open_group {
                    self.send_message(group);
                }
            }
            return ViewAction::Handled;
        }
        if self.search.focused {
            if self.search.handle_key(key) == InputEvent::Submitted {
                self.search.blur();
            }
            self.selected = 0;
            return ViewAction::Handled;
        }

        if let Some(id) = self.open_group {
            return self.handle_detail_key(key, ctx, id);
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = match self.tab {
                    GroupsTab::Mine => GroupsTab::Discover,
                    GroupsTab::Discover => GroupsTab::Mine,
                };
                self.selected = 0;
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
            KeyCode::Enter => {
                let Some(group) = self.visible(ctx).get(self.selected).copied() else {
                    return ViewAction::Handled;
                };
                match self.tab {
                    GroupsTab::Mine => {
                        self.open_group = Some(group.id);
                        ViewAction::Handled
                    }
                    GroupsTab::Discover => {
                        Intent::OpenTitle(group.current_book.title.clone()).into()
                    }
                }
            }
            KeyCode::Char('f') if self.tab == GroupsTab::Discover => {
                self.search.focus();
                ViewAction::Handled
            }
            KeyCode::Char(' ') if self.tab == GroupsTab::Discover => {
                if let Some(group) = self.visible(ctx).get(self.selected) {
                    let joined = self.joined.toggle(group.id);
                    tracing::debug!(group = %group.name, joined, "group membership toggled");
                }
                ViewAction::Handled
            }
            _ => ViewAction::Ignored,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent, ctx: &AppContext, id: GroupId) -> ViewAction {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.open_group = None;
                ViewAction::Handled
            }
            KeyCode::Char('c') => {
                self.compose.focus();
                ViewAction::Handled
            }
            KeyCode::Char('o') => match ctx.catalog.group(id) {
                Some(group) => Intent::OpenTitle(group.current_book.title.clone()).into(),
                None => ViewAction::Handled,
            },
            _ => ViewAction::Ignored,
        }
    }

    pub(crate) fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.compose.focused {
            return vec![("Enter", "send"), ("Esc", "done")];
        }
        if self.search.focused {
            return vec![("Enter/Esc", "done"), ("Ctrl+u", "clear")];
        }
        if self.open_group.is_some() {
            return vec![("c", "write"), ("o", "open book"), ("Esc", "back to groups")];
        }
        match self.tab {
            GroupsTab::Mine => vec![("Tab", "switch"), ("↑/↓", "move"), ("Enter", "open group")],
            GroupsTab::Discover => vec![
                ("Tab", "switch"),
                ("↑/↓", "move"),
                ("f", "find"),
                ("Space", "join"),
                ("Enter", "open book"),
            ],
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        if let Some(group) = self.open_group.and_then(|id| ctx.catalog.group(id)) {
            self.draw_detail(frame, area, ctx, group);
            return;
        }

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
            Line::styled("Reading Groups", bold()),
            Line::styled(
                "Join discussions and read together with fellow book lovers",
                muted(),
            ),
        ]));
        frame.render_widget(title, layout[0]);

        let titles = vec![
            format!("My Groups ({})", ctx.catalog.my_groups().len()),
            "Discover Groups".to_string(),
        ];
        let active = match self.tab {
            GroupsTab::Mine => 0,
            GroupsTab::Discover => 1,
        };
        frame.render_widget(Paragraph::new(tab_line(&titles, active, theme)), layout[1]);

        let list_area = if self.tab == GroupsTab::Discover {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(layout[2]);
            frame.render_widget(
                Paragraph::new(input_line(
                    "Find",
                    &self.search.value,
                    "Search groups by name, genre, or book...",
                    self.search.focused,
                )),
                split[0],
            );
            split[1]
        } else {
            layout[2]
        };

        let groups = self.visible(ctx);
        let width = list_area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = groups
            .iter()
            .map(|group| match self.tab {
                GroupsTab::Mine => my_group_item(group),
                GroupsTab::Discover => self.discover_item(group, width),
            })
            .collect();

        let block = Block::default().borders(Borders::ALL);
        if items.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled("No groups match your search.", muted())).block(block),
                list_area,
            );
            return;
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = list_state(self.selected, groups.len());
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    fn discover_item(&self, group: &Group, width: usize) -> ListItem<'static> {
        let join = if self.joined.contains(&group.id) {
            Span::styled(" Joined ", Style::default().fg(Color::Green))
        } else {
            Span::styled(" Join Group ", Style::default().fg(Color::Cyan))
        };
        let mut lines = vec![Line::from(vec![
            Span::styled(group.name.clone(), bold()),
            Span::styled(format!("  {} members  ", group.members), muted()),
            join,
        ])];
        lines.extend(
            wrap_text(&group.description, width)
                .into_iter()
                .map(Line::raw),
        );
        lines.push(Line::styled(group.tags.join(" · "), Style::default().fg(Color::Cyan)));
        lines.push(Line::styled(
            format!(
                "Currently reading: {} by {}",
                group.current_book.title, group.current_book.author
            ),
            muted(),
        ));
        lines.push(Line::raw(""));
        ListItem::new(Text::from(lines))
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, ctx: &AppContext, group: &Group) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let mut meta = format!("{} members", group.members);
        if let Some(meeting) = &group.next_meeting {
            meta.push_str(&format!("  Next meeting: {meeting}"));
        }
        let mut title = vec![Span::styled(group.name.clone(), bold())];
        if group.admin {
            title.push(Span::styled("  Admin", Style::default().fg(Color::Magenta)));
        }
        let header = Paragraph::new(Text::from(vec![
            Line::from(title),
            Line::styled(group.description.clone(), muted()),
            Line::styled(meta, muted()),
        ]));
        frame.render_widget(header, layout[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(layout[1]);
        let discussion = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(body[0]);

        let width = discussion[0].width.saturating_sub(4) as usize;
        let mut lines = Vec::new();
        for message in self.thread(group.id) {
            lines.push(Line::from(vec![
                Span::styled(message.author.clone(), bold()),
                Span::styled(format!("  {}", message.timestamp), muted()),
            ]));
            lines.extend(wrap_text(&message.text, width).into_iter().map(Line::raw));
            lines.push(Line::styled(format!("★ {}", message.likes), muted()));
            lines.push(Line::raw(""));
        }
        let messages = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Discussion", bold())),
        );
        frame.render_widget(messages, discussion[0]);

        let compose = Paragraph::new(input_line(
            "Message",
            &self.compose.value,
            "Share your thoughts...",
            self.compose.focused,
        ))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(compose, discussion[1]);

        let accent = bold().fg(accent_color(ctx.settings.theme));
        let mut side = vec![
            Line::styled("Current Book", bold()),
            Line::styled(group.current_book.title.clone(), accent),
            Line::styled(format!("by {}", group.current_book.author), muted()),
            Line::raw(""),
            Line::styled("Reading Schedule", bold()),
        ];
        for (part, state) in READING_SCHEDULE {
            let color = match state {
                "Complete" => Color::Green,
                "In Progress" => Color::Yellow,
                _ => Color::Gray,
            };
            side.push(Line::from(vec![
                Span::raw(format!("{part:<18}")),
                Span::styled(state, Style::default().fg(color)),
            ]));
        }
        side.push(Line::raw(""));
        side.push(Line::styled(format!("Members ({})", group.members), bold()));
        if let Some(recent) = &group.recent_activity {
            side.push(Line::styled(format!("Last active {recent}"), muted()));
        }
        let sidebar = Paragraph::new(Text::from(side))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(sidebar, body[1]);
    }
}

fn my_group_item(group: &Group) -> ListItem<'static> {
    let mut title = vec![Span::styled(group.name.clone(), bold())];
    if group.admin {
        title.push(Span::styled("  Admin", Style::default().fg(Color::Magenta)));
    }
    if group.unread_messages > 0 {
        title.push(Span::styled(
            format!("  {} new", group.unread_messages),
            Style::default().fg(Color::Red),
        ));
    }

    let mut lines = vec![
        Line::from(title),
        Line::styled(group.description.clone(), muted()),
        Line::raw(format!(
            "Currently reading: {} by {}",
            group.current_book.title, group.current_book.author
        )),
    ];
    let mut meta = format!("{} members", group.members);
    if let Some(meeting) = &group.next_meeting {
        meta.push_str(&format!("  Next meeting: {meeting}"));
    }
    if let Some(recent) = &group.recent_activity {
        meta.push_str(&format!("  Active {recent}"));
    }
    lines.push(Line::styled(meta, muted()));
    lines.push(Line::raw(""));
    ListItem::new(Text::from(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{chars, ctx, key, render};

    #[test]
    fn compose_appends_and_ignores_blank() {
        let ctx = ctx();
        let mut view = GroupsView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Enter), &ctx);
        assert_eq!(view.open_group, Some(GroupId(1)));

        view.handle_key(key(KeyCode::Char('c')), &ctx);
        for k in chars("   ") {
            view.handle_key(k, &ctx);
        }
        view.handle_key(key(KeyCode::Enter), &ctx);
        assert_eq!(view.thread(GroupId(1)).len(), 3);

        for k in chars("Loved chapter 7") {
            view.handle_key(k, &ctx);
        }
        view.handle_key(key(KeyCode::Enter), &ctx);
        assert_eq!(view.thread(GroupId(1)).len(), 4);
        let last = &view.thread(GroupId(1))[3];
        assert_eq!(last.id, 4);
        assert_eq!(last.text, "Loved chapter 7");
        assert!(view.compose.value.is_empty());
        assert_eq!(ctx.catalog.discussion.len(), 3);
    }

    #[test]
    fn sent_message_stays_in_its_group() -> anyhow::Result<()> {
        let ctx = ctx();
        let mut view = GroupsView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Enter), &ctx);
        view.handle_key(key(KeyCode::Char('c')), &ctx);
        for k in chars("Only for sci-fi") {
            view.handle_key(k, &ctx);
        }
        view.handle_key(key(KeyCode::Enter), &ctx);
        view.handle_key(key(KeyCode::Esc), &ctx);
        view.handle_key(key(KeyCode::Esc), &ctx);
        assert!(view.open_group.is_none());

        view.handle_key(key(KeyCode::Down), &ctx);
        view.handle_key(key(KeyCode::Enter), &ctx);
        assert_eq!(view.open_group, Some(GroupId(2)));
        assert_eq!(view.thread(GroupId(2)).len(), 3);
        assert_eq!(view.thread(GroupId(1)).len(), 4);

        let screen = render(120, 40, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(!screen.contains("Only for sci-fi"));
        Ok(())
    }

    #[test]
    fn escape_leaves_group_detail() {
        let ctx = ctx();
        let mut view = GroupsView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Enter), &ctx);
        view.handle_key(key(KeyCode::Char('c')), &ctx);
        view.handle_key(key(KeyCode::Esc), &ctx);
        assert!(view.open_group.is_some());
        assert_eq!(
            view.handle_key(key(KeyCode::Esc), &ctx),
            ViewAction::Handled
        );
        assert!(view.open_group.is_none());
    }

    #[test]
    fn discover_search_and_join() {
        let ctx = ctx();
        let mut view = GroupsView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Tab), &ctx);
        assert_eq!(view.visible(&ctx).len(), 2);

        view.handle_key(key(KeyCode::Char('f')), &ctx);
        for k in chars("westover") {
            view.handle_key(k, &ctx);
        }
        view.handle_key(key(KeyCode::Esc), &ctx);
        let visible = view.visible(&ctx);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Non-Fiction Explorers");

        view.handle_key(key(KeyCode::Char(' ')), &ctx);
        assert!(view.joined.contains(&GroupId(5)));
        view.handle_key(key(KeyCode::Char(' ')), &ctx);
        assert!(!view.joined.contains(&GroupId(5)));
    }

    #[test]
    fn renders_group_detail() -> anyhow::Result<()> {
        let ctx = ctx();
        let mut view = GroupsView::new(&ctx.catalog);
        view.handle_key(key(KeyCode::Enter), &ctx);
        let screen = render(120, 40, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(screen.contains("Sci-Fi Book Club"));
        assert!(screen.contains("Discussion"));
        assert!(screen.contains("Share your thoughts..."));
        assert!(screen.contains("Reading Schedule"));
        Ok(())
    }

    #[test]
    fn renders_my_groups_tab() -> anyhow::Result<()> {
        let ctx = ctx();
        let view = GroupsView::new(&ctx.catalog);
        let screen = render(120, 40, |frame| view.draw(frame, frame.area(), &ctx))?;
        assert!(screen.contains("My Groups (3)"));
        assert!(screen.contains("Literary Fiction Circle"));
        Ok(())
    }
}
