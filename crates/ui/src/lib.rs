//! ratatui-based UI.

use std::io::{self, Stdout};
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::Context as _;
use bookverse_application::{AppContext, Intent};
use bookverse_core::{Genre, Page, StarStyle, Theme};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
};

mod input;
mod views;
mod widgets;

use input::{InputEvent, TextInput};
use views::{ActiveView, ViewAction};
use widgets::{
    accent_color, bold, centered_rect, cycle, highlight_style, hints_line, input_line, muted,
    option_chip,
};

/// Static unread badge on the Social nav entry.
const SOCIAL_BADGE: u32 = 3;

const MENU_PAGES: [Page; 6] = [
    Page::Home,
    Page::Search,
    Page::Social,
    Page::Groups,
    Page::Library,
    Page::FriendRecommendations,
];

pub struct Ui {
    ctx: AppContext,
    view: ActiveView,
    search: TextInput,
    menu: MenuPanel,
    settings_panel: SettingsPanel,
}

impl Ui {
    pub fn new(mut ctx: AppContext) -> Self {
        ctx.settings.normalize();
        let view = ActiveView::mount(&ctx);
        let search = TextInput {
            value: ctx.search_query.clone(),
            focused: false,
        };
        Self {
            ctx,
            view,
            search,
            menu: MenuPanel::default(),
            settings_panel: SettingsPanel::default(),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Runs until the user quits and hands back the final context.
    pub fn run(&mut self) -> anyhow::Result<AppContext> {
        let mut terminal = setup_terminal()?;
        terminal.clear().ok();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);

        match (result, restore_result) {
            (Ok(Ok(ctx)), Ok(())) => Ok(ctx),
            (Ok(Ok(_)), Err(err)) => Err(err),
            (Ok(Err(err)), Ok(())) => Err(err),
            (Ok(Err(err)), Err(restore_err)) => Err(err.context(format!(
                "additionally failed to restore terminal: {restore_err}"
            ))),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<AppContext> {
        let tick_rate = Duration::from_millis(250);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }

                    needs_redraw = true;
                    if self.handle_key(key)?.is_break() {
                        return Ok(self.ctx.clone());
                    }
                }
                _ => {}
            }
        }
    }

    /// `Break` means quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<ControlFlow<()>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(ControlFlow::Break(()));
        }

        if self.settings_panel.open {
            self.handle_settings_panel_key(key)
        } else if self.search.focused {
            self.handle_search_key(key)
        } else if self.menu.open {
            self.handle_menu_key(key)
        } else {
            self.handle_main_key(key)
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> anyhow::Result<ControlFlow<()>> {
        if self.view.captures_input() {
            let action = self.view.handle_key(key, &self.ctx);
            self.apply_action(action);
            return Ok(ControlFlow::Continue(()));
        }

        match key.code {
            KeyCode::Char('q') => Ok(ControlFlow::Break(())),
            KeyCode::Char('/') => {
                self.search.focus();
                Ok(ControlFlow::Continue(()))
            }
            KeyCode::Char('m') => {
                self.menu.open = true;
                self.menu.selected = MENU_PAGES
                    .iter()
                    .position(|p| *p == self.ctx.page)
                    .unwrap_or(0);
                Ok(ControlFlow::Continue(()))
            }
            KeyCode::Char('s') => {
                self.settings_panel.open = true;
                self.settings_panel.selected = 0;
                Ok(ControlFlow::Continue(()))
            }
            KeyCode::Char(ch @ '1'..='4') => {
                let idx = (ch as usize) - ('1' as usize);
                if let Some(page) = Page::NAV.get(idx) {
                    self.apply(Intent::Navigate(*page));
                }
                Ok(ControlFlow::Continue(()))
            }
            _ => match self.view.handle_key(key, &self.ctx) {
                ViewAction::Ignored if key.code == KeyCode::Esc => {
                    if self.ctx.page == Page::Home {
                        return Ok(ControlFlow::Break(()));
                    }
                    self.apply(Intent::Navigate(Page::Home));
                    Ok(ControlFlow::Continue(()))
                }
                action => {
                    self.apply_action(action);
                    Ok(ControlFlow::Continue(()))
                }
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> anyhow::Result<ControlFlow<()>> {
        match self.search.handle_key(key) {
            InputEvent::Submitted => {
                if let Some(query) = self.search.submitted().map(str::to_string) {
                    self.search.blur();
                    self.apply(Intent::Search(query));
                }
            }
            InputEvent::Cancelled => {
                self.search.value = self.ctx.search_query.clone();
            }
            InputEvent::Edited | InputEvent::Ignored => {}
        }
        Ok(ControlFlow::Continue(()))
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> anyhow::Result<ControlFlow<()>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => {
                self.menu.open = false;
            }
            KeyCode::Up => {
                self.menu.selected = self.menu.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                self.menu.selected = (self.menu.selected + 1).min(MENU_PAGES.len() - 1);
            }
            KeyCode::Enter => {
                self.menu.open = false;
                match MENU_PAGES.get(self.menu.selected) {
                    Some(Page::Search) => self.apply(Intent::Browse),
                    Some(page) => self.apply(Intent::Navigate(*page)),
                    None => {}
                }
            }
            _ => {}
        }
        Ok(ControlFlow::Continue(()))
    }

    fn handle_settings_panel_key(&mut self, key: KeyEvent) -> anyhow::Result<ControlFlow<()>> {
        let settings = &mut self.ctx.settings;
        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => {
                self.settings_panel.open = false;
            }
            KeyCode::Up => {
                self.settings_panel.selected = self.settings_panel.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                self.settings_panel.selected = (self.settings_panel.selected + 1)
                    .min(SETTINGS_MENU_ITEM_COUNT.saturating_sub(1));
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match self.settings_panel.selected {
                    SETTINGS_MENU_THEME => settings.cycle_theme(),
                    SETTINGS_MENU_STARS => settings.cycle_star_style(),
                    SETTINGS_MENU_START_PAGE if forward => settings.cycle_start_page_next(),
                    SETTINGS_MENU_START_PAGE => settings.cycle_start_page_prev(),
                    SETTINGS_MENU_HOME_GENRES => {
                        let delta = if forward { 1 } else { -1 };
                        self.settings_panel.genre_cursor =
                            cycle(self.settings_panel.genre_cursor, Genre::ALL.len(), delta);
                    }
                    _ => {}
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.settings_panel.selected {
                SETTINGS_MENU_THEME => settings.cycle_theme(),
                SETTINGS_MENU_STARS => settings.cycle_star_style(),
                SETTINGS_MENU_START_PAGE => settings.cycle_start_page_next(),
                SETTINGS_MENU_HOME_GENRES => {
                    let genre = Genre::ALL[self.settings_panel.genre_cursor];
                    settings.toggle_home_genre(genre);
                }
                _ => {}
            },
            _ => {}
        }
        Ok(ControlFlow::Continue(()))
    }

    fn apply_action(&mut self, action: ViewAction) {
        if let ViewAction::Intent(intent) = action {
            self.apply(intent);
        }
    }

    fn apply(&mut self, intent: Intent) {
        self.ctx.apply(intent);
        self.search.value = self.ctx.search_query.clone();
        if !self.view.is_current(&self.ctx) {
            self.view = ActiveView::mount(&self.ctx);
        }
    }

    pub fn draw(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(Text::from(self.header_lines()))
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, layout[0]);

        self.view.draw(frame, layout[1], &self.ctx);

        let footer = Paragraph::new(Text::from(self.footer_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, layout[2]);

        if self.menu.open {
            self.draw_menu(area, frame);
        }

        if self.settings_panel.open {
            self.draw_settings_panel(area, frame);
        }
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let theme = self.ctx.settings.theme;
        let mut nav = vec![
            Span::styled("BookVerse", bold().fg(accent_color(theme))),
            Span::raw("   "),
        ];
        for (idx, page) in Page::NAV.iter().enumerate() {
            let label = match page {
                Page::Social => format!("{} Social ({SOCIAL_BADGE})", idx + 1),
                Page::Library => format!("{} My Library", idx + 1),
                Page::Groups => format!("{} Groups", idx + 1),
                _ => format!("{} Home", idx + 1),
            };
            let style = if *page == self.ctx.page {
                highlight_style(theme)
            } else {
                Style::default()
            };
            nav.push(Span::styled(format!(" {label} "), style));
            nav.push(Span::raw(" "));
        }

        vec![
            Line::from(nav),
            input_line(
                "Search",
                &self.search.value,
                "Search books, authors, friends...",
                self.search.focused,
            ),
        ]
    }

    fn footer_lines(&self) -> Vec<Line<'static>> {
        if self.search.focused {
            return vec![hints_line(&[
                ("Enter", "search"),
                ("Esc", "cancel"),
                ("Ctrl+u", "clear"),
            ])];
        }
        if self.settings_panel.open || self.menu.open {
            return vec![hints_line(&[("↑/↓", "select"), ("Enter", "choose"), ("Esc", "close")])];
        }

        let mut lines = vec![hints_line(&self.view.hints())];
        if !self.view.captures_input() {
            let back = if self.ctx.page == Page::Home { "quit" } else { "home" };
            lines.push(hints_line(&[
                ("/", "search"),
                ("m", "menu"),
                ("1-4", "pages"),
                ("s", "settings"),
                ("Esc", back),
                ("q", "quit"),
            ]));
        }
        lines
    }

    fn draw_menu(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(30, 40, area);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = MENU_PAGES
            .iter()
            .map(|page| ListItem::new(Line::raw(page.title())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Menu", bold())),
            )
            .highlight_style(highlight_style(self.ctx.settings.theme))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default();
        state.select(Some(self.menu.selected.min(MENU_PAGES.len() - 1)));
        frame.render_stateful_widget(list, popup_area, &mut state);
    }

    fn draw_settings_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            "Settings",
            Style::default().add_modifier(Modifier::BOLD),
        ));

        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let settings = &self.ctx.settings;
        let selected = self.settings_panel.selected;
        let theme_row = selected == SETTINGS_MENU_THEME;
        let stars_row = selected == SETTINGS_MENU_STARS;
        let genres_row = selected == SETTINGS_MENU_HOME_GENRES;

        let mut genre_lines = vec![Line::styled("Home genres:", bold())];
        for (row, chunk) in Genre::ALL.chunks(GENRE_CHIPS_PER_ROW).enumerate() {
            let mut spans = vec![Span::raw("  ")];
            for (col, genre) in chunk.iter().enumerate() {
                let idx = row * GENRE_CHIPS_PER_ROW + col;
                let chip_selected = genres_row && idx == self.settings_panel.genre_cursor;
                spans.push(option_chip(
                    genre.label(),
                    settings.home_genres.contains(genre),
                    chip_selected,
                ));
                spans.push(Span::raw(" "));
            }
            genre_lines.push(Line::from(spans));
        }

        let items = vec![
            ListItem::new(Line::from(vec![
                Span::styled("Theme: ", bold()),
                option_chip("dark", settings.theme == Theme::Dark, theme_row),
                Span::raw(" "),
                option_chip("light", settings.theme == Theme::Light, theme_row),
            ])),
            ListItem::new(Line::from(vec![
                Span::styled("Stars: ", bold()),
                option_chip(
                    "★ unicode",
                    settings.star_style == StarStyle::Unicode,
                    stars_row,
                ),
                Span::raw(" "),
                option_chip("* ascii", settings.star_style == StarStyle::Ascii, stars_row),
            ])),
            ListItem::new(Line::from(vec![
                Span::styled("Start page: ", bold()),
                Span::raw(format!("< {} >", settings.start_page.title())),
            ])),
            ListItem::new(Text::from(genre_lines)),
        ];

        let list = List::new(items)
            .highlight_style(Style::default().fg(accent_color(settings.theme)))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always)
            .block(Block::default());

        let mut state = ListState::default();
        state.select(Some(selected.min(SETTINGS_MENU_ITEM_COUNT.saturating_sub(1))));
        frame.render_stateful_widget(list, sections[0], &mut state);

        let help = Paragraph::new(Text::from(vec![hints_line(&[
            ("↑/↓", "select"),
            ("Enter", "toggle"),
            ("←/→", "adjust"),
            ("Esc", "close"),
        ])]))
        .style(muted())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);
        frame.render_widget(help, sections[1]);
    }
}

#[derive(Debug, Clone, Default)]
struct MenuPanel {
    open: bool,
    selected: usize,
}

#[derive(Debug, Clone, Default)]
struct SettingsPanel {
    open: bool,
    selected: usize,
    genre_cursor: usize,
}

const SETTINGS_MENU_THEME: usize = 0;
const SETTINGS_MENU_STARS: usize = 1;
const SETTINGS_MENU_START_PAGE: usize = 2;
const SETTINGS_MENU_HOME_GENRES: usize = 3;
const SETTINGS_MENU_ITEM_COUNT: usize = 4;
const GENRE_CHIPS_PER_ROW: usize = 4;

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leave alt screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{chars, ctx, key, render};
    use bookverse_core::BookId;

    fn press(ui: &mut Ui, keys: impl IntoIterator<Item = KeyEvent>) -> anyhow::Result<()> {
        for k in keys {
            assert_eq!(ui.handle_key(k)?, ControlFlow::Continue(()));
        }
        Ok(())
    }

    #[test]
    fn digits_switch_nav_pages() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx());
        press(&mut ui, [key(KeyCode::Char('2'))])?;
        assert_eq!(ui.context().page, Page::Social);
        press(&mut ui, [key(KeyCode::Char('4'))])?;
        assert_eq!(ui.context().page, Page::Library);
        assert_eq!(ui.view.page(), Page::Library);
        Ok(())
    }

    #[test]
    fn header_search_submits_and_ignores_blank() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx());
        press(&mut ui, [key(KeyCode::Char('/'))])?;
        press(&mut ui, chars("  "))?;
        press(&mut ui, [key(KeyCode::Enter)])?;
        assert_eq!(ui.context().page, Page::Home);
        assert!(ui.search.focused);

        press(
            &mut ui,
            [KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)],
        )?;
        press(&mut ui, chars("hail q"))?;
        press(&mut ui, [key(KeyCode::Enter)])?;
        assert_eq!(ui.context().page, Page::Search);
        assert_eq!(ui.context().search_query, "hail q");
        assert!(!ui.search.focused);
        Ok(())
    }

    #[test]
    fn search_escape_restores_last_query() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx());
        press(&mut ui, [key(KeyCode::Char('/'))])?;
        press(&mut ui, chars("educated"))?;
        press(&mut ui, [key(KeyCode::Esc)])?;
        assert!(!ui.search.focused);
        assert!(ui.search.value.is_empty());
        assert_eq!(ui.context().page, Page::Home);
        Ok(())
    }

    #[test]
    fn menu_navigates_and_closes() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx());
        press(&mut ui, [key(KeyCode::Char('m'))])?;
        assert!(ui.menu.open);
        for _ in 0..5 {
            press(&mut ui, [key(KeyCode::Down)])?;
        }
        press(&mut ui, [key(KeyCode::Enter)])?;
        assert!(!ui.menu.open);
        assert_eq!(ui.context().page, Page::FriendRecommendations);
        Ok(())
    }

    #[test]
    fn escape_goes_home_then_quits() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx().with_start_page(Page::Groups));
        assert_eq!(ui.handle_key(key(KeyCode::Esc))?, ControlFlow::Continue(()));
        assert_eq!(ui.context().page, Page::Home);
        assert_eq!(ui.handle_key(key(KeyCode::Esc))?, ControlFlow::Break(()));
        Ok(())
    }

    #[test]
    fn focused_view_input_swallows_shortcuts() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx().with_start_page(Page::FriendRecommendations));
        press(&mut ui, [key(KeyCode::Char('f'))])?;
        press(&mut ui, chars("q1/"))?;
        assert_eq!(ui.context().page, Page::FriendRecommendations);
        assert!(!ui.search.focused);
        assert_eq!(ui.handle_key(key(KeyCode::Esc))?, ControlFlow::Continue(()));
        assert_eq!(ui.handle_key(key(KeyCode::Char('q')))?, ControlFlow::Break(()));
        Ok(())
    }

    #[test]
    fn leaving_a_view_drops_its_state() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx().with_start_page(Page::Library));
        press(&mut ui, [key(KeyCode::Char('+'))])?;
        let screen = render(120, 50, |frame| ui.draw(frame))?;
        assert!(screen.contains("250/368 pages"));

        press(&mut ui, [key(KeyCode::Char('1')), key(KeyCode::Char('4'))])?;
        let screen = render(120, 50, |frame| ui.draw(frame))?;
        assert!(screen.contains("240/368 pages"));
        Ok(())
    }

    #[test]
    fn opening_another_book_remounts_detail() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx());
        ui.apply(Intent::OpenBook(BookId(1)));
        press(&mut ui, [key(KeyCode::Enter)])?;
        assert_eq!(ui.context().selected_book, Some(BookId(7)));
        assert!(ui.view.is_current(ui.context()));
        Ok(())
    }

    #[test]
    fn book_page_without_selection_shows_not_found() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx().with_start_page(Page::Book));
        let screen = render(100, 30, |frame| ui.draw(frame))?;
        assert!(screen.contains("Book not found"));
        press(&mut ui, [key(KeyCode::Enter)])?;
        assert_eq!(ui.context().page, Page::Home);
        Ok(())
    }

    #[test]
    fn settings_panel_edits_settings() -> anyhow::Result<()> {
        let mut ui = Ui::new(ctx());
        press(&mut ui, [key(KeyCode::Char('s'))])?;
        press(&mut ui, [key(KeyCode::Enter)])?;
        assert_eq!(ui.context().settings.theme, Theme::Light);
        press(&mut ui, [key(KeyCode::Down), key(KeyCode::Right)])?;
        assert_eq!(ui.context().settings.star_style, StarStyle::Ascii);
        press(&mut ui, [key(KeyCode::Down), key(KeyCode::Left)])?;
        assert_eq!(ui.context().settings.start_page, Page::Groups);
        press(&mut ui, [key(KeyCode::Down), key(KeyCode::Enter)])?;
        assert!(!ui.context().settings.home_genres.contains(&Genre::Fiction));

        let screen = render(120, 40, |frame| ui.draw(frame))?;
        assert!(screen.contains("Settings"));
        press(&mut ui, [key(KeyCode::Esc)])?;
        assert!(!ui.settings_panel.open);
        assert_eq!(ui.context().page, Page::Home);
        Ok(())
    }

    #[test]
    fn header_shows_nav_and_badge() -> anyhow::Result<()> {
        let ui = Ui::new(ctx());
        let screen = render(120, 40, |frame| ui.draw(frame))?;
        assert!(screen.contains("BookVerse"));
        assert!(screen.contains("Social (3)"));
        assert!(screen.contains("Search books, authors, friends..."));
        Ok(())
    }
}
