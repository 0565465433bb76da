//! Test helpers and fixtures.

use bookverse_application::AppContext;
use bookverse_catalog::Catalog;
use bookverse_core::{DEFAULT_HOME_GENRES, Page, Settings, StarStyle, Theme};

pub fn make_settings(theme: Theme, star_style: StarStyle, start_page: Page) -> Settings {
    Settings {
        theme,
        star_style,
        start_page,
        home_genres: DEFAULT_HOME_GENRES.to_vec(),
    }
}

pub fn sample_context() -> AppContext {
    AppContext::new(Settings::default(), Catalog::sample())
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use bookverse_application::{BookFilter, Intent, ToggleSet};
    use bookverse_core::{BookId, Genre, PersonId, Rating, Star, stars};
    use bookverse_storage::Storage;
    use bookverse_ui::Ui;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn screen_text(ui: &Ui) -> anyhow::Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40))?;
        terminal.draw(|frame| ui.draw(frame))?;
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn builds_settings() {
        let settings = make_settings(Theme::Light, StarStyle::Ascii, Page::Groups);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.start_page, Page::Groups);
        assert_eq!(settings.home_genres.len(), DEFAULT_HOME_GENRES.len());
    }

    #[test]
    fn stars_cover_the_whole_rating_range() {
        let mut value = -1.0_f32;
        while value <= 6.0 {
            let row = stars(value);
            let clamped = Rating::new(value).value();
            let full = row.iter().filter(|s| **s == Star::Full).count();
            let half = row.iter().filter(|s| **s == Star::Half).count();
            assert_eq!(full, clamped.floor() as usize, "rating {value}");
            assert_eq!(half, usize::from(clamped.fract() > 0.0), "rating {value}");
            value += 0.25;
        }
    }

    #[test]
    fn empty_filter_keeps_every_result() {
        let ctx = sample_context();
        let results = ctx.catalog.search_results();
        assert_eq!(BookFilter::default().apply(&results).len(), results.len());
    }

    #[test]
    fn rating_filter_keeps_source_order() {
        let ctx = sample_context();
        let filter = BookFilter {
            min_rating: Rating::new(4.5),
            ..BookFilter::default()
        };
        let titles: Vec<&str> = filter
            .apply(&ctx.catalog.search_results())
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(
            titles,
            ["The Seven Husbands of Evelyn Hugo", "Project Hail Mary", "Educated"]
        );
    }

    #[test]
    fn genre_filter_uses_enum_identity() {
        let ctx = sample_context();
        let mut filter = BookFilter::default();
        filter.genres.toggle(Genre::SciFi);
        let results = filter.apply(&ctx.catalog.search_results());
        assert!(!results.is_empty());
        assert!(results.iter().all(|b| b.genre == Genre::SciFi));
    }

    #[test]
    fn follow_toggle_twice_restores() {
        let mut following: ToggleSet<PersonId> = ToggleSet::new();
        assert!(following.toggle(PersonId(2)));
        assert!(!following.toggle(PersonId(2)));
        assert!(following.is_empty());
    }

    #[test]
    fn unknown_tag_falls_back_home() {
        let mut ctx = sample_context().with_start_page(Page::Library);
        ctx.navigate_tag("nowhere");
        assert_eq!(ctx.page, Page::Home);
    }

    #[test]
    fn missing_book_renders_not_found() -> anyhow::Result<()> {
        let mut ctx = sample_context();
        ctx.apply(Intent::OpenBook(BookId(999)));
        assert_eq!(ctx.page, Page::Book);
        let ui = Ui::new(ctx);
        assert!(screen_text(&ui)?.contains("Book not found"));
        Ok(())
    }

    #[test]
    fn ui_quits_and_keeps_settings_edits() -> anyhow::Result<()> {
        let storage = Storage::open_in_memory()?;
        let ctx = AppContext::new(storage.load_settings()?, Catalog::sample());
        let mut ui = Ui::new(ctx);

        for code in [KeyCode::Char('s'), KeyCode::Enter, KeyCode::Esc] {
            assert_eq!(ui.handle_key(key(code))?, ControlFlow::Continue(()));
        }
        assert_eq!(ui.handle_key(key(KeyCode::Char('q')))?, ControlFlow::Break(()));

        storage.save_settings(&ui.context().settings)?;
        assert_eq!(storage.load_settings()?.theme, Theme::Light);
        Ok(())
    }

    #[test]
    fn settings_survive_reopen() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("settings.db");

        let settings = make_settings(Theme::Light, StarStyle::Ascii, Page::Social);
        Storage::open(&path)?.save_settings(&settings)?;
        let loaded = Storage::open(&path)?.load_settings()?;

        assert_eq!(loaded, settings);
        Ok(())
    }
}
