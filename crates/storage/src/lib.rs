//! Sqlite-backed persistence for user settings.
//!
//! Only preferences live here. Follows, likes, joined groups and messages are
//! session state and are never written.

use std::path::Path;

use anyhow::Context as _;
use bookverse_core::{Genre, Page, Settings, StarStyle, Theme};
use rusqlite::{Connection, OptionalExtension as _};

#[derive(Debug)]
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("open sqlite db at {}", path.as_ref().display()))?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    fn migrate(&self) -> anyhow::Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                theme TEXT NOT NULL,
                star_style TEXT NOT NULL
            );
            INSERT OR IGNORE INTO settings (id, theme, star_style)
            VALUES (1, 'dark', 'unicode');
            "#,
        )?;

        self.add_column("start_page", "TEXT NOT NULL DEFAULT 'home'")?;
        self.add_column("home_genres_json", "TEXT NOT NULL DEFAULT '[]'")?;
        Ok(())
    }

    fn add_column(&self, name: &str, decl: &str) -> anyhow::Result<()> {
        let sql = format!("ALTER TABLE settings ADD COLUMN {name} {decl}");
        match self.conn.execute(&sql, []) {
            Ok(_) => {
                tracing::debug!(column = name, "added settings column");
                Ok(())
            }
            Err(err) => {
                if err.to_string().contains("duplicate column name") {
                    Ok(())
                } else {
                    Err(err).with_context(|| format!("add settings.{name} column"))
                }
            }
        }
    }

    /// Unparseable stored values fall back to their defaults rather than
    /// failing the launch.
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        let row = self
            .conn
            .query_row(
                "SELECT theme, star_style, start_page, home_genres_json FROM settings WHERE id = 1",
                [],
                |row| {
                    let theme: String = row.get(0)?;
                    let star_style: String = row.get(1)?;
                    let start_page: String = row.get(2)?;
                    let home_genres_json: String = row.get(3)?;
                    Ok((theme, star_style, start_page, home_genres_json))
                },
            )
            .optional()?;

        let Some((theme, star_style, start_page, home_genres_json)) = row else {
            return Ok(Settings::default());
        };

        let defaults = Settings::default();
        let home_genres = match serde_json::from_str::<Vec<String>>(&home_genres_json) {
            Ok(tags) => tags
                .iter()
                .filter_map(|tag| tag.parse::<Genre>().ok())
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed home genres");
                Vec::new()
            }
        };

        let mut settings = Settings {
            theme: theme.parse::<Theme>().unwrap_or(defaults.theme),
            star_style: star_style
                .parse::<StarStyle>()
                .unwrap_or(defaults.star_style),
            start_page: Page::from_tag(&start_page),
            home_genres,
        };
        settings.normalize();
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> anyhow::Result<()> {
        let mut settings = settings.clone();
        settings.normalize();
        let tags: Vec<&str> = settings.home_genres.iter().map(Genre::as_str).collect();
        let home_genres_json = serde_json::to_string(&tags)?;

        self.conn
            .execute(
                "UPDATE settings SET theme = ?, star_style = ?, start_page = ?, home_genres_json = ? WHERE id = 1",
                (
                    settings.theme.as_str(),
                    settings.star_style.as_str(),
                    settings.start_page.as_str(),
                    home_genres_json,
                ),
            )
            .context("save settings")?;
        tracing::debug!(
            theme = %settings.theme,
            star_style = %settings.star_style,
            start_page = %settings.start_page,
            "settings saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_db_loads_defaults() -> anyhow::Result<()> {
        let storage = Storage::open_in_memory()?;
        assert_eq!(storage.load_settings()?, Settings::default());
        Ok(())
    }

    #[test]
    fn settings_roundtrip() -> anyhow::Result<()> {
        let storage = Storage::open_in_memory()?;
        let mut settings = storage.load_settings()?;
        settings.theme = Theme::Light;
        settings.star_style = StarStyle::Ascii;
        settings.start_page = Page::Groups;
        settings.home_genres = vec![Genre::Fantasy, Genre::SciFi];
        storage.save_settings(&settings)?;

        let loaded = storage.load_settings()?;
        assert_eq!(loaded, settings);
        Ok(())
    }

    #[test]
    fn book_start_page_is_not_persisted() -> anyhow::Result<()> {
        let storage = Storage::open_in_memory()?;
        let settings = Settings {
            start_page: Page::Book,
            ..Settings::default()
        };
        storage.save_settings(&settings)?;
        assert_eq!(storage.load_settings()?.start_page, Page::Home);
        Ok(())
    }

    #[test]
    fn bad_stored_values_fall_back() -> anyhow::Result<()> {
        let storage = Storage::open_in_memory()?;
        storage.conn.execute(
            "UPDATE settings SET theme = 'sepia', start_page = 'profile', home_genres_json = 'nope' WHERE id = 1",
            [],
        )?;
        let settings = storage.load_settings()?;
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.start_page, Page::Home);
        assert_eq!(settings.home_genres, Settings::default().home_genres);
        Ok(())
    }

    #[test]
    fn migrate_is_idempotent() -> anyhow::Result<()> {
        let storage = Storage::open_in_memory()?;
        storage.migrate()?;
        storage.migrate()?;
        assert_eq!(storage.load_settings()?, Settings::default());
        Ok(())
    }
}
