//! Core domain types for BookVerse.

use serde::{Deserialize, Serialize};

mod model;
mod rating;

pub use model::{
    Activity, ActivityAuthor, ActivityKind, Book, BookDetails, BookId, BookRef, Cohort, Genre,
    Group, GroupId, InsightScores, LibraryEntry, LibraryStats, Message, NetworkStats, Person,
    PersonId, ReadingGoal, ReadingProgress, ReadingStatus, RecentRead, Review, Shelf, Viewer,
};
pub use rating::{Rating, Star, StarStyle, star_string, stars};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    Search,
    Book,
    Library,
    Social,
    Groups,
    FriendRecommendations,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Search,
        Page::Book,
        Page::Library,
        Page::Social,
        Page::Groups,
        Page::FriendRecommendations,
    ];

    /// Pages reachable from the header nav and menu.
    pub const NAV: [Page; 4] = [Page::Home, Page::Social, Page::Groups, Page::Library];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Search => "search",
            Page::Book => "book",
            Page::Library => "library",
            Page::Social => "social",
            Page::Groups => "groups",
            Page::FriendRecommendations => "friend-recommendations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "For You",
            Page::Search => "Search",
            Page::Book => "Book",
            Page::Library => "My Books",
            Page::Social => "Social",
            Page::Groups => "Reading Groups",
            Page::FriendRecommendations => "Find Friends",
        }
    }

    /// Unknown tags land on the home page.
    pub fn from_tag(tag: &str) -> Page {
        tag.parse().unwrap_or(Page::Home)
    }

    /// Whether the page can be shown without any other state.
    pub fn is_standalone(&self) -> bool {
        !matches!(self, Page::Book)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == value)
            .ok_or("unknown page")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err("unknown theme"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub star_style: StarStyle,
    pub start_page: Page,
    pub home_genres: Vec<Genre>,
}

pub const DEFAULT_HOME_GENRES: [Genre; 6] = [
    Genre::Fiction,
    Genre::Mystery,
    Genre::Romance,
    Genre::SciFi,
    Genre::Biography,
    Genre::SelfHelp,
];

/// Start pages offered in the settings panel.
const START_PAGES: [Page; 5] = [
    Page::Home,
    Page::Search,
    Page::Library,
    Page::Social,
    Page::Groups,
];

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            star_style: StarStyle::Unicode,
            start_page: Page::Home,
            home_genres: DEFAULT_HOME_GENRES.to_vec(),
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        if !self.start_page.is_standalone() {
            self.start_page = Page::Home;
        }

        let mut seen = Vec::with_capacity(self.home_genres.len());
        for genre in self.home_genres.drain(..) {
            if !seen.contains(&genre) {
                seen.push(genre);
            }
        }
        self.home_genres = seen;
        if self.home_genres.is_empty() {
            self.home_genres = DEFAULT_HOME_GENRES.to_vec();
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
    }

    pub fn cycle_star_style(&mut self) {
        self.star_style = match self.star_style {
            StarStyle::Unicode => StarStyle::Ascii,
            StarStyle::Ascii => StarStyle::Unicode,
        };
    }

    /// Flips a home chip. The last remaining genre cannot be removed.
    pub fn toggle_home_genre(&mut self, genre: Genre) -> bool {
        if let Some(idx) = self.home_genres.iter().position(|g| *g == genre) {
            if self.home_genres.len() > 1 {
                self.home_genres.remove(idx);
                return false;
            }
            return true;
        }
        self.home_genres.push(genre);
        true
    }

    pub fn cycle_start_page_next(&mut self) {
        let idx = START_PAGES
            .iter()
            .position(|p| *p == self.start_page)
            .unwrap_or(0);
        self.start_page = START_PAGES[(idx + 1) % START_PAGES.len()];
    }

    pub fn cycle_start_page_prev(&mut self) {
        let idx = START_PAGES
            .iter()
            .position(|p| *p == self.start_page)
            .unwrap_or(0);
        self.start_page = START_PAGES[(idx + START_PAGES.len() - 1) % START_PAGES.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_tags_roundtrip() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
        }
        assert_eq!(
            " Friend-Recommendations ".parse::<Page>().unwrap(),
            Page::FriendRecommendations
        );
    }

    #[test]
    fn unknown_tag_falls_back_to_home() {
        assert_eq!(Page::from_tag("settings"), Page::Home);
        assert_eq!(Page::from_tag(""), Page::Home);
        assert_eq!(Page::from_tag("groups"), Page::Groups);
    }

    #[test]
    fn theme_parses_strings() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" Light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn settings_normalize_rejects_book_start_page() {
        let mut settings = Settings {
            start_page: Page::Book,
            home_genres: vec![Genre::Mystery, Genre::Mystery, Genre::Fantasy],
            ..Settings::default()
        };
        settings.normalize();
        assert_eq!(settings.start_page, Page::Home);
        assert_eq!(settings.home_genres, vec![Genre::Mystery, Genre::Fantasy]);
    }

    #[test]
    fn settings_normalize_restores_default_genres() {
        let mut settings = Settings {
            home_genres: Vec::new(),
            ..Settings::default()
        };
        settings.normalize();
        assert_eq!(settings.home_genres, DEFAULT_HOME_GENRES.to_vec());
    }

    #[test]
    fn start_page_cycles_both_ways() {
        let mut settings = Settings::default();
        settings.cycle_start_page_next();
        assert_eq!(settings.start_page, Page::Search);
        settings.cycle_start_page_prev();
        settings.cycle_start_page_prev();
        assert_eq!(settings.start_page, Page::Groups);
    }

    #[test]
    fn home_genre_toggle_keeps_one() {
        let mut settings = Settings {
            home_genres: vec![Genre::Mystery],
            ..Settings::default()
        };
        assert!(settings.toggle_home_genre(Genre::Fantasy));
        assert!(!settings.toggle_home_genre(Genre::Mystery));
        assert!(settings.toggle_home_genre(Genre::Fantasy));
        assert_eq!(settings.home_genres, vec![Genre::Fantasy]);
    }

    #[test]
    fn cycle_theme_and_stars_rotate() {
        let mut settings = Settings::default();
        settings.cycle_theme();
        assert_eq!(settings.theme, Theme::Light);
        settings.cycle_theme();
        assert_eq!(settings.theme, Theme::Dark);
        settings.cycle_star_style();
        assert_eq!(settings.star_style, StarStyle::Ascii);
    }
}
