use serde::{Deserialize, Serialize};

use crate::Rating;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Fiction,
    Mystery,
    Romance,
    SciFi,
    Biography,
    SelfHelp,
    Fantasy,
    History,
    HistoricalFiction,
    Thriller,
    NonFiction,
    Philosophy,
}

impl Genre {
    pub const ALL: [Genre; 12] = [
        Genre::Fiction,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Biography,
        Genre::SelfHelp,
        Genre::Fantasy,
        Genre::History,
        Genre::HistoricalFiction,
        Genre::Thriller,
        Genre::NonFiction,
        Genre::Philosophy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "fiction",
            Genre::Mystery => "mystery",
            Genre::Romance => "romance",
            Genre::SciFi => "scifi",
            Genre::Biography => "biography",
            Genre::SelfHelp => "selfhelp",
            Genre::Fantasy => "fantasy",
            Genre::History => "history",
            Genre::HistoricalFiction => "historicalfiction",
            Genre::Thriller => "thriller",
            Genre::NonFiction => "nonfiction",
            Genre::Philosophy => "philosophy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Biography => "Biography",
            Genre::SelfHelp => "Self-Help",
            Genre::Fantasy => "Fantasy",
            Genre::History => "History",
            Genre::HistoricalFiction => "Historical Fiction",
            Genre::Thriller => "Thriller",
            Genre::NonFiction => "Non-Fiction",
            Genre::Philosophy => "Philosophy",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Genre {
    type Err = &'static str;

    /// Accepts tags (`scifi`) and labels (`Sci-Fi`) alike.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == key)
            .ok_or("unknown genre")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub rating: Rating,
    pub cover_url: String,
    pub genre: Genre,
    pub ai_summary: String,
    pub reading_time: Option<String>,
    pub recommended: bool,
    pub publish_year: Option<u16>,
    pub details: Option<BookDetails>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookDetails {
    pub pages: Option<u32>,
    pub publisher: Option<String>,
    pub published: Option<String>,
    pub language: Option<String>,
    pub isbn: Option<String>,
    pub format: Option<String>,
    pub edition: Option<String>,
    pub difficulty: Option<String>,
    pub genre_rank: Option<String>,
    pub labels: Vec<String>,
    pub description: Vec<String>,
    pub ratings_count: Option<u32>,
    pub reviews_count: Option<u32>,
}

/// Title/author pair for books referenced outside the catalog proper
/// (group picks, feed entries, recent reads).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRef {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingProgress {
    pub pages_read: u32,
    pub total_pages: u32,
}

impl ReadingProgress {
    pub fn percent(&self) -> f32 {
        if self.total_pages == 0 {
            0.0
        } else {
            (self.pages_read as f32 / self.total_pages as f32) * 100.0
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total_pages == 0 {
            0.0
        } else {
            (self.pages_read as f64 / self.total_pages as f64).clamp(0.0, 1.0)
        }
    }

    pub fn advance(&mut self, delta: i32) {
        let next = i64::from(self.pages_read) + i64::from(delta);
        self.pages_read = next.clamp(0, i64::from(self.total_pages)) as u32;
    }

    pub fn is_finished(&self) -> bool {
        self.total_pages > 0 && self.pages_read >= self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shelf {
    CurrentlyReading,
    WantToRead,
    Read,
}

impl Shelf {
    pub const ALL: [Shelf; 3] = [Shelf::CurrentlyReading, Shelf::WantToRead, Shelf::Read];

    pub fn label(&self) -> &'static str {
        match self {
            Shelf::CurrentlyReading => "Currently Reading",
            Shelf::WantToRead => "Want to Read",
            Shelf::Read => "Read",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    pub book: BookId,
    pub shelf: Shelf,
    pub progress: Option<ReadingProgress>,
    pub added: Option<String>,
    pub finished: Option<String>,
    pub user_rating: Option<u8>,
}

impl LibraryEntry {
    /// Rating shown on the card: the reader's own score once finished.
    pub fn display_rating(&self, book: &Book) -> f32 {
        self.user_rating
            .map(f32::from)
            .unwrap_or_else(|| book.rating.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingStatus {
    #[default]
    WantToRead,
    CurrentlyReading,
    Read,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "want-to-read",
            ReadingStatus::CurrentlyReading => "currently-reading",
            ReadingStatus::Read => "read",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "Want to Read",
            ReadingStatus::CurrentlyReading => "Currently Reading",
            ReadingStatus::Read => "Read",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ReadingStatus::WantToRead => ReadingStatus::CurrentlyReading,
            ReadingStatus::CurrentlyReading => ReadingStatus::Read,
            ReadingStatus::Read => ReadingStatus::WantToRead,
        }
    }
}

/// Which lists a person shows up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cohort {
    Friend,
    Suggested,
    Recommended,
    Local,
    NewMember,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentRead {
    pub title: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub username: String,
    pub avatar_url: String,
    pub location: Option<String>,
    pub books_read: u32,
    pub mutual_friends: u32,
    pub compatibility: Option<u8>,
    pub favorite_genres: Vec<Genre>,
    pub currently_reading: Option<String>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub joined: Option<String>,
    pub distance: Option<String>,
    pub recent_reads: Vec<RecentRead>,
    pub following: bool,
    pub cohorts: Vec<Cohort>,
}

impl Person {
    pub fn in_cohort(&self, cohort: Cohort) -> bool {
        self.cohorts.contains(&cohort)
    }

    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub members: u32,
    pub current_book: BookRef,
    pub next_meeting: Option<String>,
    pub unread_messages: u32,
    pub admin: bool,
    pub recent_activity: Option<String>,
    pub tags: Vec<String>,
    pub joined: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u32,
    pub author: String,
    pub text: String,
    pub timestamp: String,
    pub likes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityAuthor {
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    Book {
        action: String,
        book: BookRef,
        rating: Option<u8>,
        review: Option<String>,
    },
    Group {
        action: String,
        group: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: u32,
    pub author: ActivityAuthor,
    pub kind: ActivityKind,
    pub timestamp: String,
    pub likes: u32,
    pub comments: u32,
}

impl Activity {
    pub fn book(&self) -> Option<&BookRef> {
        match &self.kind {
            ActivityKind::Book { book, .. } => Some(book),
            ActivityKind::Group { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: u32,
    pub author: String,
    pub rating: u8,
    pub text: String,
    pub date: String,
    pub helpful: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingGoal {
    pub year: u16,
    pub target: u32,
    pub completed: u32,
    pub in_progress: u32,
}

impl ReadingGoal {
    pub fn counted(&self) -> u32 {
        self.completed + self.in_progress
    }

    pub fn percent(&self) -> f32 {
        if self.target == 0 {
            0.0
        } else {
            (self.counted() as f32 / self.target as f32) * 100.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryStats {
    pub total_books: u32,
    pub pages_read: u32,
    pub average_rating: f32,
    pub reading_streak_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStats {
    pub following: u32,
    pub followers: u32,
    pub reading_groups: u32,
}

/// Placeholder insight scores shown on the book page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightScores {
    pub recommend: String,
    pub emotional_impact: String,
    pub writing_quality: String,
    pub blurb: String,
}

/// The signed-in reader the sample data is written for.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    pub name: String,
    pub location: String,
    pub favorite_genres: Vec<Genre>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_parses_tags_and_labels() {
        assert_eq!("scifi".parse::<Genre>().unwrap(), Genre::SciFi);
        assert_eq!("Sci-Fi".parse::<Genre>().unwrap(), Genre::SciFi);
        assert_eq!(" Self-Help ".parse::<Genre>().unwrap(), Genre::SelfHelp);
        assert_eq!(
            "Historical Fiction".parse::<Genre>().unwrap(),
            Genre::HistoricalFiction
        );
        assert!("poetry".parse::<Genre>().is_err());
    }

    #[test]
    fn progress_handles_zero_pages() {
        let progress = ReadingProgress {
            pages_read: 10,
            total_pages: 0,
        };
        assert_eq!(progress.percent(), 0.0);
        assert_eq!(progress.ratio(), 0.0);
    }

    #[test]
    fn progress_advance_clamps() {
        let mut progress = ReadingProgress {
            pages_read: 360,
            total_pages: 368,
        };
        progress.advance(25);
        assert_eq!(progress.pages_read, 368);
        assert!(progress.is_finished());
        progress.advance(-400);
        assert_eq!(progress.pages_read, 0);
    }

    #[test]
    fn reading_status_cycles() {
        let status = ReadingStatus::default();
        assert_eq!(status, ReadingStatus::WantToRead);
        assert_eq!(status.next().next().next(), status);
        assert_eq!(status.next().as_str(), "currently-reading");
    }

    #[test]
    fn goal_counts_in_progress_books() {
        let goal = ReadingGoal {
            year: 2024,
            target: 24,
            completed: 8,
            in_progress: 2,
        };
        assert_eq!(goal.counted(), 10);
        assert!((goal.percent() - 41.666).abs() < 0.01);
    }
}
