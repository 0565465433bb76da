use bookverse_core::{Book, Cohort, Genre, Group, Person, Rating, Viewer};

use crate::ToggleSet;

/// Case-insensitive substring match against any field. Blank queries match.
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Criteria for book lists. Categories are AND-combined; selected genres are
/// OR-combined; an empty category matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub min_rating: Rating,
    pub genres: ToggleSet<Genre>,
}

impl BookFilter {
    pub fn has_filters(&self) -> bool {
        !self.min_rating.is_zero() || !self.genres.is_empty()
    }

    pub fn clear_filters(&mut self) {
        self.min_rating = Rating::default();
        self.genres.clear();
    }

    pub fn matches_rating(&self, book: &Book) -> bool {
        book.rating.value() >= self.min_rating.value()
    }

    pub fn matches_genre(&self, book: &Book) -> bool {
        self.genres.is_empty() || self.genres.contains(&book.genre)
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matches_rating(book) && self.matches_genre(book)
    }

    /// Matching books in source order.
    pub fn apply<'a>(&self, books: &[&'a Book]) -> Vec<&'a Book> {
        books
            .iter()
            .copied()
            .filter(|book| self.matches(book))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Relevance,
    Rating,
    Newest,
    Title,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Relevance,
        SortOrder::Rating,
        SortOrder::Newest,
        SortOrder::Title,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "Relevance",
            SortOrder::Rating => "Highest Rated",
            SortOrder::Newest => "Newest First",
            SortOrder::Title => "Title A-Z",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortOrder::Relevance => SortOrder::Rating,
            SortOrder::Rating => SortOrder::Newest,
            SortOrder::Newest => SortOrder::Title,
            SortOrder::Title => SortOrder::Relevance,
        }
    }

    /// Stable; relevance keeps source order.
    pub fn sort(self, books: &mut [&Book]) {
        match self {
            SortOrder::Relevance => {}
            SortOrder::Rating => books.sort_by(|a, b| b.rating.value().total_cmp(&a.rating.value())),
            SortOrder::Newest => books.sort_by(|a, b| match (a.publish_year, b.publish_year) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }),
            SortOrder::Title => books.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.title.cmp(&b.title))
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FriendChip {
    SimilarTaste,
    Local,
    Popular,
    NewMembers,
    ActiveReaders,
    SameGenres,
}

pub const SIMILAR_TASTE_MIN_MATCH: u8 = 90;
pub const POPULAR_MIN_BOOKS: u32 = 100;
pub const ACTIVE_MIN_BOOKS: u32 = 50;

impl FriendChip {
    pub const ALL: [FriendChip; 6] = [
        FriendChip::SimilarTaste,
        FriendChip::Local,
        FriendChip::Popular,
        FriendChip::NewMembers,
        FriendChip::ActiveReaders,
        FriendChip::SameGenres,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FriendChip::SimilarTaste => "Similar Taste",
            FriendChip::Local => "Local",
            FriendChip::Popular => "Popular",
            FriendChip::NewMembers => "New Members",
            FriendChip::ActiveReaders => "Active Readers",
            FriendChip::SameGenres => "Same Genres",
        }
    }

    pub fn matches(&self, person: &Person, viewer: &Viewer) -> bool {
        match self {
            FriendChip::SimilarTaste => person
                .compatibility
                .is_some_and(|score| score >= SIMILAR_TASTE_MIN_MATCH),
            FriendChip::Local => person
                .location
                .as_deref()
                .is_some_and(|loc| loc.eq_ignore_ascii_case(&viewer.location)),
            FriendChip::Popular => person.books_read >= POPULAR_MIN_BOOKS,
            FriendChip::NewMembers => person.in_cohort(Cohort::NewMember),
            FriendChip::ActiveReaders => person.books_read >= ACTIVE_MIN_BOOKS,
            FriendChip::SameGenres => person
                .favorite_genres
                .iter()
                .any(|g| viewer.favorite_genres.contains(g)),
        }
    }
}

/// Chips are OR-combined and AND-ed with the text query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonFilter {
    pub chips: ToggleSet<FriendChip>,
    pub query: String,
}

impl PersonFilter {
    pub fn matches(&self, person: &Person, viewer: &Viewer) -> bool {
        let chip_ok =
            self.chips.is_empty() || self.chips.iter().any(|chip| chip.matches(person, viewer));
        let reading = person.currently_reading.as_deref().unwrap_or_default();
        chip_ok && matches_query(
            &self.query,
            &[person.name.as_str(), person.username.as_str(), reading],
        )
    }

    pub fn apply<'a>(&self, people: &[&'a Person], viewer: &Viewer) -> Vec<&'a Person> {
        people
            .iter()
            .copied()
            .filter(|p| self.matches(p, viewer))
            .collect()
    }
}

pub fn group_matches(group: &Group, query: &str) -> bool {
    let mut fields = vec![
        group.name.as_str(),
        group.description.as_str(),
        group.current_book.title.as_str(),
        group.current_book.author.as_str(),
    ];
    fields.extend(group.tags.iter().map(String::as_str));
    matches_query(query, &fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookverse_catalog::Catalog;
    use bookverse_core::PersonId;

    fn titles(books: &[&Book]) -> Vec<String> {
        books.iter().map(|b| b.title.clone()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let catalog = Catalog::sample();
        let books = catalog.search_results();
        let filter = BookFilter::default();
        assert!(!filter.has_filters());
        assert_eq!(filter.apply(&books), books);
    }

    #[test]
    fn genres_or_combine_and_rating_ands() {
        let catalog = Catalog::sample();
        let books = catalog.search_results();
        let mut filter = BookFilter::default();
        filter.genres.toggle(Genre::SciFi);
        filter.genres.toggle(Genre::Mystery);
        assert_eq!(
            titles(&filter.apply(&books)),
            vec!["Project Hail Mary", "The Silent Patient"]
        );

        filter.min_rating = Rating::new(4.5);
        assert_eq!(titles(&filter.apply(&books)), vec!["Project Hail Mary"]);
    }

    #[test]
    fn clear_filters_resets_rating_and_genres() {
        let mut filter = BookFilter {
            min_rating: Rating::new(3.0),
            ..BookFilter::default()
        };
        filter.genres.toggle(Genre::Fiction);
        assert!(filter.has_filters());
        filter.clear_filters();
        assert!(!filter.has_filters());
        assert_eq!(filter, BookFilter::default());
    }

    #[test]
    fn sort_orders() {
        let catalog = Catalog::sample();
        let mut books = catalog.search_results();
        SortOrder::Rating.sort(&mut books);
        assert_eq!(books[0].title, "Project Hail Mary");
        assert_eq!(books[5].title, "The Silent Patient");

        SortOrder::Newest.sort(&mut books);
        assert_eq!(books[0].title, "Project Hail Mary");
        assert_eq!(books[1].title, "The Midnight Library");

        SortOrder::Title.sort(&mut books);
        assert_eq!(books[0].title, "Educated");
        assert_eq!(books[5].title, "Where the Crawdads Sing");

        let mut books = catalog.search_results();
        SortOrder::Relevance.sort(&mut books);
        assert_eq!(books, catalog.search_results());
        assert_eq!(SortOrder::Title.next(), SortOrder::Relevance);
    }

    #[test]
    fn friend_chips_match_people() {
        let catalog = Catalog::sample();
        let viewer = &catalog.viewer;
        let david = catalog.person(PersonId(4)).unwrap();
        let james = catalog.person(PersonId(6)).unwrap();
        let ryan = catalog.person(PersonId(10)).unwrap();

        assert!(FriendChip::SimilarTaste.matches(david, viewer));
        assert!(!FriendChip::SimilarTaste.matches(james, viewer));
        assert!(FriendChip::Local.matches(david, viewer));
        assert!(FriendChip::Popular.matches(james, viewer));
        assert!(FriendChip::NewMembers.matches(ryan, viewer));
        assert!(!FriendChip::ActiveReaders.matches(ryan, viewer));
        assert!(FriendChip::SameGenres.matches(ryan, viewer));
    }

    #[test]
    fn person_filter_combines_chips_and_query() {
        let catalog = Catalog::sample();
        let people = catalog.cohort(Cohort::Recommended);
        let mut filter = PersonFilter::default();
        assert_eq!(filter.apply(&people, &catalog.viewer).len(), 4);

        filter.chips.toggle(FriendChip::Popular);
        filter.chips.toggle(FriendChip::Local);
        let names: Vec<&str> = filter
            .apply(&people, &catalog.viewer)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["David Park", "Lisa Kumar", "James Wilson"]);

        filter.query = "@lisa".to_string();
        assert_eq!(filter.apply(&people, &catalog.viewer).len(), 1);
    }

    #[test]
    fn group_search_covers_tags_and_books() {
        let catalog = Catalog::sample();
        let suggested = catalog.suggested_groups();
        let hits = |q: &str| suggested.iter().filter(|g| group_matches(g, q)).count();
        assert_eq!(hits(""), 2);
        assert_eq!(hits("dragons"), 1);
        assert_eq!(hits("westover"), 1);
        assert_eq!(hits("poetry"), 0);
    }
}
