//! Sample data set backing every BookVerse view.
//!
//! Records are built once by [`Catalog::sample`] and only ever read. Lists
//! that views display (home picks, trending, search results, shelves) keep the
//! order they are declared in.

use bookverse_core::{
    Activity, Book, BookId, BookRef, Cohort, Group, GroupId, InsightScores, LibraryEntry,
    LibraryStats, Message, NetworkStats, Person, PersonId, ReadingGoal, Review, Shelf, Viewer,
};

mod sample;

#[derive(Debug, Clone)]
pub struct Catalog {
    pub books: Vec<Book>,
    pub home_picks: Vec<BookId>,
    pub trending: Vec<BookId>,
    pub search_results: Vec<BookId>,
    pub similar: Vec<BookId>,
    pub library: Vec<LibraryEntry>,
    pub reading_goal: ReadingGoal,
    pub library_stats: LibraryStats,
    pub people: Vec<Person>,
    pub activity: Vec<Activity>,
    pub network: NetworkStats,
    pub groups: Vec<Group>,
    pub discussion: Vec<Message>,
    pub reviews: Vec<Review>,
    pub insight: InsightScores,
    pub viewer: Viewer,
    pub home_stats: Vec<(String, String)>,
}

impl Catalog {
    pub fn sample() -> Self {
        sample::build()
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Case-insensitive exact title match.
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        let title = title.trim();
        self.books
            .iter()
            .find(|b| b.title.eq_ignore_ascii_case(title))
    }

    pub fn resolve(&self, book: &BookRef) -> Option<&Book> {
        self.find_by_title(&book.title)
    }

    pub fn books_by_ids(&self, ids: &[BookId]) -> Vec<&Book> {
        ids.iter().filter_map(|id| self.book(*id)).collect()
    }

    pub fn home_picks(&self) -> Vec<&Book> {
        self.books_by_ids(&self.home_picks)
    }

    pub fn trending(&self) -> Vec<&Book> {
        self.books_by_ids(&self.trending)
    }

    pub fn search_results(&self) -> Vec<&Book> {
        self.books_by_ids(&self.search_results)
    }

    /// Similar titles for a book, never including the book itself.
    pub fn similar_to(&self, id: BookId) -> Vec<&Book> {
        self.similar
            .iter()
            .filter(|s| **s != id)
            .filter_map(|s| self.book(*s))
            .collect()
    }

    pub fn shelf(&self, shelf: Shelf) -> Vec<&LibraryEntry> {
        self.library.iter().filter(|e| e.shelf == shelf).collect()
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn cohort(&self, cohort: Cohort) -> Vec<&Person> {
        self.people.iter().filter(|p| p.in_cohort(cohort)).collect()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn my_groups(&self) -> Vec<&Group> {
        self.groups.iter().filter(|g| g.joined).collect()
    }

    pub fn suggested_groups(&self) -> Vec<&Group> {
        self.groups.iter().filter(|g| !g.joined).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_set_has_six_books_in_order() {
        let catalog = Catalog::sample();
        let titles: Vec<&str> = catalog
            .search_results()
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "The Seven Husbands of Evelyn Hugo",
                "Project Hail Mary",
                "The Midnight Library",
                "The Silent Patient",
                "Educated",
                "Where the Crawdads Sing",
            ]
        );
    }

    #[test]
    fn every_listed_id_resolves() {
        let catalog = Catalog::sample();
        for ids in [
            &catalog.home_picks,
            &catalog.trending,
            &catalog.search_results,
            &catalog.similar,
        ] {
            assert_eq!(catalog.books_by_ids(ids).len(), ids.len());
        }
        for entry in &catalog.library {
            assert!(catalog.book(entry.book).is_some());
        }
    }

    #[test]
    fn book_ids_are_unique() {
        let catalog = Catalog::sample();
        let mut ids: Vec<BookId> = catalog.books.iter().map(|b| b.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.books.len());
    }

    #[test]
    fn title_lookup_ignores_case() {
        let catalog = Catalog::sample();
        let book = catalog.find_by_title("project hail mary").unwrap();
        assert_eq!(book.author, "Andy Weir");
        assert!(catalog.find_by_title("Dune").is_none());
    }

    #[test]
    fn group_books_resolve_to_catalog_entries() {
        let catalog = Catalog::sample();
        for group in &catalog.groups {
            assert!(
                catalog.resolve(&group.current_book).is_some(),
                "{}",
                group.current_book.title
            );
        }
    }

    #[test]
    fn shelves_split_library() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.shelf(Shelf::CurrentlyReading).len(), 2);
        assert_eq!(catalog.shelf(Shelf::WantToRead).len(), 2);
        assert_eq!(catalog.shelf(Shelf::Read).len(), 2);
        assert!(
            catalog
                .shelf(Shelf::CurrentlyReading)
                .iter()
                .all(|e| e.progress.is_some())
        );
    }

    #[test]
    fn groups_split_into_mine_and_suggested() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.my_groups().len(), 3);
        assert_eq!(catalog.suggested_groups().len(), 2);
    }

    #[test]
    fn similar_excludes_self() {
        let catalog = Catalog::sample();
        let first = catalog.similar[0];
        assert!(catalog.similar_to(first).iter().all(|b| b.id != first));
        assert_eq!(catalog.similar_to(BookId(1)).len(), 3);
    }
}
