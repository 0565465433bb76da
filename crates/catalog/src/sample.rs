use bookverse_core::{
    Activity, ActivityAuthor, ActivityKind, Book, BookDetails, BookId, BookRef, Cohort, Genre,
    Group, GroupId, InsightScores, LibraryEntry, LibraryStats, Message, NetworkStats, Person,
    PersonId, Rating, ReadingGoal, ReadingProgress, RecentRead, Review, Shelf, Viewer,
};

use crate::Catalog;

const COVER_A: &str = "https://images.unsplash.com/photo-1544947950-fa07a98d237f";
const COVER_B: &str = "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d";
const COVER_C: &str = "https://images.unsplash.com/photo-1481627834876-b7833e8f5570";
const COVER_D: &str = "https://images.unsplash.com/photo-1512820790803-83ca734da794";

const AVATAR_SARAH: &str = "https://images.unsplash.com/photo-1494790108755-2616b612b47c";
const AVATAR_MARCUS: &str = "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d";
const AVATAR_EMMA: &str = "https://images.unsplash.com/photo-1438761681033-6461ffad8d80";
const AVATAR_DAVID: &str = "https://images.unsplash.com/photo-1500648767791-00dcc994a43e";
const AVATAR_LISA: &str = "https://images.unsplash.com/photo-1487412720507-e7ab37603c6f";
const AVATAR_JAMES: &str = "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e";

pub(crate) fn build() -> Catalog {
    Catalog {
        books: books(),
        home_picks: vec![BookId(1), BookId(2), BookId(3), BookId(5)],
        trending: vec![BookId(4), BookId(6)],
        search_results: (1..=6).map(BookId).collect(),
        similar: vec![BookId(7), BookId(8), BookId(9)],
        library: library(),
        reading_goal: ReadingGoal {
            year: 2024,
            target: 24,
            completed: 8,
            in_progress: 2,
        },
        library_stats: LibraryStats {
            total_books: 16,
            pages_read: 4250,
            average_rating: 4.2,
            reading_streak_days: 12,
        },
        people: people(),
        activity: activity(),
        network: NetworkStats {
            following: 127,
            followers: 89,
            reading_groups: 5,
        },
        groups: groups(),
        discussion: discussion(),
        reviews: reviews(),
        insight: InsightScores {
            recommend: "92%".to_string(),
            emotional_impact: "4.2/5".to_string(),
            writing_quality: "8.5/10".to_string(),
            blurb: "This book excels in character development and emotional depth, with readers \
                    particularly praising the authentic dialogue and compelling narrative \
                    structure. The pacing builds perfectly to a satisfying conclusion that \
                    resonates long after reading."
                .to_string(),
        },
        viewer: Viewer {
            name: "You".to_string(),
            location: "San Francisco, CA".to_string(),
            favorite_genres: vec![Genre::SciFi, Genre::Fiction, Genre::Mystery],
        },
        home_stats: vec![
            ("2.5M+".to_string(), "Hours Read This Month".to_string()),
            ("150K+".to_string(), "Books Reviewed".to_string()),
            ("98%".to_string(), "Recommendation Accuracy".to_string()),
        ],
    }
}

fn book(
    id: u32,
    title: &str,
    author: &str,
    rating: f32,
    cover: &str,
    genre: Genre,
    ai_summary: &str,
) -> Book {
    Book {
        id: BookId(id),
        title: title.to_string(),
        author: author.to_string(),
        rating: Rating::new(rating),
        cover_url: format!("{cover}?w=300&h=400&fit=crop"),
        genre,
        ai_summary: ai_summary.to_string(),
        reading_time: None,
        recommended: false,
        publish_year: None,
        details: None,
    }
}

fn books() -> Vec<Book> {
    vec![
        Book {
            reading_time: Some("8 hours".to_string()),
            recommended: true,
            publish_year: Some(2017),
            details: Some(evelyn_hugo_details()),
            ..book(
                1,
                "The Seven Husbands of Evelyn Hugo",
                "Taylor Jenkins Reid",
                4.5,
                COVER_A,
                Genre::Fiction,
                "A captivating tale of Hollywood glamour and secrets. Readers praise the complex \
                 characters and emotional depth.",
            )
        },
        Book {
            reading_time: Some("12 hours".to_string()),
            recommended: true,
            publish_year: Some(2021),
            ..book(
                2,
                "Project Hail Mary",
                "Andy Weir",
                4.7,
                COVER_B,
                Genre::SciFi,
                "A brilliant science fiction thriller combining humor with hard science. \
                 Perfect for fans of The Martian.",
            )
        },
        Book {
            reading_time: Some("6 hours".to_string()),
            recommended: true,
            publish_year: Some(2020),
            ..book(
                3,
                "The Midnight Library",
                "Matt Haig",
                4.3,
                COVER_C,
                Genre::Fiction,
                "A philosophical exploration of life's possibilities. Readers find it \
                 thought-provoking and emotionally resonant.",
            )
        },
        Book {
            reading_time: Some("7 hours".to_string()),
            publish_year: Some(2019),
            ..book(
                4,
                "The Silent Patient",
                "Alex Michaelides",
                4.1,
                COVER_C,
                Genre::Mystery,
                "A psychological thriller with an explosive twist. Readers can't put it down.",
            )
        },
        Book {
            reading_time: Some("10 hours".to_string()),
            publish_year: Some(2018),
            ..book(
                5,
                "Educated",
                "Tara Westover",
                4.6,
                COVER_D,
                Genre::Biography,
                "A powerful memoir about education and family. Critics call it both harrowing \
                 and inspiring.",
            )
        },
        Book {
            reading_time: Some("9 hours".to_string()),
            publish_year: Some(2018),
            ..book(
                6,
                "Where the Crawdads Sing",
                "Delia Owens",
                4.4,
                COVER_A,
                Genre::Fiction,
                "A beautiful coming-of-age story set in nature. Praised for its atmospheric \
                 writing.",
            )
        },
        Book {
            publish_year: Some(2020),
            ..book(
                7,
                "The Invisible Life of Addie LaRue",
                "V.E. Schwab",
                4.2,
                COVER_A,
                Genre::Fantasy,
                "A centuries-spanning story of a woman no one remembers. Readers love its \
                 bittersweet romance.",
            )
        },
        Book {
            publish_year: Some(2019),
            ..book(
                8,
                "The Ten Thousand Doors of January",
                "Alix E. Harrow",
                4.1,
                COVER_B,
                Genre::Fantasy,
                "A portal fantasy about doors between worlds. Praised for its lush, lyrical \
                 prose.",
            )
        },
        Book {
            publish_year: Some(2019),
            ..book(
                9,
                "The Priory of the Orange Tree",
                "Samantha Shannon",
                4.3,
                COVER_C,
                Genre::Fantasy,
                "An epic standalone of queens, mages and dragons. Fans call it immersive and \
                 ambitious.",
            )
        },
    ]
}

fn evelyn_hugo_details() -> BookDetails {
    BookDetails {
        pages: Some(368),
        publisher: Some("Atria Books".to_string()),
        published: Some("June 2017".to_string()),
        language: Some("English".to_string()),
        isbn: Some("978-1501139239".to_string()),
        format: Some("Hardcover".to_string()),
        edition: Some("First Edition".to_string()),
        difficulty: Some("Easy".to_string()),
        genre_rank: Some("#15 in Historical Fiction".to_string()),
        labels: vec![
            "Fiction".to_string(),
            "Historical Fiction".to_string(),
            "Romance".to_string(),
        ],
        description: vec![
            "Aging and reclusive Hollywood movie icon Evelyn Hugo is finally ready to tell the \
             truth about her glamorous and scandalous life. But when she chooses unknown \
             magazine reporter Monique Grant for the job, no one is more astounded than Monique \
             herself."
                .to_string(),
            "Why her? Why now? Monique is not exactly on top of the world. Her husband has left \
             her, and her career has stagnated. Regardless of why Evelyn has selected her to \
             write her biography, Monique is determined to use this opportunity to jumpstart \
             her career."
                .to_string(),
            "Summoned to Evelyn's luxurious apartment, Monique listens in fascination as the \
             actress tells her story. From making her way to Los Angeles in the 1950s to her \
             decision to leave show business in the '80s, and, of course, the seven husbands \
             along the way, Evelyn unspools a tale of ruthless ambition, unexpected friendship, \
             and a great forbidden love."
                .to_string(),
        ],
        ratings_count: Some(12_847),
        reviews_count: Some(2_341),
    }
}

fn library() -> Vec<LibraryEntry> {
    let entry = |id: u32, shelf: Shelf| LibraryEntry {
        book: BookId(id),
        shelf,
        progress: None,
        added: None,
        finished: None,
        user_rating: None,
    };

    vec![
        LibraryEntry {
            progress: Some(ReadingProgress {
                pages_read: 240,
                total_pages: 368,
            }),
            ..entry(1, Shelf::CurrentlyReading)
        },
        LibraryEntry {
            progress: Some(ReadingProgress {
                pages_read: 89,
                total_pages: 496,
            }),
            ..entry(2, Shelf::CurrentlyReading)
        },
        LibraryEntry {
            added: Some("2 days ago".to_string()),
            ..entry(3, Shelf::WantToRead)
        },
        LibraryEntry {
            added: Some("1 week ago".to_string()),
            ..entry(5, Shelf::WantToRead)
        },
        LibraryEntry {
            finished: Some("2 weeks ago".to_string()),
            user_rating: Some(5),
            ..entry(6, Shelf::Read)
        },
        LibraryEntry {
            finished: Some("1 month ago".to_string()),
            user_rating: Some(4),
            ..entry(4, Shelf::Read)
        },
    ]
}

fn person(id: u32, name: &str, username: &str, avatar: &str) -> Person {
    Person {
        id: PersonId(id),
        name: name.to_string(),
        username: username.to_string(),
        avatar_url: format!("{avatar}?w=100&h=100&fit=crop&crop=face"),
        location: None,
        books_read: 0,
        mutual_friends: 0,
        compatibility: None,
        favorite_genres: Vec::new(),
        currently_reading: None,
        status: None,
        reason: None,
        joined: None,
        distance: None,
        recent_reads: Vec::new(),
        following: false,
        cohorts: Vec::new(),
    }
}

fn recent(title: &str, rating: u8) -> RecentRead {
    RecentRead {
        title: title.to_string(),
        rating,
    }
}

fn people() -> Vec<Person> {
    vec![
        Person {
            books_read: 42,
            mutual_friends: 8,
            currently_reading: Some("Project Hail Mary".to_string()),
            status: Some("Currently reading Project Hail Mary".to_string()),
            following: true,
            cohorts: vec![Cohort::Friend],
            ..person(1, "Sarah Chen", "@sarahreads", AVATAR_SARAH)
        },
        Person {
            books_read: 67,
            mutual_friends: 12,
            status: Some("Finished The Seven Husbands of Evelyn Hugo".to_string()),
            following: true,
            cohorts: vec![Cohort::Friend],
            ..person(2, "Marcus Williams", "@marcusbooks", AVATAR_MARCUS)
        },
        Person {
            books_read: 35,
            mutual_friends: 5,
            status: Some("Added 3 books to want-to-read".to_string()),
            cohorts: vec![Cohort::Friend],
            ..person(3, "Emma Rodriguez", "@emmareads", AVATAR_EMMA)
        },
        Person {
            location: Some("San Francisco, CA".to_string()),
            books_read: 89,
            mutual_friends: 12,
            compatibility: Some(94),
            favorite_genres: vec![Genre::SciFi, Genre::Fantasy, Genre::Mystery],
            currently_reading: Some("Project Hail Mary".to_string()),
            reason: Some("Has 94% reading compatibility with you".to_string()),
            joined: Some("March 2023".to_string()),
            recent_reads: vec![recent("The Midnight Library", 5), recent("Educated", 4)],
            cohorts: vec![Cohort::Suggested, Cohort::Recommended],
            ..person(4, "David Park", "@davidreads", AVATAR_DAVID)
        },
        Person {
            location: Some("New York, NY".to_string()),
            books_read: 156,
            mutual_friends: 7,
            compatibility: Some(88),
            favorite_genres: vec![Genre::Romance, Genre::HistoricalFiction, Genre::Biography],
            currently_reading: Some("The Seven Husbands of Evelyn Hugo".to_string()),
            reason: Some("Loves the same books as you".to_string()),
            joined: Some("January 2022".to_string()),
            recent_reads: vec![recent("Where the Crawdads Sing", 5), recent("Educated", 4)],
            cohorts: vec![Cohort::Suggested, Cohort::Recommended],
            ..person(5, "Lisa Kumar", "@lisakumar", AVATAR_LISA)
        },
        Person {
            location: Some("Austin, TX".to_string()),
            books_read: 234,
            mutual_friends: 3,
            compatibility: Some(82),
            favorite_genres: vec![Genre::Thriller, Genre::Mystery, Genre::NonFiction],
            currently_reading: Some("The Silent Patient".to_string()),
            reason: Some("Active in groups you might like".to_string()),
            joined: Some("September 2021".to_string()),
            recent_reads: vec![recent("Project Hail Mary", 5)],
            cohorts: vec![Cohort::Recommended],
            ..person(6, "James Wilson", "@jameswrites", AVATAR_JAMES)
        },
        Person {
            location: Some("Los Angeles, CA".to_string()),
            books_read: 67,
            mutual_friends: 15,
            compatibility: Some(91),
            favorite_genres: vec![Genre::Biography, Genre::SelfHelp, Genre::Fiction],
            currently_reading: Some("Educated".to_string()),
            reason: Some("Has 15 mutual friends".to_string()),
            joined: Some("June 2023".to_string()),
            recent_reads: vec![recent("The Midnight Library", 4)],
            cohorts: vec![Cohort::Recommended],
            ..person(7, "Maria Garcia", "@mariareads", AVATAR_SARAH)
        },
        Person {
            location: Some("San Francisco, CA".to_string()),
            distance: Some("2.3 miles away".to_string()),
            books_read: 45,
            favorite_genres: vec![Genre::Mystery, Genre::Thriller],
            currently_reading: Some("The Silent Patient".to_string()),
            cohorts: vec![Cohort::Local],
            ..person(8, "Alex Thompson", "@alexthinks", AVATAR_MARCUS)
        },
        Person {
            location: Some("San Francisco, CA".to_string()),
            distance: Some("4.1 miles away".to_string()),
            books_read: 78,
            favorite_genres: vec![Genre::SciFi, Genre::Fantasy],
            currently_reading: Some("Project Hail Mary".to_string()),
            cohorts: vec![Cohort::Local],
            ..person(9, "Sophie Chen", "@sophiereads", AVATAR_EMMA)
        },
        Person {
            joined: Some("2 days ago".to_string()),
            books_read: 12,
            favorite_genres: vec![Genre::Fiction, Genre::Philosophy],
            currently_reading: Some("The Midnight Library".to_string()),
            cohorts: vec![Cohort::NewMember],
            ..person(10, "Ryan O'Connor", "@ryanreads", AVATAR_DAVID)
        },
    ]
}

fn book_ref(title: &str, author: &str) -> BookRef {
    BookRef {
        title: title.to_string(),
        author: author.to_string(),
    }
}

fn author(name: &str, username: &str) -> ActivityAuthor {
    ActivityAuthor {
        name: name.to_string(),
        username: username.to_string(),
    }
}

fn activity() -> Vec<Activity> {
    vec![
        Activity {
            id: 1,
            author: author("Sarah Chen", "@sarahreads"),
            kind: ActivityKind::Book {
                action: "finished reading".to_string(),
                book: book_ref("The Midnight Library", "Matt Haig"),
                rating: Some(5),
                review: Some(
                    "Absolutely beautiful and thought-provoking! This book made me reflect on so \
                     many life choices."
                        .to_string(),
                ),
            },
            timestamp: "2 hours ago".to_string(),
            likes: 14,
            comments: 3,
        },
        Activity {
            id: 2,
            author: author("Marcus Williams", "@marcusbooks"),
            kind: ActivityKind::Book {
                action: "started reading".to_string(),
                book: book_ref("Project Hail Mary", "Andy Weir"),
                rating: None,
                review: None,
            },
            timestamp: "5 hours ago".to_string(),
            likes: 8,
            comments: 1,
        },
        Activity {
            id: 3,
            author: author("Emma Rodriguez", "@emmareads"),
            kind: ActivityKind::Group {
                action: "joined reading group".to_string(),
                group: "Sci-Fi Book Club".to_string(),
            },
            timestamp: "1 day ago".to_string(),
            likes: 6,
            comments: 2,
        },
        Activity {
            id: 4,
            author: author("Alex Thompson", "@alexthinks"),
            kind: ActivityKind::Book {
                action: "gave 4 stars to".to_string(),
                book: book_ref("Educated", "Tara Westover"),
                rating: None,
                review: Some(
                    "Powerful memoir that really stays with you. The writing is incredible."
                        .to_string(),
                ),
            },
            timestamp: "2 days ago".to_string(),
            likes: 12,
            comments: 4,
        },
    ]
}

fn groups() -> Vec<Group> {
    let group = |id: u32, name: &str, description: &str, members: u32, book: BookRef| Group {
        id: GroupId(id),
        name: name.to_string(),
        description: description.to_string(),
        members,
        current_book: book,
        next_meeting: None,
        unread_messages: 0,
        admin: false,
        recent_activity: None,
        tags: Vec::new(),
        joined: false,
    };

    vec![
        Group {
            next_meeting: Some("March 15, 2024".to_string()),
            unread_messages: 3,
            admin: true,
            recent_activity: Some("2 hours ago".to_string()),
            tags: vec!["Sci-Fi".to_string()],
            joined: true,
            ..group(
                1,
                "Sci-Fi Book Club",
                "Exploring the universe through science fiction literature",
                24,
                book_ref("Project Hail Mary", "Andy Weir"),
            )
        },
        Group {
            next_meeting: Some("March 18, 2024".to_string()),
            unread_messages: 1,
            recent_activity: Some("1 day ago".to_string()),
            tags: vec!["Mystery".to_string(), "Thriller".to_string()],
            joined: true,
            ..group(
                2,
                "Mystery Lovers",
                "Discussing the best mysteries and thrillers",
                67,
                book_ref("The Silent Patient", "Alex Michaelides"),
            )
        },
        Group {
            next_meeting: Some("March 22, 2024".to_string()),
            recent_activity: Some("3 days ago".to_string()),
            tags: vec!["Fiction".to_string(), "Classics".to_string()],
            joined: true,
            ..group(
                3,
                "Literary Fiction Circle",
                "Deep dives into contemporary and classic literature",
                35,
                book_ref("The Seven Husbands of Evelyn Hugo", "Taylor Jenkins Reid"),
            )
        },
        Group {
            tags: vec![
                "Fantasy".to_string(),
                "Epic".to_string(),
                "Dragons".to_string(),
            ],
            ..group(
                4,
                "Fantasy Adventures",
                "Epic fantasy discussions and recommendations",
                156,
                book_ref("The Priory of the Orange Tree", "Samantha Shannon"),
            )
        },
        Group {
            tags: vec![
                "Biography".to_string(),
                "History".to_string(),
                "Science".to_string(),
            ],
            ..group(
                5,
                "Non-Fiction Explorers",
                "Learning and growing through non-fiction",
                89,
                book_ref("Educated", "Tara Westover"),
            )
        },
    ]
}

fn discussion() -> Vec<Message> {
    let message = |id: u32, author: &str, text: &str, timestamp: &str, likes: u32| Message {
        id,
        author: author.to_string(),
        text: text.to_string(),
        timestamp: timestamp.to_string(),
        likes,
    };

    vec![
        message(
            1,
            "Sarah Chen",
            "I'm absolutely loving Project Hail Mary! The science is so well explained and the \
             humor is perfect. What do you all think about Grace's character development?",
            "2 hours ago",
            8,
        ),
        message(
            2,
            "Marcus Williams",
            "Agreed! Andy Weir really knows how to balance scientific accuracy with compelling \
             storytelling. I'm only halfway through but already can't put it down.",
            "1 hour ago",
            5,
        ),
        message(
            3,
            "Emma Rodriguez",
            "Has anyone else noticed the similarities to The Martian in terms of problem-solving \
             approach? I love how methodical Grace is!",
            "45 minutes ago",
            3,
        ),
    ]
}

fn reviews() -> Vec<Review> {
    let review = |id: u32, author: &str, rating: u8, text: &str, date: &str, helpful: u32| Review {
        id,
        author: author.to_string(),
        rating,
        text: text.to_string(),
        date: date.to_string(),
        helpful,
    };

    vec![
        review(
            1,
            "Sarah M.",
            5,
            "Absolutely captivating! The characters felt so real and the plot twists kept me \
             guessing until the very end.",
            "2 days ago",
            24,
        ),
        review(
            2,
            "Mike R.",
            4,
            "Great read with beautiful prose. The pacing was perfect and I couldn't put it down.",
            "1 week ago",
            18,
        ),
        review(
            3,
            "Emma L.",
            5,
            "This book changed my perspective on so many things. Highly recommend to anyone \
             looking for depth.",
            "2 weeks ago",
            31,
        ),
    ]
}
