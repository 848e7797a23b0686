use crate::models::Movie;

struct Entry {
    id: &'static str,
    title: &'static str,
    year: &'static str,
    director: &'static str,
    country: &'static str,
    genre: &'static [&'static str],
    synopsis: &'static str,
    imdb_id: &'static str,
    runtime: &'static str,
    awards: &'static [&'static str],
    cast: &'static [&'static str],
    rating: &'static str,
    language: &'static str,
    release_date: &'static str,
    cinematography: &'static str,
    music_by: &'static str,
}

impl From<&Entry> for Movie {
    fn from(e: &Entry) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Movie {
            id: e.id.to_string(),
            title: e.title.to_string(),
            year: e.year.to_string(),
            director: e.director.to_string(),
            country: e.country.to_string(),
            genre: owned(e.genre),
            synopsis: e.synopsis.to_string(),
            imdb_id: Some(e.imdb_id.to_string()),
            runtime: Some(e.runtime.to_string()),
            cast: owned(e.cast),
            awards: owned(e.awards),
            rating: Some(e.rating.to_string()),
            language: Some(e.language.to_string()),
            release_date: Some(e.release_date.to_string()),
            cinematography: Some(e.cinematography.to_string()),
            music_by: Some(e.music_by.to_string()),
        }
    }
}

pub(super) fn movies() -> Vec<Movie> {
    ENTRIES.iter().map(Movie::from).collect()
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "1",
        title: "The Godfather",
        year: "1972",
        director: "Francis Ford Coppola",
        country: "USA",
        genre: &["Crime", "Drama"],
        synopsis: "The aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
        imdb_id: "tt0068646",
        runtime: "175 min",
        awards: &[
            "Academy Award for Best Picture",
            "Academy Award for Best Actor",
            "Academy Award for Best Adapted Screenplay",
        ],
        cast: &["Marlon Brando", "Al Pacino", "James Caan", "Diane Keaton"],
        rating: "9.2/10",
        language: "English, Italian, Latin",
        release_date: "March 24, 1972",
        cinematography: "Gordon Willis",
        music_by: "Nino Rota",
    },
    Entry {
        id: "2",
        title: "Citizen Kane",
        year: "1941",
        director: "Orson Welles",
        country: "USA",
        genre: &["Drama", "Mystery"],
        synopsis: "Following the death of publishing tycoon Charles Foster Kane, reporters scramble to uncover the meaning of his final utterance; 'Rosebud'.",
        imdb_id: "tt0033467",
        runtime: "119 min",
        awards: &["Academy Award for Best Original Screenplay"],
        cast: &["Orson Welles", "Joseph Cotten", "Dorothy Comingore", "Agnes Moorehead"],
        rating: "8.3/10",
        language: "English",
        release_date: "September 5, 1941",
        cinematography: "Gregg Toland",
        music_by: "Bernard Herrmann",
    },
    Entry {
        id: "3",
        title: "Seven Samurai",
        year: "1954",
        director: "Akira Kurosawa",
        country: "Japan",
        genre: &["Action", "Drama", "Adventure"],
        synopsis: "A poor village under attack by bandits recruits seven unemployed samurai to help them defend themselves.",
        imdb_id: "tt0047478",
        runtime: "207 min",
        awards: &["Silver Lion at Venice Film Festival"],
        cast: &["Toshiro Mifune", "Takashi Shimura", "Keiko Tsushima"],
        rating: "8.6/10",
        language: "Japanese",
        release_date: "April 26, 1954",
        cinematography: "Asakazu Nakai",
        music_by: "Fumio Hayasaka",
    },
    Entry {
        id: "4",
        title: "Psycho",
        year: "1960",
        director: "Alfred Hitchcock",
        country: "USA",
        genre: &["Horror", "Mystery", "Thriller"],
        synopsis: "A Phoenix secretary embezzles $40,000 from her employer's client, goes on the run, and checks into a remote motel run by a young man under the domination of his mother.",
        imdb_id: "tt0054215",
        runtime: "109 min",
        awards: &["Nominated for 4 Academy Awards"],
        cast: &["Anthony Perkins", "Janet Leigh", "Vera Miles", "John Gavin"],
        rating: "8.5/10",
        language: "English",
        release_date: "September 8, 1960",
        cinematography: "John L. Russell",
        music_by: "Bernard Herrmann",
    },
    Entry {
        id: "5",
        title: "2001: A Space Odyssey",
        year: "1968",
        director: "Stanley Kubrick",
        country: "UK, USA",
        genre: &["Adventure", "Sci-Fi"],
        synopsis: "After discovering a mysterious artifact buried beneath the Lunar surface, mankind sets off on a quest to find its origins with help from intelligent supercomputer H.A.L. 9000.",
        imdb_id: "tt0062622",
        runtime: "149 min",
        awards: &["Academy Award for Best Visual Effects"],
        cast: &["Keir Dullea", "Gary Lockwood", "William Sylvester"],
        rating: "8.3/10",
        language: "English, Russian",
        release_date: "April 6, 1968",
        cinematography: "Geoffrey Unsworth",
        music_by: "Various classical selections",
    },
    Entry {
        id: "6",
        title: "Casablanca",
        year: "1942",
        director: "Michael Curtiz",
        country: "USA",
        genre: &["Drama", "Romance", "War"],
        synopsis: "A cynical expatriate American cafe owner struggles to decide whether or not to help his former lover and her fugitive husband escape the Nazis in French Morocco.",
        imdb_id: "tt0034583",
        runtime: "102 min",
        awards: &[
            "Academy Award for Best Picture",
            "Academy Award for Best Director",
            "Academy Award for Best Screenplay",
        ],
        cast: &["Humphrey Bogart", "Ingrid Bergman", "Paul Henreid", "Claude Rains"],
        rating: "8.5/10",
        language: "English, French, German, Italian",
        release_date: "January 23, 1943",
        cinematography: "Arthur Edeson",
        music_by: "Max Steiner",
    },
    Entry {
        id: "7",
        title: "Spirited Away",
        year: "2001",
        director: "Hayao Miyazaki",
        country: "Japan",
        genre: &["Animation", "Adventure", "Fantasy"],
        synopsis: "During her family's move to the suburbs, a sullen 10-year-old girl wanders into a world ruled by gods, witches, and spirits, and where humans are changed into beasts.",
        imdb_id: "tt0245429",
        runtime: "125 min",
        awards: &[
            "Academy Award for Best Animated Feature",
            "Golden Bear (Berlin Film Festival)",
        ],
        cast: &["Daveigh Chase", "Suzanne Pleshette", "Miyu Irino", "Rumi Hiiragi"],
        rating: "8.6/10",
        language: "Japanese",
        release_date: "July 20, 2001",
        cinematography: "Atsushi Okui",
        music_by: "Joe Hisaishi",
    },
    Entry {
        id: "8",
        title: "The Shawshank Redemption",
        year: "1994",
        director: "Frank Darabont",
        country: "USA",
        genre: &["Drama"],
        synopsis: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
        imdb_id: "tt0111161",
        runtime: "142 min",
        awards: &["Nominated for 7 Academy Awards"],
        cast: &["Tim Robbins", "Morgan Freeman", "Bob Gunton", "William Sadler"],
        rating: "9.3/10",
        language: "English",
        release_date: "October 14, 1994",
        cinematography: "Roger Deakins",
        music_by: "Thomas Newman",
    },
    Entry {
        id: "9",
        title: "Some Like It Hot",
        year: "1959",
        director: "Billy Wilder",
        country: "USA",
        genre: &["Comedy", "Music", "Romance"],
        synopsis: "After two male musicians witness a mob hit, they flee the state in an all-female band disguised as women, but further complications set in.",
        imdb_id: "tt0053291",
        runtime: "121 min",
        awards: &["Academy Award for Best Costume Design"],
        cast: &["Marilyn Monroe", "Tony Curtis", "Jack Lemmon", "George Raft"],
        rating: "8.2/10",
        language: "English",
        release_date: "March 29, 1959",
        cinematography: "Charles Lang",
        music_by: "Adolph Deutsch",
    },
    Entry {
        id: "10",
        title: "Pulp Fiction",
        year: "1994",
        director: "Quentin Tarantino",
        country: "USA",
        genre: &["Crime", "Drama"],
        synopsis: "The lives of two mob hitmen, a boxer, a gangster and his wife, and a pair of diner bandits intertwine in four tales of violence and redemption.",
        imdb_id: "tt0110912",
        runtime: "154 min",
        awards: &[
            "Academy Award for Best Original Screenplay",
            "Palme d'Or at Cannes Film Festival",
        ],
        cast: &["John Travolta", "Uma Thurman", "Samuel L. Jackson", "Bruce Willis"],
        rating: "8.9/10",
        language: "English, Spanish, French",
        release_date: "October 14, 1994",
        cinematography: "Andrzej Sekula",
        music_by: "Various artists",
    },
];
