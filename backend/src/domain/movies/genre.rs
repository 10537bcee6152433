//! Closed set of genres a movie may be tagged with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when text does not name a known [`Genre`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre: {value:?}")]
pub struct UnknownGenreError {
    pub value: String,
}

/// Genre tag attached to a movie.
///
/// Input spelling is exact and case-sensitive. Filtering by genre is
/// case-insensitive; see [`Genre::matches_filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Romance,
    Thriller,
    Fantasy,
    Documentary,
    Crime,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    /// Every genre in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Action,
        Self::Comedy,
        Self::Drama,
        Self::Horror,
        Self::ScienceFiction,
        Self::Romance,
        Self::Thriller,
        Self::Fantasy,
        Self::Documentary,
        Self::Crime,
        Self::SciFi,
    ];

    /// Canonical wire spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Horror => "Horror",
            Self::ScienceFiction => "Science Fiction",
            Self::Romance => "Romance",
            Self::Thriller => "Thriller",
            Self::Fantasy => "Fantasy",
            Self::Documentary => "Documentary",
            Self::Crime => "Crime",
            Self::SciFi => "Sci-Fi",
        }
    }

    /// Whether this genre matches a user-supplied filter, ignoring case.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Genre;
    ///
    /// assert!(Genre::Comedy.matches_filter("comedy"));
    /// assert!(Genre::SciFi.matches_filter("SCI-FI"));
    /// assert!(!Genre::Drama.matches_filter("dram"));
    /// ```
    pub fn matches_filter(self, filter: &str) -> bool {
        self.as_str().to_lowercase() == filter.to_lowercase()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownGenreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| UnknownGenreError {
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Action", Genre::Action)]
    #[case("Science Fiction", Genre::ScienceFiction)]
    #[case("Sci-Fi", Genre::SciFi)]
    fn parses_exact_spelling(#[case] raw: &str, #[case] expected: Genre) {
        assert_eq!(raw.parse::<Genre>(), Ok(expected));
    }

    #[rstest]
    #[case("action")]
    #[case("SciFi")]
    #[case("Science-Fiction")]
    #[case("")]
    fn rejects_other_spellings(#[case] raw: &str) {
        assert!(raw.parse::<Genre>().is_err());
    }

    #[rstest]
    fn serde_uses_display_names() {
        for genre in Genre::ALL {
            let json = serde_json::to_value(genre).expect("genre serialises");
            assert_eq!(json, serde_json::Value::String(genre.to_string()));
        }
    }

    #[rstest]
    #[case(Genre::Comedy, "COMEDY", true)]
    #[case(Genre::ScienceFiction, "science fiction", true)]
    #[case(Genre::Crime, "drama", false)]
    fn filter_matching_ignores_case(
        #[case] genre: Genre,
        #[case] filter: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(genre.matches_filter(filter), expected);
    }
}
