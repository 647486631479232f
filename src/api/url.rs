//! Classification of Pinterest web URLs.
//!
//! A client is built from whatever URL the user pasted. [`classify`] tries
//! every known shape independently and records which ones matched; the
//! resulting [`UrlMatches::identity`] picks one by priority because the shapes
//! overlap (a pin URL also looks like a two-segment board URL, and a profile
//! URL is a board URL without a slug):
//!
//! 1. pin id (`pin/<digits>/`)
//! 2. search query (`/search/pins/?q=<query>&rs=typed`), only without a pin id
//! 3. board (`pinterest.com/<user>/<board>/`)
//! 4. profile (`pinterest.com/<user>/`), only without a board
//!
//! A miss is routine. The `parse_*` functions expose each pattern on its own
//! and return a typed [`UrlParseError`] for callers that want one.
//!
//! # Example
//!
//! ```rust
//! use pinterest_api::api::url::{classify, Identity};
//!
//! let matches = classify("https://www.pinterest.com/alice/cats/");
//! assert_eq!(
//!     matches.identity(),
//!     Identity::Board { username: "alice".into(), boardname: "cats".into() }
//! );
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::clients::RequestBuilder;

// `None` only if a literal pattern fails to compile.
static PIN_ID: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"pin/(\d+)/").ok());

static SEARCH_QUERY: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"/search/pins/\?q=([A-Za-z0-9%._~-]+)&rs=typed").ok());

static BOARD: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^https://(?:[a-z0-9-]+\.)?pinterest\.com/([A-Za-z0-9_-]+)/([A-Za-z0-9_-]+)/?$")
        .ok()
});

static PROFILE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^https://(?:[a-z0-9-]+\.)?pinterest\.com/([A-Za-z0-9_-]+)/?$").ok()
});

static SEGMENT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").ok());

/// The URL shapes the classifier knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UrlKind {
    /// `.../pin/<digits>/`
    Pin,
    /// `.../search/pins/?q=<query>&rs=typed`
    Search,
    /// `https://www.pinterest.com/<user>/<board>/`
    Board,
    /// `https://www.pinterest.com/<user>/`
    Profile,
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin => write!(f, "pin"),
            Self::Search => write!(f, "search"),
            Self::Board => write!(f, "board"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

/// A URL did not have the expected shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid Pinterest {kind} URL: {url}")]
pub struct UrlParseError {
    /// The shape that was expected.
    pub kind: UrlKind,
    /// The URL that was checked.
    pub url: String,
}

/// A board reference: owner and slug.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardRef {
    /// The board owner's username.
    pub username: String,
    /// The board slug.
    pub boardname: String,
}

impl BoardRef {
    /// Returns the web path of the board, `/<user>/<board>/`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}/{}/", self.username, self.boardname)
    }
}

/// The subject a client targets, chosen by priority from [`UrlMatches`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identity {
    /// A single pin.
    Pin {
        /// Numeric pin id, as a string.
        id: String,
    },
    /// A pin search.
    Search {
        /// The decoded search query.
        query: String,
    },
    /// A user's board.
    Board {
        /// The board owner's username.
        username: String,
        /// The board slug.
        boardname: String,
    },
    /// A user profile.
    Profile {
        /// The username.
        username: String,
    },
    /// No known shape matched.
    Unrecognized,
}

impl Identity {
    /// Returns the shape this identity came from.
    #[must_use]
    pub const fn kind(&self) -> Option<UrlKind> {
        match self {
            Self::Pin { .. } => Some(UrlKind::Pin),
            Self::Search { .. } => Some(UrlKind::Search),
            Self::Board { .. } => Some(UrlKind::Board),
            Self::Profile { .. } => Some(UrlKind::Profile),
            Self::Unrecognized => None,
        }
    }
}

/// Per-pattern classification results for one URL.
///
/// Fields are independent: a pin URL also fills `board`, because
/// `pinterest.com/pin/<digits>/` has the two-segment board shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlMatches {
    /// Pin id, if the URL contains `pin/<digits>/`.
    pub pin_id: Option<String>,
    /// Decoded search query. Only attempted when there is no pin id.
    pub search_query: Option<String>,
    /// Board owner and slug.
    pub board: Option<BoardRef>,
    /// Profile username. Only attempted when there is no board.
    pub profile_username: Option<String>,
}

impl UrlMatches {
    /// Picks the identity by priority: pin, search, board, profile.
    #[must_use]
    pub fn identity(&self) -> Identity {
        if let Some(id) = &self.pin_id {
            return Identity::Pin { id: id.clone() };
        }
        if let Some(query) = &self.search_query {
            return Identity::Search {
                query: query.clone(),
            };
        }
        if let Some(board) = &self.board {
            return Identity::Board {
                username: board.username.clone(),
                boardname: board.boardname.clone(),
            };
        }
        if let Some(username) = &self.profile_username {
            return Identity::Profile {
                username: username.clone(),
            };
        }
        Identity::Unrecognized
    }
}

/// Runs every pattern against `url`.
#[must_use]
pub fn classify(url: &str) -> UrlMatches {
    let pin_id = match_pin_id(url);
    let search_query = if pin_id.is_none() {
        match_search_query(url)
    } else {
        None
    };

    let board = match_board(url);
    let profile_username = if board.is_none() {
        match_profile(url)
    } else {
        None
    };

    UrlMatches {
        pin_id,
        search_query,
        board,
        profile_username,
    }
}

/// Extracts the pin id from `.../pin/<digits>/...`.
///
/// # Errors
///
/// Returns [`UrlParseError`] with [`UrlKind::Pin`] if there is no pin id.
pub fn parse_pin_id(url: &str) -> Result<String, UrlParseError> {
    match_pin_id(url).ok_or_else(|| parse_error(UrlKind::Pin, url))
}

/// Extracts and decodes the query from `/search/pins/?q=<query>&rs=typed`.
///
/// # Errors
///
/// Returns [`UrlParseError`] with [`UrlKind::Search`] if the URL is not a
/// search URL.
pub fn parse_search_query(url: &str) -> Result<String, UrlParseError> {
    match_search_query(url).ok_or_else(|| parse_error(UrlKind::Search, url))
}

/// Extracts `(username, boardname)` from a board URL.
///
/// # Errors
///
/// Returns [`UrlParseError`] with [`UrlKind::Board`] unless the URL is a
/// pinterest.com URL with exactly two valid path segments.
pub fn parse_board_url(url: &str) -> Result<BoardRef, UrlParseError> {
    match_board(url).ok_or_else(|| parse_error(UrlKind::Board, url))
}

/// Extracts the username from a profile URL.
///
/// # Errors
///
/// Returns [`UrlParseError`] with [`UrlKind::Profile`] unless the URL is a
/// pinterest.com URL with exactly one valid path segment.
pub fn parse_profile_url(url: &str) -> Result<String, UrlParseError> {
    match_profile(url).ok_or_else(|| parse_error(UrlKind::Profile, url))
}

/// Returns `true` if `segment` is a valid username or board slug.
#[must_use]
pub fn is_valid_segment(segment: &str) -> bool {
    SEGMENT.as_ref().is_some_and(|re| re.is_match(segment))
}

fn parse_error(kind: UrlKind, url: &str) -> UrlParseError {
    UrlParseError {
        kind,
        url: url.to_string(),
    }
}

fn match_pin_id(url: &str) -> Option<String> {
    PIN_ID.as_ref()?.captures(url).map(|caps| caps[1].to_string())
}

fn match_search_query(url: &str) -> Option<String> {
    SEARCH_QUERY
        .as_ref()?
        .captures(url)
        .map(|caps| RequestBuilder::url_decode(&caps[1]))
}

fn match_board(url: &str) -> Option<BoardRef> {
    BOARD.as_ref()?.captures(url).map(|caps| BoardRef {
        username: caps[1].to_string(),
        boardname: caps[2].to_string(),
    })
}

fn match_profile(url: &str) -> Option<String> {
    PROFILE.as_ref()?.captures(url).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(PIN_ID.is_some());
        assert!(SEARCH_QUERY.is_some());
        assert!(BOARD.is_some());
        assert!(PROFILE.is_some());
        assert!(SEGMENT.is_some());
    }

    #[test]
    fn test_pin_id_ignores_trailing_segments() {
        assert_eq!(
            parse_pin_id("https://www.pinterest.com/pin/555555555/").unwrap(),
            "555555555"
        );
        assert_eq!(
            parse_pin_id("https://www.pinterest.com/pin/123/sent/?invite_code=x").unwrap(),
            "123"
        );
    }

    #[test]
    fn test_pin_id_requires_trailing_slash() {
        let error = parse_pin_id("https://www.pinterest.com/pin/123").unwrap_err();
        assert_eq!(error.kind, UrlKind::Pin);
        assert!(error.to_string().contains("Invalid Pinterest pin URL"));
    }

    #[test]
    fn test_search_query_is_decoded() {
        let query =
            parse_search_query("https://www.pinterest.com/search/pins/?q=salt%26pepper&rs=typed")
                .unwrap();
        assert_eq!(query, "salt&pepper");

        let query =
            parse_search_query("https://www.pinterest.com/search/pins/?q=cute%20cats&rs=typed")
                .unwrap();
        assert_eq!(query, "cute cats");
    }

    #[test]
    fn test_search_requires_typed_marker() {
        assert!(parse_search_query("https://www.pinterest.com/search/pins/?q=cats").is_err());
        assert!(
            parse_search_query("https://www.pinterest.com/search/pins/?q=cats&rs=rs").is_err()
        );
    }

    #[test]
    fn test_board_with_and_without_trailing_slash() {
        let expected = BoardRef {
            username: "alice".to_string(),
            boardname: "cats".to_string(),
        };
        assert_eq!(
            parse_board_url("https://www.pinterest.com/alice/cats/").unwrap(),
            expected
        );
        assert_eq!(
            parse_board_url("https://www.pinterest.com/alice/cats").unwrap(),
            expected
        );
        assert_eq!(
            parse_board_url("https://pinterest.com/alice/cats/").unwrap(),
            expected
        );
        assert_eq!(
            parse_board_url("https://nl.pinterest.com/alice/cats/").unwrap(),
            expected
        );
    }

    #[test]
    fn test_board_rejects_extra_segments_and_bad_characters() {
        assert!(parse_board_url("https://www.pinterest.com/alice/cats/more/").is_err());
        assert!(parse_board_url("https://www.pinterest.com/alice/cats//").is_err());
        assert!(parse_board_url("https://www.pinterest.com/al.ice/cats/").is_err());
        assert!(parse_board_url("https://www.pinterest.com/alice/c%20ats/").is_err());
        assert!(parse_board_url("https://www.example.com/alice/cats/").is_err());
    }

    #[test]
    fn test_profile_matches_single_segment() {
        assert_eq!(
            parse_profile_url("https://www.pinterest.com/alice/").unwrap(),
            "alice"
        );
        assert_eq!(
            parse_profile_url("https://www.pinterest.com/alice").unwrap(),
            "alice"
        );
        assert!(parse_profile_url("https://www.pinterest.com/alice/cats/").is_err());
        assert!(parse_profile_url("https://www.pinterest.com/al!ce/").is_err());
    }

    #[test]
    fn test_profile_url_fails_board_and_classifies_as_profile() {
        let url = "https://www.pinterest.com/alice/";
        assert!(parse_board_url(url).is_err());

        let matches = classify(url);
        assert!(matches.board.is_none());
        assert_eq!(matches.profile_username.as_deref(), Some("alice"));
        assert_eq!(
            matches.identity(),
            Identity::Profile {
                username: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_pin_url_wins_over_board_shape() {
        let matches = classify("https://www.pinterest.com/pin/555555555/");
        assert_eq!(matches.pin_id.as_deref(), Some("555555555"));
        assert!(matches.search_query.is_none());
        // pin/<digits> also has the two-segment board shape
        assert!(matches.board.is_some());
        assert!(matches.profile_username.is_none());
        assert_eq!(
            matches.identity(),
            Identity::Pin {
                id: "555555555".to_string()
            }
        );
    }

    #[test]
    fn test_search_url_classifies_as_search() {
        let matches = classify("https://www.pinterest.com/search/pins/?q=cats&rs=typed");
        assert_eq!(
            matches.identity(),
            Identity::Search {
                query: "cats".to_string()
            }
        );
        assert!(matches.board.is_none());
        assert!(matches.profile_username.is_none());
    }

    #[test]
    fn test_unrecognized_url() {
        let matches = classify("https://example.com/whatever/deep/path");
        assert_eq!(matches, UrlMatches::default());
        assert_eq!(matches.identity(), Identity::Unrecognized);
        assert_eq!(matches.identity().kind(), None);
    }

    #[test]
    fn test_board_ref_path() {
        let board = BoardRef {
            username: "alice".to_string(),
            boardname: "cats".to_string(),
        };
        assert_eq!(board.path(), "/alice/cats/");
    }

    #[test]
    fn test_is_valid_segment() {
        assert!(is_valid_segment("alice_b-2"));
        assert!(!is_valid_segment(""));
        assert!(!is_valid_segment("alice/"));
        assert!(!is_valid_segment("a lice"));
    }
}
