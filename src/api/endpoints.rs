//! Static registry of resource endpoints.
//!
//! Every logical [`Operation`] maps to exactly one [`Endpoint`]: the internal
//! `/resource/<Name>/get/` path the web frontend calls, its HTTP method and
//! whether the options payload carries an explicit upstream API version.
//!
//! # Example
//!
//! ```rust
//! use pinterest_api::api::{Endpoint, Operation};
//!
//! let endpoint = Endpoint::for_operation(Operation::Search);
//! assert_eq!(endpoint.path, "/resource/BaseSearchResource/get/");
//! assert!(!endpoint.versioned);
//! ```

use std::fmt;

/// HTTP methods used by resource endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read-only resource fetch.
    Get,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
        }
    }
}

/// Logical operations the client can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Pins related to a pin ("more like this").
    RelatedImages,
    /// The pin itself.
    MainImage,
    /// Board metadata, including its numeric id.
    BoardDetail,
    /// Pins saved on a board.
    BoardFeed,
    /// Pin search results.
    Search,
    /// Pins created by a user.
    UserPins,
}

impl Operation {
    /// Every operation, in registry order.
    pub const ALL: [Self; 6] = [
        Self::RelatedImages,
        Self::MainImage,
        Self::BoardDetail,
        Self::BoardFeed,
        Self::Search,
        Self::UserPins,
    ];

    /// Returns a human-readable name, used in error messages and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RelatedImages => "related images",
            Self::MainImage => "main image",
            Self::BoardDetail => "board",
            Self::BoardFeed => "board feed",
            Self::Search => "search",
            Self::UserPins => "user pins",
        }
    }

    /// Returns `true` if the operation takes a page size and bookmarks.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        matches!(
            self,
            Self::RelatedImages | Self::BoardFeed | Self::Search | Self::UserPins
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes how to address one resource endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// The operation this endpoint serves.
    pub operation: Operation,
    /// The upstream resource name (e.g., `BoardResource`).
    pub resource: &'static str,
    /// Path relative to the site root.
    pub path: &'static str,
    /// The HTTP method for this endpoint.
    pub method: HttpMethod,
    /// Whether the options payload names an explicit versioned API path
    /// (e.g., `/v3/...`) that the generic `ApiResource` proxies to.
    pub versioned: bool,
}

impl Endpoint {
    /// Creates a GET endpoint for `resource`.
    ///
    /// This is a `const fn` so the registry can be a constant table.
    #[must_use]
    pub const fn get(
        operation: Operation,
        resource: &'static str,
        path: &'static str,
        versioned: bool,
    ) -> Self {
        Self {
            operation,
            resource,
            path,
            method: HttpMethod::Get,
            versioned,
        }
    }

    /// Returns the registered endpoint for `operation`.
    #[must_use]
    pub const fn for_operation(operation: Operation) -> &'static Self {
        match operation {
            Operation::RelatedImages => &RELATED_MODULES,
            Operation::MainImage => &MAIN_IMAGE,
            Operation::BoardDetail => &BOARD,
            Operation::BoardFeed => &BOARD_FEED,
            Operation::Search => &BASE_SEARCH,
            Operation::UserPins => &USER_ACTIVITY_PINS,
        }
    }
}

const RELATED_MODULES: Endpoint = Endpoint::get(
    Operation::RelatedImages,
    "RelatedModulesResource",
    "/resource/RelatedModulesResource/get/",
    false,
);

const MAIN_IMAGE: Endpoint = Endpoint::get(
    Operation::MainImage,
    "ApiResource",
    "/resource/ApiResource/get/",
    true,
);

const BOARD: Endpoint = Endpoint::get(
    Operation::BoardDetail,
    "BoardResource",
    "/resource/BoardResource/get/",
    false,
);

const BOARD_FEED: Endpoint = Endpoint::get(
    Operation::BoardFeed,
    "BoardFeedResource",
    "/resource/BoardFeedResource/get/",
    false,
);

const BASE_SEARCH: Endpoint = Endpoint::get(
    Operation::Search,
    "BaseSearchResource",
    "/resource/BaseSearchResource/get/",
    false,
);

const USER_ACTIVITY_PINS: Endpoint = Endpoint::get(
    Operation::UserPins,
    "UserActivityPinsResource",
    "/resource/UserActivityPinsResource/get/",
    false,
);

/// The full registry, in [`Operation::ALL`] order.
pub const ENDPOINTS: &[Endpoint] = &[
    RELATED_MODULES,
    MAIN_IMAGE,
    BOARD,
    BOARD_FEED,
    BASE_SEARCH,
    USER_ACTIVITY_PINS,
];
