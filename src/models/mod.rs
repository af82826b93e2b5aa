//! Data models for the catalog

pub mod author;
pub mod book;
pub mod enums;
pub mod genre;
pub mod instance;
pub mod review;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorDetails};
pub use book::{Book, BookDetails, BookSummary};
pub use enums::LoanStatus;
pub use genre::Genre;
pub use instance::{BookInstance, InstanceDetails};
pub use review::{BookReview, ReviewDetails};
pub use user::{User, UserShort};

/// Path prefix of the JSON API; detail URLs are built under it
pub const API_PREFIX: &str = "/api/v1";

/// How many related names a `display_*` summary shows
pub const DISPLAY_LIMIT: usize = 3;

/// Joins the first [`DISPLAY_LIMIT`] names with `", "`.
pub fn display_first<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .take(DISPLAY_LIMIT)
        .map(|s| s.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}
