//! Extraction of submissions and problem status from judge pages.
//!
//! Both extractors fetch one page through a caller-supplied
//! [`PageFetcher`](crate::fetcher::PageFetcher), parse it and map table rows
//! to records in document order. Nothing is cached between calls.

pub mod contest;
pub mod error;
pub mod model;
mod page;
pub mod row;
pub mod submissions;

#[cfg(test)]
mod tests;

pub use contest::{extract_contest_status, parse_contest_status};
pub use error::WatchError;
pub use model::{Problem, Submission};
pub use submissions::{extract_submissions, parse_submissions, submissions_url};
