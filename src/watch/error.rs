use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum WatchError {
    /// The page could not be fetched. Carried unchanged from the fetcher.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The judge served an empty page (or redirected away) for this contest.
    #[error("contest {0} doesn't exist")]
    ContestNotFound(String),
}
