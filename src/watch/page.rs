use tracing::{debug, warn};
use url::Url;

use crate::fetcher::{PageFetcher, decode_html};
use crate::watch::error::WatchError;

/// Fetch a contest page and decode it, turning an empty body into
/// [`WatchError::ContestNotFound`].
pub(crate) async fn fetch_contest_page<F>(
    fetcher: &F,
    contest_id: &str,
    url: &Url,
) -> Result<String, WatchError>
where
    F: PageFetcher + ?Sized,
{
    let body = fetcher.fetch(url).await?;

    if body.is_empty() {
        warn!(contest_id, %url, "empty page, contest not found");
        return Err(WatchError::ContestNotFound(contest_id.to_string()));
    }

    debug!(size = body.len(), "decoding contest page");
    Ok(decode_html(&body))
}
