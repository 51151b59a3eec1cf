use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, instrument};
use url::Url;

use crate::fetcher::PageFetcher;
use crate::watch::error::WatchError;
use crate::watch::model::Submission;
use crate::watch::page::fetch_contest_page;
use crate::watch::row;

macro_rules! selector {
    ($ident:ident, $selector:expr) => {
        static $ident: LazyLock<Selector> = LazyLock::new(|| Selector::parse($selector).unwrap());
    };
}

// Rows carrying a submission, and the links inside them
selector!(SUBMISSION_ROW, "tr[data-submission-id]");
selector!(ROW_LINK, "a[href]");

// Cells of a submission row; the third one (author) is not recorded
selector!(ID_CELL, "td:nth-of-type(1)");
selector!(WHEN_CELL, "td:nth-of-type(2)");
selector!(PROBLEM_CELL, "td:nth-of-type(4)");
selector!(LANG_CELL, "td:nth-of-type(5)");
selector!(VERDICT_CELL, "td:nth-of-type(6)");
selector!(TIME_CELL, "td:nth-of-type(7)");
selector!(MEMORY_CELL, "td:nth-of-type(8)");

/// Path segment of the signed-in user's submissions below a contest URL.
const MY_SUBMISSIONS: &str = "my";

/// URL of the submissions listing for a contest base URL, e.g.
/// `https://codeforces.com/contest/1850` becomes `.../contest/1850/my`.
pub fn submissions_url(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    let path = format!(
        "{}/{}",
        base_url.path().trim_end_matches('/'),
        MY_SUBMISSIONS
    );
    url.set_path(&path);
    url
}

/// Fetch the contest's submissions page and return the rows matching `query`.
///
/// `query` is either a problem id (`"a"`, `"B1"`) or a submission id; both
/// are matched the same way, as an uppercased substring of a link in the row.
/// A page without matches yields an empty list.
#[instrument(skip(fetcher, base_url), fields(url = %base_url))]
pub async fn extract_submissions<F>(
    fetcher: &F,
    contest_id: &str,
    query: &str,
    base_url: &Url,
) -> Result<Vec<Submission>, WatchError>
where
    F: PageFetcher + ?Sized,
{
    let url = submissions_url(base_url);
    let html = fetch_contest_page(fetcher, contest_id, &url).await?;
    Ok(parse_submissions(&html, query))
}

/// Extract the submission rows of an already fetched page.
pub fn parse_submissions(html: &str, query: &str) -> Vec<Submission> {
    let needle = format!("/{}", query.to_uppercase());
    let document = Html::parse_document(html);

    let submissions: Vec<Submission> = document
        .select(&SUBMISSION_ROW)
        .filter(|row| links_to(*row, &needle))
        .map(submission_from_row)
        .collect();

    debug!(query, count = submissions.len(), "matched submission rows");
    submissions
}

fn links_to(row: ElementRef<'_>, needle: &str) -> bool {
    row.select(&ROW_LINK).any(|link| {
        link.value()
            .attr("href")
            .is_some_and(|href| href.contains(needle))
    })
}

fn submission_from_row(row: ElementRef<'_>) -> Submission {
    Submission {
        id: row::text(row, &ID_CELL),
        submitted_at: row::text(row, &WHEN_CELL),
        problem_name: row::text(row, &PROBLEM_CELL),
        language: row::text(row, &LANG_CELL),
        is_pending: row::attr(row, &VERDICT_CELL, "waiting"),
        verdict: row::text(row, &VERDICT_CELL),
        exec_time: row::text(row, &TIME_CELL),
        memory_used: row::text(row, &MEMORY_CELL),
    }
}
