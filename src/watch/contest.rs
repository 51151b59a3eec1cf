use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, instrument};
use url::Url;

use crate::fetcher::PageFetcher;
use crate::watch::error::WatchError;
use crate::watch::model::Problem;
use crate::watch::page::fetch_contest_page;
use crate::watch::row;

static PROBLEM_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".problems tr").unwrap());
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

static ID_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td:nth-of-type(1)").unwrap());
static NAME_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td:nth-of-type(2) a").unwrap());
static SOLVED_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td:nth-of-type(4)").unwrap());

/// Fetch the contest dashboard and return the solve status of each problem.
#[instrument(skip(fetcher, dashboard_url), fields(url = %dashboard_url))]
pub async fn extract_contest_status<F>(
    fetcher: &F,
    contest_id: &str,
    dashboard_url: &Url,
) -> Result<Vec<Problem>, WatchError>
where
    F: PageFetcher + ?Sized,
{
    let html = fetch_contest_page(fetcher, contest_id, dashboard_url).await?;
    Ok(parse_contest_status(&html))
}

/// Extract the problem rows of an already fetched dashboard.
pub fn parse_contest_status(html: &str) -> Vec<Problem> {
    let document = Html::parse_document(html);

    let problems: Vec<Problem> = document
        .select(&PROBLEM_ROW)
        // header and spacer rows have no data cells
        .filter(|row| row.select(&DATA_CELL).next().is_some())
        .map(problem_from_row)
        .collect();

    debug!(count = problems.len(), "parsed problem rows");
    problems
}

fn problem_from_row(row: ElementRef<'_>) -> Problem {
    Problem {
        id: row::text(row, &ID_CELL),
        name: row::text(row, &NAME_LINK),
        // solve status is rendered as a class on the whole row
        status: row.value().attr("class").unwrap_or_default().to_string(),
        solved_count: row::text(row, &SOLVED_CELL),
    }
}
