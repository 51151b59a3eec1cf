use bytes::Bytes;
use url::Url;

use crate::fetcher::{FetchError, MockPageFetcher};
use crate::watch::{
    Problem, Submission, WatchError, extract_contest_status, extract_submissions,
    parse_contest_status, parse_submissions,
};

const SUBMISSIONS_PAGE: &str = include_str!("../../../tests/fixtures/submissions.html");
const DASHBOARD_PAGE: &str = include_str!("../../../tests/fixtures/dashboard.html");

fn contest_url() -> Url {
    Url::parse("https://codeforces.com/contest/1850").unwrap()
}

fn serving(expected_url: &'static str, page: &'static str) -> MockPageFetcher {
    let mut fetcher = MockPageFetcher::new();
    fetcher
        .expect_fetch()
        .withf(move |url| url.as_str() == expected_url)
        .times(1)
        .returning(move |_| Ok(Bytes::from_static(page.as_bytes())));
    fetcher
}

fn failing() -> MockPageFetcher {
    let mut fetcher = MockPageFetcher::new();
    fetcher
        .expect_fetch()
        .times(1)
        .returning(|_| Err(FetchError::Connect("connection refused".to_string())));
    fetcher
}

fn ids(submissions: &[Submission]) -> Vec<&str> {
    submissions.iter().map(|s| s.id.as_str()).collect()
}

#[tokio::test]
async fn test_extract_submissions_for_problem() {
    let fetcher = serving("https://codeforces.com/contest/1850/my", SUBMISSIONS_PAGE);

    let submissions = extract_submissions(&fetcher, "1850", "a", &contest_url())
        .await
        .unwrap();

    assert_eq!(ids(&submissions), ["214000087", "214000010"]);
    assert_eq!(
        submissions[0],
        Submission {
            id: "214000087".to_string(),
            submitted_at: "Jul/21/2023 18:24".to_string(),
            problem_name: "A - To My Critics".to_string(),
            language: "GNU C++17".to_string(),
            is_pending: "false".to_string(),
            verdict: "Accepted".to_string(),
            exec_time: "15 ms".to_string(),
            memory_used: "100 KB".to_string(),
        }
    );
    assert_eq!(submissions[1].verdict, "Wrong answer on test 2");
}

#[tokio::test]
async fn test_extract_submission_by_id() {
    let fetcher = serving("https://codeforces.com/contest/1850/my", SUBMISSIONS_PAGE);

    let submissions = extract_submissions(&fetcher, "1850", "214000052", &contest_url())
        .await
        .unwrap();

    assert_eq!(ids(&submissions), ["214000052"]);
    assert_eq!(submissions[0].language, "Rust 2021");
}

#[tokio::test]
async fn test_pending_flag_comes_from_attribute() {
    let fetcher = serving("https://codeforces.com/contest/1850/my", SUBMISSIONS_PAGE);

    let submissions = extract_submissions(&fetcher, "1850", "C", &contest_url())
        .await
        .unwrap();

    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].is_pending, "true");
    assert!(submissions[0].is_waiting());
    assert_eq!(submissions[0].verdict, "Running on test 4");
}

#[tokio::test]
async fn test_extract_submissions_no_match_is_empty() {
    let fetcher = serving("https://codeforces.com/contest/1850/my", SUBMISSIONS_PAGE);

    let submissions = extract_submissions(&fetcher, "1850", "G", &contest_url())
        .await
        .unwrap();

    assert!(submissions.is_empty());
}

#[tokio::test]
async fn test_extract_submissions_empty_page_is_not_found() {
    let mut fetcher = MockPageFetcher::new();
    fetcher
        .expect_fetch()
        .times(1)
        .returning(|_| Ok(Bytes::new()));

    let result = extract_submissions(&fetcher, "99999", "a", &contest_url()).await;

    match result {
        Err(WatchError::ContestNotFound(contest)) => assert_eq!(contest, "99999"),
        other => panic!("Expected ContestNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_extract_submissions_propagates_fetch_error() {
    let fetcher = failing();

    let result = extract_submissions(&fetcher, "1850", "a", &contest_url()).await;

    match result {
        Err(WatchError::Fetch(FetchError::Connect(message))) => {
            assert_eq!(message, "connection refused");
        }
        other => panic!("Expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_extract_contest_status() {
    let fetcher = serving("https://codeforces.com/contest/1850", DASHBOARD_PAGE);

    let problems = extract_contest_status(&fetcher, "1850", &contest_url())
        .await
        .unwrap();

    // The header row has no <td> and is skipped
    assert_eq!(problems.len(), 4);
    assert_eq!(
        problems[0],
        Problem {
            id: "A".to_string(),
            name: "To My Critics".to_string(),
            status: "accepted-problem".to_string(),
            solved_count: "x31250".to_string(),
        }
    );
    assert_eq!(problems[1].status, "rejected-problem");
    assert_eq!(problems[2].status, "");
    assert_eq!(problems[3].status, "dark");
    assert_eq!(
        problems.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        ["A", "B", "C", "D"]
    );
    assert!(problems[0].is_accepted());
    assert!(!problems[1].is_accepted());
}

#[tokio::test]
async fn test_extract_contest_status_empty_page_is_not_found() {
    let mut fetcher = MockPageFetcher::new();
    fetcher
        .expect_fetch()
        .times(1)
        .returning(|_| Ok(Bytes::new()));

    let result = extract_contest_status(&fetcher, "424242", &contest_url()).await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "contest 424242 doesn't exist");
}

#[tokio::test]
async fn test_extract_contest_status_propagates_fetch_error() {
    let fetcher = failing();

    let result = extract_contest_status(&fetcher, "1850", &contest_url()).await;

    assert!(matches!(
        result,
        Err(WatchError::Fetch(FetchError::Connect(_)))
    ));
}

#[test]
fn test_query_is_case_insensitive() {
    assert_eq!(
        parse_submissions(SUBMISSIONS_PAGE, "a"),
        parse_submissions(SUBMISSIONS_PAGE, "A")
    );
}

#[test]
fn test_single_match_among_three_rows() {
    let html = r#"<table>
        <tr data-submission-id="3"><td>3</td><td>t3</td><td>me</td><td><a href="/problem/B">B</a></td><td>Go</td><td waiting="false">OK</td><td>1 ms</td><td>1 KB</td></tr>
        <tr data-submission-id="2"><td>2</td><td>t2</td><td>me</td><td><a href="/problem/A">A</a></td><td>Rust</td><td waiting="false">Accepted</td><td>2 ms</td><td>2 KB</td></tr>
        <tr data-submission-id="1"><td>1</td><td>t1</td><td>me</td><td><a href="/problem/C">C</a></td><td>C++</td><td waiting="false">OK</td><td>3 ms</td><td>3 KB</td></tr>
    </table>"#;

    let submissions = parse_submissions(html, "a");

    assert_eq!(
        submissions,
        [Submission {
            id: "2".to_string(),
            submitted_at: "t2".to_string(),
            problem_name: "A".to_string(),
            language: "Rust".to_string(),
            is_pending: "false".to_string(),
            verdict: "Accepted".to_string(),
            exec_time: "2 ms".to_string(),
            memory_used: "2 KB".to_string(),
        }]
    );
}

#[test]
fn test_order_kept_with_interleaved_rows() {
    let html = r#"<table>
        <tr data-submission-id="10"><td>10</td><td></td><td></td><td><a href="/c/1/problem/D">D</a></td></tr>
        <tr data-submission-id="9"><td>9</td><td></td><td></td><td><a href="/c/1/problem/E">E</a></td></tr>
        <tr data-submission-id="8"><td>8</td><td></td><td></td><td><a href="/c/1/problem/D">D</a></td></tr>
        <tr><td>spacer</td></tr>
        <tr data-submission-id="7"><td>7</td><td></td><td></td><td><a href="/c/1/problem/F">F</a></td></tr>
        <tr data-submission-id="6"><td>6</td><td></td><td></td><td><a href="/c/1/problem/D">D</a></td></tr>
    </table>"#;

    assert_eq!(ids(&parse_submissions(html, "d")), ["10", "8", "6"]);
}

#[test]
fn test_missing_verdict_cell_degrades_to_empty() {
    let html = r#"<table>
        <tr data-submission-id="5"><td>5</td><td>now</td><td>me</td><td><a href="/problem/A">A</a></td><td>Rust</td></tr>
    </table>"#;

    let submissions = parse_submissions(html, "A");

    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].id, "5");
    assert_eq!(submissions[0].language, "Rust");
    assert_eq!(submissions[0].verdict, "");
    assert_eq!(submissions[0].is_pending, "");
    assert_eq!(submissions[0].exec_time, "");
}

#[test]
fn test_page_without_table_yields_nothing() {
    let html = "<html><body><p>Nothing here</p></body></html>";
    assert!(parse_submissions(html, "a").is_empty());
    assert!(parse_contest_status(html).is_empty());
}

#[test]
fn test_problem_rows_outside_problems_table_are_ignored() {
    let html = r#"
        <table class="rtable"><tr><td>Announcement</td></tr></table>
        <table class="problems">
            <tr><th>#</th><th>Name</th></tr>
            <tr><td>A</td><td><a href="/p/A">Alpha</a></td><td></td><td>x1</td></tr>
            <tr><td>B</td><td>Beta without link</td></tr>
        </table>"#;

    let problems = parse_contest_status(html);

    assert_eq!(problems.len(), 2);
    assert_eq!(problems[0].name, "Alpha");
    assert_eq!(problems[0].solved_count, "x1");
    assert_eq!(problems[1].id, "B");
    assert_eq!(problems[1].name, "");
    assert_eq!(problems[1].solved_count, "");
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    fn row(id: usize, problem: &str) -> String {
        format!(
            r#"<tr data-submission-id="{id}"><td>{id}</td><td></td><td></td><td><a href="/c/1/problem/{problem}">{problem}</a></td></tr>"#
        )
    }

    proptest! {
        #[test]
        fn test_parsers_never_panic(html in ".*", query in "[a-zA-Z0-9]{0,6}") {
            let _ = parse_submissions(&html, &query);
            let _ = parse_contest_status(&html);
        }

        #[test]
        fn test_matches_follow_document_order(matching in proptest::collection::vec(any::<bool>(), 0..20)) {
            let rows: String = matching
                .iter()
                .enumerate()
                .map(|(id, hit)| row(id, if *hit { "Q" } else { "Z" }))
                .collect();
            let html = format!("<table>{rows}</table>");

            let expected: Vec<String> = matching
                .iter()
                .enumerate()
                .filter(|(_, hit)| **hit)
                .map(|(id, _)| id.to_string())
                .collect();
            let found: Vec<String> = parse_submissions(&html, "q").into_iter().map(|s| s.id).collect();

            prop_assert_eq!(found, expected);
        }
    }
}
