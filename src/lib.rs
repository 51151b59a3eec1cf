//! Scrapes a contest's submissions and problem solve status from the judge's
//! HTML pages.
//!
//! ```no_run
//! use cfwatch::{config::FetcherConfig, fetcher::HttpFetcher, watch};
//! use url::Url;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::new(&FetcherConfig::from_env()?)?;
//! let contest = Url::parse("https://codeforces.com/contest/1850")?;
//!
//! let submissions = watch::extract_submissions(&fetcher, "1850", "a", &contest).await?;
//! let problems = watch::extract_contest_status(&fetcher, "1850", &contest).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fetcher;
pub mod watch;
