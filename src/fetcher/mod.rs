pub mod client;
pub mod errors;
pub mod pipeline;

pub use client::{HttpFetcher, PageFetcher, client_builder};
pub use errors::FetchError;
pub use pipeline::decode_html;

#[cfg(test)]
pub use client::MockPageFetcher;
