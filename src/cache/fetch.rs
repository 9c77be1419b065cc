//! Dependency archive fetching

use crate::error::{XgoError, XgoResult};
use std::io::{self, Write};
use tracing::debug;

/// Source of dependency archives
pub trait Fetcher {
    /// Stream the body at `url` into `dest`, returning the byte count
    fn fetch(&self, url: &str, dest: &mut dyn Write) -> XgoResult<u64>;
}

/// Plain blocking HTTP(S) GET without authentication or retries
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &mut dyn Write) -> XgoResult<u64> {
        debug!("GET {}", url);
        let resp = ureq::get(url).call().map_err(|e| XgoError::fetch(url, e))?;
        let mut reader = resp.into_body().into_reader();
        io::copy(&mut reader, dest).map_err(|e| XgoError::fetch(url, e))
    }
}
