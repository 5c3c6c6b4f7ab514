//! Pagination aggregators.
//!
//! Two client-side loops turn a paged list API into a single logical result
//! set. Which one applies is dictated by the server endpoint, not chosen by
//! the client: endpoints either hand back an opaque continuation token or an
//! offset window with a `hasNextPage` flag, never both.
//!
//! Both aggregators fetch strictly sequentially (the next cursor is only
//! known once the current page returns) and both are all-or-nothing: a
//! failed page aborts the walk and discards everything accumulated so far.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::CseResult;
use crate::page::{OffsetPage, Record, TokenPage};

/// Walk a token-paginated endpoint until the server stops returning a
/// continuation token, hard-capped at `max_pages` fetches.
///
/// `fetch_page` receives the token for the page to fetch (`None` on the
/// first call). An empty page does not by itself end the walk; only a
/// missing token or the page cap does, so a server handing out live tokens
/// with empty pages can never spin the loop unboundedly. Records are
/// returned in server order, without deduplication.
pub async fn aggregate_by_token<F, Fut>(
    mut fetch_page: F,
    max_pages: usize,
) -> CseResult<Vec<Record>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = CseResult<TokenPage>>,
{
    let mut records = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0;

    while pages < max_pages {
        let page = fetch_page(token.take()).await?;
        pages += 1;

        if page.records.is_empty() && page.next_page_token.is_some() {
            warn!(page = pages, "empty page with a live continuation token");
        }
        records.extend(page.records);

        token = page.next_page_token;
        if token.is_none() {
            debug!(records = records.len(), pages, "token walk complete");
            break;
        }
    }

    Ok(records)
}

/// Walk an offset-paginated endpoint in windows of at most `page_cap`
/// records until `total_limit` records are accumulated or the server runs
/// out.
///
/// Each request asks for `min(remaining, page_cap)` records; the per-request
/// cap is a property of the resource and is never exceeded, however large
/// `total_limit` is. The walk ends when the requested total is reached, a
/// page comes back empty, or the server reports no next page, so the
/// result may be shorter than `total_limit` when the underlying collection
/// is smaller.
///
/// The offset advances by the requested batch size, not by the returned
/// count. A server that returned a short page while still reporting
/// `hasNextPage: true` would therefore have records skipped between windows;
/// the endpoints this client targets only return short final pages.
pub async fn aggregate_by_offset<F, Fut>(
    mut fetch_page: F,
    total_limit: usize,
    page_cap: usize,
) -> CseResult<Vec<Record>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = CseResult<OffsetPage>>,
{
    let mut records = Vec::new();
    let mut offset = 0;
    let mut remaining = total_limit;
    let mut batch_size = remaining.min(page_cap);

    while remaining > 0 {
        let page = fetch_page(offset, batch_size).await?;
        let returned = page.records.len();
        debug!(offset, batch_size, remaining, returned, "offset batch");

        records.extend(page.records);
        remaining = remaining.saturating_sub(returned);

        if returned == 0 {
            debug!(records = records.len(), "no results in window");
            break;
        }
        if !page.has_next_page {
            debug!(records = records.len(), "last page reached");
            break;
        }

        offset += batch_size;
        batch_size = remaining.min(page_cap);
    }

    records.truncate(total_limit);
    Ok(records)
}
