//! Token-based pagination helpers

use crate::client::SiteWiseApi;
use crate::error::Result;
use crate::throttle::Throttle;
use crate::types::{AssetModelSummary, AssetSummary, Page};

/// Follow continuation tokens until a page comes back without one
///
/// The throttle is waited on between pages, never after the last page.
pub fn collect_pages<T, F>(throttle: &Throttle, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<&str>) -> Result<Page<T>>,
{
    let mut items = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(next_token.as_deref())?;
        pages += 1;
        items.extend(page.items);
        match page.next_token {
            Some(token) => {
                log::debug!("Fetched page {} ({} items so far), continuing", pages, items.len());
                next_token = Some(token);
                throttle.wait();
            }
            None => break,
        }
    }

    Ok(items)
}

/// All asset models in the account
pub fn list_all_asset_models<C: SiteWiseApi + ?Sized>(
    client: &C,
    throttle: &Throttle,
) -> Result<Vec<AssetModelSummary>> {
    collect_pages(throttle, |token| client.list_asset_models(token))
}

/// All assets created from `model_id`
pub fn list_all_assets<C: SiteWiseApi + ?Sized>(
    client: &C,
    model_id: &str,
    throttle: &Throttle,
) -> Result<Vec<AssetSummary>> {
    collect_pages(throttle, |token| client.list_assets(model_id, token))
}

/// All child assets of `asset_id` through `hierarchy_id`
pub fn list_all_associated_assets<C: SiteWiseApi + ?Sized>(
    client: &C,
    asset_id: &str,
    hierarchy_id: &str,
    throttle: &Throttle,
) -> Result<Vec<AssetSummary>> {
    collect_pages(throttle, |token| {
        client.list_associated_assets(asset_id, hierarchy_id, token)
    })
}
