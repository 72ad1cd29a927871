//! Target resolution.
//!
//! Users name servers by id, or pass the `all` sentinel to mean every server
//! on the account.

use tracing::debug;

use crate::api::ServerApi;
use crate::error::CoreError;
use crate::models::Server;

/// Sentinel target meaning "every server".
pub const ALL_TARGETS: &str = "all";

/// Whether the target list contains the `all` sentinel.
pub fn wants_all(targets: &[String]) -> bool {
    targets.iter().any(|t| t == ALL_TARGETS)
}

/// Expand a target list into concrete server ids.
///
/// If `all` appears anywhere, the result is exactly the ids returned by one
/// list call, in API order, and any other entries are ignored. Otherwise the
/// list is returned unchanged.
pub async fn resolve_targets<A>(api: &A, targets: &[String]) -> Result<Vec<String>, CoreError>
where
    A: ServerApi + ?Sized,
{
    if targets.is_empty() {
        return Err(CoreError::NoTargets);
    }

    if !wants_all(targets) {
        return Ok(targets.to_vec());
    }

    let ids: Vec<String> = api
        .list_servers()
        .await?
        .into_iter()
        .map(|server| server.id)
        .collect();
    debug!(count = ids.len(), "resolved 'all' to server ids");

    Ok(ids)
}

/// Fetch full server records for a target list.
///
/// `all` costs a single `GET /servers`; explicit ids are fetched one by one,
/// in order, and the first failure aborts.
pub async fn fetch_servers<A>(api: &A, targets: &[String]) -> Result<Vec<Server>, CoreError>
where
    A: ServerApi + ?Sized,
{
    if targets.is_empty() {
        return Err(CoreError::NoTargets);
    }

    if wants_all(targets) {
        return api.list_servers().await;
    }

    let mut servers = Vec::with_capacity(targets.len());
    for id in targets {
        servers.push(api.get_server(id).await?);
    }

    Ok(servers)
}
