//! Name → id resolution for cross-referenced resources.
//!
//! Plans, sites, and labels are caller-facing by name but id-bearing on
//! every mutating endpoint. Resolution is exact-match only; a name with
//! no remote counterpart is a hard input error, never an auto-create.

use std::collections::HashMap;

use tracing::debug;

use kentik_api::Client;

use crate::error::CoreError;

/// Resolve a plan name to its id via the plan listing.
pub async fn resolve_plan_id(client: &Client, name: &str) -> Result<u64, CoreError> {
    let plans = client.list_plans().await?;
    let by_name: HashMap<&str, u64> = plans.iter().map(|p| (p.name.as_str(), p.id)).collect();

    by_name.get(name).copied().map_or_else(
        || {
            Err(CoreError::NotFound {
                entity: "Plan",
                name: name.into(),
            })
        },
        |id| {
            debug!(name, id, "resolved plan");
            Ok(id)
        },
    )
}

/// Resolve a site title to its id via the site listing.
pub async fn resolve_site_id(client: &Client, title: &str) -> Result<u64, CoreError> {
    let sites = client.list_sites().await?;
    let by_title: HashMap<&str, u64> = sites.iter().map(|s| (s.title.as_str(), s.id)).collect();

    by_title.get(title).copied().map_or_else(
        || {
            Err(CoreError::NotFound {
                entity: "Site",
                name: title.into(),
            })
        },
        |id| {
            debug!(title, id, "resolved site");
            Ok(id)
        },
    )
}

/// Resolve label names to ids via the label listing, preserving order.
///
/// Empty-string names are skipped (caller input formats pad label lists
/// with empty entries); any other unmatched name is a terminal error.
pub async fn resolve_label_ids(client: &Client, names: &[String]) -> Result<Vec<u64>, CoreError> {
    let labels = client.list_labels().await?;
    let by_name: HashMap<&str, u64> = labels.iter().map(|l| (l.name.as_str(), l.id)).collect();

    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        if name.is_empty() {
            continue;
        }
        match by_name.get(name.as_str()) {
            Some(id) => ids.push(*id),
            None => {
                return Err(CoreError::NotFound {
                    entity: "Label",
                    name: name.clone(),
                });
            }
        }
    }

    debug!(?ids, "resolved labels");
    Ok(ids)
}
