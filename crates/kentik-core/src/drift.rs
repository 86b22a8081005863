//! Drift detection between the remote device and the desired payload.
//!
//! The comparison is deliberately flat: site and plan ids are checked
//! structurally first (they decide whether anything else is comparable),
//! then every remaining desired field is compared by string-cast
//! equality against the remote's corresponding attribute. Nested objects
//! are compared as their canonical JSON rendering — a key-order
//! difference is equivalent, but there is no deep per-field diff inside
//! them. This is the intended contract, not an accident.

use serde_json::{Map, Value};
use tracing::debug;

use kentik_api::models::Device;

/// Decide whether a mutating update call is required to converge the
/// remote device to the desired payload.
pub fn needs_update(remote: &Device, desired: &Map<String, Value>) -> bool {
    // Site/plan mismatches short-circuit: they determine which other
    // fields are even comparable.
    if let Some(want) = desired.get("siteId").and_then(Value::as_u64) {
        let have = remote.site.as_ref().map(|s| s.id);
        if have != Some(want) {
            debug!(?have, want, "site id does not match");
            return true;
        }
    }
    if let Some(want) = desired.get("planId").and_then(Value::as_u64) {
        let have = remote.plan.as_ref().map(|p| p.id);
        if have != Some(want) {
            debug!(?have, want, "plan id does not match");
            return true;
        }
    }

    let remote_fields = normalized_remote_fields(remote, desired);

    for (key, want) in desired {
        // Ids were compared structurally above. The SNMP community is
        // never echoed back in cleartext, so once site and plan match it
        // is trusted as already correct.
        if matches!(key.as_str(), "siteId" | "planId" | "deviceSnmpCommunity") {
            continue;
        }

        let Some(have) = remote_fields.get(key) else {
            debug!(key, "desired field not yet configured on remote");
            return true;
        };
        if string_cast(have) != string_cast(want) {
            debug!(key, %want, %have, "field does not match remote");
            return true;
        }
    }

    debug!("device is up to date");
    false
}

/// Remote attributes adjusted for the NMS port default: when the desired
/// payload configures NMS without an SNMP port override, the port the
/// platform filled in server-side must not count as drift.
fn normalized_remote_fields(remote: &Device, desired: &Map<String, Value>) -> Map<String, Value> {
    let mut fields = remote.attributes.clone();

    let desired_nms = desired.get("nms");
    let desired_has_port = desired_nms
        .and_then(|n| n.pointer("/snmp/port"))
        .is_some();

    if desired_nms.is_some() && !desired_has_port {
        if let Some(snmp) = fields
            .get_mut("nms")
            .and_then(|n| n.pointer_mut("/snmp"))
            .and_then(Value::as_object_mut)
        {
            snmp.remove("port");
        }
    }

    fields
}

/// String-cast a JSON value for flat comparison: strings compare by
/// their raw contents, everything else by its JSON rendering. This makes
/// `"10"` equal to `10`, matching an API that renders numbers as strings
/// in some representations and numbers in others.
fn string_cast(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
