// Wire models for the Kentik APIs.
//
// The portal API (v5) renders most numeric ids as JSON strings while the
// newer device management API renders them as numbers; every id field here
// accepts both.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Deserialize an id that may arrive as a JSON number or a numeric string.
pub(crate) fn id_from_any<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("non-numeric id: {s:?}"))),
    }
}

// ── Reference resources (name ↔ id) ─────────────────────────────────

/// A billing/feature plan. Devices reference plans by numeric id only.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    #[serde(deserialize_with = "id_from_any")]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlanList {
    pub plans: Vec<Plan>,
}

/// A site (physical/logical location grouping). The device management API
/// exposes the human-readable key as `title`.
#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    #[serde(deserialize_with = "id_from_any")]
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SiteList {
    pub sites: Vec<Site>,
}

/// A label, attachable to devices in a many-to-many relationship.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    #[serde(deserialize_with = "id_from_any")]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelList {
    pub labels: Vec<Label>,
}

// ── Devices ─────────────────────────────────────────────────────────

/// Minimal device record from the account-wide listing, used for
/// existence matching by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    #[serde(deserialize_with = "id_from_any")]
    pub id: u64,
    pub device_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceList {
    pub devices: Vec<DeviceSummary>,
}

/// Reference to a site/plan nested inside a device representation.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    #[serde(deserialize_with = "id_from_any")]
    pub id: u64,
}

/// Reference to a label attached to a device.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelRef {
    #[serde(deserialize_with = "id_from_any")]
    pub id: u64,
}

/// Full remote device representation.
///
/// Only the fields the reconciler inspects structurally (id, site, plan,
/// labels) are typed; everything else the API returns is captured in
/// `attributes` and compared flat, by string-cast equality, against the
/// desired payload. This keeps the drift check order-independent without
/// committing to the full (and churning) device schema.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    #[serde(deserialize_with = "id_from_any")]
    pub id: u64,
    #[serde(default)]
    pub site: Option<ResourceRef>,
    #[serde(default)]
    pub plan: Option<ResourceRef>,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Device {
    /// The ids of the labels currently attached, in API return order.
    pub fn label_ids(&self) -> Vec<u64> {
        self.labels.iter().map(|l| l.id).collect()
    }
}

/// The `{ "device": … }` envelope used by the single-device endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DeviceWrapper {
    pub device: Device,
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::Device;

    #[test]
    fn device_ids_tolerate_strings_and_numbers() {
        let dev: Device = serde_json::from_value(json!({
            "id": "1042",
            "deviceName": "edge-1",
            "site": { "id": 7, "title": "LA1" },
            "plan": { "id": "12345" },
            "labels": [{ "id": 3 }, { "id": "9" }],
        }))
        .expect("device should parse");

        assert_eq!(dev.id, 1042);
        assert_eq!(dev.site.as_ref().map(|s| s.id), Some(7));
        assert_eq!(dev.plan.as_ref().map(|p| p.id), Some(12345));
        assert_eq!(dev.label_ids(), vec![3, 9]);
    }

    #[test]
    fn untyped_fields_land_in_attributes() {
        let dev: Device = serde_json::from_value(json!({
            "id": 1,
            "deviceName": "edge-1",
            "deviceSampleRate": "10",
        }))
        .expect("device should parse");

        assert_eq!(
            dev.attributes.get("deviceName").and_then(Value::as_str),
            Some("edge-1")
        );
        assert_eq!(
            dev.attributes.get("deviceSampleRate").and_then(Value::as_str),
            Some("10")
        );
    }
}
