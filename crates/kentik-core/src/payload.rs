//! Wire payload construction.
//!
//! Builds the `{ "device": … }` body for the create/update endpoints
//! from a typed [`DeviceSpec`] plus pre-resolved plan/site ids. The
//! builder never mutates the spec, never emits credentials or lifecycle
//! metadata, and omits unset optional fields entirely — the remote API
//! distinguishes "not sent" from "sent as null".

use serde::Serialize;
use serde_json::{Map, Value};

use crate::spec::{BgpType, CdnAttr, DeviceSpec, DeviceSubtype, NmsConfig, SnmpV3Conf};

/// Device attributes as the mutating endpoints expect them.
///
/// `siteName`/`planName` from the spec appear here only as the resolved
/// `siteId`/`planId`; labels, region, and state never appear at all
/// (labels ride a separate endpoint, the rest is not a device attribute).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireDevice<'a> {
    device_name: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_description: Option<&'a str>,

    device_subtype: DeviceSubtype,

    #[serde(skip_serializing_if = "Option::is_none")]
    cdn_attr: Option<CdnAttr>,

    device_sample_rate: u32,

    plan_id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    site_id: Option<u64>,

    sending_ips: &'a [String],

    minimize_snmp: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_snmp_ip: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_snmp_community: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_snmp_v3_conf: Option<&'a SnmpV3Conf>,

    device_bgp_type: BgpType,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_bgp_neighbor_ip: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_bgp_neighbor_ip6: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_bgp_neighbor_asn: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_bgp_password: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    use_bgp_device_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    device_bgp_flowspec: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    nms: Option<&'a NmsConfig>,
}

/// Build the wire payload for a device from its spec and resolved ids.
///
/// The NMS SNMP port is already an integer on [`DeviceSpec`] (normalized
/// at parse time), so the emitted payload always carries it as a number.
pub fn build_payload(spec: &DeviceSpec, plan_id: u64, site_id: Option<u64>) -> Map<String, Value> {
    let wire = WireDevice {
        device_name: &spec.device_name,
        device_description: spec.device_description.as_deref(),
        device_subtype: spec.device_subtype,
        cdn_attr: spec.cdn_attr,
        device_sample_rate: spec.device_sample_rate,
        plan_id,
        site_id,
        sending_ips: &spec.sending_ips,
        minimize_snmp: spec.minimize_snmp,
        device_snmp_ip: spec.device_snmp_ip.as_deref(),
        device_snmp_community: spec.device_snmp_community.as_deref(),
        device_snmp_v3_conf: spec.device_snmp_v3_conf.as_ref(),
        device_bgp_type: spec.device_bgp_type,
        device_bgp_neighbor_ip: spec.device_bgp_neighbor_ip.as_deref(),
        device_bgp_neighbor_ip6: spec.device_bgp_neighbor_ip6.as_deref(),
        device_bgp_neighbor_asn: spec.device_bgp_neighbor_asn.as_deref(),
        device_bgp_password: spec.device_bgp_password.as_deref(),
        use_bgp_device_id: spec.use_bgp_device_id,
        device_bgp_flowspec: spec.device_bgp_flowspec,
        nms: spec.nms.as_ref(),
    };

    // WireDevice serializes to an object by construction.
    if let Ok(Value::Object(map)) = serde_json::to_value(&wire) {
        map
    } else {
        Map::new()
    }
}
