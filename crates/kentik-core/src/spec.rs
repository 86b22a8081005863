//! Desired-state model for a single Kentik device.
//!
//! A [`DeviceSpec`] is constructed fresh per invocation from caller input
//! (a JSON or YAML document in the caller-facing camelCase schema) and is
//! never mutated by the reconciler. Field names and enum values mirror
//! the Kentik device schema.

use serde::{Deserialize, Deserializer, Serialize};

/// Desired configuration for one device, including its lifecycle state.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeviceSpec {
    /// Unique key within the remote account.
    pub device_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_description: Option<String>,

    #[serde(default)]
    pub device_subtype: DeviceSubtype,

    /// CDN attribution for DNS servers ("y"/"n"). Only meaningful for
    /// the host-nprobe-dns-www subtype family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_attr: Option<CdnAttr>,

    /// The rate at which the device samples flows.
    #[serde(default = "default_sample_rate")]
    pub device_sample_rate: u32,

    /// Plan reference by name, resolved to an id before any mutation.
    pub plan_name: String,

    /// Optional site reference by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// IP addresses from which the device sends flow.
    pub sending_ips: Vec<String>,

    #[serde(default)]
    pub minimize_snmp: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_snmp_ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_snmp_community: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_snmp_v3_conf: Option<SnmpV3Conf>,

    #[serde(default)]
    pub device_bgp_type: BgpType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_bgp_neighbor_ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_bgp_neighbor_ip6: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_bgp_neighbor_asn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_bgp_password: Option<String>,

    /// Device whose BGP table should be shared with this device
    /// (bgp type `other_device`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_bgp_device_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_bgp_flowspec: Option<bool>,

    /// NMS monitoring block (agent-driven SNMP or streaming telemetry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nms: Option<NmsConfig>,

    /// Label names to attach. Empty strings are skipped during
    /// resolution (an accommodation for empty-list padding in caller
    /// input), not treated as errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(default)]
    pub state: DesiredState,
}

fn default_sample_rate() -> u32 {
    1
}

/// Desired lifecycle state of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    #[default]
    Present,
    Absent,
}

/// Platform-defined device kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum DeviceSubtype {
    #[default]
    #[serde(rename = "router")]
    Router,
    #[serde(rename = "host-nprobe-dns-www")]
    HostNprobeDnsWww,
    #[serde(rename = "aws-subnet")]
    AwsSubnet,
    #[serde(rename = "azure_subnet")]
    AzureSubnet,
    #[serde(rename = "cisco_asa")]
    CiscoAsa,
    #[serde(rename = "gcp-subnet")]
    GcpSubnet,
    #[serde(rename = "istio_beta")]
    IstioBeta,
    #[serde(rename = "open_nms")]
    OpenNms,
    #[serde(rename = "paloalto")]
    Paloalto,
    #[serde(rename = "silverpeak")]
    Silverpeak,
}

/// CDN attribution flag for DNS servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CdnAttr {
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "n")]
    N,
}

/// BGP peering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BgpType {
    /// Generic IP/ASN mapping, no peering.
    #[default]
    None,
    /// Peer with the device itself.
    Device,
    /// Share the routing table of an existing peered device.
    OtherDevice,
}

// ── SNMP v3 ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SnmpV3Conf {
    pub user_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_protocol: Option<AuthProtocol>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_passphrase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_protocol: Option<PrivacyProtocol>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_passphrase: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AuthProtocol {
    NoAuth,
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA")]
    Sha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PrivacyProtocol {
    NoPriv,
    #[serde(rename = "DES")]
    Des,
    #[serde(rename = "AES")]
    Aes,
}

// ── NMS monitoring block ────────────────────────────────────────────

/// Configuration for platform-agent monitoring of the device.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NmsConfig {
    /// Id of the agent that monitors this device.
    pub agent_id: String,

    /// Local IP address of the device.
    pub ip_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snmp: Option<NmsSnmpConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub st: Option<NmsStConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NmsSnmpConfig {
    /// Name of the SNMP credentials in the credential vault.
    pub credential_name: String,

    /// SNMP port override. The caller-facing schema accepts a quoted
    /// number here; the wire schema requires a true integer, so it is
    /// normalized at parse time.
    #[serde(
        default,
        deserialize_with = "port_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// Streaming telemetry sub-config.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NmsStConfig {
    pub credential_name: String,

    #[serde(
        default,
        deserialize_with = "port_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Use SSL to connect to the device.
    pub secure: bool,
}

/// Deserialize a port that may arrive as a JSON number or numeric string.
fn port_from_any<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u16),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Str(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("non-numeric port: {s:?}"))),
    }
}
