// Wire types for the VAN SDN controller's REST resources.
//
// Outbound types (Flow, Group, Meter, ...) serialize minimally: unset
// optionals are omitted so the controller sees only what the caller set.
// Read types use `#[serde(default)]` liberally because the controller is
// inconsistent about field presence across releases, and every struct
// carries a `flatten` catch-all for undocumented fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── OpenFlow: flows ──────────────────────────────────────────────────

/// A flow table entry, as sent to and read from
/// `/of/datapaths/{dpid}/flows`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Flow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_timeout: Option<u16>,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_fields: Option<Match>,
    /// Instruction list (`apply_actions`, `write_actions`, ...).
    /// Deeply nested and switch-dependent -- kept as opaque JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_id: Option<u32>,
    /// Port number or logical port name (e.g. `"CONTROLLER"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_port: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_group: Option<u32>,
    // Counters, populated on reads only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_count: Option<u64>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Match criteria inside a [`Flow`].
///
/// Field names follow the controller's OXM vocabulary
/// (`eth_type: "ipv4"`, `ipv4_src: "10.0.0.20"`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_dst: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_vid: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_pcp: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_proto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_dst: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_dst: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_src: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_dst: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_src: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_dst: Option<u16>,
    /// Any other OXM field, passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── OpenFlow: groups ─────────────────────────────────────────────────

/// A group table entry. `group_type` is one of `all`, `select`,
/// `indirect`, `ff`; `command` is `add`, `modify`, or `delete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Always serialized, even when empty -- the controller requires the
    /// key to be present on writes.
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One bucket inside a [`Group`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Group to watch for liveness, or `"ANY"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_group: Option<String>,
    /// Port to watch for liveness, or `"ANY"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_port: Option<String>,
    /// Action list (e.g. `[{"output": 0}]`) -- kept as opaque JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── OpenFlow: meters ─────────────────────────────────────────────────

/// A meter entry. `command` is `add`, `modify`, or `delete`; `flags`
/// holds rate units and modes (`kbps`, `pktps`, `burst`, `stats`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub bands: Vec<MeterBand>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One band inside a [`Meter`]. `mtype` is `drop` or `dscp_remark`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeterBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burst_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtype: Option<String>,
    /// Only meaningful for `dscp_remark` bands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prec_level: Option<u8>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── OpenFlow: datapaths & ports ──────────────────────────────────────

/// A datapath managed by the controller, from `/of/datapaths`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datapath {
    pub dpid: String,
    #[serde(default)]
    pub negotiated_version: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub num_buffers: Option<u32>,
    #[serde(default)]
    pub num_tables: Option<u32>,
    #[serde(default)]
    pub device_ip: Option<String>,
    #[serde(default)]
    pub device_port: Option<u32>,
    /// Capability flags -- kept as opaque JSON.
    #[serde(default)]
    pub capabilities: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Meter capabilities of a datapath, from
/// `/of/datapaths/{dpid}/features/meter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterFeatures {
    #[serde(default)]
    pub max_meters: Option<u32>,
    #[serde(default)]
    pub max_bands: Option<u32>,
    #[serde(default)]
    pub max_color: Option<u32>,
    /// Supported band types -- kept as opaque JSON.
    #[serde(default)]
    pub types: Option<Value>,
    /// Capability flags -- kept as opaque JSON.
    #[serde(default)]
    pub capabilities: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Group capabilities of a datapath, from
/// `/of/datapaths/{dpid}/features/group`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFeatures {
    /// Supported group types -- kept as opaque JSON.
    #[serde(default)]
    pub types: Option<Value>,
    /// Capability flags -- kept as opaque JSON.
    #[serde(default)]
    pub capabilities: Option<Value>,
    /// Per-type group-count limits -- kept as opaque JSON.
    #[serde(default)]
    pub max_groups: Option<Value>,
    /// Per-type supported action sets -- kept as opaque JSON.
    #[serde(default)]
    pub actions: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A switch port, from `/of/datapaths/{dpid}/ports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    /// Config flag list -- kept as opaque JSON.
    #[serde(default)]
    pub config: Option<Value>,
    /// State flag list -- kept as opaque JSON.
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Action accepted by `/of/datapaths/{dpid}/ports/{id}/action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortAction {
    Enable,
    Disable,
}

/// A registered flow class, from `/of/classes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowClass {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A source or destination MAC group, from
/// `/of/datapaths/{dpid}/{src|dst}macgrps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacGroup {
    #[serde(default)]
    pub group_id: Option<u32>,
    #[serde(default)]
    pub macs: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── OpenFlow: statistics ─────────────────────────────────────────────

/// Per-port counters, from `/of/stats/ports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortStats {
    #[serde(default)]
    pub dpid: Option<String>,
    #[serde(default)]
    pub port_id: Option<u32>,
    #[serde(default)]
    pub rx_packets: Option<u64>,
    #[serde(default)]
    pub tx_packets: Option<u64>,
    #[serde(default)]
    pub rx_bytes: Option<u64>,
    #[serde(default)]
    pub tx_bytes: Option<u64>,
    #[serde(default)]
    pub rx_dropped: Option<u64>,
    #[serde(default)]
    pub tx_dropped: Option<u64>,
    #[serde(default)]
    pub rx_errors: Option<u64>,
    #[serde(default)]
    pub tx_errors: Option<u64>,
    #[serde(default)]
    pub duration_sec: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Per-group counters, from `/of/stats/groups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStats {
    #[serde(default)]
    pub group_id: Option<u32>,
    #[serde(default)]
    pub ref_count: Option<u64>,
    #[serde(default)]
    pub packet_count: Option<u64>,
    #[serde(default)]
    pub byte_count: Option<u64>,
    #[serde(default)]
    pub duration_sec: Option<u64>,
    #[serde(default)]
    pub bucket_stats: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Per-meter counters, from `/of/stats/meters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterStats {
    #[serde(default)]
    pub meter_id: Option<u32>,
    #[serde(default)]
    pub flow_count: Option<u64>,
    #[serde(default)]
    pub packet_in_count: Option<u64>,
    #[serde(default)]
    pub byte_in_count: Option<u64>,
    #[serde(default)]
    pub duration_sec: Option<u64>,
    #[serde(default)]
    pub band_stats: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Network service: topology ────────────────────────────────────────

/// A broadcast cluster, from `/net/clusters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A discovered link, from `/net/links`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub src_dpid: Option<String>,
    #[serde(default)]
    pub src_port: Option<u32>,
    #[serde(default)]
    pub dst_dpid: Option<String>,
    #[serde(default)]
    pub dst_port: Option<u32>,
    #[serde(default)]
    pub info: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A computed path, from `/net/paths/forward`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    pub cost: Option<Value>,
    #[serde(default)]
    pub links: Vec<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Next hop for a diagnostic packet, from
/// `/diag/packets/{uid}/nexthops`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextHop {
    #[serde(default)]
    pub dpid: Option<String>,
    #[serde(default)]
    pub out_port: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// An end host discovered by the controller, from `/net/nodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub vid: Option<u16>,
    #[serde(default)]
    pub dpid: Option<String>,
    #[serde(default)]
    pub port: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A managed device, from `/net/devices`. The device API is loose about
/// which fields it returns, so everything is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub uid: Option<String>,
    /// Known values: `Online`, `Offline`.
    #[serde(default)]
    pub device_status: Option<String>,
    #[serde(default)]
    pub uris: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Diagnostics service ──────────────────────────────────────────────

/// An observation post for packet diagnostics, sent to and read from
/// `/diag/observations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A diagnostic packet, sent to and read from `/diag/packets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagPacket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub packet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_port: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
