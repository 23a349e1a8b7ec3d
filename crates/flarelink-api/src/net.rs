// Network service endpoints
//
// Topology, node, link, path-planner, and device resources under
// `/sdn/v2.0/net/`. Read operations return the decoded body; mutations
// return nothing and callers read back state afterwards if they need it.

use serde_json::Value;
use tracing::debug;

use crate::addr::{Segment, append_query};
use crate::client::SdnClient;
use crate::error::Error;
use crate::filter::NodeFilter;
use crate::models::{Cluster, Device, Link, Node, Path};

impl SdnClient {
    // ── Topology ─────────────────────────────────────────────────────

    /// List broadcast clusters.
    ///
    /// `GET /net/clusters`
    pub async fn get_clusters(&self) -> Result<Vec<Cluster>, Error> {
        let url = self.net_url(&[Segment::Literal("clusters")]);
        self.get(url).await
    }

    /// Get the broadcast tree for a cluster.
    ///
    /// `GET /net/clusters/{cluster_id}/tree`
    pub async fn get_cluster_broadcast_tree(&self, cluster_id: &str) -> Result<Value, Error> {
        let url = self.net_url(&[
            Segment::Literal("clusters"),
            Segment::Id(cluster_id),
            Segment::Literal("tree"),
        ]);
        self.get(url).await
    }

    /// List links discovered by the controller, optionally restricted to
    /// one datapath.
    ///
    /// `GET /net/links[?dpid=...]`
    pub async fn get_links(&self, dpid: Option<&str>) -> Result<Vec<Link>, Error> {
        let mut url = self.net_url(&[Segment::Literal("links")]);
        if let Some(dpid) = dpid {
            append_query(&mut url, &[("dpid", dpid.to_owned())]);
        }
        self.get(url).await
    }

    /// Get the shortest computed path between two datapaths.
    ///
    /// `GET /net/paths/forward?src_dpid=...&dst_dpid=...`
    pub async fn get_forward_path(&self, src_dpid: &str, dst_dpid: &str) -> Result<Path, Error> {
        let mut url = self.net_url(&[Segment::Literal("paths"), Segment::Literal("forward")]);
        append_query(
            &mut url,
            &[
                ("src_dpid", src_dpid.to_owned()),
                ("dst_dpid", dst_dpid.to_owned()),
            ],
        );
        self.get(url).await
    }

    // ── Nodes ────────────────────────────────────────────────────────

    /// List end hosts known to the controller, narrowed by `filter`.
    ///
    /// `GET /net/nodes[?...]` -- the emitted query string is the first
    /// combination of [`NodeFilter`] inputs the controller honors; an
    /// empty or unsupported combination lists every node.
    pub async fn get_nodes(&self, filter: &NodeFilter) -> Result<Vec<Node>, Error> {
        let mut url = self.net_url(&[Segment::Literal("nodes")]);
        append_query(&mut url, &filter.to_query_pairs());
        self.get(url).await
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// List all managed devices.
    ///
    /// `GET /net/devices`
    pub async fn get_devices(&self) -> Result<Vec<Device>, Error> {
        let url = self.net_url(&[Segment::Literal("devices")]);
        self.get(url).await
    }

    /// Get details for one device.
    ///
    /// `GET /net/devices/{device_id}`
    pub async fn get_device(&self, device_id: &str) -> Result<Device, Error> {
        let url = self.net_url(&[Segment::Literal("devices"), Segment::Id(device_id)]);
        self.get(url).await
    }

    /// Remove a device from the controller's inventory.
    ///
    /// `DELETE /net/devices/{device_id}`
    pub async fn delete_device(&self, device_id: &str) -> Result<(), Error> {
        let url = self.net_url(&[Segment::Literal("devices"), Segment::Id(device_id)]);
        debug!(device_id, "deleting device");
        self.delete(url).await
    }

    /// List the interfaces of a device. The controller only answers for
    /// devices that are currently online.
    ///
    /// `GET /net/devices/{device_id}/interfaces`
    pub async fn get_device_interfaces(&self, device_id: &str) -> Result<Vec<Value>, Error> {
        let url = self.net_url(&[
            Segment::Literal("devices"),
            Segment::Id(device_id),
            Segment::Literal("interfaces"),
        ]);
        self.get(url).await
    }

    /// Get the link-discovery VLAN configured on a device.
    ///
    /// `GET /net/devices/{device_id}/linkDiscoveryVlan`
    pub async fn get_link_discovery_vlan(&self, device_id: &str) -> Result<Value, Error> {
        let url = self.net_url(&[
            Segment::Literal("devices"),
            Segment::Id(device_id),
            Segment::Literal("linkDiscoveryVlan"),
        ]);
        self.get(url).await
    }

    /// Configure the link-discovery VLAN on a device.
    ///
    /// `POST /net/devices/{device_id}/linkDiscoveryVlan/{vlan_id}`
    pub async fn set_link_discovery_vlan(
        &self,
        device_id: &str,
        vlan_id: u16,
    ) -> Result<(), Error> {
        let vlan = vlan_id.to_string();
        let url = self.net_url(&[
            Segment::Literal("devices"),
            Segment::Id(device_id),
            Segment::Literal("linkDiscoveryVlan"),
            Segment::Id(&vlan),
        ]);
        debug!(device_id, vlan_id, "setting link discovery VLAN");
        self.post_bodyless(url).await
    }
}
