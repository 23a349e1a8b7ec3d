// OpenFlow service endpoints
//
// Datapaths and their flows, groups, meters, ports, MAC groups, and
// statistics under `/sdn/v2.0/of/`. Flow mutations accept a single flow
// or a batch; group and meter bodies carry the protocol-version stamp.

use serde_json::{Value, json};
use tracing::debug;

use crate::addr::{Segment, append_query};
use crate::client::SdnClient;
use crate::error::Error;
use crate::filter::validate_port_number;
use crate::models::{
    Datapath, Flow, FlowClass, Group, GroupFeatures, GroupStats, MacGroup, Meter, MeterFeatures,
    MeterStats, Port, PortAction, PortStats,
};
use crate::payload::{Envelope, Payload};

/// Which MAC-group table a datapath operation addresses.
///
/// The controller exposes source and destination MAC groups as parallel
/// resource trees (`srcmacgrps` / `dstmacgrps`) with identical shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacGroupScope {
    Source,
    Destination,
}

impl MacGroupScope {
    fn segment(self) -> &'static str {
        match self {
            Self::Source => "srcmacgrps",
            Self::Destination => "dstmacgrps",
        }
    }
}

impl SdnClient {
    // ── Flow classes ─────────────────────────────────────────────────

    /// List the flow classes registered on the controller.
    ///
    /// `GET /of/classes`
    pub async fn get_flow_classes(&self) -> Result<Vec<FlowClass>, Error> {
        let url = self.of_url(&[Segment::Literal("classes")]);
        self.get(url).await
    }

    /// Get one registered flow class.
    ///
    /// `GET /of/classes/{class_id}`
    pub async fn get_flow_class(&self, class_id: &str) -> Result<FlowClass, Error> {
        let url = self.of_url(&[Segment::Literal("classes"), Segment::Id(class_id)]);
        self.get(url).await
    }

    // ── Datapaths ────────────────────────────────────────────────────

    /// List the datapaths managed by this controller.
    ///
    /// `GET /of/datapaths`
    pub async fn get_datapaths(&self) -> Result<Vec<Datapath>, Error> {
        let url = self.of_url(&[Segment::Literal("datapaths")]);
        self.get(url).await
    }

    /// Get details for one datapath.
    ///
    /// `GET /of/datapaths/{dpid}`
    pub async fn get_datapath(&self, dpid: &str) -> Result<Datapath, Error> {
        let url = self.of_url(&[Segment::Literal("datapaths"), Segment::Id(dpid)]);
        self.get(url).await
    }

    /// Get the meter capabilities of a datapath.
    ///
    /// `GET /of/datapaths/{dpid}/features/meter`
    pub async fn get_meter_features(&self, dpid: &str) -> Result<MeterFeatures, Error> {
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("features"),
            Segment::Literal("meter"),
        ]);
        self.get(url).await
    }

    /// Get the group capabilities of a datapath.
    ///
    /// `GET /of/datapaths/{dpid}/features/group`
    pub async fn get_group_features(&self, dpid: &str) -> Result<GroupFeatures, Error> {
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("features"),
            Segment::Literal("group"),
        ]);
        self.get(url).await
    }

    // ── Flows ────────────────────────────────────────────────────────

    /// List the flows installed on a datapath, optionally restricted to
    /// one flow table.
    ///
    /// `GET /of/datapaths/{dpid}/flows[?table_id=...]`
    pub async fn get_flows(&self, dpid: &str, table_id: Option<u8>) -> Result<Vec<Flow>, Error> {
        let mut url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("flows"),
        ]);
        if let Some(table_id) = table_id {
            append_query(&mut url, &[("table_id", table_id.to_string())]);
        }
        self.get(url).await
    }

    /// Install a flow or a batch of flows on a datapath.
    ///
    /// `POST /of/datapaths/{dpid}/flows` with `{"flow": {...}}` or
    /// `{"flows": [...]}` depending on the input shape.
    pub async fn add_flows(
        &self,
        dpid: &str,
        flows: impl Into<Payload<Flow>>,
    ) -> Result<(), Error> {
        let url = self.flows_url(dpid);
        let body = flows.into().into_body(Envelope::FLOW)?;
        debug!(dpid, "adding flows");
        self.post(url, &body).await
    }

    /// Modify a flow or a batch of flows on a datapath.
    ///
    /// `PUT /of/datapaths/{dpid}/flows`
    pub async fn update_flows(
        &self,
        dpid: &str,
        flows: impl Into<Payload<Flow>>,
    ) -> Result<(), Error> {
        let url = self.flows_url(dpid);
        let body = flows.into().into_body(Envelope::FLOW)?;
        debug!(dpid, "updating flows");
        self.put(url, &body).await
    }

    /// Remove a flow or a batch of flows from a datapath. Flows are
    /// deleted by value.
    ///
    /// `DELETE /of/datapaths/{dpid}/flows`
    pub async fn delete_flows(
        &self,
        dpid: &str,
        flows: impl Into<Payload<Flow>>,
    ) -> Result<(), Error> {
        let url = self.flows_url(dpid);
        let body = flows.into().into_body(Envelope::FLOW)?;
        debug!(dpid, "deleting flows");
        self.delete_with_body(url, &body).await
    }

    fn flows_url(&self, dpid: &str) -> url::Url {
        self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("flows"),
        ])
    }

    // ── Groups ───────────────────────────────────────────────────────

    /// List the groups configured on a datapath.
    ///
    /// `GET /of/datapaths/{dpid}/groups`
    pub async fn get_groups(&self, dpid: &str) -> Result<Vec<Group>, Error> {
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("groups"),
        ]);
        self.get(url).await
    }

    /// Create a group on a datapath.
    ///
    /// `POST /of/datapaths/{dpid}/groups` with
    /// `{"version": "1.3.0", "group": {...}}`
    pub async fn add_group(
        &self,
        dpid: &str,
        group: impl Into<Payload<Group>>,
    ) -> Result<(), Error> {
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("groups"),
        ]);
        let body = group.into().into_body(Envelope::GROUP)?;
        debug!(dpid, "adding group");
        self.post(url, &body).await
    }

    /// Get one group.
    ///
    /// `GET /of/datapaths/{dpid}/groups/{group_id}`
    pub async fn get_group(&self, dpid: &str, group_id: u32) -> Result<Group, Error> {
        let id = group_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("groups"),
            Segment::Id(&id),
        ]);
        self.get(url).await
    }

    /// Modify a group.
    ///
    /// `PUT /of/datapaths/{dpid}/groups/{group_id}` with
    /// `{"version": "1.3.0", "group": {...}}`
    pub async fn update_group(
        &self,
        dpid: &str,
        group_id: u32,
        group: impl Into<Payload<Group>>,
    ) -> Result<(), Error> {
        let id = group_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("groups"),
            Segment::Id(&id),
        ]);
        let body = group.into().into_body(Envelope::GROUP)?;
        debug!(dpid, group_id, "updating group");
        self.put(url, &body).await
    }

    /// Remove a group.
    ///
    /// `DELETE /of/datapaths/{dpid}/groups/{group_id}`
    pub async fn delete_group(&self, dpid: &str, group_id: u32) -> Result<(), Error> {
        let id = group_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("groups"),
            Segment::Id(&id),
        ]);
        debug!(dpid, group_id, "deleting group");
        self.delete(url).await
    }

    // ── Meters ───────────────────────────────────────────────────────

    /// List the meters configured on a datapath.
    ///
    /// `GET /of/datapaths/{dpid}/meters`
    pub async fn get_meters(&self, dpid: &str) -> Result<Vec<Meter>, Error> {
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("meters"),
        ]);
        self.get(url).await
    }

    /// Create a meter on a datapath.
    ///
    /// `POST /of/datapaths/{dpid}/meters` with
    /// `{"version": "1.3.0", "meter": {...}}`
    pub async fn add_meter(
        &self,
        dpid: &str,
        meter: impl Into<Payload<Meter>>,
    ) -> Result<(), Error> {
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("meters"),
        ]);
        let body = meter.into().into_body(Envelope::METER)?;
        debug!(dpid, "adding meter");
        self.post(url, &body).await
    }

    /// Get one meter.
    ///
    /// `GET /of/datapaths/{dpid}/meters/{meter_id}`
    pub async fn get_meter(&self, dpid: &str, meter_id: u32) -> Result<Meter, Error> {
        let id = meter_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("meters"),
            Segment::Id(&id),
        ]);
        self.get(url).await
    }

    /// Modify a meter.
    ///
    /// `PUT /of/datapaths/{dpid}/meters/{meter_id}` with
    /// `{"version": "1.3.0", "meter": {...}}`
    pub async fn update_meter(
        &self,
        dpid: &str,
        meter_id: u32,
        meter: impl Into<Payload<Meter>>,
    ) -> Result<(), Error> {
        let id = meter_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("meters"),
            Segment::Id(&id),
        ]);
        let body = meter.into().into_body(Envelope::METER)?;
        debug!(dpid, meter_id, "updating meter");
        self.put(url, &body).await
    }

    /// Remove a meter.
    ///
    /// `DELETE /of/datapaths/{dpid}/meters/{meter_id}`
    pub async fn delete_meter(&self, dpid: &str, meter_id: u32) -> Result<(), Error> {
        let id = meter_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("meters"),
            Segment::Id(&id),
        ]);
        debug!(dpid, meter_id, "deleting meter");
        self.delete(url).await
    }

    // ── Ports ────────────────────────────────────────────────────────

    /// List the ports of a datapath.
    ///
    /// `GET /of/datapaths/{dpid}/ports`
    pub async fn get_ports(&self, dpid: &str) -> Result<Vec<Port>, Error> {
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("ports"),
        ]);
        self.get(url).await
    }

    /// Get one port.
    ///
    /// `GET /of/datapaths/{dpid}/ports/{port_id}`
    pub async fn get_port(&self, dpid: &str, port_id: u32) -> Result<Port, Error> {
        let id = port_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("ports"),
            Segment::Id(&id),
        ]);
        self.get(url).await
    }

    /// Enable or disable a physical port. The controller applies the
    /// change asynchronously; read the port back to observe it.
    ///
    /// `POST /of/datapaths/{dpid}/ports/{port_id}/action` with
    /// `{"action": "enable" | "disable"}`
    pub async fn set_port_state(
        &self,
        dpid: &str,
        port_id: u32,
        action: PortAction,
    ) -> Result<(), Error> {
        let id = port_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal("ports"),
            Segment::Id(&id),
            Segment::Literal("action"),
        ]);
        debug!(dpid, port_id, ?action, "setting port state");
        self.post(url, &json!({ "action": action })).await
    }

    // ── Controller internals ─────────────────────────────────────────

    /// List the packet listeners registered with the controller's
    /// sequencer.
    ///
    /// `GET /of/sequencer`
    pub async fn get_sequencer(&self) -> Result<Vec<Value>, Error> {
        let url = self.of_url(&[Segment::Literal("sequencer")]);
        self.get(url).await
    }

    /// Get statistics for every controller in this controller's team.
    ///
    /// `GET /of/stats`
    pub async fn get_controller_stats(&self) -> Result<Value, Error> {
        let url = self.of_url(&[Segment::Literal("stats")]);
        self.get(url).await
    }

    // ── Statistics ───────────────────────────────────────────────────

    /// List port counters for a datapath, or for one of its ports.
    ///
    /// `GET /of/stats/ports?dpid=...[&port_id=...]`
    ///
    /// A `port_id` that is not a plain decimal number is rejected with
    /// [`Error::InvalidFilter`] before any request is sent.
    pub async fn get_port_stats(
        &self,
        dpid: &str,
        port_id: Option<&str>,
    ) -> Result<Vec<PortStats>, Error> {
        let mut pairs = vec![("dpid", dpid.to_owned())];
        if let Some(port_id) = port_id {
            validate_port_number(port_id)?;
            pairs.push(("port_id", port_id.to_owned()));
        }
        let mut url = self.of_url(&[Segment::Literal("stats"), Segment::Literal("ports")]);
        append_query(&mut url, &pairs);
        self.get(url).await
    }

    /// List group counters for a datapath, or for one of its groups.
    ///
    /// `GET /of/stats/groups?dpid=...[&group_id=...]`
    pub async fn get_group_stats(
        &self,
        dpid: &str,
        group_id: Option<u32>,
    ) -> Result<Vec<GroupStats>, Error> {
        let mut pairs = vec![("dpid", dpid.to_owned())];
        if let Some(group_id) = group_id {
            pairs.push(("group_id", group_id.to_string()));
        }
        let mut url = self.of_url(&[Segment::Literal("stats"), Segment::Literal("groups")]);
        append_query(&mut url, &pairs);
        self.get(url).await
    }

    /// List counters for one meter.
    ///
    /// `GET /of/stats/meters?dpid=...&meter=...`
    pub async fn get_meter_stats(
        &self,
        dpid: &str,
        meter_id: u32,
    ) -> Result<Vec<MeterStats>, Error> {
        let mut url = self.of_url(&[Segment::Literal("stats"), Segment::Literal("meters")]);
        append_query(
            &mut url,
            &[("dpid", dpid.to_owned()), ("meter", meter_id.to_string())],
        );
        self.get(url).await
    }

    // ── MAC groups ───────────────────────────────────────────────────
    //
    // Not supported by every switch model; unsupported switches answer
    // with an empty result rather than an error.

    /// List the MAC groups configured on a datapath.
    ///
    /// `GET /of/datapaths/{dpid}/{srcmacgrps|dstmacgrps}`
    pub async fn get_mac_groups(
        &self,
        dpid: &str,
        scope: MacGroupScope,
    ) -> Result<Vec<MacGroup>, Error> {
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal(scope.segment()),
        ]);
        self.get(url).await
    }

    /// Remove every MAC address from a MAC group.
    ///
    /// `DELETE /of/datapaths/{dpid}/{srcmacgrps|dstmacgrps}/{group_id}`
    pub async fn delete_mac_group(
        &self,
        dpid: &str,
        scope: MacGroupScope,
        group_id: u32,
    ) -> Result<(), Error> {
        let id = group_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal(scope.segment()),
            Segment::Id(&id),
        ]);
        debug!(dpid, group_id, ?scope, "deleting MAC group");
        self.delete(url).await
    }

    /// List the MAC addresses in a MAC group.
    ///
    /// `GET /of/datapaths/{dpid}/{srcmacgrps|dstmacgrps}/{group_id}/macs`
    pub async fn get_mac_group_macs(
        &self,
        dpid: &str,
        scope: MacGroupScope,
        group_id: u32,
    ) -> Result<Vec<String>, Error> {
        let id = group_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal(scope.segment()),
            Segment::Id(&id),
            Segment::Literal("macs"),
        ]);
        self.get(url).await
    }

    /// Add MAC addresses to a MAC group.
    ///
    /// `POST /of/datapaths/{dpid}/{srcmacgrps|dstmacgrps}/{group_id}/macs`
    /// with `{"macs": [...]}`
    pub async fn add_mac_group_macs(
        &self,
        dpid: &str,
        scope: MacGroupScope,
        group_id: u32,
        macs: &[&str],
    ) -> Result<(), Error> {
        let id = group_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal(scope.segment()),
            Segment::Id(&id),
            Segment::Literal("macs"),
        ]);
        debug!(dpid, group_id, ?scope, "adding MAC group members");
        self.post(url, &json!({ "macs": macs })).await
    }

    /// Remove specific MAC addresses from a MAC group.
    ///
    /// `DELETE /of/datapaths/{dpid}/{srcmacgrps|dstmacgrps}/{group_id}/macs`
    /// with `{"macs": [...]}`
    pub async fn delete_mac_group_macs(
        &self,
        dpid: &str,
        scope: MacGroupScope,
        group_id: u32,
        macs: &[&str],
    ) -> Result<(), Error> {
        let id = group_id.to_string();
        let url = self.of_url(&[
            Segment::Literal("datapaths"),
            Segment::Id(dpid),
            Segment::Literal(scope.segment()),
            Segment::Id(&id),
            Segment::Literal("macs"),
        ]);
        debug!(dpid, group_id, ?scope, "removing MAC group members");
        self.delete_with_body(url, &json!({ "macs": macs })).await
    }
}
