// Path diagnostics endpoints
//
// Observation posts and synthetic diagnostic packets under
// `/sdn/v2.0/diag/`. Observation posts are deleted by value (the DELETE
// carries the same body as the POST); packets are deleted by UID.

use serde_json::json;
use tracing::debug;

use crate::addr::{Segment, append_query};
use crate::client::SdnClient;
use crate::error::Error;
use crate::models::{DiagPacket, NextHop, Observation, Path};
use crate::payload::{Envelope, Payload};

impl SdnClient {
    // ── Observation posts ────────────────────────────────────────────

    /// List observation posts, optionally filtered by the packet they
    /// watch and/or the packet type.
    ///
    /// `GET /diag/observations[?packet_uid=...][&packet_type=...]`
    pub async fn get_observation_posts(
        &self,
        packet_uid: Option<&str>,
        packet_type: Option<&str>,
    ) -> Result<Vec<Observation>, Error> {
        let mut url = self.diag_url(&[Segment::Literal("observations")]);
        let mut pairs = Vec::new();
        if let Some(uid) = packet_uid {
            pairs.push(("packet_uid", uid.to_owned()));
        }
        if let Some(ptype) = packet_type {
            pairs.push(("packet_type", ptype.to_owned()));
        }
        append_query(&mut url, &pairs);
        self.get(url).await
    }

    /// Create an observation post.
    ///
    /// `POST /diag/observations` with `{"observation": {...}}`
    pub async fn create_observation_post(
        &self,
        observation: impl Into<Payload<Observation>>,
    ) -> Result<(), Error> {
        let url = self.diag_url(&[Segment::Literal("observations")]);
        let body = observation.into().into_body(Envelope::OBSERVATION)?;
        debug!("creating observation post");
        self.post(url, &body).await
    }

    /// Delete an observation post. Identified by value, not by UID.
    ///
    /// `DELETE /diag/observations` with `{"observation": {...}}`
    pub async fn delete_observation_post(
        &self,
        observation: impl Into<Payload<Observation>>,
    ) -> Result<(), Error> {
        let url = self.diag_url(&[Segment::Literal("observations")]);
        let body = observation.into().into_body(Envelope::OBSERVATION)?;
        debug!("deleting observation post");
        self.delete_with_body(url, &body).await
    }

    // ── Diagnostic packets ───────────────────────────────────────────

    /// List diagnostic packets, optionally filtered by type.
    ///
    /// `GET /diag/packets[?type=...]`
    pub async fn get_diag_packets(
        &self,
        packet_type: Option<&str>,
    ) -> Result<Vec<DiagPacket>, Error> {
        let mut url = self.diag_url(&[Segment::Literal("packets")]);
        if let Some(ptype) = packet_type {
            append_query(&mut url, &[("type", ptype.to_owned())]);
        }
        self.get(url).await
    }

    /// Create a diagnostic packet.
    ///
    /// `POST /diag/packets` with `{"packet": {...}}`
    pub async fn create_diag_packet(
        &self,
        packet: impl Into<Payload<DiagPacket>>,
    ) -> Result<(), Error> {
        let url = self.diag_url(&[Segment::Literal("packets")]);
        let body = packet.into().into_body(Envelope::PACKET)?;
        debug!("creating diagnostic packet");
        self.post(url, &body).await
    }

    /// Get one diagnostic packet by UID.
    ///
    /// `GET /diag/packets/{packet_uid}`
    pub async fn get_diag_packet(&self, packet_uid: &str) -> Result<DiagPacket, Error> {
        let url = self.diag_url(&[Segment::Literal("packets"), Segment::Id(packet_uid)]);
        self.get(url).await
    }

    /// Delete a diagnostic packet by UID.
    ///
    /// `DELETE /diag/packets/{packet_uid}`
    pub async fn delete_diag_packet(&self, packet_uid: &str) -> Result<(), Error> {
        let url = self.diag_url(&[Segment::Literal("packets"), Segment::Id(packet_uid)]);
        debug!(packet_uid, "deleting diagnostic packet");
        self.delete(url).await
    }

    /// Get the expected forwarding path of a diagnostic packet.
    ///
    /// `GET /diag/packets/{packet_uid}/path`
    pub async fn get_diag_packet_path(&self, packet_uid: &str) -> Result<Path, Error> {
        let url = self.diag_url(&[
            Segment::Literal("packets"),
            Segment::Id(packet_uid),
            Segment::Literal("path"),
        ]);
        self.get(url).await
    }

    /// Get next-hop information for a diagnostic packet at a datapath.
    ///
    /// `GET /diag/packets/{packet_uid}/nexthops?src_dpid=...`
    pub async fn get_diag_packet_next_hops(
        &self,
        packet_uid: &str,
        src_dpid: &str,
    ) -> Result<Vec<NextHop>, Error> {
        let mut url = self.diag_url(&[
            Segment::Literal("packets"),
            Segment::Id(packet_uid),
            Segment::Literal("nexthops"),
        ]);
        append_query(&mut url, &[("src_dpid", src_dpid.to_owned())]);
        self.get(url).await
    }

    /// Run a simulation action (`"resume"`, `"terminate"`, ...) on a
    /// diagnostic packet.
    ///
    /// `POST /diag/packets/{packet_uid}/action` with `{"simulation": "..."}`
    pub async fn set_diag_packet_action(
        &self,
        packet_uid: &str,
        action: &str,
    ) -> Result<(), Error> {
        let url = self.diag_url(&[
            Segment::Literal("packets"),
            Segment::Id(packet_uid),
            Segment::Literal("action"),
        ]);
        debug!(packet_uid, action, "running packet simulation action");
        self.post(url, &json!({ "simulation": action })).await
    }
}
