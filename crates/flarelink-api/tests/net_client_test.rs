#![allow(clippy::unwrap_used)]
// Integration tests for the network service endpoints using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flarelink_api::{Error, NodeFilter, SdnClient};

// ── Helpers ─────────────────────────────────────────────────────────

const DPID: &str = "00:00:00:00:00:00:00:01";

async fn setup() -> (MockServer, SdnClient) {
    let server = MockServer::start().await;
    let client = SdnClient::from_reqwest(
        &format!("{}/sdn/v2.0", server.uri()),
        reqwest::Client::new(),
    )
    .unwrap();
    (server, client)
}

fn net_path(suffix: &str) -> String {
    format!("/sdn/v2.0/net/{suffix}")
}

// ── Topology tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_clusters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("clusters")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "uid": "cluster-1" },
            { "uid": "cluster-2" },
        ])))
        .mount(&server)
        .await;

    let clusters = client.get_clusters().await.unwrap();

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].uid.as_deref(), Some("cluster-1"));
}

#[tokio::test]
async fn test_get_cluster_broadcast_tree() {
    let (server, client) = setup().await;

    let tree = json!({ "root": DPID, "links": [] });

    Mock::given(method("GET"))
        .and(path(net_path("clusters/cluster-1/tree")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&tree))
        .mount(&server)
        .await;

    let got = client.get_cluster_broadcast_tree("cluster-1").await.unwrap();

    assert_eq!(got, tree);
}

#[tokio::test]
async fn test_list_links_restricted_to_one_datapath() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("links")))
        .and(query_param("dpid", DPID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "src_dpid": DPID,
            "src_port": 1,
            "dst_dpid": "00:00:00:00:00:00:00:02",
            "dst_port": 2,
        }])))
        .mount(&server)
        .await;

    let links = client.get_links(Some(DPID)).await.unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].src_dpid.as_deref(), Some(DPID));
    assert_eq!(links[0].dst_port, Some(2));
}

#[tokio::test]
async fn test_list_links_unfiltered_sends_no_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("links")))
        .and(query_param_is_missing("dpid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let links = client.get_links(None).await.unwrap();

    assert!(links.is_empty());
}

#[tokio::test]
async fn test_forward_path_between_datapaths() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("paths/forward")))
        .and(query_param("src_dpid", DPID))
        .and(query_param("dst_dpid", "00:00:00:00:00:00:00:03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cost": 2,
            "links": [{}, {}],
        })))
        .mount(&server)
        .await;

    let forward = client
        .get_forward_path(DPID, "00:00:00:00:00:00:00:03")
        .await
        .unwrap();

    assert_eq!(forward.cost, Some(json!(2)));
    assert_eq!(forward.links.len(), 2);
}

// ── Node filter tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_nodes_by_vid_and_ip() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("nodes")))
        .and(query_param("vid", "10"))
        .and(query_param("ip", "10.0.0.1"))
        .and(query_param_is_missing("mac"))
        .and(query_param_is_missing("dpid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "ip": "10.0.0.1",
            "mac": "aa:bb:cc:dd:ee:ff",
            "vid": 10,
        }])))
        .mount(&server)
        .await;

    let filter = NodeFilter::new().vid(10).ip("10.0.0.1");
    let nodes = client.get_nodes(&filter).await.unwrap();

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].mac.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
}

#[tokio::test]
async fn test_list_nodes_by_dpid_and_port() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("nodes")))
        .and(query_param("dpid", DPID))
        .and(query_param("port", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let filter = NodeFilter::new().dpid(DPID).port(3);
    client.get_nodes(&filter).await.unwrap();
}

#[tokio::test]
async fn test_list_nodes_unsupported_combination_degrades_to_unfiltered() {
    let (server, client) = setup().await;

    // port without dpid is not a combination the controller honors.
    Mock::given(method("GET"))
        .and(path(net_path("nodes")))
        .and(query_param_is_missing("port"))
        .and(query_param_is_missing("dpid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let filter = NodeFilter::new().port(3);
    client.get_nodes(&filter).await.unwrap();
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("devices")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "uid": "dev-1",
            "device_status": "Online",
            "serial": "SN-1234",
        }])))
        .mount(&server)
        .await;

    let devices = client.get_devices().await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].uid.as_deref(), Some("dev-1"));
    assert_eq!(devices[0].device_status.as_deref(), Some("Online"));
    // Undeclared fields stay available through the catch-all.
    assert_eq!(devices[0].extra.get("serial"), Some(&json!("SN-1234")));
}

#[tokio::test]
async fn test_delete_device() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(net_path("devices/dev-1")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_device("dev-1").await.unwrap();
}

#[tokio::test]
async fn test_set_link_discovery_vlan_posts_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(net_path("devices/dev-1/linkDiscoveryVlan/42")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.set_link_discovery_vlan("dev-1", 42).await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_in_band_error_record_in_listing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("clusters")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "error": "topology service unavailable" }])),
        )
        .mount(&server)
        .await;

    let result = client.get_clusters().await;

    match result {
        Err(Error::RemoteData { ref message }) => {
            assert_eq!(message, "topology service unavailable");
        }
        other => panic!("expected RemoteData error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_carries_controller_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(net_path("devices")))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "internal error" })),
        )
        .mount(&server)
        .await;

    let result = client.get_devices().await;

    match result {
        Err(Error::RemoteRequest {
            status,
            ref message,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected RemoteRequest error, got: {other:?}"),
    }
}
