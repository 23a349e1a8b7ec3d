// Query-parameter selection for filtered lookups.
//
// The node lookup accepts several overlapping filters but the controller
// only honors a handful of combinations. An explicit combination table
// picks the one that will be sent; anything else degrades to an
// unfiltered listing, exactly one combination at a time, in fixed order.

use crate::error::Error;

/// Filters for [`SdnClient::get_nodes`](crate::SdnClient::get_nodes).
///
/// Honored combinations: `vid`, `vid`+`ip`, `vid`+`mac`, `ip`, `dpid`,
/// `dpid`+`port`. Anything else (e.g. `mac` alone, `port` without `dpid`)
/// selects no filter and the controller returns every node.
#[derive(Debug, Clone, Default)]
pub struct NodeFilter {
    vid: Option<u16>,
    ip: Option<String>,
    mac: Option<String>,
    dpid: Option<String>,
    port: Option<u32>,
}

impl NodeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select nodes on the given VLAN.
    #[must_use]
    pub fn vid(mut self, vid: u16) -> Self {
        self.vid = Some(vid);
        self
    }

    /// Select the node holding the given IP address.
    #[must_use]
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Select the node with the given MAC address (combined with `vid`).
    #[must_use]
    pub fn mac(mut self, mac: impl Into<String>) -> Self {
        self.mac = Some(mac.into());
        self
    }

    /// Select nodes attached to the given datapath.
    #[must_use]
    pub fn dpid(mut self, dpid: impl Into<String>) -> Self {
        self.dpid = Some(dpid.into());
        self
    }

    /// Select nodes attached to the given port (combined with `dpid`).
    #[must_use]
    pub fn port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    /// Resolve this filter to the query pairs that will actually be sent.
    ///
    /// The rows are mutually exclusive; each input lands in exactly one.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        match (
            self.vid,
            self.ip.as_deref(),
            self.mac.as_deref(),
            self.dpid.as_deref(),
            self.port,
        ) {
            (Some(vid), None, None, _, _) => vec![("vid", vid.to_string())],
            (Some(vid), Some(ip), _, _, _) => {
                vec![("vid", vid.to_string()), ("ip", ip.to_owned())]
            }
            (Some(vid), None, Some(mac), _, _) => {
                vec![("vid", vid.to_string()), ("mac", mac.to_owned())]
            }
            (None, Some(ip), _, _, _) => vec![("ip", ip.to_owned())],
            (None, None, _, Some(dpid), None) => vec![("dpid", dpid.to_owned())],
            (None, None, _, Some(dpid), Some(port)) => {
                vec![("dpid", dpid.to_owned()), ("port", port.to_string())]
            }
            _ => Vec::new(),
        }
    }
}

/// Check that a port filter is a plain decimal number before it goes on
/// the wire. A malformed value would silently address the wrong resource,
/// so it is rejected up front instead.
pub(crate) fn validate_port_number(value: &str) -> Result<(), Error> {
    if value.is_empty() || value.bytes().any(|b| !b.is_ascii_digit()) {
        return Err(Error::InvalidFilter {
            param: "port_id",
            value: value.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rendered(filter: &NodeFilter) -> Vec<(&'static str, String)> {
        filter.to_query_pairs()
    }

    #[test]
    fn vid_alone() {
        let pairs = rendered(&NodeFilter::new().vid(10));
        assert_eq!(pairs, vec![("vid", "10".to_owned())]);
    }

    #[test]
    fn vid_and_ip() {
        let pairs = rendered(&NodeFilter::new().vid(10).ip("10.0.0.1"));
        assert_eq!(
            pairs,
            vec![("vid", "10".to_owned()), ("ip", "10.0.0.1".to_owned())]
        );
    }

    #[test]
    fn vid_and_mac() {
        let pairs = rendered(&NodeFilter::new().vid(10).mac("aa:bb:cc:dd:ee:ff"));
        assert_eq!(
            pairs,
            vec![
                ("vid", "10".to_owned()),
                ("mac", "aa:bb:cc:dd:ee:ff".to_owned())
            ]
        );
    }

    #[test]
    fn ip_alone() {
        let pairs = rendered(&NodeFilter::new().ip("10.0.0.1"));
        assert_eq!(pairs, vec![("ip", "10.0.0.1".to_owned())]);
    }

    #[test]
    fn dpid_alone() {
        let pairs = rendered(&NodeFilter::new().dpid("00:00:00:00:00:00:00:01"));
        assert_eq!(
            pairs,
            vec![("dpid", "00:00:00:00:00:00:00:01".to_owned())]
        );
    }

    #[test]
    fn dpid_and_port() {
        let pairs = rendered(&NodeFilter::new().dpid("00:00:00:00:00:00:00:01").port(3));
        assert_eq!(
            pairs,
            vec![
                ("dpid", "00:00:00:00:00:00:00:01".to_owned()),
                ("port", "3".to_owned())
            ]
        );
    }

    #[test]
    fn empty_filter_selects_nothing() {
        assert!(rendered(&NodeFilter::new()).is_empty());
    }

    #[test]
    fn unsupported_combinations_select_nothing() {
        // mac needs vid; port needs dpid.
        assert!(rendered(&NodeFilter::new().mac("aa:bb:cc:dd:ee:ff")).is_empty());
        assert!(rendered(&NodeFilter::new().port(3)).is_empty());
    }

    #[test]
    fn vid_and_ip_wins_over_mac() {
        let pairs = rendered(
            &NodeFilter::new()
                .vid(10)
                .ip("10.0.0.1")
                .mac("aa:bb:cc:dd:ee:ff"),
        );
        assert_eq!(
            pairs,
            vec![("vid", "10".to_owned()), ("ip", "10.0.0.1".to_owned())]
        );
    }

    #[test]
    fn port_numbers_must_be_decimal() {
        assert!(validate_port_number("3").is_ok());
        assert!(validate_port_number("65535").is_ok());

        for bad in ["", "3a", "-1", "0x10", " 3"] {
            let err = validate_port_number(bad).unwrap_err();
            assert!(
                matches!(&err, Error::InvalidFilter { param: "port_id", value } if value == bad),
                "expected InvalidFilter for {bad:?}, got {err:?}"
            );
        }
    }
}
