// Resource addressing: deterministic URL composition for controller
// endpoints.
//
// Identifier segments are percent-encoded down to the RFC 3986 unreserved
// set (`ALPHA / DIGIT / "-" / "." / "_" / "~"`), so DPIDs like
// `00:00:00:00:00:00:00:01` are safe inside a path segment. Query pairs
// keep their declared order.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

/// Everything outside the unreserved set gets escaped -- notably `:` and
/// `/`, both of which occur in datapath IDs.
const IDENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One path segment of a resource URL.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment<'a> {
    /// Fixed API vocabulary (`"datapaths"`, `"flows"`, ...), inserted verbatim.
    Literal(&'static str),
    /// Caller-supplied identifier, percent-encoded before insertion.
    Id(&'a str),
}

/// Percent-encode a caller-supplied identifier for use as a path segment.
pub(crate) fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, IDENT_SET).to_string()
}

/// Compose `base` joined with `segments`, in exactly the declared order.
pub(crate) fn resource_url(base: &Url, segments: &[Segment<'_>]) -> Url {
    let mut path = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            path.push('/');
        }
        match segment {
            Segment::Literal(s) => path.push_str(s),
            Segment::Id(raw) => path.push_str(&encode_segment(raw)),
        }
    }
    // The base always carries a trailing slash and the composed path holds
    // only unreserved or percent-encoded bytes, so joining cannot fail.
    base.join(&path).expect("path should be valid relative URL")
}

/// Append query pairs in declared order (form-urlencoded).
pub(crate) fn append_query(url: &mut Url, pairs: &[(&str, String)]) {
    if pairs.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use percent_encoding::percent_decode_str;
    use url::Url;

    use super::*;

    #[test]
    fn dpid_colons_are_escaped() {
        assert_eq!(
            encode_segment("00:00:00:00:00:00:00:01"),
            "00%3A00%3A00%3A00%3A00%3A00%3A00%3A01"
        );
    }

    #[test]
    fn encoding_round_trips() {
        for raw in ["00:00:00:00:00:00:00:01", "a/b c", "plain-id_1.0~x", "π"] {
            let encoded = encode_segment(raw);
            let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
            assert_eq!(decoded, raw);
        }
    }

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(encode_segment("abc-DEF_0.9~"), "abc-DEF_0.9~");
    }

    #[test]
    fn segments_compose_in_declared_order() {
        let base = Url::parse("https://ctl:8443/sdn/v2.0/of/").unwrap();
        let url = resource_url(
            &base,
            &[
                Segment::Literal("datapaths"),
                Segment::Id("00:00:00:00:00:00:00:01"),
                Segment::Literal("flows"),
            ],
        );
        assert_eq!(
            url.as_str(),
            "https://ctl:8443/sdn/v2.0/of/datapaths/00%3A00%3A00%3A00%3A00%3A00%3A00%3A01/flows"
        );
    }

    #[test]
    fn query_pairs_keep_declared_order() {
        let base = Url::parse("https://ctl:8443/sdn/v2.0/net/").unwrap();
        let mut url = resource_url(&base, &[Segment::Literal("nodes")]);
        append_query(&mut url, &[("vid", "10".into()), ("ip", "10.0.0.1".into())]);
        assert_eq!(url.query(), Some("vid=10&ip=10.0.0.1"));
    }

    #[test]
    fn empty_pairs_leave_no_query_string() {
        let base = Url::parse("https://ctl:8443/sdn/v2.0/net/").unwrap();
        let mut url = resource_url(&base, &[Segment::Literal("nodes")]);
        append_query(&mut url, &[]);
        assert_eq!(url.query(), None);
        assert_eq!(url.as_str(), "https://ctl:8443/sdn/v2.0/net/nodes");
    }
}
