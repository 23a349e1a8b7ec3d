// Request-body assembly for mutating operations.
//
// The controller wants one wrapper object per request: a plural key over
// an array (`{"flows": [..]}`) or a singular key over an object
// (`{"flow": {..}}`), with group and meter bodies additionally stamped
// with the OpenFlow protocol version. Callers hand over a typed value, a
// Vec of them, or a raw JSON mapping; everything else is rejected before
// any bytes hit the network.

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// OpenFlow protocol version stamped into group and meter bodies.
pub const PROTOCOL_VERSION: &str = "1.3.0";

/// A request body in one of the three shapes the controller accepts.
///
/// Mutating endpoints take `impl Into<Payload<T>>`, so a plain `T`, a
/// `Vec<T>`, or [`Payload::raw`] JSON all work at the call site:
///
/// ```no_run
/// # use flarelink_api::{Payload, models::Flow};
/// # fn take(_: impl Into<Payload<Flow>>) {}
/// take(Flow::default());
/// take(vec![Flow::default(), Flow::default()]);
/// take(Payload::raw(serde_json::json!({ "priority": 30000 })));
/// ```
#[derive(Debug, Clone)]
pub enum Payload<T> {
    /// A single typed value, wrapped under the singular key.
    One(T),
    /// A batch of typed values, wrapped under the plural key.
    Many(Vec<T>),
    /// A caller-assembled JSON mapping, passed through unchanged under
    /// the singular key.
    Raw(Value),
}

impl<T> Payload<T> {
    /// A raw JSON body. Must serialize to a mapping; anything else is
    /// rejected when the request body is assembled.
    pub fn raw(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl<T> From<T> for Payload<T> {
    fn from(item: T) -> Self {
        Self::One(item)
    }
}

impl<T> From<Vec<T>> for Payload<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

/// Wire envelope for one resource kind: which keys wrap the body and
/// whether the protocol version is stamped alongside.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Envelope {
    pub(crate) resource: &'static str,
    pub(crate) singular: &'static str,
    pub(crate) plural: &'static str,
    pub(crate) versioned: bool,
}

impl Envelope {
    pub(crate) const FLOW: Self = Self {
        resource: "flow",
        singular: "flow",
        plural: "flows",
        versioned: false,
    };
    pub(crate) const GROUP: Self = Self {
        resource: "group",
        singular: "group",
        plural: "groups",
        versioned: true,
    };
    pub(crate) const METER: Self = Self {
        resource: "meter",
        singular: "meter",
        plural: "meters",
        versioned: true,
    };
    pub(crate) const OBSERVATION: Self = Self {
        resource: "observation",
        singular: "observation",
        plural: "observations",
        versioned: false,
    };
    pub(crate) const PACKET: Self = Self {
        resource: "packet",
        singular: "packet",
        plural: "packets",
        versioned: false,
    };
}

impl<T: Serialize> Payload<T> {
    /// Assemble the wrapped request body for `envelope`.
    ///
    /// Shape violations (a value that does not serialize to a mapping, a
    /// batch element that does not, a raw scalar) surface as
    /// [`Error::Serialization`] without touching the network.
    pub(crate) fn into_body(self, envelope: Envelope) -> Result<Value, Error> {
        let (key, wrapped) = match self {
            Self::One(item) => {
                let value = to_json(envelope.resource, &item)?;
                (envelope.singular, require_object(envelope.resource, value)?)
            }
            Self::Many(items) => {
                let mut array = Vec::with_capacity(items.len());
                for item in &items {
                    let value = to_json(envelope.resource, item)?;
                    array.push(require_object(envelope.resource, value)?);
                }
                (envelope.plural, Value::Array(array))
            }
            Self::Raw(value) => {
                if !value.is_object() {
                    return Err(Error::Serialization {
                        resource: envelope.resource,
                        expected: "a typed value or a raw JSON mapping",
                        got: json_kind(&value).to_owned(),
                    });
                }
                (envelope.singular, value)
            }
        };

        let mut body = serde_json::Map::new();
        if envelope.versioned {
            body.insert("version".to_owned(), Value::String(PROTOCOL_VERSION.to_owned()));
        }
        body.insert(key.to_owned(), wrapped);
        Ok(Value::Object(body))
    }
}

fn to_json<T: Serialize>(resource: &'static str, item: &T) -> Result<Value, Error> {
    serde_json::to_value(item).map_err(|e| Error::Serialization {
        resource,
        expected: "a JSON-serializable value",
        got: e.to_string(),
    })
}

fn require_object(resource: &'static str, value: Value) -> Result<Value, Error> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(Error::Serialization {
            resource,
            expected: "a JSON object",
            got: json_kind(&value).to_owned(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, Serialize)]
    struct Rule {
        priority: u16,
        table_id: u8,
    }

    const RULE: Rule = Rule {
        priority: 30000,
        table_id: 200,
    };

    #[test]
    fn batch_wraps_under_plural_key() {
        let body = Payload::<Rule>::from(vec![RULE, RULE])
            .into_body(Envelope::FLOW)
            .unwrap();
        assert_eq!(
            body,
            json!({ "flows": [
                { "priority": 30000, "table_id": 200 },
                { "priority": 30000, "table_id": 200 },
            ]})
        );
    }

    #[test]
    fn single_value_wraps_under_singular_key() {
        let body = Payload::from(RULE).into_body(Envelope::FLOW).unwrap();
        assert_eq!(body, json!({ "flow": { "priority": 30000, "table_id": 200 } }));
    }

    #[test]
    fn group_bodies_carry_the_version_stamp() {
        let body = Payload::from(RULE).into_body(Envelope::GROUP).unwrap();
        assert_eq!(
            body,
            json!({
                "version": "1.3.0",
                "group": { "priority": 30000, "table_id": 200 },
            })
        );
    }

    #[test]
    fn raw_mappings_pass_through_unchanged() {
        let raw = json!({ "id": 1, "command": "add", "flags": ["kbps"] });
        let body = Payload::<Rule>::raw(raw.clone())
            .into_body(Envelope::METER)
            .unwrap();
        assert_eq!(body, json!({ "version": "1.3.0", "meter": raw }));
    }

    #[test]
    fn raw_scalars_are_rejected() {
        let err = Payload::<Rule>::raw(json!(5))
            .into_body(Envelope::FLOW)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Serialization {
                resource: "flow",
                got,
                ..
            } if got == "a number"
        ));
    }

    #[test]
    fn batch_elements_must_be_objects() {
        let err = Payload::<i32>::from(vec![1, 2, 3])
            .into_body(Envelope::FLOW)
            .unwrap_err();
        assert!(matches!(err, Error::Serialization { resource: "flow", .. }));
    }

    #[test]
    fn empty_batch_still_produces_the_plural_wrapper() {
        let body = Payload::<Rule>::from(Vec::new())
            .into_body(Envelope::FLOW)
            .unwrap();
        assert_eq!(body, json!({ "flows": [] }));
    }
}
