// Response decoding by declared shape
//
// The daemon's object schemas (preferences, torrent properties, trackers,
// ...) evolve independently of this client, so objects stay open-ended
// `serde_json` maps. Only bare scalars get a concrete Rust type.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::endpoint::{Endpoint, Shape};
use crate::error::Error;

/// Open key/value object as returned by the daemon.
pub type Object = Map<String, Value>;

/// A decoded response body. The variant always matches the endpoint's
/// declared [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Empty,
    Text(String),
    Int(i64),
    Bool(bool),
    Object(Object),
    Objects(Vec<Object>),
    Scalars(Vec<Value>),
}

impl Payload {
    /// Decode a 200 response body according to `endpoint.shape`.
    pub fn decode(endpoint: &Endpoint, body: String) -> Result<Self, Error> {
        let fail = |message: String, body: String| Error::Decode {
            operation: endpoint.name,
            message,
            body,
        };

        match endpoint.shape {
            Shape::None => Ok(Self::Empty),
            Shape::Text => Ok(Self::Text(body)),
            Shape::Int => match serde_json::from_str::<i64>(&body) {
                Ok(n) => Ok(Self::Int(n)),
                Err(e) => Err(fail(format!("expected an integer: {e}"), body)),
            },
            Shape::Bool => match serde_json::from_str::<i64>(&body) {
                Ok(1) => Ok(Self::Bool(true)),
                Ok(0) => Ok(Self::Bool(false)),
                Ok(n) => Err(fail(format!("expected 0 or 1, got {n}"), body)),
                Err(e) => Err(fail(format!("expected 0 or 1: {e}"), body)),
            },
            Shape::Object => match serde_json::from_str::<Object>(&body) {
                Ok(map) => Ok(Self::Object(map)),
                Err(e) => Err(fail(format!("expected a JSON object: {e}"), body)),
            },
            Shape::ObjectArray => match serde_json::from_str::<Vec<Object>>(&body) {
                Ok(items) => Ok(Self::Objects(items)),
                Err(e) => Err(fail(format!("expected an array of objects: {e}"), body)),
            },
            Shape::ScalarArray => {
                let items = match serde_json::from_str::<Vec<Value>>(&body) {
                    Ok(items) => items,
                    Err(e) => return Err(fail(format!("expected an array: {e}"), body)),
                };
                if let Some(pos) = items.iter().position(|v| v.is_object() || v.is_array()) {
                    return Err(fail(format!("element {pos} is not a scalar"), body));
                }
                Ok(Self::Scalars(items))
            }
        }
    }

    /// The shape this payload was decoded as.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Empty => Shape::None,
            Self::Text(_) => Shape::Text,
            Self::Int(_) => Shape::Int,
            Self::Bool(_) => Shape::Bool,
            Self::Object(_) => Shape::Object,
            Self::Objects(_) => Shape::ObjectArray,
            Self::Scalars(_) => Shape::ScalarArray,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    static TEXT: Endpoint = Endpoint::get("GetApplicationVersion", "/app/version", Shape::Text);
    static INT: Endpoint = Endpoint::get("GetGlobalDownloadLimit", "/transfer/downloadLimit", Shape::Int);
    static BOOL: Endpoint =
        Endpoint::get("GetAlternativeSpeedLimitsState", "/transfer/speedLimitsMode", Shape::Bool);
    static OBJECTS: Endpoint = Endpoint::get("GetLog", "/log/main", Shape::ObjectArray);
    static SCALARS: Endpoint = Endpoint::get("GetAllTags", "/torrents/tags", Shape::ScalarArray);
    static UNIT: Endpoint = Endpoint::post("PauseTorrents", "/torrents/pause");

    fn decode(endpoint: &Endpoint, body: &str) -> Result<Payload, Error> {
        Payload::decode(endpoint, body.to_owned())
    }

    #[test]
    fn text_is_taken_verbatim() {
        assert_eq!(decode(&TEXT, "v4.6.2").unwrap(), Payload::Text("v4.6.2".into()));
    }

    #[test]
    fn bool_accepts_only_zero_and_one() {
        assert_eq!(decode(&BOOL, "1").unwrap(), Payload::Bool(true));
        assert_eq!(decode(&BOOL, "0").unwrap(), Payload::Bool(false));
        assert!(matches!(decode(&BOOL, "2"), Err(Error::Decode { .. })));
        assert!(matches!(decode(&BOOL, "true"), Err(Error::Decode { .. })));
        assert!(matches!(decode(&BOOL, ""), Err(Error::Decode { .. })));
    }

    #[test]
    fn int_rejects_non_numbers() {
        assert_eq!(decode(&INT, "1048576").unwrap(), Payload::Int(1_048_576));
        let err = decode(&INT, "unlimited").unwrap_err();
        match err {
            Error::Decode {
                operation, body, ..
            } => {
                assert_eq!(operation, "GetGlobalDownloadLimit");
                assert_eq!(body, "unlimited");
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn arrays_keep_server_order() {
        let body = json!([{ "id": 3 }, { "id": 1 }, { "id": 3 }]).to_string();
        let Payload::Objects(items) = decode(&OBJECTS, &body).unwrap() else {
            panic!("expected objects");
        };
        let ids: Vec<_> = items.iter().map(|o| o["id"].clone()).collect();
        assert_eq!(ids, vec![json!(3), json!(1), json!(3)]);
    }

    #[test]
    fn scalar_array_rejects_nested_values() {
        assert_eq!(
            decode(&SCALARS, r#"["b","a"]"#).unwrap(),
            Payload::Scalars(vec![json!("b"), json!("a")])
        );
        assert!(matches!(decode(&SCALARS, r#"["a",{"x":1}]"#), Err(Error::Decode { .. })));
        assert!(matches!(decode(&SCALARS, r#"{"a":1}"#), Err(Error::Decode { .. })));
    }

    #[test]
    fn status_only_ignores_body() {
        assert_eq!(decode(&UNIT, "Ok.").unwrap(), Payload::Empty);
        assert_eq!(Payload::Empty.shape(), Shape::None);
    }
}
