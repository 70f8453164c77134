//! Request and response mappings exchanged between workers.

use crate::{DisaggregatedParams, Result, WireParams, codec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the plain mapping of [`WireParams`].
pub const DISAGGREGATED_PARAMS: &str = "disaggregated_params";

/// Field inspected by the default error check.
pub const FINISH_REASON: &str = "finish_reason";

/// A generation request: a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Request(Map<String, Value>);

/// A generation response: a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response(Map<String, Value>);

macro_rules! mapping {
    ($ty:ident) => {
        impl $ty {
            /// Create an empty mapping.
            pub fn new() -> Self {
                Self(Map::new())
            }

            /// Look up a field.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// Set a field, returning the previous value.
            pub fn insert(
                &mut self,
                key: impl Into<String>,
                value: impl Into<Value>,
            ) -> Option<Value> {
                self.0.insert(key.into(), value.into())
            }

            /// Set a field, builder style.
            pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                self.insert(key, value);
                self
            }

            /// Field names in order.
            pub fn keys(&self) -> impl Iterator<Item = &str> {
                self.0.keys().map(String::as_str)
            }

            /// The raw `disaggregated_params` mapping, if present.
            pub fn disaggregated_params(&self) -> Option<&Value> {
                self.0.get(DISAGGREGATED_PARAMS).filter(|v| !v.is_null())
            }

            /// Parse `disaggregated_params` into its transport form.
            pub fn wire_params(&self) -> Result<Option<WireParams>> {
                self.disaggregated_params()
                    .map(|v| WireParams::deserialize(v))
                    .transpose()
                    .map_err(Into::into)
            }

            /// Parse and decode `disaggregated_params`.
            pub fn decoded_params(&self) -> Result<Option<DisaggregatedParams>> {
                codec::decode_opt(self.wire_params()?.as_ref())
            }

            /// Encode `params` and store them under `disaggregated_params`.
            pub fn set_params(&mut self, params: &DisaggregatedParams) -> Result<()> {
                let value = serde_json::to_value(codec::encode(params))?;
                self.0.insert(DISAGGREGATED_PARAMS.into(), value);
                Ok(())
            }

            /// Unwrap into the underlying JSON object.
            pub fn into_inner(self) -> Map<String, Value> {
                self.0
            }
        }

        impl From<Map<String, Value>> for $ty {
            fn from(map: Map<String, Value>) -> Self {
                Self(map)
            }
        }

        impl TryFrom<Value> for $ty {
            type Error = crate::Error;

            fn try_from(value: Value) -> Result<Self> {
                Ok(Self(serde_json::from_value(value)?))
            }
        }
    };
}

mapping!(Request);
mapping!(Response);

impl Request {
    /// Copy a raw `disaggregated_params` mapping into this request.
    ///
    /// The value is forwarded verbatim, it is already in transport form.
    pub fn set_disaggregated_params(&mut self, value: Value) {
        self.0.insert(DISAGGREGATED_PARAMS.into(), value);
    }
}

impl Response {
    /// Whether the response reports an error (`finish_reason == "error"`).
    pub fn is_error(&self) -> bool {
        self.0.get(FINISH_REASON).and_then(Value::as_str) == Some("error")
    }
}
