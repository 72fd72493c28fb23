//! Ethereum ABI parser
//!
//! Parses contract ABI JSON files into the event definitions the binding
//! generator resolves against. Functions, errors and the constructor are
//! accepted but not retained.

use std::path::Path;

use alloy_primitives::B256;
use eventgen_common::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha3::{Digest, Keccak256};
use tracing::{debug, warn};

/// Parsed Ethereum contract ABI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthereumAbi {
    /// Where the ABI came from, used in diagnostics
    pub source: String,
    /// Contract events in declaration order
    pub events: Vec<AbiEvent>,
}

/// ABI event definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEvent {
    /// Event name
    pub name: String,
    /// Event inputs
    pub inputs: Vec<AbiParameter>,
    /// Whether event is anonymous
    pub anonymous: bool,
    /// keccak-256 of the canonical signature
    pub id: B256,
}

/// ABI parameter definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    /// Parameter name, empty when the ABI leaves it unnamed
    pub name: String,
    /// Parameter type (e.g., uint256, address, string)
    pub param_type: String,
    /// Internal type (for structs and custom types)
    pub internal_type: Option<String>,
    /// Components (for tuples and structs)
    pub components: Option<Vec<AbiParameter>>,
    /// Whether parameter is indexed
    pub indexed: bool,
}

/// Ethereum ABI parser
pub struct AbiParser;

impl AbiParser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Self
    }

    /// Parse an Ethereum ABI file
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> Result<EthereumAbi> {
        let path = file_path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read ABI file {}: {}", path.display(), e))
        })?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.parse_content(&content, source)
    }

    /// Parse Ethereum ABI from JSON content
    pub fn parse_content<S: Into<String>>(&self, content: &str, source: S) -> Result<EthereumAbi> {
        let source = source.into();
        let value: Value = serde_json::from_str(content)
            .map_err(|e| Error::parse(format!("{} is not valid JSON: {}", source, e)))?;
        self.parse_abi(&value, source)
    }

    /// Parse ABI from JSON value
    fn parse_abi(&self, value: &Value, source: String) -> Result<EthereumAbi> {
        // Hardhat and Foundry artifacts nest the ABI under "abi"
        let abi_array = value
            .as_array()
            .or_else(|| value.get("abi").and_then(|v| v.as_array()))
            .ok_or_else(|| Error::parse("ABI must be an array"))?;

        let mut events: Vec<AbiEvent> = Vec::new();

        for item in abi_array {
            let item_type = item.get("type").and_then(|v| v.as_str()).unwrap_or("function");

            if item_type != "event" {
                debug!(item_type, "Skipping non-event ABI entry");
                continue;
            }

            let event = self.parse_event(item)?;
            if let Some(existing) = events.iter().find(|e| e.id == event.id) {
                warn!(
                    event = %existing.name,
                    id = %event.id,
                    "Duplicate event definition in ABI, keeping the first"
                );
                continue;
            }
            events.push(event);
        }

        debug!(source = %source, events = events.len(), "Parsed ABI");

        Ok(EthereumAbi { source, events })
    }

    /// Parse an event from ABI
    fn parse_event(&self, value: &Value) -> Result<AbiEvent> {
        let name = value
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::parse("Event must have a name"))?
            .to_string();

        let inputs = value
            .get("inputs")
            .and_then(|v| v.as_array())
            .map(|arr| Self::parse_parameters(arr))
            .transpose()?
            .unwrap_or_default();

        let anonymous = value.get("anonymous").and_then(|v| v.as_bool()).unwrap_or(false);

        let id = signature_hash(&canonical_signature(&name, &inputs));

        Ok(AbiEvent {
            name,
            inputs,
            anonymous,
            id,
        })
    }

    /// Parse event parameters, including tuple components
    fn parse_parameters(array: &[Value]) -> Result<Vec<AbiParameter>> {
        let mut parameters = Vec::with_capacity(array.len());

        for param in array {
            let name = param.get("name").and_then(|v| v.as_str()).unwrap_or("").to_string();

            let param_type = param
                .get("type")
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::parse(format!("Parameter {:?} must have a type", name)))?
                .to_string();

            let internal_type = param
                .get("internalType")
                .and_then(|v| v.as_str())
                .map(String::from);

            let indexed = param.get("indexed").and_then(|v| v.as_bool()).unwrap_or(false);

            let components = if param_type.starts_with("tuple") {
                param
                    .get("components")
                    .and_then(|v| v.as_array())
                    .map(|arr| Self::parse_parameters(arr))
                    .transpose()?
            } else {
                None
            };

            parameters.push(AbiParameter {
                name,
                param_type,
                internal_type,
                components,
                indexed,
            });
        }

        Ok(parameters)
    }
}

impl Default for AbiParser {
    fn default() -> Self {
        Self::new()
    }
}

/// keccak-256 of a signature string's bytes
pub fn signature_hash(signature: &str) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(signature.as_bytes());
    B256::from_slice(&hasher.finalize())
}

/// Canonical `Name(type,...)` signature of an event
pub fn canonical_signature(name: &str, inputs: &[AbiParameter]) -> String {
    let types: Vec<String> = inputs.iter().map(canonical_type).collect();
    format!("{}({})", name, types.join(","))
}

/// Convert parameter type to canonical form, expanding tuples to their components
fn canonical_type(param: &AbiParameter) -> String {
    match (param.param_type.strip_prefix("tuple"), &param.components) {
        (Some(array_suffix), Some(components)) => {
            let inner: Vec<String> = components.iter().map(canonical_type).collect();
            format!("({}){}", inner.join(","), array_suffix)
        }
        _ => {
            let ty = param.param_type.as_str();
            let (base, array_suffix) = ty.split_at(ty.find('[').unwrap_or(ty.len()));
            // Solidity aliases hash as their full-width types
            let base = match base {
                "uint" => "uint256",
                "int" => "int256",
                other => other,
            };
            format!("{}{}", base, array_suffix)
        }
    }
}

impl EthereumAbi {
    /// Find the event whose id equals `id`
    pub fn event_by_id(&self, id: &B256) -> Option<&AbiEvent> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// All events named `name`, in declaration order
    pub fn events_by_name(&self, name: &str) -> Vec<&AbiEvent> {
        self.events.iter().filter(|event| event.name == name).collect()
    }
}

impl AbiEvent {
    /// Canonical signature, the preimage of `id`
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, &self.inputs)
    }

    /// `0x`-prefixed hex of `id`
    pub fn id_hex(&self) -> String {
        format!("0x{}", hex::encode(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUPLE_ABI: &str = r#"[
      {"type": "function", "name": "settle", "inputs": [], "outputs": [], "stateMutability": "nonpayable"},
      {
        "type": "event",
        "name": "OrderFilled",
        "inputs": [
          {"name": "maker", "type": "address", "indexed": true},
          {"name": "order", "type": "tuple", "indexed": false, "components": [
            {"name": "amount", "type": "uint256"},
            {"name": "token", "type": "address"}
          ]},
          {"name": "legs", "type": "tuple[]", "indexed": false, "components": [
            {"name": "price", "type": "uint"}
          ]}
        ],
        "anonymous": false
      }
    ]"#;

    #[test]
    fn test_transfer_id_is_known_topic() {
        assert_eq!(
            hex::encode(signature_hash("Transfer(address,address,uint256)")),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn test_tuple_components_are_canonicalized() {
        let abi = AbiParser::new().parse_content(TUPLE_ABI, "orders.json").unwrap();
        assert_eq!(abi.events.len(), 1);
        assert_eq!(
            abi.events[0].signature(),
            "OrderFilled(address,(uint256,address),(uint256)[])"
        );
        assert!(abi.events[0].inputs[0].indexed);
        assert_eq!(abi.events[0].inputs[1].components.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_array_aliases_are_widened() {
        let abi = AbiParser::new()
            .parse_content(
                r#"[{"type": "event", "name": "Batch", "inputs": [
                    {"name": "ids", "type": "uint[]"},
                    {"name": "deltas", "type": "int[3]"},
                    {"name": "grid", "type": "uint[2][]"},
                    {"name": "small", "type": "uint8[]"}
                ]}]"#,
                "batch.json",
            )
            .unwrap();

        let expected = "Batch(uint256[],int256[3],uint256[2][],uint8[])";
        assert_eq!(abi.events[0].signature(), expected);
        assert_eq!(abi.events[0].id, signature_hash(expected));
    }

    #[test]
    fn test_artifact_with_nested_abi_is_accepted() {
        let artifact = format!(r#"{{"contractName": "Orders", "abi": {}}}"#, TUPLE_ABI);
        let abi = AbiParser::new().parse_content(&artifact, "Orders.json").unwrap();
        assert_eq!(abi.events.len(), 1);
        assert_eq!(abi.source, "Orders.json");
    }

    #[test]
    fn test_rejects_non_array() {
        let err = AbiParser::new().parse_content(r#"{"type": "event"}"#, "bad.json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_event_without_name_is_rejected() {
        let err = AbiParser::new()
            .parse_content(r#"[{"type": "event", "inputs": []}]"#, "bad.json")
            .unwrap_err();
        assert!(err.to_string().contains("must have a name"));
    }

    #[test]
    fn test_duplicate_events_collapse_to_first() {
        let abi = AbiParser::new()
            .parse_content(
                r#"[
                  {"type": "event", "name": "Ping", "inputs": [{"name": "a", "type": "uint8"}]},
                  {"type": "event", "name": "Ping", "inputs": [{"name": "b", "type": "uint8"}]}
                ]"#,
                "dup.json",
            )
            .unwrap();
        assert_eq!(abi.events.len(), 1);
        assert_eq!(abi.events[0].inputs[0].name, "a");
    }

    #[test]
    fn test_parse_file_records_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ping.json");
        std::fs::write(&path, r#"[{"type": "event", "name": "Ping", "inputs": []}]"#).unwrap();

        let abi = AbiParser::new().parse_file(&path).unwrap();
        assert_eq!(abi.source, "ping.json");
        assert!(abi.event_by_id(&signature_hash("Ping()")).is_some());
    }
}
