//! Event resolution
//!
//! The lookup key of an identifier is the keccak-256 of its bytes, so a
//! canonical signature (`Transfer(address,address,uint256)`) matches the event
//! id directly. A bare name (`Transfer`) that matches no id falls back to a
//! lookup by name, which must identify exactly one event in the ABI.

use alloy_primitives::B256;
use eventgen_common::{Error, Result};
use tracing::debug;

use super::parser::{signature_hash, AbiEvent, EthereumAbi};

/// An event of interest as written in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventIdentifier {
    /// `Name(type,...)`, whitespace removed
    Signature(String),
    /// Bare event name
    Name(String),
}

impl EventIdentifier {
    /// Classify a configured identifier
    pub fn parse(raw: &str) -> Self {
        if raw.contains('(') {
            EventIdentifier::Signature(raw.chars().filter(|c| !c.is_whitespace()).collect())
        } else {
            EventIdentifier::Name(raw.trim().to_string())
        }
    }

    /// Lookup key: keccak-256 over the identifier's bytes
    pub fn key(&self) -> B256 {
        signature_hash(self.as_str())
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventIdentifier::Signature(s) | EventIdentifier::Name(s) => s,
        }
    }
}

/// Resolves configured identifiers against one ABI
pub struct EventResolver<'a> {
    abi: &'a EthereumAbi,
}

impl<'a> EventResolver<'a> {
    pub fn new(abi: &'a EthereumAbi) -> Self {
        Self { abi }
    }

    /// Resolve `identifier` to exactly one event definition
    pub fn resolve(&self, identifier: &str) -> Result<&'a AbiEvent> {
        let abi = self.abi;
        let parsed = EventIdentifier::parse(identifier);

        let event = match (abi.event_by_id(&parsed.key()), &parsed) {
            (Some(event), _) => Some(event),
            (None, EventIdentifier::Signature(_)) => None,
            (None, EventIdentifier::Name(name)) => {
                let mut candidates = abi.events_by_name(name);
                if candidates.len() > 1 {
                    return Err(Error::AmbiguousEvent {
                        identifier: identifier.to_string(),
                        candidates: candidates.iter().map(|e| e.signature()).collect(),
                    });
                }
                candidates.pop()
            }
        };

        let event = event.ok_or_else(|| Error::not_found(identifier, abi.source.as_str()))?;
        debug!(identifier, event = %event.name, id = %event.id, "Resolved event");
        Ok(event)
    }
}

/// Resolve a single identifier against `abi`
pub fn resolve<'a>(abi: &'a EthereumAbi, identifier: &str) -> Result<&'a AbiEvent> {
    EventResolver::new(abi).resolve(identifier)
}
