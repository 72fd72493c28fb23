//! Message envelopes for decoded contract events
//!
//! A [`Data`] envelope carries where and when a log was emitted alongside its
//! decoded arguments. Consumers that publish decoded logs pick the payload
//! type, typically a generated event struct; generated code does not depend
//! on this module.

use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message type attached to every emitted contract event
pub const EVENT_TYPE: &str = "zone.dimo.contract.event";

/// Block a log was included in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl Block {
    /// True when no block field is known
    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.hash.is_none() && self.time.is_none()
    }
}

/// Chain position and identity of a single log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInfo {
    pub chain_id: i64,
    pub event_name: String,
    #[serde(default, skip_serializing_if = "Block::is_empty")]
    pub block: Block,
    pub contract: Address,
    pub transaction_hash: B256,
    /// Topic 0 of the log, the keccak-256 of the canonical event signature
    pub event_signature: B256,
}

/// A decoded event together with its log metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data<A> {
    #[serde(flatten)]
    pub log_info: LogInfo,
    pub arguments: A,
}

impl<A> Data<A> {
    pub fn new(log_info: LogInfo, arguments: A) -> Self {
        Self { log_info, arguments }
    }

    /// Message type of this envelope
    pub fn event_type(&self) -> &'static str {
        EVENT_TYPE
    }
}
