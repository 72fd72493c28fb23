//! Solidity to Rust type mapping
//!
//! A closed table: every Solidity type a binding may use is listed here, and
//! anything else is rejected rather than approximated.

use eventgen_common::{Error, Result};

/// Solidity type and the Rust type generated for it
const TYPE_TABLE: &[(&str, &str)] = &[
    ("uint8", "u8"),
    ("uint256", "U256"),
    ("string", "String"),
    ("address", "Address"),
    ("bytes", "Bytes"),
];

/// Rust type for `source_type`, if it is supported
pub fn map_type(source_type: &str) -> Option<&'static str> {
    TYPE_TABLE
        .iter()
        .find(|(solidity, _)| *solidity == source_type)
        .map(|(_, rust)| *rust)
}

/// Rust type for an event argument, failing with the argument's context
pub fn map_argument_type(event: &str, argument: &str, source_type: &str) -> Result<&'static str> {
    map_type(source_type).ok_or_else(|| Error::unsupported_type(source_type, argument, event))
}

/// Solidity types the mapper accepts
pub fn supported_types() -> impl Iterator<Item = &'static str> {
    TYPE_TABLE.iter().map(|(solidity, _)| *solidity)
}
