//! Ethereum event bindings: ABI parsing, event resolution, Solidity type
//! mapping and code generation
pub mod codegen;

pub use codegen::{
    AbiEvent, AbiParser, EthereumAbi, EventCodegenConfig, GenerationModel, ModelBuilder,
    TargetArgument, TargetEvent,
};

#[cfg(feature = "codegen")]
pub use codegen::{generate_event_bindings, EventBindingsCodegen};
