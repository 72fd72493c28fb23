//! Generation model
//!
//! The resolved, type-mapped view of the requested events that templates
//! render. Built once per run from an ABI and an ordered identifier list.

use std::collections::{HashMap, HashSet};

use alloy_primitives::B256;
use eventgen_common::{Error, Result};
use serde::Serialize;
use tracing::{debug, info};

use super::naming;
use super::parser::{AbiEvent, AbiParameter, EthereumAbi};
use super::resolver::EventResolver;
use super::types;

/// One event argument in target-language terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetArgument {
    /// Name as written in the ABI
    pub source_name: String,
    /// Exported identifier (`From`, `TokenID`)
    pub target_name: String,
    /// snake_case struct field name
    pub field_name: String,
    /// Rust type
    pub target_type: String,
    /// Solidity type
    pub source_type: String,
    /// Whether the argument is carried in a log topic
    pub indexed: bool,
}

/// A resolved event ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetEvent {
    pub name: String,
    /// Unique type name within the model; overloads after the first get a
    /// numeric suffix (`Mint`, `Mint1`)
    pub type_name: String,
    /// Canonical signature, the preimage of `id`
    pub signature: String,
    pub id: B256,
    pub anonymous: bool,
    /// Arguments in ABI (decoding) order
    pub arguments: Vec<TargetArgument>,
}

/// Everything a template receives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationModel {
    pub package_name: String,
    /// ABI the events were resolved against
    pub abi_source: String,
    /// Events in request order
    pub events: Vec<TargetEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorMode {
    FailFast,
    Collect,
}

/// Builds a [`GenerationModel`] from an ABI
pub struct ModelBuilder<'a> {
    abi: &'a EthereumAbi,
    resolver: EventResolver<'a>,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(abi: &'a EthereumAbi) -> Self {
        Self {
            abi,
            resolver: EventResolver::new(abi),
        }
    }

    /// Build the model, stopping at the first unresolvable event, unsupported
    /// type or name collision
    pub fn build<S: AsRef<str>>(
        &self,
        package_name: &str,
        identifiers: &[S],
    ) -> Result<GenerationModel> {
        self.run(package_name, identifiers, ErrorMode::FailFast)
    }

    /// Build the model, visiting every identifier and argument; all problems
    /// are reported together as [`Error::Multiple`]
    pub fn build_collecting<S: AsRef<str>>(
        &self,
        package_name: &str,
        identifiers: &[S],
    ) -> Result<GenerationModel> {
        self.run(package_name, identifiers, ErrorMode::Collect)
    }

    fn run<S: AsRef<str>>(
        &self,
        package_name: &str,
        identifiers: &[S],
        mode: ErrorMode,
    ) -> Result<GenerationModel> {
        let mut events = Vec::with_capacity(identifiers.len());
        let mut errors = Vec::new();

        for identifier in identifiers {
            let built = self.build_event(identifier.as_ref(), mode).and_then(|event| {
                match events.iter().find(|seen: &&TargetEvent| seen.id == event.id) {
                    Some(seen) => Err(Error::config(format!(
                        "Event {} is requested more than once",
                        seen.signature
                    ))),
                    None => Ok(event),
                }
            });

            match built {
                Ok(event) => events.push(event),
                Err(err) if mode == ErrorMode::FailFast => return Err(err),
                Err(Error::Multiple(nested)) => errors.extend(nested),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(Error::from_many(errors));
        }

        assign_type_names(&mut events);

        info!(
            package = package_name,
            events = events.len(),
            abi = %self.abi.source,
            "Built generation model"
        );

        Ok(GenerationModel {
            package_name: package_name.to_string(),
            abi_source: self.abi.source.clone(),
            events,
        })
    }

    fn build_event(&self, identifier: &str, mode: ErrorMode) -> Result<TargetEvent> {
        let event = self.resolver.resolve(identifier)?;

        let mut arguments = Vec::with_capacity(event.inputs.len());
        let mut errors = Vec::new();

        for (index, param) in event.inputs.iter().enumerate() {
            match build_argument(event, index, param) {
                Ok(argument) => arguments.push(argument),
                Err(err) if mode == ErrorMode::FailFast => return Err(err),
                Err(err) => errors.push(err),
            }
        }

        for err in name_collisions(&event.name, &arguments) {
            if mode == ErrorMode::FailFast {
                return Err(err);
            }
            errors.push(err);
        }

        if !errors.is_empty() {
            return Err(Error::from_many(errors));
        }

        debug!(event = %event.name, arguments = arguments.len(), "Mapped event arguments");

        Ok(TargetEvent {
            name: event.name.clone(),
            type_name: event.name.clone(),
            signature: event.signature(),
            id: event.id,
            anonymous: event.anonymous,
            arguments,
        })
    }
}

fn build_argument(event: &AbiEvent, index: usize, param: &AbiParameter) -> Result<TargetArgument> {
    let (target_name, field_name) = if param.name.is_empty() {
        naming::positional_names(index)
    } else {
        (naming::normalize(&param.name), naming::field_name(&param.name))
    };

    let argument_label = if param.name.is_empty() {
        field_name.as_str()
    } else {
        param.name.as_str()
    };
    let target_type = types::map_argument_type(&event.name, argument_label, &param.param_type)?;

    Ok(TargetArgument {
        source_name: param.name.clone(),
        target_name,
        field_name,
        target_type: target_type.to_string(),
        source_type: param.param_type.clone(),
        indexed: param.indexed,
    })
}

/// Names the built-in template declares or imports at module scope
const RESERVED_TYPE_NAMES: &[&str] = &[
    "Event",
    "Address",
    "Bytes",
    "B256",
    "U256",
    "Serialize",
    "Deserialize",
    "Self",
];

fn type_name_available(name: &str, taken: &HashSet<String>) -> bool {
    !taken.contains(name) && !RESERVED_TYPE_NAMES.contains(&name) && !naming::is_keyword(name)
}

/// An event keeps its own name when it is the first to claim it and the name
/// is free; the rest get the lowest numeric suffix nothing else uses
fn assign_type_names(events: &mut [TargetEvent]) {
    let mut taken: HashSet<String> = HashSet::new();
    let mut pending = Vec::new();

    for (index, event) in events.iter_mut().enumerate() {
        if type_name_available(&event.name, &taken) {
            taken.insert(event.name.clone());
            event.type_name = event.name.clone();
        } else {
            pending.push(index);
        }
    }

    for index in pending {
        let name = events[index].name.clone();
        let mut suffix = 1;
        let mut candidate = format!("{}{}", name, suffix);
        while !type_name_available(&candidate, &taken) {
            suffix += 1;
            candidate = format!("{}{}", name, suffix);
        }

        debug!(event = %name, type_name = %candidate, "Renamed event type");
        taken.insert(candidate.clone());
        events[index].type_name = candidate;
    }
}

/// Arguments whose exported or field names coincide, in argument order
fn name_collisions(event: &str, arguments: &[TargetArgument]) -> Vec<Error> {
    let mut errors = Vec::new();
    let mut target_names: HashMap<&str, &str> = HashMap::new();
    let mut field_names: HashMap<&str, &str> = HashMap::new();

    for argument in arguments {
        let clash = target_names
            .insert(&argument.target_name, &argument.source_name)
            .map(|first| (first, argument.target_name.as_str()))
            .or_else(|| {
                field_names
                    .insert(&argument.field_name, &argument.source_name)
                    .map(|first| (first, argument.field_name.as_str()))
            });

        if let Some((first, name)) = clash {
            errors.push(Error::NameCollision {
                event: event.to_string(),
                name: name.to_string(),
                first: first.to_string(),
                second: argument.source_name.clone(),
            });
        }
    }

    errors
}
