// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error handling facilities for the simulated control plane
//!
//! Every fallible call on the engine returns one of the errors defined here.
//! A failed call leaves the resource store exactly as it was before the
//! call.

use serde::Deserialize;
use serde::Serialize;

/// An error that can be generated while handling a simulated API call
///
/// Three paths produce these: a referenced resource is missing from the
/// store, the request itself is malformed, or a test queued the error ahead
/// of time through the recorder.  Where possible we reuse existing variants
/// rather than inventing new ones to distinguish cases no caller needs to
/// distinguish.
#[derive(Clone, Debug, Deserialize, thiserror::Error, PartialEq, Serialize)]
pub enum Error {
    /// An object needed as part of this operation was not found.
    #[error("Object (of type {lookup_type:?}) not found: {type_name}")]
    ObjectNotFound { type_name: ResourceType, lookup_type: LookupType },
    /// The request was well-formed, but the operation cannot be completed
    /// given the current state of the system.
    #[error("Invalid Request: {message}")]
    InvalidRequest { message: String },
    /// The specified input field is not valid.
    #[error("Invalid Value: {label}, {message}")]
    InvalidValue { label: String, message: String },
    /// The system encountered an unhandled operational error.
    #[error("Internal Error: {internal_message}")]
    InternalError { internal_message: String },
    /// The system (or part of it) is unavailable.
    #[error("Service Unavailable: {internal_message}")]
    ServiceUnavailable { internal_message: String },
}

/// Indicates how an object was looked up (for an `ObjectNotFound` error)
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum LookupType {
    /// a specific id was requested
    ById(String),
}

impl LookupType {
    /// Returns an ObjectNotFound error appropriate for the case where this
    /// lookup failed
    pub fn into_not_found(self, type_name: ResourceType) -> Error {
        Error::ObjectNotFound { type_name, lookup_type: self }
    }
}

impl Error {
    /// Generates an [`Error::ObjectNotFound`] error for a lookup by object
    /// id.
    pub fn not_found_by_id(type_name: ResourceType, id: &str) -> Error {
        LookupType::ById(id.to_owned()).into_not_found(type_name)
    }

    /// Generates an [`Error::InvalidRequest`] error with the specific
    /// message
    ///
    /// This should be used for failures due possibly to invalid client input
    /// or malformed requests.
    pub fn invalid_request(message: &str) -> Error {
        Error::InvalidRequest { message: message.to_owned() }
    }

    /// Generates an [`Error::InvalidValue`] error naming the offending
    /// request field.
    pub fn invalid_value(label: &str, message: &str) -> Error {
        Error::InvalidValue {
            label: label.to_owned(),
            message: message.to_owned(),
        }
    }

    /// Generates an [`Error::InternalError`] error with the specific message
    ///
    /// InternalError should be used for operational conditions that should
    /// not happen but that we cannot reasonably handle at runtime (e.g.,
    /// finding a stored address block that no longer parses).
    pub fn internal_error(internal_message: &str) -> Error {
        Error::InternalError { internal_message: internal_message.to_owned() }
    }

    /// Generates an [`Error::ServiceUnavailable`] error with the specific
    /// message
    ///
    /// This is used when the engine gives up on an allocation because the
    /// candidate space appears exhausted.
    pub fn unavail(message: &str) -> Error {
        Error::ServiceUnavailable { internal_message: message.to_owned() }
    }
}

/// The kind of resource named by an [`Error::ObjectNotFound`]
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum ResourceType {
    Vpc,
    Subnet,
    NetworkInterface,
    SecurityGroup,
    ElasticIp,
    Instance,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResourceType::Vpc => "vpc",
                ResourceType::Subnet => "subnet",
                ResourceType::NetworkInterface => "network interface",
                ResourceType::SecurityGroup => "security group",
                ResourceType::ElasticIp => "elastic ip",
                ResourceType::Instance => "instance",
            }
        )
    }
}

#[cfg(test)]
mod test {
    use super::Error;
    use super::ResourceType;

    #[test]
    fn test_not_found_message() {
        let error = Error::not_found_by_id(ResourceType::Subnet, "subnet-12");
        assert_eq!(
            error.to_string(),
            "Object (of type ById(\"subnet-12\")) not found: subnet"
        );
    }

    #[test]
    fn test_invalid_value_message() {
        let error = Error::invalid_value("CidrBlock", "not a CIDR");
        assert_eq!(error.to_string(), "Invalid Value: CidrBlock, not a CIDR");
    }
}
