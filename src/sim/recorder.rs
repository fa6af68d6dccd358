// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Expectation and override subsystem
//!
//! The recorder sits in front of every operation handler.  Per call, in
//! this order:
//!
//! 1. [`Recorder::record`] — the call name is appended to the log
//!    unconditionally, overridden or not.
//! 2. [`Recorder::take_error`] — a queued error short-circuits the call;
//!    default logic never runs and the response queue is not consulted.
//! 3. The call's queue in [`OverrideTable`] — a queued response is returned
//!    verbatim in place of default logic.
//!
//! Tests populate the queues before exercising the engine and read the
//! call log afterward.  The engine itself only dequeues; it never queues.

use crate::api::*;
use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::fmt;

/// Names of the calls the engine dispatches, as logged and asserted on.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ApiCall {
    DescribeVpcs,
    CreateSubnet,
    DescribeSubnets,
    DeleteSubnet,
    CreateNetworkInterface,
    DeleteNetworkInterface,
    DescribeNetworkInterfaces,
    AllocateAddress,
    ReleaseAddress,
    AssociateAddress,
    DisassociateAddress,
    DescribeAddresses,
    CreateSecurityGroup,
    DeleteSecurityGroup,
    DescribeSecurityGroups,
    AuthorizeSecurityGroupIngress,
    RevokeSecurityGroupIngress,
    AssignPrivateIpAddresses,
    UnassignPrivateIpAddresses,
    DescribeInstances,
    DescribeInstanceAttribute,
    CreateTags,
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Variant names are exactly the wire call names.
        fmt::Debug::fmt(self, f)
    }
}

/// One strongly-typed response queue per call.
///
/// Pushing a `Result` here makes the next invocation of that call return it
/// verbatim instead of running default logic.  Queues drain front-first, so
/// consecutive invocations can be given different responses.
#[derive(Default)]
pub struct OverrideTable {
    pub describe_vpcs: VecDeque<Result<DescribeVpcsOutput, Error>>,
    pub create_subnet: VecDeque<Result<CreateSubnetOutput, Error>>,
    pub describe_subnets: VecDeque<Result<DescribeSubnetsOutput, Error>>,
    pub delete_subnet: VecDeque<Result<DeleteSubnetOutput, Error>>,
    pub create_network_interface:
        VecDeque<Result<CreateNetworkInterfaceOutput, Error>>,
    pub delete_network_interface:
        VecDeque<Result<DeleteNetworkInterfaceOutput, Error>>,
    pub describe_network_interfaces:
        VecDeque<Result<DescribeNetworkInterfacesOutput, Error>>,
    pub allocate_address: VecDeque<Result<AllocateAddressOutput, Error>>,
    pub release_address: VecDeque<Result<ReleaseAddressOutput, Error>>,
    pub associate_address: VecDeque<Result<AssociateAddressOutput, Error>>,
    pub disassociate_address:
        VecDeque<Result<DisassociateAddressOutput, Error>>,
    pub describe_addresses: VecDeque<Result<DescribeAddressesOutput, Error>>,
    pub create_security_group:
        VecDeque<Result<CreateSecurityGroupOutput, Error>>,
    pub delete_security_group:
        VecDeque<Result<DeleteSecurityGroupOutput, Error>>,
    pub describe_security_groups:
        VecDeque<Result<DescribeSecurityGroupsOutput, Error>>,
    pub authorize_security_group_ingress:
        VecDeque<Result<AuthorizeSecurityGroupIngressOutput, Error>>,
    pub revoke_security_group_ingress:
        VecDeque<Result<RevokeSecurityGroupIngressOutput, Error>>,
    pub assign_private_ip_addresses:
        VecDeque<Result<AssignPrivateIpAddressesOutput, Error>>,
    pub unassign_private_ip_addresses:
        VecDeque<Result<UnassignPrivateIpAddressesOutput, Error>>,
    pub describe_instances: VecDeque<Result<DescribeInstancesOutput, Error>>,
    pub describe_instance_attribute:
        VecDeque<Result<DescribeInstanceAttributeOutput, Error>>,
    pub create_tags: VecDeque<Result<CreateTagsOutput, Error>>,
}

impl OverrideTable {
    fn clear(&mut self) {
        *self = OverrideTable::default();
    }
}

/// Call log plus queued errors and responses.
pub struct Recorder {
    calls: Vec<ApiCall>,
    errors: BTreeMap<ApiCall, VecDeque<Error>>,
    /// Typed canned responses, drained by the engine per call.
    pub overrides: OverrideTable,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder {
            calls: Vec::new(),
            errors: BTreeMap::new(),
            overrides: OverrideTable::default(),
        }
    }

    /// Queues `error` for the next invocation of `call`.
    pub fn queue_error(&mut self, call: ApiCall, error: Error) {
        self.errors.entry(call).or_default().push_back(error);
    }

    /// Dequeues a previously queued error for `call`, if any.
    pub(crate) fn take_error(&mut self, call: ApiCall) -> Option<Error> {
        self.errors.get_mut(&call).and_then(VecDeque::pop_front)
    }

    /// Appends `call` to the call log.
    pub(crate) fn record(&mut self, call: ApiCall) {
        self.calls.push(call);
    }

    /// The ordered sequence of every call dispatched so far.
    pub fn call_log(&self) -> &[ApiCall] {
        &self.calls
    }

    /// How many times `call` was dispatched.
    pub fn call_count(&self, call: ApiCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    /// Clears the call log and all queued errors and responses.
    pub fn reset(&mut self) {
        self.calls.clear();
        self.errors.clear();
        self.overrides.clear();
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::ApiCall;
    use super::Recorder;
    use crate::api::CreateTagsOutput;
    use crate::api::Error;

    #[test]
    fn test_call_log_preserves_order_and_repeats() {
        let mut recorder = Recorder::new();
        recorder.record(ApiCall::CreateSubnet);
        recorder.record(ApiCall::DescribeSubnets);
        recorder.record(ApiCall::CreateSubnet);
        assert_eq!(
            recorder.call_log(),
            [
                ApiCall::CreateSubnet,
                ApiCall::DescribeSubnets,
                ApiCall::CreateSubnet
            ]
        );
        assert_eq!(recorder.call_count(ApiCall::CreateSubnet), 2);
        assert_eq!(recorder.call_count(ApiCall::DeleteSubnet), 0);
    }

    #[test]
    fn test_errors_drain_in_queue_order() {
        let mut recorder = Recorder::new();
        recorder.queue_error(
            ApiCall::AllocateAddress,
            Error::invalid_request("first"),
        );
        recorder.queue_error(
            ApiCall::AllocateAddress,
            Error::invalid_request("second"),
        );
        assert_eq!(
            recorder.take_error(ApiCall::AllocateAddress),
            Some(Error::invalid_request("first"))
        );
        assert_eq!(
            recorder.take_error(ApiCall::AllocateAddress),
            Some(Error::invalid_request("second"))
        );
        assert_eq!(recorder.take_error(ApiCall::AllocateAddress), None);
        assert_eq!(recorder.take_error(ApiCall::ReleaseAddress), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut recorder = Recorder::new();
        recorder.record(ApiCall::CreateTags);
        recorder.queue_error(ApiCall::CreateTags, Error::invalid_request("x"));
        recorder.overrides.create_tags.push_back(Ok(CreateTagsOutput {}));
        recorder.reset();
        assert!(recorder.call_log().is_empty());
        assert_eq!(recorder.take_error(ApiCall::CreateTags), None);
        assert!(recorder.overrides.create_tags.is_empty());
    }

    #[test]
    fn test_call_names_render_like_the_wire() {
        assert_eq!(ApiCall::CreateSubnet.to_string(), "CreateSubnet");
        assert_eq!(
            ApiCall::AuthorizeSecurityGroupIngress.to_string(),
            "AuthorizeSecurityGroupIngress"
        );
    }
}
