// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated EC2 virtual-networking API implementation
//!
//! One handler per supported call, each running the recorder protocol
//! first (queued error, then call log, then queued response) and falling
//! through to default logic against the resource store.

use crate::api::*;
use crate::sim::allocator::allocate_unique;
use crate::sim::allocator::allocate_unique_paced;
use crate::sim::allocator::random_host_in_block;
use crate::sim::allocator::random_id_suffix;
use crate::sim::allocator::random_mac;
use crate::sim::allocator::random_public_address;
use crate::sim::filter;
use crate::sim::filter::INTERFACE_FILTERS;
use crate::sim::filter::SUBNET_FILTERS;
use crate::sim::filter::VPC_FILTERS;
use crate::sim::recorder::ApiCall;
use crate::sim::recorder::OverrideTable;
use crate::sim::recorder::Recorder;
use crate::sim::store::Store;
use ipnetwork::Ipv4Network;
use slog::info;
use slog::o;
use slog::Logger;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;
use uuid::Uuid;

/// Region suffix baked into derived private DNS names.
const PRIVATE_DNS_SUFFIX: &str = ".ap-southeast-1.compute.internal";

/// `Domain` value reported on every elastic IP allocation.
const ELASTIC_ALLOCATION_DOMAIN: &str = "aws";

/// State of a secondary address-block association at creation.
const CIDR_ASSOCIATION_STATE: &str = "ASSOCIATED";

/// Instance attribute understood by `DescribeInstanceAttribute`.
const ATTRIBUTE_GROUP_SET: &str = "groupSet";

/// Pause between collision retries in bulk address assignment.
const ASSIGN_RETRY_PAUSE: Duration = Duration::from_millis(10);

/// Simulates the EC2 virtual-networking control plane in memory.
///
/// One instance per test case.  All handlers are synchronous and take
/// `&self`; the store and the recorder each sit behind their own lock, and
/// a handler never holds either across a return.  Every mutation is
/// visible to the next call immediately.
pub struct MockEc2 {
    log: Logger,
    recorder: Mutex<Recorder>,
    store: Mutex<Store>,
}

impl MockEc2 {
    /// Constructs an engine holding the seed state: a default security
    /// group and a default instance carrying it.
    pub fn new(log: Logger) -> MockEc2 {
        let log = log.new(o!("component" => "mock-ec2"));
        info!(&log, "created simulated EC2 API");
        MockEc2 {
            log,
            recorder: Mutex::new(Recorder::new()),
            store: Mutex::new(Store::new()),
        }
    }

    /// Access to the recorder: queue errors and responses before a call,
    /// read the call log after.
    pub fn expect(&self) -> MutexGuard<'_, Recorder> {
        self.recorder.lock().unwrap()
    }

    /// Injects a pre-built instance into the store, bypassing any create
    /// flow.  The default security group is attached in addition to the
    /// instance's own groups.
    pub fn append_instance(&self, mut instance: Instance) {
        let mut store = self.store.lock().unwrap();
        instance
            .security_groups
            .push(store.default_security_group().clone());
        store.instances.push(instance);
    }

    /// Injects a pre-built VPC record into the store.
    pub fn append_vpc(&self, vpc: Vpc) {
        let mut store = self.store.lock().unwrap();
        store.vpcs.insert(vpc.vpc_id.clone(), vpc);
    }

    /// The id of the security group attached to every instance.
    pub fn default_security_group_id(&self) -> String {
        self.store.lock().unwrap().default_security_group().group_id.clone()
    }

    /// Runs the recorder protocol for `call`: the call is logged, then a
    /// queued error propagates as the handler's error, then a queued
    /// response (if any) is handed back for the handler to return
    /// verbatim.
    fn intercept<T>(
        &self,
        call: ApiCall,
        take: impl FnOnce(&mut OverrideTable) -> Option<Result<T, Error>>,
    ) -> Result<Option<Result<T, Error>>, Error> {
        let mut recorder = self.recorder.lock().unwrap();
        recorder.record(call);
        if let Some(error) = recorder.take_error(call) {
            return Err(error);
        }
        Ok(take(&mut recorder.overrides))
    }

    pub fn describe_vpcs(
        &self,
        input: DescribeVpcsInput,
    ) -> Result<DescribeVpcsOutput, Error> {
        if let Some(canned) = self
            .intercept(ApiCall::DescribeVpcs, |ov| ov.describe_vpcs.pop_front())?
        {
            return canned;
        }
        let store = self.store.lock().unwrap();
        let resolved = input
            .vpc_ids
            .iter()
            .filter_map(|id| store.vpcs.get(id).cloned())
            .collect();
        let vpcs = filter::evaluate(
            resolved,
            !input.vpc_ids.is_empty(),
            store.vpcs.values().cloned().collect(),
            &input.filters,
            VPC_FILTERS,
            None,
        );
        Ok(DescribeVpcsOutput { vpcs })
    }

    pub fn create_subnet(
        &self,
        input: CreateSubnetInput,
    ) -> Result<CreateSubnetOutput, Error> {
        if let Some(canned) = self
            .intercept(ApiCall::CreateSubnet, |ov| ov.create_subnet.pop_front())?
        {
            return canned;
        }
        input.cidr_block.parse::<Ipv4Network>().map_err(|e| {
            Error::invalid_value(
                "CidrBlock",
                &format!("unparsable address block: {}", e),
            )
        })?;
        let mut store = self.store.lock().unwrap();
        if !store.vpcs.contains_key(&input.vpc_id) {
            return Err(Error::not_found_by_id(
                ResourceType::Vpc,
                &input.vpc_id,
            ));
        }
        let subnet_id = allocate_unique(
            "subnet id",
            || Ok(format!("subnet-{}", random_id_suffix())),
            |id| store.subnets.contains_key(id),
        )?;
        let mut ipv6_cidr_block_association_set = Vec::new();
        if let Some(block) = &input.ipv6_cidr_block {
            ipv6_cidr_block_association_set.push(
                SubnetIpv6CidrBlockAssociation {
                    ipv6_cidr_block: block.clone(),
                    association_id: format!(
                        "subnet-cidr-assoc-{}",
                        random_id_suffix()
                    ),
                    ipv6_cidr_block_state: SubnetCidrBlockState {
                        state: CIDR_ASSOCIATION_STATE.to_string(),
                    },
                },
            );
        }
        let subnet = Subnet {
            subnet_id: subnet_id.clone(),
            vpc_id: input.vpc_id.clone(),
            cidr_block: input.cidr_block,
            availability_zone: input.availability_zone,
            ipv6_cidr_block_association_set,
        };
        store.subnets.insert(subnet_id.clone(), subnet.clone());
        store
            .subnets_by_vpc
            .entry(input.vpc_id.clone())
            .or_default()
            .push(subnet_id.clone());
        info!(self.log, "created subnet";
            "subnet_id" => %subnet_id, "vpc_id" => %input.vpc_id);
        Ok(CreateSubnetOutput { subnet })
    }

    pub fn describe_subnets(
        &self,
        input: DescribeSubnetsInput,
    ) -> Result<DescribeSubnetsOutput, Error> {
        if let Some(canned) = self.intercept(ApiCall::DescribeSubnets, |ov| {
            ov.describe_subnets.pop_front()
        })? {
            return canned;
        }
        let store = self.store.lock().unwrap();
        let resolved = input
            .subnet_ids
            .iter()
            .filter_map(|id| store.subnets.get(id).cloned())
            .collect();
        let subnets = filter::evaluate(
            resolved,
            !input.subnet_ids.is_empty(),
            store.subnets.values().cloned().collect(),
            &input.filters,
            SUBNET_FILTERS,
            None,
        );
        Ok(DescribeSubnetsOutput { subnets })
    }

    pub fn delete_subnet(
        &self,
        input: DeleteSubnetInput,
    ) -> Result<DeleteSubnetOutput, Error> {
        if let Some(canned) = self
            .intercept(ApiCall::DeleteSubnet, |ov| ov.delete_subnet.pop_front())?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        let subnet =
            store.subnets.remove(&input.subnet_id).ok_or_else(|| {
                Error::not_found_by_id(ResourceType::Subnet, &input.subnet_id)
            })?;
        if let Some(ids) = store.subnets_by_vpc.get_mut(&subnet.vpc_id) {
            ids.retain(|id| id != &input.subnet_id);
        }
        info!(self.log, "deleted subnet"; "subnet_id" => %input.subnet_id);
        Ok(DeleteSubnetOutput {})
    }

    pub fn create_network_interface(
        &self,
        input: CreateNetworkInterfaceInput,
    ) -> Result<CreateNetworkInterfaceOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::CreateNetworkInterface, |ov| {
                ov.create_network_interface.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        let subnet =
            store.subnets.get(&input.subnet_id).cloned().ok_or_else(|| {
                Error::not_found_by_id(ResourceType::Subnet, &input.subnet_id)
            })?;
        let block = parse_stored_block(&subnet.cidr_block)?;
        let address = allocate_unique(
            "private address",
            || random_host_in_block(&block),
            |ip| store.ip_assigned(&input.subnet_id, ip),
        )?;
        store.reserve_ip(&input.subnet_id, address);
        let interface_id = allocate_unique(
            "interface id",
            || Ok(format!("eni-{}", random_id_suffix())),
            |id| store.interfaces.contains_key(id),
        )?;
        let mac_address = allocate_unique(
            "hardware address",
            || Ok(random_mac()),
            |mac| store.mac_assigned(mac),
        )?;
        store.reserve_mac(mac_address);
        let private_ip_address = address.to_string();
        let private_dns_name = private_dns_name(&private_ip_address);
        let network_interface = NetworkInterface {
            network_interface_id: interface_id.clone(),
            subnet_id: input.subnet_id.clone(),
            vpc_id: subnet.vpc_id,
            availability_zone: subnet.availability_zone,
            description: input.description,
            mac_address,
            private_ip_address: private_ip_address.clone(),
            private_dns_name: private_dns_name.clone(),
            private_ip_addresses: vec![NetworkInterfacePrivateIpAddress {
                private_ip_address,
                private_dns_name,
                primary: true,
                association: None,
            }],
            tag_set: Vec::new(),
        };
        store
            .interfaces
            .insert(interface_id.clone(), network_interface.clone());
        info!(self.log, "created network interface";
            "interface_id" => %interface_id,
            "subnet_id" => %input.subnet_id,
            "address" => %network_interface.private_ip_address);
        Ok(CreateNetworkInterfaceOutput { network_interface })
    }

    pub fn delete_network_interface(
        &self,
        input: DeleteNetworkInterfaceInput,
    ) -> Result<DeleteNetworkInterfaceOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::DeleteNetworkInterface, |ov| {
                ov.delete_network_interface.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        // Addresses the interface held stay reserved in its subnet's
        // block; deletion does not return them to the pool.
        store
            .interfaces
            .remove(&input.network_interface_id)
            .ok_or_else(|| {
                Error::not_found_by_id(
                    ResourceType::NetworkInterface,
                    &input.network_interface_id,
                )
            })?;
        info!(self.log, "deleted network interface";
            "interface_id" => %input.network_interface_id);
        Ok(DeleteNetworkInterfaceOutput {})
    }

    pub fn describe_network_interfaces(
        &self,
        input: DescribeNetworkInterfacesInput,
    ) -> Result<DescribeNetworkInterfacesOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::DescribeNetworkInterfaces, |ov| {
                ov.describe_network_interfaces.pop_front()
            })?
        {
            return canned;
        }
        let store = self.store.lock().unwrap();
        let resolved = input
            .network_interface_ids
            .iter()
            .filter_map(|id| store.interfaces.get(id).cloned())
            .collect();
        let network_interfaces = filter::evaluate(
            resolved,
            !input.network_interface_ids.is_empty(),
            store.interfaces.values().cloned().collect(),
            &input.filters,
            INTERFACE_FILTERS,
            Some(|nic: &NetworkInterface| nic.tag_set.as_slice()),
        );
        Ok(DescribeNetworkInterfacesOutput { network_interfaces })
    }

    /// The request's `Domain` is accepted but not interpreted; every
    /// allocation reports the same domain.
    pub fn allocate_address(
        &self,
        _input: AllocateAddressInput,
    ) -> Result<AllocateAddressOutput, Error> {
        if let Some(canned) = self.intercept(ApiCall::AllocateAddress, |ov| {
            ov.allocate_address.pop_front()
        })? {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        // No retry needed for the id itself; a v4 uuid will not collide.
        let allocation_id = format!("eipalloc-{}", Uuid::new_v4());
        let public_ip = allocate_unique(
            "public address",
            || Ok(random_public_address()),
            |ip| store.elastic_ip_assigned(ip),
        )?;
        store.elastic_ips.insert(allocation_id.clone(), public_ip);
        info!(self.log, "allocated address";
            "allocation_id" => %allocation_id, "public_ip" => %public_ip);
        Ok(AllocateAddressOutput {
            public_ip: public_ip.to_string(),
            allocation_id,
            domain: ELASTIC_ALLOCATION_DOMAIN.to_string(),
        })
    }

    pub fn release_address(
        &self,
        input: ReleaseAddressInput,
    ) -> Result<ReleaseAddressOutput, Error> {
        if let Some(canned) = self.intercept(ApiCall::ReleaseAddress, |ov| {
            ov.release_address.pop_front()
        })? {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        store.elastic_ips.remove(&input.allocation_id).ok_or_else(|| {
            Error::not_found_by_id(
                ResourceType::ElasticIp,
                &input.allocation_id,
            )
        })?;
        info!(self.log, "released address";
            "allocation_id" => %input.allocation_id);
        Ok(ReleaseAddressOutput {})
    }

    pub fn associate_address(
        &self,
        input: AssociateAddressInput,
    ) -> Result<AssociateAddressOutput, Error> {
        if let Some(canned) = self.intercept(ApiCall::AssociateAddress, |ov| {
            ov.associate_address.pop_front()
        })? {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        let interface = store.interface_mut(&input.network_interface_id)?;
        let association_id = format!("fip-alloc-{}", Uuid::new_v4());
        let mut associated = false;
        for entry in interface.private_ip_addresses.iter_mut() {
            if entry.private_ip_address == input.private_ip_address {
                entry.association = Some(NetworkInterfaceAssociation {
                    allocation_id: input.allocation_id.clone(),
                    public_ip: input.public_ip.clone(),
                    association_id: Some(association_id.clone()),
                });
                associated = true;
            }
        }
        Ok(AssociateAddressOutput {
            association_id: associated.then_some(association_id),
        })
    }

    pub fn disassociate_address(
        &self,
        input: DisassociateAddressInput,
    ) -> Result<DisassociateAddressOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::DisassociateAddress, |ov| {
                ov.disassociate_address.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        // Linear scan over every interface's address list; fine at the
        // scale a test populates.
        for interface in store.interfaces.values_mut() {
            for entry in interface.private_ip_addresses.iter_mut() {
                let matches = entry
                    .association
                    .as_ref()
                    .and_then(|a| a.association_id.as_deref())
                    == Some(input.association_id.as_str());
                if matches {
                    entry.association = None;
                }
            }
        }
        Ok(DisassociateAddressOutput {})
    }

    pub fn describe_addresses(
        &self,
        input: DescribeAddressesInput,
    ) -> Result<DescribeAddressesOutput, Error> {
        if let Some(canned) = self.intercept(ApiCall::DescribeAddresses, |ov| {
            ov.describe_addresses.pop_front()
        })? {
            return canned;
        }
        let store = self.store.lock().unwrap();
        let mut addresses = Vec::new();
        for public_ip in &input.public_ips {
            for (allocation_id, assigned) in &store.elastic_ips {
                if assigned.to_string() == *public_ip {
                    addresses.push(Address {
                        allocation_id: allocation_id.clone(),
                        public_ip: public_ip.clone(),
                    });
                }
            }
        }
        Ok(DescribeAddressesOutput { addresses })
    }

    pub fn create_security_group(
        &self,
        input: CreateSecurityGroupInput,
    ) -> Result<CreateSecurityGroupOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::CreateSecurityGroup, |ov| {
                ov.create_security_group.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        let group_id = format!("sg-{}", Uuid::new_v4());
        store.security_groups.insert(
            group_id.clone(),
            SecurityGroup {
                group_id: group_id.clone(),
                group_name: input.group_name,
                vpc_id: input.vpc_id,
                ip_permissions: Vec::new(),
            },
        );
        info!(self.log, "created security group"; "group_id" => %group_id);
        Ok(CreateSecurityGroupOutput { group_id })
    }

    pub fn delete_security_group(
        &self,
        input: DeleteSecurityGroupInput,
    ) -> Result<DeleteSecurityGroupOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::DeleteSecurityGroup, |ov| {
                ov.delete_security_group.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        store.security_groups.remove(&input.group_id).ok_or_else(|| {
            Error::not_found_by_id(ResourceType::SecurityGroup, &input.group_id)
        })?;
        info!(self.log, "deleted security group";
            "group_id" => %input.group_id);
        Ok(DeleteSecurityGroupOutput {})
    }

    pub fn describe_security_groups(
        &self,
        input: DescribeSecurityGroupsInput,
    ) -> Result<DescribeSecurityGroupsOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::DescribeSecurityGroups, |ov| {
                ov.describe_security_groups.pop_front()
            })?
        {
            return canned;
        }
        let store = self.store.lock().unwrap();
        // Unknown group ids are skipped, not errors.
        let security_groups = input
            .group_ids
            .iter()
            .filter_map(|id| store.security_groups.get(id).cloned())
            .collect();
        Ok(DescribeSecurityGroupsOutput { security_groups })
    }

    pub fn authorize_security_group_ingress(
        &self,
        input: AuthorizeSecurityGroupIngressInput,
    ) -> Result<AuthorizeSecurityGroupIngressOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::AuthorizeSecurityGroupIngress, |ov| {
                ov.authorize_security_group_ingress.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        let group = store.security_group_mut(&input.group_id)?;
        group.ip_permissions.push(IpPermission {
            ip_protocol: input.ip_protocol,
            from_port: input.from_port,
            to_port: input.to_port,
            ip_ranges: vec![IpRange { cidr_ip: input.cidr_ip }],
        });
        Ok(AuthorizeSecurityGroupIngressOutput {})
    }

    /// Removes the first rule whose protocol or port range differs from
    /// the request.  A request that matches every rule exactly removes
    /// nothing.  Callers ported from the real service depend on this exact
    /// scan, odd as it reads; `revoke_removes_first_differing_rule` in the
    /// engine tests pins it.
    pub fn revoke_security_group_ingress(
        &self,
        input: RevokeSecurityGroupIngressInput,
    ) -> Result<RevokeSecurityGroupIngressOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::RevokeSecurityGroupIngress, |ov| {
                ov.revoke_security_group_ingress.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        let group = store.security_group_mut(&input.group_id)?;
        let position = group.ip_permissions.iter().position(|rule| {
            rule.ip_protocol != input.ip_protocol
                || rule.from_port != input.from_port
                || rule.to_port != input.to_port
        });
        if let Some(index) = position {
            group.ip_permissions.remove(index);
        }
        Ok(RevokeSecurityGroupIngressOutput {})
    }

    pub fn assign_private_ip_addresses(
        &self,
        input: AssignPrivateIpAddressesInput,
    ) -> Result<AssignPrivateIpAddressesOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::AssignPrivateIpAddresses, |ov| {
                ov.assign_private_ip_addresses.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        let subnet_id = store
            .interface_mut(&input.network_interface_id)?
            .subnet_id
            .clone();

        let Some(count) = input.secondary_private_ip_address_count else {
            // Explicit mode: attach the requested addresses verbatim.
            // They are deliberately not checked against (or recorded in)
            // the subnet's assigned pool.
            let interface =
                store.interface_mut(&input.network_interface_id)?;
            for address in &input.private_ip_addresses {
                interface.private_ip_addresses.push(
                    NetworkInterfacePrivateIpAddress {
                        private_ip_address: address.clone(),
                        private_dns_name: private_dns_name(address),
                        primary: false,
                        association: None,
                    },
                );
            }
            return Ok(AssignPrivateIpAddressesOutput {});
        };

        let subnet = store.subnets.get(&subnet_id).cloned().ok_or_else(
            || Error::not_found_by_id(ResourceType::Subnet, &subnet_id),
        )?;
        let block = parse_stored_block(&subnet.cidr_block)?;
        // Allocate the whole batch before reserving anything, so a failure
        // partway through leaves the subnet's pool untouched.
        let mut assigned = Vec::new();
        for _ in 0..count {
            let address = allocate_unique_paced(
                "private address",
                || random_host_in_block(&block),
                |ip| {
                    store.ip_assigned(&subnet_id, ip)
                        || assigned.contains(ip)
                },
                Some(ASSIGN_RETRY_PAUSE),
            )?;
            assigned.push(address);
        }
        for address in &assigned {
            store.reserve_ip(&subnet_id, *address);
        }
        let interface = store.interface_mut(&input.network_interface_id)?;
        for address in assigned {
            let address = address.to_string();
            interface.private_ip_addresses.push(
                NetworkInterfacePrivateIpAddress {
                    private_dns_name: private_dns_name(&address),
                    private_ip_address: address,
                    primary: false,
                    association: None,
                },
            );
        }
        Ok(AssignPrivateIpAddressesOutput {})
    }

    pub fn unassign_private_ip_addresses(
        &self,
        input: UnassignPrivateIpAddressesInput,
    ) -> Result<UnassignPrivateIpAddressesOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::UnassignPrivateIpAddresses, |ov| {
                ov.unassign_private_ip_addresses.pop_front()
            })?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        let interface = store.interface_mut(&input.network_interface_id)?;
        for address in &input.private_ip_addresses {
            if let Some(index) = interface
                .private_ip_addresses
                .iter()
                .position(|entry| entry.private_ip_address == *address)
            {
                interface.private_ip_addresses.remove(index);
            }
        }
        Ok(UnassignPrivateIpAddressesOutput {})
    }

    pub fn describe_instances(
        &self,
        input: DescribeInstancesInput,
    ) -> Result<DescribeInstancesOutput, Error> {
        if let Some(canned) = self.intercept(ApiCall::DescribeInstances, |ov| {
            ov.describe_instances.pop_front()
        })? {
            return canned;
        }
        let store = self.store.lock().unwrap();
        let mut instances = Vec::new();
        for instance_id in &input.instance_ids {
            for instance in &store.instances {
                if instance.instance_id == *instance_id {
                    instances.push(instance.clone());
                }
            }
        }
        Ok(DescribeInstancesOutput {
            reservations: vec![Reservation { instances }],
        })
    }

    pub fn describe_instance_attribute(
        &self,
        input: DescribeInstanceAttributeInput,
    ) -> Result<DescribeInstanceAttributeOutput, Error> {
        if let Some(canned) =
            self.intercept(ApiCall::DescribeInstanceAttribute, |ov| {
                ov.describe_instance_attribute.pop_front()
            })?
        {
            return canned;
        }
        let store = self.store.lock().unwrap();
        let mut output = DescribeInstanceAttributeOutput { groups: Vec::new() };
        if input.attribute == ATTRIBUTE_GROUP_SET {
            for instance in &store.instances {
                if instance.instance_id == input.instance_id {
                    output.groups = instance.security_groups.clone();
                }
            }
        }
        Ok(output)
    }

    pub fn create_tags(
        &self,
        input: CreateTagsInput,
    ) -> Result<CreateTagsOutput, Error> {
        if let Some(canned) = self
            .intercept(ApiCall::CreateTags, |ov| ov.create_tags.pop_front())?
        {
            return canned;
        }
        let mut store = self.store.lock().unwrap();
        for resource_id in &input.resources {
            // Only network interfaces carry tags in this engine.
            if resource_id.starts_with("eni") {
                let interface = store.interface_mut(resource_id)?;
                interface.tag_set = input.tags.clone();
            }
        }
        Ok(CreateTagsOutput {})
    }
}

/// Derives the DNS-style name published for a private address.
fn private_dns_name(address: &str) -> String {
    format!("ip-{}{}", address.replace('.', "-"), PRIVATE_DNS_SUFFIX)
}

/// Parses an address block that was validated when it entered the store.
fn parse_stored_block(cidr_block: &str) -> Result<Ipv4Network, Error> {
    cidr_block.parse().map_err(|e| {
        Error::internal_error(&format!(
            "stored address block {:?} no longer parses: {}",
            cidr_block, e
        ))
    })
}

#[cfg(test)]
mod test {
    use super::private_dns_name;

    #[test]
    fn test_private_dns_name() {
        assert_eq!(
            private_dns_name("10.20.30.40"),
            "ip-10-20-30-40.ap-southeast-1.compute.internal"
        );
    }
}
