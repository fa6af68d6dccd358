// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authoritative in-memory state of the simulated control plane
//!
//! One collection per entity type, keyed by natural id, plus the sets of
//! already-assigned values the allocator tests candidates against.  Ordered
//! maps keep describe output stable across repeated calls.  No method here
//! fails; absence comes back as `Option`/`Result` for the operation
//! handlers to turn into not-found errors.

use crate::api::Error;
use crate::api::GroupIdentifier;
use crate::api::Instance;
use crate::api::MacAddr;
use crate::api::NetworkInterface;
use crate::api::ResourceType;
use crate::api::SecurityGroup;
use crate::api::Subnet;
use crate::api::Vpc;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use uuid::Uuid;

/// Name given to the security group every instance is born with.
const DEFAULT_SECURITY_GROUP_NAME: &str = "sg-default";

/// Id of the instance seeded at startup.
const DEFAULT_INSTANCE_ID: &str = "i-default";

pub(crate) struct Store {
    pub vpcs: BTreeMap<String, Vpc>,
    pub subnets: BTreeMap<String, Subnet>,
    /// vpc id -> ids of its subnets.
    pub subnets_by_vpc: BTreeMap<String, Vec<String>>,
    pub interfaces: BTreeMap<String, NetworkInterface>,
    /// subnet id -> addresses handed out from that subnet's block.
    assigned_ips: BTreeMap<String, BTreeSet<Ipv4Addr>>,
    assigned_macs: BTreeSet<MacAddr>,
    /// allocation id -> public address.
    pub elastic_ips: BTreeMap<String, Ipv4Addr>,
    pub security_groups: BTreeMap<String, SecurityGroup>,
    pub instances: Vec<Instance>,
    default_security_group: GroupIdentifier,
}

impl Store {
    /// Builds the seed state: one default security group and one default
    /// instance holding it.
    pub fn new() -> Store {
        let default_security_group = GroupIdentifier {
            group_id: format!("sg-{}", Uuid::new_v4()),
            group_name: DEFAULT_SECURITY_GROUP_NAME.to_string(),
        };
        let mut security_groups = BTreeMap::new();
        security_groups.insert(
            default_security_group.group_id.clone(),
            SecurityGroup {
                group_id: default_security_group.group_id.clone(),
                group_name: default_security_group.group_name.clone(),
                vpc_id: None,
                ip_permissions: Vec::new(),
            },
        );
        let instances = vec![Instance {
            instance_id: DEFAULT_INSTANCE_ID.to_string(),
            security_groups: vec![default_security_group.clone()],
        }];
        Store {
            vpcs: BTreeMap::new(),
            subnets: BTreeMap::new(),
            subnets_by_vpc: BTreeMap::new(),
            interfaces: BTreeMap::new(),
            assigned_ips: BTreeMap::new(),
            assigned_macs: BTreeSet::new(),
            elastic_ips: BTreeMap::new(),
            security_groups,
            instances,
            default_security_group,
        }
    }

    /// The group attached to every instance in addition to its own groups.
    pub fn default_security_group(&self) -> &GroupIdentifier {
        &self.default_security_group
    }

    pub fn interface_mut(
        &mut self,
        id: &str,
    ) -> Result<&mut NetworkInterface, Error> {
        self.interfaces.get_mut(id).ok_or_else(|| {
            Error::not_found_by_id(ResourceType::NetworkInterface, id)
        })
    }

    pub fn security_group_mut(
        &mut self,
        id: &str,
    ) -> Result<&mut SecurityGroup, Error> {
        self.security_groups.get_mut(id).ok_or_else(|| {
            Error::not_found_by_id(ResourceType::SecurityGroup, id)
        })
    }

    pub fn ip_assigned(&self, subnet_id: &str, ip: &Ipv4Addr) -> bool {
        self.assigned_ips
            .get(subnet_id)
            .map(|ips| ips.contains(ip))
            .unwrap_or(false)
    }

    pub fn reserve_ip(&mut self, subnet_id: &str, ip: Ipv4Addr) {
        self.assigned_ips.entry(subnet_id.to_string()).or_default().insert(ip);
    }

    pub fn mac_assigned(&self, mac: &MacAddr) -> bool {
        self.assigned_macs.contains(mac)
    }

    pub fn reserve_mac(&mut self, mac: MacAddr) {
        self.assigned_macs.insert(mac);
    }

    pub fn elastic_ip_assigned(&self, ip: &Ipv4Addr) -> bool {
        self.elastic_ips.values().any(|assigned| assigned == ip)
    }
}

#[cfg(test)]
mod test {
    use super::Store;

    #[test]
    fn test_seed_state() {
        let store = Store::new();
        let default_group = store.default_security_group().clone();
        assert!(default_group.group_id.starts_with("sg-"));
        assert_eq!(default_group.group_name, "sg-default");
        assert!(store.security_groups.contains_key(&default_group.group_id));
        assert_eq!(store.instances.len(), 1);
        assert_eq!(store.instances[0].instance_id, "i-default");
        assert_eq!(
            store.instances[0].security_groups,
            vec![default_group]
        );
    }

    #[test]
    fn test_ip_reservation() {
        let mut store = Store::new();
        let ip = "10.0.0.17".parse().unwrap();
        assert!(!store.ip_assigned("subnet-1", &ip));
        store.reserve_ip("subnet-1", ip);
        assert!(store.ip_assigned("subnet-1", &ip));
        // The same address in a different subnet's block is independent.
        assert!(!store.ip_assigned("subnet-2", &ip));
    }
}
