// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data structures for the simulated EC2 API
//!
//! These are the request and response payloads of every supported call,
//! along with the resource records stored by the engine.  Field names
//! serialize in PascalCase so the wire shape matches the published EC2
//! schema (`VpcId`, `CidrBlock`, and so on).  All identifiers are strings
//! carrying the familiar prefixes (`vpc-`, `subnet-`, `eni-`, `sg-`,
//! `eipalloc-`).

mod error;

pub use error::Error;
pub use error::LookupType;
pub use error::ResourceType;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

/// The `MacAddr` represents a Media Access Control (MAC) address, used to
/// uniquely identify hardware devices on a network.
// NOTE: We're using the `macaddr` crate for the internal representation,
// but that crate does not implement `JsonSchema`.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct MacAddr(pub macaddr::MacAddr6);

impl TryFrom<String> for MacAddr {
    type Error = macaddr::ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse().map(MacAddr)
    }
}

impl std::ops::Deref for MacAddr {
    type Target = macaddr::MacAddr6;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for MacAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl JsonSchema for MacAddr {
    fn schema_name() -> String {
        "MacAddr".to_string()
    }

    fn json_schema(
        _: &mut schemars::gen::SchemaGenerator,
    ) -> schemars::schema::Schema {
        schemars::schema::Schema::Object(schemars::schema::SchemaObject {
            metadata: Some(Box::new(schemars::schema::Metadata {
                title: Some("A MAC address".to_string()),
                description: Some(
                    "A Media Access Control address, in EUI-48 format"
                        .to_string(),
                ),
                examples: vec!["ff:ff:ff:ff:ff:ff".into()],
                ..Default::default()
            })),
            instance_type: Some(schemars::schema::SingleOrVec::Single(
                Box::new(schemars::schema::InstanceType::String),
            )),
            string: Some(Box::new(schemars::schema::StringValidation {
                max_length: Some(17), // 12 hex characters and 5 separators
                min_length: Some(17),
                pattern: Some(
                    r#"^([0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}$"#.to_string(),
                ),
            })),
            ..Default::default()
        })
    }
}

/// A key/value pair attached to a resource.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A named predicate narrowing a describe call.
///
/// A resource matches a filter when any of the filter's values matches; see
/// the engine documentation for how multiple filters combine.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

/// A virtual private cloud: the parent of subnets.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vpc {
    pub vpc_id: String,
    pub cidr_block: Option<String>,
}

/// State of a secondary address-block association on a subnet.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubnetCidrBlockState {
    pub state: String,
}

/// A secondary IPv6 address block associated with a subnet.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubnetIpv6CidrBlockAssociation {
    pub ipv6_cidr_block: String,
    pub association_id: String,
    pub ipv6_cidr_block_state: SubnetCidrBlockState,
}

/// A subnet: an address block carved out of a VPC.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    pub subnet_id: String,
    pub vpc_id: String,
    pub cidr_block: String,
    pub availability_zone: Option<String>,
    #[serde(default)]
    pub ipv6_cidr_block_association_set: Vec<SubnetIpv6CidrBlockAssociation>,
}

/// An elastic IP association attached to one private address of a network
/// interface.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInterfaceAssociation {
    pub allocation_id: Option<String>,
    pub public_ip: Option<String>,
    pub association_id: Option<String>,
}

/// One private address held by a network interface.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInterfacePrivateIpAddress {
    pub private_ip_address: String,
    pub private_dns_name: String,
    pub primary: bool,
    pub association: Option<NetworkInterfaceAssociation>,
}

/// A virtual network interface attached to a subnet.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInterface {
    pub network_interface_id: String,
    pub subnet_id: String,
    pub vpc_id: String,
    pub availability_zone: Option<String>,
    pub description: Option<String>,
    pub mac_address: MacAddr,
    /// The primary private address; also the first entry of
    /// `private_ip_addresses`.
    pub private_ip_address: String,
    pub private_dns_name: String,
    pub private_ip_addresses: Vec<NetworkInterfacePrivateIpAddress>,
    #[serde(default)]
    pub tag_set: Vec<Tag>,
}

/// A source range an ingress rule applies to.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpRange {
    pub cidr_ip: Option<String>,
}

/// One ingress rule of a security group.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpPermission {
    pub ip_protocol: String,
    pub from_port: Option<i64>,
    pub to_port: Option<i64>,
    pub ip_ranges: Vec<IpRange>,
}

/// A security group and its ordered ingress rules.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: String,
    pub vpc_id: Option<String>,
    #[serde(default)]
    pub ip_permissions: Vec<IpPermission>,
}

/// A security group reference as carried on an instance.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupIdentifier {
    pub group_id: String,
    pub group_name: String,
}

/// A compute instance.  Instances have no create/delete lifecycle in this
/// engine; they are seeded at startup or injected by a test.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    pub instance_id: String,
    #[serde(default)]
    pub security_groups: Vec<GroupIdentifier>,
}

/// A live elastic IP allocation.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub allocation_id: String,
    pub public_ip: String,
}

/// A group of instances returned together by a describe call.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reservation {
    pub instances: Vec<Instance>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeVpcsInput {
    #[serde(default)]
    pub vpc_ids: Vec<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeVpcsOutput {
    pub vpcs: Vec<Vpc>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSubnetInput {
    pub vpc_id: String,
    pub cidr_block: String,
    pub availability_zone: Option<String>,
    /// When present, recorded as a secondary address-block association on
    /// the new subnet.
    pub ipv6_cidr_block: Option<String>,
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSubnetOutput {
    pub subnet: Subnet,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSubnetsInput {
    #[serde(default)]
    pub subnet_ids: Vec<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSubnetsOutput {
    pub subnets: Vec<Subnet>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSubnetInput {
    pub subnet_id: String,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSubnetOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct CreateNetworkInterfaceInput {
    pub subnet_id: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateNetworkInterfaceOutput {
    pub network_interface: NetworkInterface,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteNetworkInterfaceInput {
    pub network_interface_id: String,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteNetworkInterfaceOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeNetworkInterfacesInput {
    #[serde(default)]
    pub network_interface_ids: Vec<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeNetworkInterfacesOutput {
    pub network_interfaces: Vec<NetworkInterface>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct AllocateAddressInput {
    pub domain: Option<String>,
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocateAddressOutput {
    pub public_ip: String,
    pub allocation_id: String,
    pub domain: String,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct ReleaseAddressInput {
    pub allocation_id: String,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct ReleaseAddressOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct AssociateAddressInput {
    pub network_interface_id: String,
    pub private_ip_address: String,
    pub allocation_id: Option<String>,
    pub public_ip: Option<String>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct AssociateAddressOutput {
    /// The generated association id, when the named private address was
    /// present on the interface.
    pub association_id: Option<String>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DisassociateAddressInput {
    pub association_id: String,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DisassociateAddressOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeAddressesInput {
    #[serde(default)]
    pub public_ips: Vec<String>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeAddressesOutput {
    pub addresses: Vec<Address>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSecurityGroupInput {
    pub group_name: String,
    pub vpc_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSecurityGroupOutput {
    pub group_id: String,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSecurityGroupInput {
    pub group_id: String,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSecurityGroupOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSecurityGroupsInput {
    #[serde(default)]
    pub group_ids: Vec<String>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSecurityGroupsOutput {
    pub security_groups: Vec<SecurityGroup>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct AuthorizeSecurityGroupIngressInput {
    pub group_id: String,
    pub ip_protocol: String,
    pub from_port: Option<i64>,
    pub to_port: Option<i64>,
    pub cidr_ip: Option<String>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct AuthorizeSecurityGroupIngressOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct RevokeSecurityGroupIngressInput {
    pub group_id: String,
    pub ip_protocol: String,
    pub from_port: Option<i64>,
    pub to_port: Option<i64>,
    pub cidr_ip: Option<String>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct RevokeSecurityGroupIngressOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct AssignPrivateIpAddressesInput {
    pub network_interface_id: String,
    /// Explicit addresses to attach verbatim.  Consulted only when
    /// `secondary_private_ip_address_count` is absent.
    #[serde(default)]
    pub private_ip_addresses: Vec<String>,
    /// When present, that many fresh addresses are allocated from the
    /// interface's subnet block instead.
    pub secondary_private_ip_address_count: Option<i64>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct AssignPrivateIpAddressesOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct UnassignPrivateIpAddressesInput {
    pub network_interface_id: String,
    #[serde(default)]
    pub private_ip_addresses: Vec<String>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct UnassignPrivateIpAddressesOutput {}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeInstancesInput {
    #[serde(default)]
    pub instance_ids: Vec<String>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeInstancesOutput {
    pub reservations: Vec<Reservation>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeInstanceAttributeInput {
    pub instance_id: String,
    pub attribute: String,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeInstanceAttributeOutput {
    /// Populated for the `groupSet` attribute; other attributes are not
    /// modeled.
    pub groups: Vec<GroupIdentifier>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTagsInput {
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(
    Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTagsOutput {}
