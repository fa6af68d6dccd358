// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! List-and-filter semantics for describe calls
//!
//! Reproduces the query contract shared by every describe operation:
//!
//! 1. Explicitly requested ids are resolved first.
//! 2. With no filters, the id-resolved set is returned as-is (or the full
//!    resource set when no ids were requested either).
//! 3. Filters whose names this engine does not recognize match nothing: if
//!    no filter name is recognized, the result is empty.
//! 4. Otherwise each recognized filter name narrows the candidate set in a
//!    fixed priority order.  A narrowing step that would leave the set
//!    empty is discarded and the previous candidates are kept, so filters
//!    act independently rather than as a strict running intersection.
//!
//! Step 4's keep-previous-on-empty rule is load-bearing: callers written
//! against the real service rely on this exact chaining, and the
//! compatibility tests pin it.

use crate::api::Filter;
use crate::api::NetworkInterface;
use crate::api::Subnet;
use crate::api::Tag;
use crate::api::Vpc;

const TAG_FILTER_PREFIX: &str = "tag:";

/// One recognized filter name and its match predicate.
pub(crate) struct FilterMatch<T> {
    pub name: &'static str,
    pub matches: fn(&T, &str) -> bool,
}

/// Filter names recognized for subnets, in narrowing priority order.
pub(crate) const SUBNET_FILTERS: &[FilterMatch<Subnet>] = &[
    FilterMatch { name: "vpc-id", matches: |subnet, v| subnet.vpc_id == v },
    FilterMatch {
        name: "availabilityZone",
        matches: |subnet, v| subnet.availability_zone.as_deref() == Some(v),
    },
    FilterMatch {
        name: "cidrBlock",
        matches: |subnet, v| subnet.cidr_block == v,
    },
];

/// Filter names recognized for network interfaces, in narrowing priority
/// order.  Tag filters (`tag:<key>`) narrow last.
pub(crate) const INTERFACE_FILTERS: &[FilterMatch<NetworkInterface>] = &[
    FilterMatch { name: "vpc-id", matches: |nic, v| nic.vpc_id == v },
    FilterMatch { name: "subnet-id", matches: |nic, v| nic.subnet_id == v },
    FilterMatch {
        name: "availabilityZone",
        matches: |nic, v| nic.availability_zone.as_deref() == Some(v),
    },
];

/// No filter names are recognized for VPCs.
pub(crate) const VPC_FILTERS: &[FilterMatch<Vpc>] = &[];

/// Applies the describe contract described in the module docs.
///
/// `resolved` holds the id-resolved resources and `ids_given` says whether
/// the request named ids at all (an id list matching nothing is not the
/// same as no id list).  `tags` supplies the resource's tag set for types
/// supporting `tag:<key>` filters.
pub(crate) fn evaluate<T: Clone>(
    resolved: Vec<T>,
    ids_given: bool,
    full_set: Vec<T>,
    filters: &[Filter],
    stages: &[FilterMatch<T>],
    tags: Option<fn(&T) -> &[Tag]>,
) -> Vec<T> {
    if filters.is_empty() {
        return if ids_given { resolved } else { full_set };
    }

    let recognized = filters.iter().any(|filter| {
        stages.iter().any(|stage| stage.name == filter.name)
            || (tags.is_some() && filter.name.starts_with(TAG_FILTER_PREFIX))
    });
    if !recognized {
        return Vec::new();
    }

    let mut candidates = if ids_given { resolved } else { full_set };

    for stage in stages {
        let stage_filters: Vec<&Filter> =
            filters.iter().filter(|f| f.name == stage.name).collect();
        if stage_filters.is_empty() {
            continue;
        }
        narrow(&mut candidates, |candidate| {
            stage_filters.iter().any(|filter| {
                filter.values.iter().any(|v| (stage.matches)(candidate, v))
            })
        });
    }

    if let Some(tags_of) = tags {
        let tag_filters: Vec<&Filter> = filters
            .iter()
            .filter(|f| f.name.starts_with(TAG_FILTER_PREFIX))
            .collect();
        if !tag_filters.is_empty() {
            narrow(&mut candidates, |candidate| {
                tag_filters.iter().any(|filter| {
                    let key = &filter.name[TAG_FILTER_PREFIX.len()..];
                    // Only the filter's first value participates in a tag
                    // match.
                    match filter.values.first() {
                        Some(value) => tags_of(candidate)
                            .iter()
                            .any(|t| t.key == key && t.value == *value),
                        None => false,
                    }
                })
            });
        }
    }

    candidates
}

/// Replaces `candidates` with its matching subset, unless that subset is
/// empty.
fn narrow<T: Clone>(candidates: &mut Vec<T>, matches: impl Fn(&T) -> bool) {
    let narrowed: Vec<T> =
        candidates.iter().filter(|c| matches(c)).cloned().collect();
    if !narrowed.is_empty() {
        *candidates = narrowed;
    }
}
