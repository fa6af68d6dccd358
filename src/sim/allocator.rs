// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Retry-until-unique allocation
//!
//! Everything this engine hands out that must never collide (private
//! addresses, interface ids, hardware addresses, public addresses) goes
//! through [`allocate_unique`]: draw a candidate from a generator, test it
//! against the set of values already assigned, and retry on collision.  The
//! candidate spaces vastly exceed the number of values a test will ever
//! allocate, so the loop terminates quickly in practice; a bounded-attempts
//! guard turns a pathologically full space into a `ServiceUnavailable`
//! error instead of a hang.
//!
//! Callers are expected to hold the store lock across the allocation *and*
//! the subsequent reservation, so that check-then-insert is one critical
//! section.

use crate::api::Error;
use crate::api::MacAddr;
use ipnetwork::Ipv4Network;
use rand::thread_rng;
use rand::Rng;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Upper bound on generator invocations before giving up.
const MAX_ATTEMPTS: usize = 1000;

/// Repeatedly invokes `generate` until `in_use` rejects the candidate.
pub(crate) fn allocate_unique<T>(
    what: &str,
    generate: impl FnMut() -> Result<T, Error>,
    in_use: impl FnMut(&T) -> bool,
) -> Result<T, Error> {
    allocate_unique_paced(what, generate, in_use, None)
}

/// Like [`allocate_unique`], but sleeps for `pause` after each collision.
///
/// Bulk address assignment uses this to bound the CPU burned by a retry
/// storm when a subnet's block is nearly full.
pub(crate) fn allocate_unique_paced<T>(
    what: &str,
    mut generate: impl FnMut() -> Result<T, Error>,
    mut in_use: impl FnMut(&T) -> bool,
    pause: Option<Duration>,
) -> Result<T, Error> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = generate()?;
        if !in_use(&candidate) {
            return Ok(candidate);
        }
        if let Some(pause) = pause {
            std::thread::sleep(pause);
        }
    }
    Err(Error::unavail(&format!(
        "exhausted {} attempts allocating a unique {}",
        MAX_ATTEMPTS, what
    )))
}

/// Picks a uniformly random usable host address inside `block`.
///
/// The network and broadcast addresses are excluded, so blocks smaller than
/// /31 have no usable hosts and are rejected.
pub(crate) fn random_host_in_block(
    block: &Ipv4Network,
) -> Result<Ipv4Addr, Error> {
    if block.prefix() >= 31 {
        return Err(Error::invalid_value(
            "CidrBlock",
            &format!("block {} has no usable host addresses", block),
        ));
    }
    let span = 1u64 << (32 - block.prefix());
    let host = thread_rng().gen_range(1..span - 1) as u32;
    Ok(Ipv4Addr::from(u32::from(block.network()) + host))
}

/// Generates a random locally-administered, unicast hardware address.
pub(crate) fn random_mac() -> MacAddr {
    let mut bytes = [0u8; 6];
    thread_rng().fill(&mut bytes);
    bytes[0] = (bytes[0] | 0x02) & 0xfe;
    MacAddr(macaddr::MacAddr6::from(bytes))
}

/// Generates a random public address for an elastic IP allocation.
pub(crate) fn random_public_address() -> Ipv4Addr {
    Ipv4Addr::from(thread_rng().gen::<u32>())
}

/// Generates the short numeric suffix used for `subnet-`/`eni-` style ids.
pub(crate) fn random_id_suffix() -> u32 {
    thread_rng().gen_range(1000..=9999)
}

#[cfg(test)]
mod test {
    use super::allocate_unique;
    use super::random_host_in_block;
    use super::random_id_suffix;
    use super::random_mac;
    use crate::api::Error;
    use ipnetwork::Ipv4Network;
    use std::collections::BTreeSet;

    #[test]
    fn test_allocate_skips_colliding_candidates() {
        let mut candidates = vec![1, 1, 2, 3].into_iter();
        let in_use = BTreeSet::from([1, 2]);
        let value = allocate_unique(
            "test value",
            || Ok(candidates.next().unwrap()),
            |v| in_use.contains(v),
        )
        .unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn test_allocate_gives_up_on_full_space() {
        let result =
            allocate_unique("test value", || Ok(7), |_| true).unwrap_err();
        assert!(matches!(result, Error::ServiceUnavailable { .. }));
    }

    #[test]
    fn test_allocate_propagates_generator_errors() {
        let result = allocate_unique(
            "test value",
            || Err::<u32, _>(Error::invalid_request("boom")),
            |_| false,
        )
        .unwrap_err();
        assert_eq!(result, Error::invalid_request("boom"));
    }

    #[test]
    fn test_random_host_stays_inside_block() {
        let block: Ipv4Network = "192.168.7.0/24".parse().unwrap();
        for _ in 0..500 {
            let host = random_host_in_block(&block).unwrap();
            assert!(block.contains(host));
            assert_ne!(host, block.network());
            assert_ne!(host, block.broadcast());
        }
    }

    #[test]
    fn test_random_host_rejects_tiny_blocks() {
        for cidr in ["10.0.0.0/31", "10.0.0.1/32"] {
            let block: Ipv4Network = cidr.parse().unwrap();
            let error = random_host_in_block(&block).unwrap_err();
            assert!(matches!(error, Error::InvalidValue { .. }));
        }
    }

    #[test]
    fn test_random_mac_is_local_unicast() {
        for _ in 0..100 {
            let mac = random_mac();
            let first = mac.as_bytes()[0];
            assert_eq!(first & 0x02, 0x02, "locally administered bit");
            assert_eq!(first & 0x01, 0, "unicast bit");
        }
    }

    #[test]
    fn test_id_suffix_range() {
        for _ in 0..100 {
            let suffix = random_id_suffix();
            assert!((1000..=9999).contains(&suffix));
        }
    }
}
