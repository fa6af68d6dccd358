// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory simulation of the EC2 virtual-networking API
//!
//! This crate provides [`sim::MockEc2`], a stateful stand-in for the subset
//! of the EC2 control plane that provisioning logic talks to: VPCs, subnets,
//! network interfaces, security groups, elastic IP allocations, and
//! instances.  The simulation answers the same request/response calls the
//! real API would, with the same payload shapes, so callers can be exercised
//! in tests without a live account.
//!
//! Every call runs through a recorder first, so a test can queue a canned
//! error or a canned response for any call and later assert on exactly which
//! calls were made and in what order.
//!
//! ```
//! use mock_ec2::api::{CreateSubnetInput, Vpc};
//! use mock_ec2::sim::MockEc2;
//! use slog::{o, Discard, Logger};
//!
//! let mock = MockEc2::new(Logger::root(Discard, o!()));
//! mock.append_vpc(Vpc { vpc_id: "vpc-1".to_string(), cidr_block: None });
//! let output = mock
//!     .create_subnet(CreateSubnetInput {
//!         vpc_id: "vpc-1".to_string(),
//!         cidr_block: "10.0.0.0/24".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert!(output.subnet.subnet_id.starts_with("subnet-"));
//! ```

pub mod api;
pub mod sim;
