// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated EC2 control plane implementation

mod allocator;
mod ec2;
mod filter;
mod recorder;
mod store;

pub use ec2::MockEc2;
pub use recorder::ApiCall;
pub use recorder::OverrideTable;
pub use recorder::Recorder;
