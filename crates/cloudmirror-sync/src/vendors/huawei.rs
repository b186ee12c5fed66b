//! HuaWei pipeline
//!
//! Network interfaces reference CVMs, so they close the run.

use crate::stage::{Scope, StageSpec};
use cloudmirror_cloud::ResourceType;

pub(super) const PUBLIC_STAGES: &[StageSpec] = &[
    StageSpec::new(ResourceType::Region, Scope::Global),
    StageSpec::new(ResourceType::Zone, Scope::PerRegion),
    StageSpec::new(ResourceType::Image, Scope::PerRegion),
];

pub(super) const STAGES: &[StageSpec] = &[
    StageSpec::new(ResourceType::SubAccount, Scope::Global),
    StageSpec::new(ResourceType::Disk, Scope::PerRegion),
    StageSpec::new(ResourceType::Vpc, Scope::PerRegion),
    StageSpec::new(ResourceType::Subnet, Scope::PerRegion),
    StageSpec::new(ResourceType::Eip, Scope::PerRegion),
    StageSpec::new(ResourceType::SecurityGroup, Scope::PerRegion),
    StageSpec::new(ResourceType::SecurityGroupRule, Scope::PerRegion),
    StageSpec::new(ResourceType::Cvm, Scope::PerRegion),
    StageSpec::new(ResourceType::SecurityGroupCvmRel, Scope::PerRegion),
    StageSpec::new(ResourceType::RouteTable, Scope::PerRegion),
    StageSpec::new(ResourceType::NetworkInterface, Scope::PerRegion),
];
