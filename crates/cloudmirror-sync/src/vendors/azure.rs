//! Azure pipeline
//!
//! Azure scopes everything to resource groups and has no availability
//! zones; images come from the marketplace and are account-independent.

use crate::stage::{Scope, StageSpec};
use cloudmirror_cloud::ResourceType;

pub(super) const PUBLIC_STAGES: &[StageSpec] = &[
    StageSpec::new(ResourceType::Region, Scope::Global),
    StageSpec::new(ResourceType::Image, Scope::Global),
];

pub(super) const STAGES: &[StageSpec] = &[
    StageSpec::new(ResourceType::SubAccount, Scope::Global),
    StageSpec::new(ResourceType::Disk, Scope::PerResourceGroup),
    StageSpec::new(ResourceType::Vpc, Scope::PerResourceGroup),
    StageSpec::new(ResourceType::Subnet, Scope::PerResourceGroup),
    StageSpec::new(ResourceType::Eip, Scope::PerResourceGroup),
    StageSpec::new(ResourceType::SecurityGroup, Scope::PerResourceGroup),
    StageSpec::new(ResourceType::SecurityGroupRule, Scope::PerResourceGroup),
    StageSpec::new(ResourceType::Cvm, Scope::PerResourceGroup),
    StageSpec::new(ResourceType::SecurityGroupCvmRel, Scope::PerResourceGroup),
    StageSpec::new(ResourceType::NetworkInterface, Scope::PerResourceGroup),
];
