//! GCP pipeline
//!
//! GCP networks, firewalls and routes are project-global; disks and
//! instances live in zones, not regions. GCP has no sub-accounts and uses
//! firewalls where other vendors use security groups.

use crate::stage::{Scope, StageSpec};
use cloudmirror_cloud::ResourceType;

pub(super) const PUBLIC_STAGES: &[StageSpec] = &[
    StageSpec::new(ResourceType::Region, Scope::Global),
    StageSpec::new(ResourceType::Zone, Scope::PerRegion),
    StageSpec::new(ResourceType::Image, Scope::Global),
];

pub(super) const STAGES: &[StageSpec] = &[
    StageSpec::new(ResourceType::Disk, Scope::PerZone),
    StageSpec::new(ResourceType::Vpc, Scope::Global),
    StageSpec::new(ResourceType::Subnet, Scope::PerRegion),
    StageSpec::new(ResourceType::Eip, Scope::PerRegion),
    StageSpec::new(ResourceType::Firewall, Scope::Global),
    StageSpec::new(ResourceType::Cvm, Scope::PerZone),
    StageSpec::new(ResourceType::RouteTable, Scope::Global),
    StageSpec::new(ResourceType::NetworkInterface, Scope::PerZone),
];
