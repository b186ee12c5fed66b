//! Vendor and resource-type taxonomy

use serde::{Deserialize, Serialize};

/// A supported cloud vendor, or the synthetic `Other` source for hosts that
/// are registered by hand rather than discovered through a provider API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    TCloud,
    Aws,
    HuaWei,
    Gcp,
    Azure,
    Other,
}

impl Vendor {
    pub const ALL: [Vendor; 6] = [
        Vendor::TCloud,
        Vendor::Aws,
        Vendor::HuaWei,
        Vendor::Gcp,
        Vendor::Azure,
        Vendor::Other,
    ];

    /// Whether the vendor exposes a region topology. `Other` hosts carry no
    /// region and are always treated as present by the public-resource check.
    pub fn has_regions(&self) -> bool {
        !matches!(self, Vendor::Other)
    }

    /// Azure has no availability zones; `Other` has no topology at all.
    pub fn has_zones(&self) -> bool {
        !matches!(self, Vendor::Azure | Vendor::Other)
    }

    pub fn has_images(&self) -> bool {
        !matches!(self, Vendor::Other)
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vendor::TCloud => write!(f, "tcloud"),
            Vendor::Aws => write!(f, "aws"),
            Vendor::HuaWei => write!(f, "huawei"),
            Vendor::Gcp => write!(f, "gcp"),
            Vendor::Azure => write!(f, "azure"),
            Vendor::Other => write!(f, "other"),
        }
    }
}

/// A category of cloud inventory mirrored independently. Not every vendor
/// carries every type; the per-vendor pipelines pick the applicable subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Region,
    Zone,
    Image,
    SubAccount,
    Disk,
    Vpc,
    Subnet,
    Eip,
    SecurityGroup,
    SecurityGroupRule,
    Cvm,
    SecurityGroupCvmRel,
    RouteTable,
    NetworkInterface,
    Firewall,
    LoadBalancer,
    Cert,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceType::Region => "region",
            ResourceType::Zone => "zone",
            ResourceType::Image => "image",
            ResourceType::SubAccount => "sub_account",
            ResourceType::Disk => "disk",
            ResourceType::Vpc => "vpc",
            ResourceType::Subnet => "subnet",
            ResourceType::Eip => "eip",
            ResourceType::SecurityGroup => "security_group",
            ResourceType::SecurityGroupRule => "security_group_rule",
            ResourceType::Cvm => "cvm",
            ResourceType::SecurityGroupCvmRel => "security_group_cvm_rel",
            ResourceType::RouteTable => "route_table",
            ResourceType::NetworkInterface => "network_interface",
            ResourceType::Firewall => "firewall",
            ResourceType::LoadBalancer => "load_balancer",
            ResourceType::Cert => "cert",
        };
        write!(f, "{}", name)
    }
}
