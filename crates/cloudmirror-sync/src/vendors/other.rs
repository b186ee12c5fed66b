//! Pipeline for hand-registered hosts
//!
//! The `other` source has no provider API topology: no regions, no zones,
//! no public resources. One unpartitioned host sync is the whole run.

use crate::stage::{Scope, StageSpec};
use cloudmirror_cloud::ResourceType;

pub(super) const PUBLIC_STAGES: &[StageSpec] = &[];

pub(super) const STAGES: &[StageSpec] = &[StageSpec::new(ResourceType::Cvm, Scope::Global)];
