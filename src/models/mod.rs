//! Inventory model and derived usage statistics
//!
//! Everything in this module is pure: it takes an inventory snapshot and
//! computes counts and memory figures from it.

pub mod inventory;
pub mod labels;
pub mod stats;

pub use inventory::{Application, Organization, Report, ServiceBinding, Space};
pub use stats::{OrgStats, SpaceStats, org_stats, space_stats};
