//! Inventory source selection

use std::path::{Path, PathBuf};

use clap::Args;

/// Where to read the inventory from.
///
/// Without `--inventory` the inventory is fetched live from the platform API.
#[derive(Args, Debug, Default, Clone)]
pub struct InventoryArgs {
    /// Read the inventory from a JSON snapshot instead of the API
    #[arg(long, short = 'i', value_name = "FILE")]
    pub inventory: Option<PathBuf>,
}

impl InventoryArgs {
    pub fn snapshot(&self) -> Option<&Path> {
        self.inventory.as_deref()
    }
}
