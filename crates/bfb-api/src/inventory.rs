// Inventory endpoints

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{Ack, InventoryLine, InventoryPatch};

impl PortalClient {
    /// List inventory lines, optionally for a single site.
    ///
    /// `GET /inventory[?site_id=...]`
    pub async fn list_inventory(&self, site_id: Option<u64>) -> Result<Vec<InventoryLine>, Error> {
        match site_id {
            Some(site_id) => {
                debug!(site_id, "listing inventory");
                self.get_with_params("inventory", &[("site_id", site_id.to_string())])
                    .await
            }
            None => {
                debug!("listing inventory");
                self.get("inventory").await
            }
        }
    }

    /// `PATCH /inventory/{id}` with `qty` and/or `low_threshold`.
    pub async fn update_inventory(
        &self,
        inventory_id: u64,
        patch: &InventoryPatch,
    ) -> Result<Ack, Error> {
        debug!(inventory_id, ?patch, "updating inventory");
        let ack: Option<Ack> = self
            .patch(&format!("inventory/{inventory_id}"), patch)
            .await?;
        Ok(ack.unwrap_or_default())
    }
}
