// Order endpoints

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{Ack, NewOrder, Order, OrderCreated, OrderPatch};

impl PortalClient {
    /// List orders, optionally filtered by status.
    ///
    /// `GET /orders[?status=...]`
    pub async fn list_orders(&self, status: Option<&str>) -> Result<Vec<Order>, Error> {
        match status {
            Some(status) => {
                debug!(status, "listing orders");
                self.get_with_params("orders", &[("status", status.to_owned())])
                    .await
            }
            None => {
                debug!("listing orders");
                self.get("orders").await
            }
        }
    }

    /// `POST /orders`
    pub async fn create_order(&self, order: &NewOrder) -> Result<OrderCreated, Error> {
        debug!(
            material_id = order.material_id,
            site_id = order.site_id,
            quantity = order.quantity,
            "creating order"
        );
        self.post("orders", order).await
    }

    /// Patch status, ETA, delay reason or quantity of one order.
    ///
    /// `PATCH /orders/{id}`
    pub async fn update_order(&self, order_id: u64, patch: &OrderPatch) -> Result<Ack, Error> {
        debug!(order_id, ?patch, "updating order");
        let ack: Option<Ack> = self.patch(&format!("orders/{order_id}"), patch).await?;
        Ok(ack.unwrap_or_default())
    }

    /// `DELETE /orders/{id}`
    pub async fn delete_order(&self, order_id: u64) -> Result<Ack, Error> {
        debug!(order_id, "deleting order");
        let ack: Option<Ack> = self.delete(&format!("orders/{order_id}")).await?;
        Ok(ack.unwrap_or_default())
    }
}
