// Read-only endpoints: KPI aggregate, health check, reference lists.

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{Health, KpiSnapshot, Material, Supplier};

impl PortalClient {
    /// `GET /kpi`
    pub async fn get_kpi(&self) -> Result<KpiSnapshot, Error> {
        debug!("fetching kpi snapshot");
        self.get("kpi").await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Health, Error> {
        self.get("health").await
    }

    /// `GET /materials`
    pub async fn list_materials(&self) -> Result<Vec<Material>, Error> {
        debug!("listing materials");
        self.get("materials").await
    }

    /// `GET /suppliers`
    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, Error> {
        debug!("listing suppliers");
        self.get("suppliers").await
    }
}
