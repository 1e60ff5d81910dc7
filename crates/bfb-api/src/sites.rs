// Site endpoints

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::models::{NewSite, Site, SiteCreated};

impl PortalClient {
    /// `GET /sites`
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        debug!("listing sites");
        self.get("sites").await
    }

    /// `POST /sites` with `{"site_name": "...", "status": "..."}`
    pub async fn create_site(&self, site: &NewSite) -> Result<SiteCreated, Error> {
        debug!(name = %site.site_name, status = %site.status, "creating site");
        self.post("sites", site).await
    }
}
