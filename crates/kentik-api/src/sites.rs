// Site endpoints (device management API).

use tracing::debug;

use crate::client::{Client, SITE_API_VERSION};
use crate::error::Error;
use crate::models::{Site, SiteList};

impl Client {
    /// List every site on the account.
    ///
    /// `GET /site/{ver}/sites`
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.device_url(&format!("site/{SITE_API_VERSION}/sites"))?;
        debug!("listing sites");
        let list: SiteList = self.get("list_sites", url).await?;
        Ok(list.sites)
    }
}
