// Label endpoints (device management API).

use tracing::debug;

use crate::client::{Client, LABEL_API_VERSION};
use crate::error::Error;
use crate::models::{Label, LabelList};

impl Client {
    /// List every label on the account.
    ///
    /// `GET /label/{ver}/labels`
    pub async fn list_labels(&self) -> Result<Vec<Label>, Error> {
        let url = self.device_url(&format!("label/{LABEL_API_VERSION}/labels"))?;
        debug!("listing labels");
        let list: LabelList = self.get("list_labels", url).await?;
        Ok(list.labels)
    }
}
