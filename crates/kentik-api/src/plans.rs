// Plan endpoints (classic portal API).

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::{Plan, PlanList};

impl Client {
    /// List every plan on the account.
    ///
    /// `GET /api/v5/plans`
    pub async fn list_plans(&self) -> Result<Vec<Plan>, Error> {
        let url = self.portal_url("v5/plans")?;
        debug!("listing plans");
        let list: PlanList = self.get("list_plans", url).await?;
        Ok(list.plans)
    }
}
