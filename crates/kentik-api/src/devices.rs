// Device endpoints (device management API).
//
// Create/update bodies ride inside a `{ "device": … }` envelope; the
// label-replace endpoint takes the full desired label set (replace
// semantics, not incremental add/remove).

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::{Client, DEVICE_API_VERSION};
use crate::error::Error;
use crate::models::{Device, DeviceList, DeviceSummary, DeviceWrapper};

impl Client {
    /// List every device on the account (summary records only).
    ///
    /// `GET /device/{ver}/device`
    pub async fn list_devices(&self) -> Result<Vec<DeviceSummary>, Error> {
        let url = self.device_url(&format!("device/{DEVICE_API_VERSION}/device"))?;
        debug!("listing devices");
        let list: DeviceList = self.get("list_devices", url).await?;
        Ok(list.devices)
    }

    /// Fetch the full representation of a single device.
    ///
    /// `GET /device/{ver}/device/{id}`
    pub async fn get_device(&self, id: u64) -> Result<Device, Error> {
        let url = self.device_url(&format!("device/{DEVICE_API_VERSION}/device/{id}"))?;
        debug!(id, "fetching device");
        let wrapper: DeviceWrapper = self.get("get_device", url).await?;
        Ok(wrapper.device)
    }

    /// Create a device from a wire payload.
    ///
    /// `POST /device/{ver}/device` with body `{ "device": { … } }`
    pub async fn create_device(&self, payload: &Map<String, Value>) -> Result<Device, Error> {
        let url = self.device_url(&format!("device/{DEVICE_API_VERSION}/device"))?;
        debug!("creating device");
        let wrapper: DeviceWrapper = self
            .post("create_device", url, &json!({ "device": payload }))
            .await?;
        Ok(wrapper.device)
    }

    /// Update an existing device from a wire payload.
    ///
    /// `PUT /device/{ver}/device/{id}` with body `{ "device": { …, "id": id } }`
    pub async fn update_device(
        &self,
        id: u64,
        payload: &Map<String, Value>,
    ) -> Result<Device, Error> {
        let url = self.device_url(&format!("device/{DEVICE_API_VERSION}/device/{id}"))?;
        debug!(id, "updating device");

        let mut body = payload.clone();
        body.insert("id".into(), Value::from(id));

        let wrapper: DeviceWrapper = self
            .put("update_device", url, &json!({ "device": body }))
            .await?;
        Ok(wrapper.device)
    }

    /// Delete a device.
    ///
    /// `DELETE /device/{ver}/device/{id}`
    pub async fn delete_device(&self, id: u64) -> Result<(), Error> {
        let url = self.device_url(&format!("device/{DEVICE_API_VERSION}/device/{id}"))?;
        debug!(id, "deleting device");
        self.delete("delete_device", url).await
    }

    /// Replace the full label set attached to a device.
    ///
    /// `PUT /device/{ver}/device/{id}/labels` with body
    /// `{ "id": id, "labels": [{ "id": … }, …] }`
    pub async fn replace_device_labels(
        &self,
        id: u64,
        label_ids: &[u64],
    ) -> Result<Device, Error> {
        let url = self.device_url(&format!("device/{DEVICE_API_VERSION}/device/{id}/labels"))?;
        debug!(id, ?label_ids, "replacing device labels");

        let labels: Vec<Value> = label_ids.iter().map(|l| json!({ "id": l })).collect();
        let body = json!({ "id": id, "labels": labels });

        let wrapper: DeviceWrapper = self.put("update_device_labels", url, &body).await?;
        Ok(wrapper.device)
    }
}
