//! The reconcile pipeline: resolve references, match by name, diff, and
//! issue the minimal set of mutating calls.
//!
//! One sequential chain of blocking-style awaits per invocation. Any
//! failing call aborts the run; there is no rollback. Two concurrent
//! runs against the same device name are not coordinated here — the
//! platform's own concurrency control is the only protection.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use kentik_api::Client;
use kentik_api::models::DeviceSummary;

use crate::drift::needs_update;
use crate::error::CoreError;
use crate::labels::labels_need_replacing;
use crate::payload::build_payload;
use crate::resolve::{resolve_label_ids, resolve_plan_id, resolve_site_id};
use crate::spec::{DesiredState, DeviceSpec};

/// Which state-machine transition the run took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
    Deleted,
    Unchanged,
}

/// Result of one reconcile run.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Whether any mutating call was issued (or, in check mode, would
    /// have been).
    pub changed: bool,

    /// The device id, when known. Always set after a create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<u64>,

    pub action: Action,

    /// Whether the label set was (or would be) replaced. Independent of
    /// `action`: an otherwise unchanged device can still have its labels
    /// replaced.
    pub labels_replaced: bool,
}

impl Outcome {
    fn unchanged(device_id: Option<u64>) -> Self {
        Self {
            changed: false,
            device_id,
            action: Action::Unchanged,
            labels_replaced: false,
        }
    }
}

/// Find the id of the device whose name exactly equals `name`.
///
/// The platform enforces name uniqueness within an account, so the first
/// match is the only match.
pub fn match_existing(devices: &[DeviceSummary], name: &str) -> Option<u64> {
    devices.iter().find(|d| d.device_name == name).map(|d| d.id)
}

/// Reconciles a single [`DeviceSpec`] against the remote account.
///
/// Holds no state between runs: every invocation re-reads remote ground
/// truth, which is what makes repeated runs idempotent.
pub struct Reconciler<'a> {
    client: &'a Client,
    check_mode: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            check_mode: false,
        }
    }

    /// In check mode the full decision is computed but no mutating call
    /// is issued.
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    /// Run the reconcile pipeline for one spec.
    pub async fn reconcile(&self, spec: &DeviceSpec) -> Result<Outcome, CoreError> {
        // Resolve all cross-references up front so an unknown name fails
        // before any mutating call.
        let desired_labels = if spec.labels.is_empty() {
            None
        } else {
            Some(resolve_label_ids(self.client, &spec.labels).await?)
        };
        let plan_id = resolve_plan_id(self.client, &spec.plan_name).await?;
        let site_id = if let Some(title) = spec.site_name.as_deref() {
            Some(resolve_site_id(self.client, title).await?)
        } else {
            None
        };
        let desired = build_payload(spec, plan_id, site_id);

        let devices = self.client.list_devices().await?;
        let existing = match_existing(&devices, &spec.device_name);
        debug!(name = %spec.device_name, ?existing, state = ?spec.state, "matched existing devices");

        match (existing, spec.state) {
            (Some(id), DesiredState::Present) => {
                self.converge_existing(id, &desired, desired_labels.as_deref())
                    .await
            }
            (Some(id), DesiredState::Absent) => {
                info!(id, name = %spec.device_name, "deleting device");
                if !self.check_mode {
                    self.client.delete_device(id).await?;
                }
                Ok(Outcome {
                    changed: true,
                    device_id: Some(id),
                    action: Action::Deleted,
                    labels_replaced: false,
                })
            }
            (None, DesiredState::Present) => {
                self.create(spec, &desired, desired_labels.as_deref()).await
            }
            (None, DesiredState::Absent) => Ok(Outcome::unchanged(None)),
        }
    }

    /// Converge an existing device: field drift and label drift are
    /// detected (and repaired) independently of each other.
    async fn converge_existing(
        &self,
        id: u64,
        desired: &Map<String, Value>,
        desired_labels: Option<&[u64]>,
    ) -> Result<Outcome, CoreError> {
        let remote = self.client.get_device(id).await?;

        let field_drift = needs_update(&remote, desired);
        // An empty resolved label set never mutates: labels cannot be
        // cleared through the reconciler, only replaced.
        let label_drift = desired_labels.is_some_and(|want| {
            !want.is_empty() && labels_need_replacing(&remote.label_ids(), want)
        });

        if field_drift {
            info!(id, "device drifted, updating");
            if !self.check_mode {
                self.client.update_device(id, desired).await?;
            }
        }
        if label_drift {
            info!(id, "label set drifted, replacing");
            if !self.check_mode {
                let want = desired_labels.unwrap_or_default();
                self.client.replace_device_labels(id, want).await?;
            }
        }

        Ok(Outcome {
            changed: field_drift || label_drift,
            device_id: Some(id),
            action: if field_drift {
                Action::Updated
            } else {
                Action::Unchanged
            },
            labels_replaced: label_drift,
        })
    }

    async fn create(
        &self,
        spec: &DeviceSpec,
        desired: &Map<String, Value>,
        desired_labels: Option<&[u64]>,
    ) -> Result<Outcome, CoreError> {
        let wants_labels = desired_labels.is_some_and(|want| !want.is_empty());

        info!(name = %spec.device_name, "creating device");
        if self.check_mode {
            return Ok(Outcome {
                changed: true,
                device_id: None,
                action: Action::Created,
                labels_replaced: wants_labels,
            });
        }

        let device = self.client.create_device(desired).await?;

        // A fresh device has no labels attached, so a non-empty desired
        // set always needs the replace call.
        if wants_labels {
            let want = desired_labels.unwrap_or_default();
            self.client.replace_device_labels(device.id, want).await?;
        }

        Ok(Outcome {
            changed: true,
            device_id: Some(device.id),
            action: Action::Created,
            labels_replaced: wants_labels,
        })
    }
}
