// kentik-core: idempotent reconcile engine between a desired DeviceSpec
// and the authoritative device state in the Kentik platform.
//
// Every invocation re-derives ground truth from the remote listing
// endpoints; nothing is cached or persisted between runs, which is the
// property that makes re-running after a partial failure safe.

pub mod drift;
pub mod error;
pub mod labels;
pub mod payload;
pub mod reconcile;
pub mod resolve;
pub mod spec;

pub use error::CoreError;
pub use reconcile::{Action, Outcome, Reconciler, match_existing};
pub use spec::{DesiredState, DeviceSpec, DeviceSubtype};
