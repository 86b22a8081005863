use thiserror::Error;

/// Reconcile-level error type.
///
/// Every variant is terminal for the invocation: there is no retry and
/// no partial-state cleanup. If a create succeeds but a later label
/// replace fails, the device is left created but unlabeled — re-running
/// the reconciler finds it and performs only the remaining step.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced plan/site/label name has no remote match. These are
    /// hard input errors, never an auto-create.
    #[error("{entity} '{name}' does not exist")]
    NotFound { entity: &'static str, name: String },

    /// Failure from the HTTP layer (transport, auth, or a non-success
    /// API response), surfaced verbatim.
    #[error(transparent)]
    Api(#[from] kentik_api::Error),
}
