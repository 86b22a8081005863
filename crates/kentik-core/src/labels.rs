//! Label set reconciliation, independent of device field drift.

/// Decide whether the attached label set needs a replace call.
///
/// This is order-sensitive list equality, not set equality: if the
/// remote API returns labels in a different order than submitted, a
/// replace is issued even though the sets match. Kept deliberately —
/// the replace call is idempotent in effect, and set semantics would
/// change observable behavior (see DESIGN.md).
pub fn labels_need_replacing(current: &[u64], desired: &[u64]) -> bool {
    current != desired
}
