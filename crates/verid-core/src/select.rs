//! Document selection — which of the retried attempts to persist.

use crate::provider::{DocumentAttempt, VerificationResult};

/// Pick the single attempt to use, or `None` if no attempt qualifies.
///
/// An attempt qualifies when it carries an images bundle with a usable front
/// URL. Among qualifying attempts the one with the highest ordinal wins:
/// later re-captures supersede earlier ones. The winner must also carry
/// extracted data, otherwise there is nothing to resolve fields from and the
/// result is `None`.
///
/// `None` is a normal, frequent outcome (e.g. the provider is still
/// processing), not an error.
pub fn usable_attempt(result: &VerificationResult) -> Option<&DocumentAttempt> {
  let chosen = result
    .attempts
    .iter()
    .filter(|a| a.images.as_ref().is_some_and(|i| i.has_front()))
    .max_by_key(|a| a.ordinal)?;

  if chosen.extracted.is_none() {
    return None;
  }
  Some(chosen)
}
