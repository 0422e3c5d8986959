//! Per-observation signal trait definitions.

use tercile_primitives::Panel;

/// A signal computed for every observation of a cleaned panel.
///
/// Implementations return one entry per panel row, aligned with
/// [`Panel::observations`]. `None` marks an undefined value (a zero denominator, a
/// missing predecessor, an infinite result); implementations never return NaN or
/// infinity inside `Some`.
pub trait PanelSignal: Send + Sync {
    /// Returns the name of this signal.
    fn name(&self) -> &str;

    /// Compute the signal for every observation.
    fn compute(&self, panel: &Panel) -> Vec<Option<f64>>;
}
