//! Current ratio signal.

use tercile_primitives::Panel;
use tercile_traits::PanelSignal;

/// Current assets over current liabilities.
///
/// Undefined when liabilities are zero or negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentRatio;

impl PanelSignal for CurrentRatio {
    fn name(&self) -> &str {
        "current_ratio"
    }

    fn compute(&self, panel: &Panel) -> Vec<Option<f64>> {
        panel
            .iter()
            .map(|o| {
                (o.current_liabilities > 0.0)
                    .then(|| o.current_assets / o.current_liabilities)
                    .filter(|r| r.is_finite())
            })
            .collect()
    }
}
