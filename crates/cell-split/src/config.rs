//! Decomposition settings.
//!
//! # Example
//!
//! ```
//! use cell_split::{Axis, SplitConfig};
//!
//! let config = SplitConfig::default()
//!     .with_epsilon(1e-4)
//!     .with_axis_order([Axis::X, Axis::Y, Axis::Z]);
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Axis, DEFAULT_EPSILON, EpsilonMath, SplitError, SplitResult};

/// Settings for [`GridDecomposer`](crate::GridDecomposer).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SplitConfig {
    /// The one tolerance used for every plane classification, point
    /// comparison and integer snapping.
    pub epsilon: f64,

    /// Order of the per-axis passes. Changes how work is nested, not which
    /// cell a fragment ends up in.
    pub axis_order: [Axis; 3],

    /// Convert every output fragment to quads.
    pub quadify: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            axis_order: [Axis::X, Axis::Z, Axis::Y],
            quadify: true,
        }
    }
}

impl SplitConfig {
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[must_use]
    pub const fn with_axis_order(mut self, axis_order: [Axis; 3]) -> Self {
        self.axis_order = axis_order;
        self
    }

    #[must_use]
    pub const fn with_quadify(mut self, quadify: bool) -> Self {
        self.quadify = quadify;
        self
    }

    /// Checks the settings and returns the tolerance helpers to split with.
    ///
    /// # Errors
    /// - [`SplitError::InvalidEpsilon`] if `epsilon` is not finite and positive
    /// - [`SplitError::InvalidAxisOrder`] if `axis_order` repeats an axis
    pub fn validate(&self) -> SplitResult<EpsilonMath> {
        let eps = EpsilonMath::new(self.epsilon)?;
        let [a, b, c] = self.axis_order;
        if a == b || b == c || a == c {
            return Err(SplitError::InvalidAxisOrder(self.axis_order));
        }
        Ok(eps)
    }
}
