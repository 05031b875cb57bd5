//! Splitting geometry along a plane into negative, on-plane and positive parts.

use crate::{EpsilonMath, Plane, Sign};

/// The result of cutting something by a plane: at most one part per [`Sign`].
///
/// - `negative`: the part strictly behind the plane (vertices on the plane
///   included as shared boundary)
/// - `zero`: the part lying in the plane
/// - `positive`: the part strictly in front of the plane (vertices on the
///   plane included as shared boundary)
#[derive(Debug, Clone, PartialEq)]
pub struct Sided<T> {
    pub negative: Option<T>,
    pub zero: Option<T>,
    pub positive: Option<T>,
}

impl<T> Sided<T> {
    /// A result with no part on any side.
    pub fn empty() -> Self {
        Self {
            negative: None,
            zero: None,
            positive: None,
        }
    }

    /// A result with a single part on `sign`.
    pub fn only(sign: Sign, value: T) -> Self {
        let mut sided = Self::empty();
        *sided.slot_mut(sign) = Some(value);
        sided
    }

    pub fn get(&self, sign: Sign) -> Option<&T> {
        match sign {
            Sign::Negative => self.negative.as_ref(),
            Sign::Zero => self.zero.as_ref(),
            Sign::Positive => self.positive.as_ref(),
        }
    }

    /// Mutable access to the slot for `sign`.
    pub fn slot_mut(&mut self, sign: Sign) -> &mut Option<T> {
        match sign {
            Sign::Negative => &mut self.negative,
            Sign::Zero => &mut self.zero,
            Sign::Positive => &mut self.positive,
        }
    }

    /// Returns `true` if no side holds a part.
    pub fn is_empty(&self) -> bool {
        self.negative.is_none() && self.zero.is_none() && self.positive.is_none()
    }

    /// Number of sides holding a part.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Iterates over the present parts in `Negative`, `Zero`, `Positive` order.
    pub fn iter(&self) -> impl Iterator<Item = (Sign, &T)> {
        Sign::ALL
            .into_iter()
            .filter_map(move |sign| self.get(sign).map(|part| (sign, part)))
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sided<U> {
        Sided {
            negative: self.negative.map(&mut f),
            zero: self.zero.map(&mut f),
            positive: self.positive.map(&mut f),
        }
    }
}

impl<T> Default for Sided<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> IntoIterator for Sided<T> {
    type Item = (Sign, T);
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<(Sign, T)>, 3>>;

    fn into_iter(self) -> Self::IntoIter {
        [
            self.negative.map(|p| (Sign::Negative, p)),
            self.zero.map(|p| (Sign::Zero, p)),
            self.positive.map(|p| (Sign::Positive, p)),
        ]
        .into_iter()
        .flatten()
    }
}

/// Geometry that can be split by a plane.
pub trait Cuttable: Sized {
    /// Splits `self` along `plane`, classifying with `eps`.
    ///
    /// Geometry entirely on one side comes back unchanged in that side's
    /// slot. Degenerate fragments are dropped rather than reported.
    fn split(&self, plane: &Plane, eps: &EpsilonMath) -> Sided<Self>;
}
