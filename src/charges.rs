//! Point charges and their plot-marker classification.

use crate::errors::ValidationError;
use crate::math::{Scalar, R2};

/// Point charge in normalised units.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    /// Horizontal position.
    pub x: Scalar,
    /// Vertical position.
    pub y: Scalar,
    /// Signed magnitude.
    pub q: Scalar,
}

impl Charge {
    /// Creates a charge at `(x, y)` with magnitude `q`.
    #[must_use]
    pub const fn new(x: Scalar, y: Scalar, q: Scalar) -> Self {
        Self { x, y, q }
    }

    /// Position as a vector.
    #[inline]
    #[must_use]
    pub fn position(&self) -> R2 {
        R2::new(self.x, self.y)
    }

    /// Sign class of the charge.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        if self.q > 0.0 {
            Polarity::Positive
        } else if self.q < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }

    /// True when every component is a finite number.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.q.is_finite()
    }
}

impl From<(Scalar, Scalar, Scalar)> for Charge {
    fn from((x, y, q): (Scalar, Scalar, Scalar)) -> Self {
        Self::new(x, y, q)
    }
}

/// Checks that the charge list is non-empty and every entry is finite.
pub fn validate_charges(charges: &[Charge]) -> Result<(), ValidationError> {
    if charges.is_empty() {
        return Err(ValidationError::EmptyCharges);
    }
    if let Some(pos) = charges.iter().position(|c| !c.is_finite()) {
        return Err(ValidationError::NonFiniteCharge { index: pos + 1 });
    }
    Ok(())
}

/// Sign class used for marker colour and legend text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// `q > 0`.
    Positive,
    /// `q < 0`.
    Negative,
    /// `q == 0`; contributes no field and is not drawn.
    Neutral,
}

impl Polarity {
    /// Legend text for the first charge of this sign.
    #[must_use]
    pub const fn legend(self) -> Option<&'static str> {
        match self {
            Self::Positive => Some("Positive charge"),
            Self::Negative => Some("Negative charge"),
            Self::Neutral => None,
        }
    }
}

/// Render-ready description of one charge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeMarker {
    /// Marker centre.
    pub position: R2,
    /// Sign class.
    pub polarity: Polarity,
    /// Whether this marker carries the legend entry for its sign.
    pub labelled: bool,
}

impl ChargeMarker {
    /// Legend text when this marker is labelled.
    #[must_use]
    pub const fn label(&self) -> Option<&'static str> {
        if self.labelled {
            self.polarity.legend()
        } else {
            None
        }
    }
}

/// Classifies charges into markers, in input order.
///
/// Only the first positive and the first negative charge are labelled.
#[must_use]
pub fn classify_markers(charges: &[Charge]) -> Vec<ChargeMarker> {
    let mut seen_positive = false;
    let mut seen_negative = false;
    charges
        .iter()
        .map(|c| {
            let polarity = c.polarity();
            let labelled = match polarity {
                Polarity::Positive => !std::mem::replace(&mut seen_positive, true),
                Polarity::Negative => !std::mem::replace(&mut seen_negative, true),
                Polarity::Neutral => false,
            };
            ChargeMarker {
                position: c.position(),
                polarity,
                labelled,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_of_each_sign_is_labelled() {
        let charges = [
            Charge::new(0.0, 0.0, 1.0),
            Charge::new(1.0, 0.0, -1.0),
            Charge::new(2.0, 0.0, 1.0),
        ];
        let markers = classify_markers(&charges);
        assert_eq!(markers.len(), 3);
        assert_eq!((markers[0].polarity, markers[0].labelled), (Polarity::Positive, true));
        assert_eq!((markers[1].polarity, markers[1].labelled), (Polarity::Negative, true));
        assert_eq!((markers[2].polarity, markers[2].labelled), (Polarity::Positive, false));
        assert_eq!(markers[0].label(), Some("Positive charge"));
        assert_eq!(markers[2].label(), None);
    }

    #[test]
    fn neutral_charges_are_never_labelled() {
        let charges = [Charge::new(0.0, 0.0, 0.0), Charge::new(1.0, 1.0, -2.0)];
        let markers = classify_markers(&charges);
        assert_eq!(markers[0].polarity, Polarity::Neutral);
        assert!(!markers[0].labelled);
        assert!(markers[1].labelled);
    }

    #[test]
    fn validation_reports_first_bad_charge() {
        assert_eq!(validate_charges(&[]), Err(ValidationError::EmptyCharges));
        let charges = [Charge::new(0.0, 0.0, 1.0), Charge::new(Scalar::INFINITY, 0.0, 1.0)];
        assert_eq!(
            validate_charges(&charges),
            Err(ValidationError::NonFiniteCharge { index: 2 })
        );
        assert!(validate_charges(&[Charge::new(0.0, 0.0, 0.0)]).is_ok());
    }
}
