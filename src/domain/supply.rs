use std::{fmt, str::FromStr};

use non_empty_string::NonEmptyString;

use super::ErrorKind;

/// The case-normalized name of a supply type.
///
/// Names are stored with the first letter capitalized and the rest lowercased,
/// so `"EMERGENCY KIT"`, `"emergency kit"` and `"Emergency Kit"` all denote
/// the same kind and merge into one inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SupplyKind(NonEmptyString);

impl SupplyKind {
    /// Creates a supply kind, normalizing the case of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKind`] if `value` is empty.
    pub fn new(value: &str) -> Result<Self, Error> {
        let normalized = normalize(value);
        let inner = NonEmptyString::new(normalized).map_err(|_| Error::EmptyKind)?;
        Ok(Self(inner))
    }

    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SupplyKind {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SupplyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SupplyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Capitalizes the first character and lowercases the remainder.
fn normalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// A typed, quantified resource unit.
///
/// A supply lives in exactly one container at a time: a location's inventory
/// or a victim's belongings. Transfers between containers move quantity, not
/// the value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supply {
    kind: SupplyKind,
    quantity: u32,
}

impl Supply {
    /// Creates a supply from a raw type name and a signed quantity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKind`] for an empty type name and
    /// [`Error::NegativeQuantity`] for a quantity below zero.
    pub fn new(kind: &str, quantity: i64) -> Result<Self, Error> {
        let quantity = u32::try_from(quantity).map_err(|_| Error::NegativeQuantity(quantity))?;
        Ok(Self {
            kind: SupplyKind::new(kind)?,
            quantity,
        })
    }

    /// Creates a supply from pre-validated parts.
    #[must_use]
    pub const fn from_parts(kind: SupplyKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }

    /// Returns the supply's kind.
    #[must_use]
    pub const fn kind(&self) -> &SupplyKind {
        &self.kind
    }

    /// Returns the current quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Adds `delta` to the quantity, clamping at zero.
    ///
    /// Containers are responsible for dropping entries whose quantity reaches
    /// zero; this operation itself never removes anything.
    pub fn adjust(&mut self, delta: i64) {
        let next = i64::from(self.quantity) + delta;
        self.quantity = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
    }
}

impl fmt::Display for Supply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} x{}", self.kind, self.quantity)
    }
}

/// Errors from constructing a supply or supply kind.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The supply type name was empty.
    #[error("supply type must not be empty")]
    EmptyKind,

    /// The requested quantity was below zero.
    #[error("supply quantity must not be negative (got {0})")]
    NegativeQuantity(i64),
}

impl Error {
    /// The taxonomy bucket for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyKind | Self::NegativeQuantity(_) => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("water", "Water"; "lowercase")]
    #[test_case("WATER", "Water"; "uppercase")]
    #[test_case("Water", "Water"; "already normalized")]
    #[test_case("EMERGENCY KIT", "Emergency kit"; "multi word uppercase")]
    #[test_case("emergency kit", "Emergency kit"; "multi word lowercase")]
    fn kinds_are_case_normalized(input: &str, expected: &str) {
        let kind = SupplyKind::new(input).unwrap();
        assert_eq!(kind.as_str(), expected);
    }

    #[test]
    fn differently_cased_names_collide() {
        let a = SupplyKind::new("EMERGENCY KIT").unwrap();
        let b = SupplyKind::new("emergency kit").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_kind_is_rejected() {
        assert_eq!(SupplyKind::new(""), Err(Error::EmptyKind));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = Supply::new("Water", -1).unwrap_err();
        assert_eq!(err, Error::NegativeQuantity(-1));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn zero_quantity_is_allowed() {
        let supply = Supply::new("Water", 0).unwrap();
        assert_eq!(supply.quantity(), 0);
    }

    #[test]
    fn adjust_clamps_at_zero() {
        let mut supply = Supply::new("Water", 3).unwrap();
        supply.adjust(-10);
        assert_eq!(supply.quantity(), 0);
        supply.adjust(4);
        assert_eq!(supply.quantity(), 4);
    }
}
