use core::fmt;
use core::iter::Sum;
use core::ops::Add;

/// A reconciliation cost: a non-negative integer or positive infinity.
///
/// Infinity is stored as `u64::MAX`, so the derived ordering places it after
/// every finite value and saturating arithmetic absorbs into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);
    pub const INFINITE: Cost = Cost(u64::MAX);

    /// Create a finite cost. Values that reach `u64::MAX` become infinite.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The finite value, or `None` for infinity.
    #[inline]
    pub fn finite(self) -> Option<u64> {
        if self.is_infinite() {
            None
        } else {
            Some(self.0)
        }
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self.0 == u64::MAX
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        !self.is_infinite()
    }

    /// Multiply by an edge count.
    ///
    /// `times(0)` is zero even for an infinite cost, so a forbidden loss
    /// still allows placements that lose nothing.
    #[inline]
    pub fn times(self, count: u64) -> Self {
        if count == 0 {
            Self::ZERO
        } else if self.is_infinite() {
            Self::INFINITE
        } else {
            Self(self.0.saturating_mul(count))
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for Cost {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.finite() {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("inf"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Cost {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.finite(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Cost {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = <Option<u64> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(v.map_or(Cost::INFINITE, Cost::new))
    }
}

/// Evolutionary events to which a cost can be assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostType {
    Duplication,
    HorizontalGeneTransfer,
    Loss,
}

/// Cost of each evolutionary event. An infinite entry forbids that event.
///
/// Speciations are free. All entries must be non-negative, which `Cost`
/// enforces by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostVector {
    pub duplication: Cost,
    pub transfer: Cost,
    pub loss: Cost,
}

impl CostVector {
    pub fn new(duplication: Cost, transfer: Cost, loss: Cost) -> Self {
        Self {
            duplication,
            transfer,
            loss,
        }
    }

    pub fn with_duplication(mut self, cost: impl Into<Cost>) -> Self {
        self.duplication = cost.into();
        self
    }

    pub fn with_transfer(mut self, cost: impl Into<Cost>) -> Self {
        self.transfer = cost.into();
        self
    }

    pub fn with_loss(mut self, cost: impl Into<Cost>) -> Self {
        self.loss = cost.into();
        self
    }

    pub fn get(&self, kind: CostType) -> Cost {
        match kind {
            CostType::Duplication => self.duplication,
            CostType::HorizontalGeneTransfer => self.transfer,
            CostType::Loss => self.loss,
        }
    }
}

impl Default for CostVector {
    fn default() -> Self {
        Self::new(Cost::new(1), Cost::new(1), Cost::new(1))
    }
}
