use std::{fmt, iter::Sum, ops::Add, ops::AddAssign};

/// A count of full course equivalents (FCEs), stored in half-credit units.
///
/// All credit weights in the system are multiples of 0.5, so an integer
/// representation keeps accumulation exact and comparisons total, with no
/// floating point drift across long ledgers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Credits(u32);

impl Credits {
    /// No credit.
    pub const ZERO: Self = Self(0);
    /// Half a credit (0.5 FCE), the weight of an `H`-session course.
    pub const HALF: Self = Self(1);
    /// A full credit (1.0 FCE), the weight of a `Y`-session course.
    pub const FULL: Self = Self(2);

    /// Creates a credit count from a number of half-credit units.
    #[must_use]
    pub const fn from_halves(halves: u32) -> Self {
        Self(halves)
    }

    /// The number of half-credit units.
    #[must_use]
    pub const fn halves(self) -> u32 {
        self.0
    }

    /// Subtracts, saturating at zero. Used for credit shortfalls.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Whether this is a zero credit count.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Credits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Credits {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Credits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 2, if self.0 % 2 == 0 { '0' } else { '5' })
    }
}
