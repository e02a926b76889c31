use std::fmt::{Display, Formatter};

/// The `ICMP` echo identifier newtype.
///
/// Constant for the lifetime of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Identifier(pub u16);

/// The `ICMP` echo `Sequence` number newtype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Sequence(pub u16);

impl Sequence {
    /// The sequence of the first attempt.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// The sequence of the following attempt, wrapping at `u16::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, 2)]
    #[test_case(1999, 2000)]
    #[test_case(u16::MAX, 0)]
    fn test_sequence_next(current: u16, expected: u16) {
        assert_eq!(Sequence(expected), Sequence(current).next());
    }

    #[test]
    fn test_sequence_first() {
        assert_eq!(Sequence(1), Sequence::first());
        assert_eq!("1", Sequence::first().to_string());
    }
}
