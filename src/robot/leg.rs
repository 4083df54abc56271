use core::fmt::Display;
use core::ops::{Index, IndexMut};

/// Physical leg slots, numbered around the body starting at the right front
/// leg. `+X` points forward and `+Y` to the right side of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    RightFront = 0,
    RightMiddle = 1,
    RightRear = 2,
    LeftRear = 3,
    LeftMiddle = 4,
    LeftFront = 5,
}

impl Leg {
    pub const COUNT: usize = 6;

    pub const ALL: [Leg; Leg::COUNT] = [
        Leg::RightFront,
        Leg::RightMiddle,
        Leg::RightRear,
        Leg::LeftRear,
        Leg::LeftMiddle,
        Leg::LeftFront,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Leg::RightFront => f.write_str("Right front"),
            Leg::RightMiddle => f.write_str("Right middle"),
            Leg::RightRear => f.write_str("Right rear"),
            Leg::LeftRear => f.write_str("Left rear"),
            Leg::LeftMiddle => f.write_str("Left middle"),
            Leg::LeftFront => f.write_str("Left front"),
        }
    }
}

impl TryFrom<usize> for Leg {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Leg::ALL.get(value).copied().ok_or(value)
    }
}

/// One value per leg, indexable by [`Leg`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerLeg<T>(pub [T; Leg::COUNT]);

impl<T> PerLeg<T> {
    pub fn from_fn(mut f: impl FnMut(Leg) -> T) -> Self {
        Self(core::array::from_fn(|i| f(Leg::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Leg, &T)> {
        Leg::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Leg, &mut T)> {
        Leg::ALL.into_iter().zip(self.0.iter_mut())
    }
}

impl<T> Index<Leg> for PerLeg<T> {
    type Output = T;

    fn index(&self, leg: Leg) -> &Self::Output {
        &self.0[leg.index()]
    }
}

impl<T> IndexMut<Leg> for PerLeg<T> {
    fn index_mut(&mut self, leg: Leg) -> &mut Self::Output {
        &mut self.0[leg.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leg_round_trips_through_index() {
        for leg in Leg::ALL {
            assert_eq!(Leg::try_from(leg.index()), Ok(leg));
        }
        assert_eq!(Leg::try_from(6), Err(6));
    }

    #[test]
    fn per_leg_indexes_by_leg() {
        let mut values = PerLeg::from_fn(|leg| leg.index() * 10);
        values[Leg::LeftFront] += 1;
        assert_eq!(values[Leg::RightFront], 0);
        assert_eq!(values[Leg::LeftFront], 51);
    }
}
