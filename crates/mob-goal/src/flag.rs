//! Control flags — the exclusive resources a running goal holds.
//!
//! A `FlagSet` is a `u8` bitset with one bit per [`Flag`], so intersection
//! tests are a single AND and iteration is a trailing-zero scan.  Nothing
//! here allocates.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// One exclusive control domain of a mob.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Flag {
    /// Walking, swimming, path following.
    Move = 0,
    /// Head and gaze direction.
    Look = 1,
    Jump = 2,
    /// Choosing an attack target.
    Target = 3,
    /// Catch-all held by goals that declare no other flag.
    Unknown = 4,
}

impl Flag {
    pub const COUNT: usize = 5;

    /// All flags in bit order.
    pub const ALL: [Flag; Flag::COUNT] =
        [Flag::Move, Flag::Look, Flag::Jump, Flag::Target, Flag::Unknown];

    /// Position of this flag in lock tables and bitsets.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    #[inline]
    fn from_index(index: u32) -> Flag {
        Flag::ALL[index as usize]
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Flag::Move    => "move",
            Flag::Look    => "look",
            Flag::Jump    => "jump",
            Flag::Target  => "target",
            Flag::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// ── FlagSet ───────────────────────────────────────────────────────────────────

/// A set of [`Flag`]s.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagSet(u8);

impl FlagSet {
    pub const EMPTY: FlagSet = FlagSet(0);

    pub const ALL: FlagSet = FlagSet(0b1_1111);

    /// Build a set from a slice of flags.  Usable in `const` position.
    pub const fn of(flags: &[Flag]) -> FlagSet {
        let mut bits = 0;
        let mut i = 0;
        while i < flags.len() {
            bits |= flags[i].bit();
            i += 1;
        }
        FlagSet(bits)
    }

    #[inline]
    pub const fn with(self, flag: Flag) -> FlagSet {
        FlagSet(self.0 | flag.bit())
    }

    #[inline]
    pub fn insert(&mut self, flag: Flag) {
        self.0 |= flag.bit();
    }

    #[inline]
    pub fn remove(&mut self, flag: Flag) {
        self.0 &= !flag.bit();
    }

    #[inline]
    pub const fn contains(self, flag: Flag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// `true` if the two sets share at least one flag.
    #[inline]
    pub const fn intersects(self, other: FlagSet) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The set itself, or `{Unknown}` if it is empty.
    ///
    /// Every registered goal holds at least one flag so that no goal can run
    /// outside conflict resolution.
    #[inline]
    pub const fn or_unknown(self) -> FlagSet {
        if self.is_empty() { FlagSet(Flag::Unknown.bit()) } else { self }
    }

    #[inline]
    pub fn iter(self) -> FlagIter {
        FlagIter(self.0)
    }
}

impl From<Flag> for FlagSet {
    #[inline]
    fn from(flag: Flag) -> FlagSet {
        FlagSet(flag.bit())
    }
}

impl BitOr for Flag {
    type Output = FlagSet;
    #[inline]
    fn bitor(self, rhs: Flag) -> FlagSet {
        FlagSet(self.bit() | rhs.bit())
    }
}

impl BitOr<Flag> for FlagSet {
    type Output = FlagSet;
    #[inline]
    fn bitor(self, rhs: Flag) -> FlagSet {
        self.with(rhs)
    }
}

impl BitOr for FlagSet {
    type Output = FlagSet;
    #[inline]
    fn bitor(self, rhs: FlagSet) -> FlagSet {
        FlagSet(self.0 | rhs.0)
    }
}

impl BitOrAssign<Flag> for FlagSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Flag) {
        self.insert(rhs);
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> FlagSet {
        let mut set = FlagSet::EMPTY;
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl IntoIterator for FlagSet {
    type Item = Flag;
    type IntoIter = FlagIter;
    #[inline]
    fn into_iter(self) -> FlagIter {
        self.iter()
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{flag}")?;
        }
        Ok(())
    }
}

/// Iterator over the flags of a [`FlagSet`] in bit order.
#[derive(Clone, Debug)]
pub struct FlagIter(u8);

impl Iterator for FlagIter {
    type Item = Flag;

    #[inline]
    fn next(&mut self) -> Option<Flag> {
        if self.0 == 0 {
            return None;
        }
        let flag = Flag::from_index(self.0.trailing_zeros());
        // Clear the lowest set bit.
        self.0 &= self.0 - 1;
        Some(flag)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for FlagIter {}
