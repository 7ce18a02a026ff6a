//! Turn-order slots and per-slot data storage.
//!
//! ## Slot
//!
//! A player's fixed position in the shuffled turn order. Slots are assigned
//! once at game start and never change for the rest of the game.
//!
//! ## SlotMap
//!
//! Per-slot data backed by an `im::Vector`, so cloning a whole game
//! snapshot stays O(1) no matter how many players are seated.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Ordinal position in the turn order.
///
/// Slot indices are 0-based: the first player to act is `Slot(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot(pub u16);

impl Slot {
    /// Slot 0, the first opener and the player revisited in the final swap.
    pub const FIRST: Slot = Slot(0);

    /// Create a new slot.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Get the raw slot index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Build a slot from a `usize` index, if it fits.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(Slot)
    }

    /// Iterate over all slots for a game with `player_count` players.
    ///
    /// ```
    /// use white_elephant::core::Slot;
    ///
    /// let slots: Vec<_> = Slot::all(3).collect();
    /// assert_eq!(slots, vec![Slot::new(0), Slot::new(1), Slot::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = Slot> {
        (0..player_count).filter_map(Slot::from_index)
    }

    /// Check whether this slot exists in a game with `player_count` players.
    #[must_use]
    pub const fn is_valid(self, player_count: usize) -> bool {
        self.index() < player_count
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot {}", self.0)
    }
}

/// Per-slot data storage with cheap cloning.
///
/// ## Example
///
/// ```
/// use white_elephant::core::{Slot, SlotMap};
///
/// let seats: SlotMap<Option<&str>> = SlotMap::with_value(3, None);
/// let seats = seats.with(Slot::new(1), Some("Candle"));
///
/// assert_eq!(seats[Slot::new(1)], Some("Candle"));
/// assert_eq!(seats[Slot::new(0)], None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotMap<T: Clone> {
    data: Vector<T>,
}

impl<T: Clone> SlotMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(slot_count: usize, factory: impl Fn(Slot) -> T) -> Self {
        Self {
            data: Slot::all(slot_count).map(factory).collect(),
        }
    }

    /// Create a map with every entry set to the same value.
    pub fn with_value(slot_count: usize, value: T) -> Self {
        Self::new(slot_count, |_| value.clone())
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the map has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a slot's entry, or `None` if the slot is out of range.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&T> {
        self.data.get(slot.index())
    }

    /// Return a copy with one slot's entry replaced.
    ///
    /// Out-of-range slots leave the map unchanged.
    #[must_use]
    pub fn with(&self, slot: Slot, value: T) -> Self {
        let mut data = self.data.clone();
        if slot.index() < data.len() {
            data[slot.index()] = value;
        }
        Self { data }
    }

    /// Return a copy with one extra slot appended.
    #[must_use]
    pub fn pushed(&self, value: T) -> Self {
        let mut data = self.data.clone();
        data.push_back(value);
        Self { data }
    }

    /// Iterate over (Slot, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        Slot::all(self.data.len()).zip(self.data.iter())
    }

    /// Iterate over values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Clone> Index<Slot> for SlotMap<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &Self::Output {
        &self.data[slot.index()]
    }
}

impl<T: Clone> FromIterator<T> for SlotMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
