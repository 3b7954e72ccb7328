//! Decimal place assignment across a chain of numerals
//!
//! Numerals are registered in discovery order. The place order decides which
//! registered numeral shows which decimal place when a multi-digit value is
//! written.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which end of the registry shows the ones place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlaceOrder {
    /// The last registered numeral shows ones, the one before it tens, etc.
    ///
    /// With a descending address scan this reads left to right when the
    /// highest address is mounted leftmost.
    #[default]
    OnesLast,
    /// The first registered numeral shows ones
    OnesFirst,
}

impl PlaceOrder {
    /// Registry index of the numeral showing decimal place `place` (0 = ones)
    ///
    /// Returns `None` when fewer than `place + 1` numerals are registered: the
    /// digit is dropped rather than shifted onto another numeral.
    pub fn device_for_place(self, place: usize, count: usize) -> Option<usize> {
        if place >= count {
            return None;
        }
        match self {
            PlaceOrder::OnesLast => Some(count - 1 - place),
            PlaceOrder::OnesFirst => Some(place),
        }
    }

    /// Decimal place shown by the numeral at registry index `index`
    pub fn place_for_device(self, index: usize, count: usize) -> Option<usize> {
        if index >= count {
            return None;
        }
        match self {
            PlaceOrder::OnesLast => Some(count - 1 - index),
            PlaceOrder::OnesFirst => Some(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ones_last() {
        let order = PlaceOrder::OnesLast;

        assert_eq!(order.device_for_place(0, 1), Some(0));

        assert_eq!(order.device_for_place(0, 2), Some(1));
        assert_eq!(order.device_for_place(1, 2), Some(0));
        assert_eq!(order.device_for_place(2, 2), None);

        assert_eq!(order.device_for_place(0, 4), Some(3));
        assert_eq!(order.device_for_place(3, 4), Some(0));
    }

    #[test]
    fn test_ones_first() {
        let order = PlaceOrder::OnesFirst;

        assert_eq!(order.device_for_place(0, 3), Some(0));
        assert_eq!(order.device_for_place(2, 3), Some(2));
        assert_eq!(order.device_for_place(3, 3), None);
    }

    #[test]
    fn test_no_devices() {
        assert_eq!(PlaceOrder::OnesLast.device_for_place(0, 0), None);
        assert_eq!(PlaceOrder::OnesFirst.place_for_device(0, 0), None);
    }

    #[test]
    fn test_default_is_ones_last() {
        assert_eq!(PlaceOrder::default(), PlaceOrder::OnesLast);
    }

    proptest! {
        #[test]
        fn prop_mapping_is_inverse(count in 0usize..=4, place in 0usize..4, ones_first: bool) {
            let order = if ones_first { PlaceOrder::OnesFirst } else { PlaceOrder::OnesLast };
            match order.device_for_place(place, count) {
                Some(index) => {
                    prop_assert!(index < count);
                    prop_assert_eq!(order.place_for_device(index, count), Some(place));
                }
                None => prop_assert!(place >= count),
            }
        }
    }
}
