//! Digits and multi-digit decomposition
//!
//! A [`Digit`] is 0-9 or blank (10). [`Digits`] splits a value into the four
//! decimal places a chain of numerals can show.

use crate::segment::Segment;

/// Number of decimal places a full chain of numerals can show
pub const MAX_PLACES: usize = 4;

/// Values at or above this wrap: only the last four digits are shown
pub const DISPLAY_MODULUS: u32 = 10_000;

/// Lit segments A-G per digit, last entry is blank
#[rustfmt::skip]
const DIGIT_SEGMENTS: [[bool; 7]; 11] = [
    //  a      b      c      d      e      f      g
    [true,  true,  true,  true,  true,  true,  false], // 0
    [false, true,  true,  false, false, false, false], // 1
    [true,  true,  false, true,  true,  false, true ], // 2
    [true,  true,  true,  true,  false, false, true ], // 3
    [false, true,  true,  false, false, true,  true ], // 4
    [true,  false, true,  true,  false, true,  true ], // 5
    [true,  false, true,  true,  true,  true,  true ], // 6
    [true,  true,  true,  false, false, false, false], // 7
    [true,  true,  true,  true,  true,  true,  true ], // 8
    [true,  true,  true,  true,  false, true,  true ], // 9
    [false, false, false, false, false, false, false], // blank
];

/// Digit value outside 0-10
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidDigit(pub u8);

/// A single displayable digit: 0-9, or 10 for blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// All segments off
    pub const BLANK: Digit = Digit(10);

    /// Create a digit, `None` if above 10
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 10 {
            Some(Digit(value))
        } else {
            None
        }
    }

    /// The ones digit of `value`
    pub const fn from_ones(value: u32) -> Self {
        Digit((value % 10) as u8)
    }

    /// Raw value (0-10)
    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_blank(self) -> bool {
        self.0 == 10
    }

    /// Whether `segment` is lit for this digit
    ///
    /// The decimal point is never part of a digit.
    pub const fn is_lit(self, segment: Segment) -> bool {
        match segment {
            Segment::DecimalPoint => false,
            _ => DIGIT_SEGMENTS[self.0 as usize][segment as usize],
        }
    }

    /// Lit flags for segments A-G
    pub const fn segments(self) -> [bool; 7] {
        DIGIT_SEGMENTS[self.0 as usize]
    }
}

impl TryFrom<u8> for Digit {
    type Error = InvalidDigit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or(InvalidDigit(value))
    }
}

/// A value split into decimal places, ones first
///
/// Places above the most significant digit of a value under 10000 are blank.
/// Values of 10000 or more are reduced modulo 10000 and then always fill all
/// four places, so 12005 becomes `2005` and 10005 becomes `0005`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digits {
    places: [Digit; MAX_PLACES],
}

impl Digits {
    /// Decompose `value` into up to four places
    pub fn from_value(value: u32) -> Self {
        let (value, width) = if value >= DISPLAY_MODULUS {
            (value % DISPLAY_MODULUS, MAX_PLACES)
        } else {
            (value, significant_places(value))
        };

        let mut places = [Digit::BLANK; MAX_PLACES];
        let mut rest = value;
        for place in places.iter_mut().take(width) {
            *place = Digit::from_ones(rest);
            rest /= 10;
        }

        Self { places }
    }

    /// Digit at decimal place `place` (0 = ones), `None` past the thousands
    pub fn place(&self, place: usize) -> Option<Digit> {
        self.places.get(place).copied()
    }

    /// Iterate `(place, digit)` from the ones place upwards
    pub fn iter(&self) -> impl Iterator<Item = (usize, Digit)> + '_ {
        self.places.iter().copied().enumerate()
    }
}

/// Number of decimal digits in `value` (0 counts as one digit)
fn significant_places(value: u32) -> usize {
    match value {
        0..=9 => 1,
        10..=99 => 2,
        100..=999 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn values(digits: &Digits) -> [u8; MAX_PLACES] {
        let mut out = [0; MAX_PLACES];
        for (place, digit) in digits.iter() {
            out[place] = digit.value();
        }
        out
    }

    #[test]
    fn test_digit_range() {
        assert_eq!(Digit::try_from(0).map(Digit::value), Ok(0));
        assert_eq!(Digit::try_from(10), Ok(Digit::BLANK));
        assert_eq!(Digit::try_from(11), Err(InvalidDigit(11)));
        assert!(Digit::new(200).is_none());
    }

    #[test]
    fn test_digit_segments() {
        let one = Digit::new(1).unwrap();
        assert!(!one.is_lit(Segment::A));
        assert!(one.is_lit(Segment::B));
        assert!(one.is_lit(Segment::C));

        let eight = Digit::new(8).unwrap();
        assert!(Segment::DIGIT.iter().all(|s| eight.is_lit(*s)));
        assert!(!eight.is_lit(Segment::DecimalPoint));

        assert!(Digit::BLANK.is_blank());
        assert_eq!(Digit::BLANK.segments(), [false; 7]);

        // Zero is everything but the middle bar
        let zero = Digit::new(0).unwrap();
        assert!(!zero.is_lit(Segment::G));
        assert_eq!(zero.segments().iter().filter(|lit| **lit).count(), 6);
    }

    #[test]
    fn test_single_digit() {
        assert_eq!(values(&Digits::from_value(7)), [7, 10, 10, 10]);
        assert_eq!(values(&Digits::from_value(0)), [0, 10, 10, 10]);
    }

    #[test]
    fn test_two_to_four_digits() {
        assert_eq!(values(&Digits::from_value(42)), [2, 4, 10, 10]);
        assert_eq!(values(&Digits::from_value(100)), [0, 0, 1, 10]);
        assert_eq!(values(&Digits::from_value(9999)), [9, 9, 9, 9]);
        assert_eq!(values(&Digits::from_value(1000)), [0, 0, 0, 1]);
    }

    #[test]
    fn test_wraps_to_last_four_digits() {
        assert_eq!(values(&Digits::from_value(12345)), [5, 4, 3, 2]);
        // Leading zeros are kept once the value has wrapped
        assert_eq!(values(&Digits::from_value(10005)), [5, 0, 0, 0]);
        assert_eq!(values(&Digits::from_value(10000)), [0, 0, 0, 0]);
        assert_eq!(values(&Digits::from_value(u32::MAX)), [5, 9, 2, 7]);
    }

    #[test]
    fn test_place_lookup() {
        let digits = Digits::from_value(42);
        assert_eq!(digits.place(0), Digit::new(2));
        assert_eq!(digits.place(1), Digit::new(4));
        assert_eq!(digits.place(2), Some(Digit::BLANK));
        assert_eq!(digits.place(4), None);
    }

    proptest! {
        #[test]
        fn prop_places_reconstruct_value(value: u32) {
            let digits = Digits::from_value(value);
            let mut rebuilt = 0u32;
            for (place, digit) in digits.iter() {
                if !digit.is_blank() {
                    rebuilt += digit.value() as u32 * 10u32.pow(place as u32);
                }
            }
            prop_assert_eq!(rebuilt, value % DISPLAY_MODULUS);
        }

        #[test]
        fn prop_blanks_only_lead(value: u32) {
            let digits = Digits::from_value(value);
            let mut seen_blank = false;
            for (_, digit) in digits.iter() {
                if digit.is_blank() {
                    seen_blank = true;
                } else {
                    prop_assert!(!seen_blank);
                }
            }
        }
    }
}
