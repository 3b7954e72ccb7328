//! Segments and their LED channels
//!
//! A numeral has eight RGB segments. Each segment is lit by three of the
//! driver's 28 output channels, one per color. The wiring is fixed by the
//! numeral PCB and identical on every module.

/// Number of PWM output channels on the LED driver
pub const CHANNEL_COUNT: usize = 28;

/// Number of segments on a numeral, including the decimal point
pub const SEGMENT_COUNT: usize = 8;

/// One lit region of a numeral
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Segment {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    DecimalPoint = 7,
}

/// Segment index outside 0-7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidSegment(pub u8);

/// The red, green and blue channel of one segment (zero-based, OUTn - 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentChannels {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl SegmentChannels {
    const fn out(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red - 1,
            green: green - 1,
            blue: blue - 1,
        }
    }

    /// The channels in red, green, blue order
    pub const fn as_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Channel wiring per segment, written as the driver's OUTn pin numbers
const SEGMENT_MAP: [SegmentChannels; SEGMENT_COUNT] = [
    //                  R   G   B
    SegmentChannels::out(17, 16, 15), // A
    SegmentChannels::out(22, 21, 20), // B
    SegmentChannels::out(26, 27, 28), // C
    SegmentChannels::out(1, 2, 3),    // D
    SegmentChannels::out(4, 5, 6),    // E
    SegmentChannels::out(9, 7, 8),    // F
    SegmentChannels::out(14, 13, 12), // G
    SegmentChannels::out(23, 24, 25), // DP
];

impl Segment {
    /// Every segment, in index order
    pub const ALL: [Segment; SEGMENT_COUNT] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
        Segment::DecimalPoint,
    ];

    /// The seven segments that form digits (A-G, no decimal point)
    pub const DIGIT: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    /// Segment index (0-7)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// LED channels driving this segment
    pub const fn channels(self) -> SegmentChannels {
        SEGMENT_MAP[self as usize]
    }
}

impl TryFrom<u8> for Segment {
    type Error = InvalidSegment;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Segment::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidSegment(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_from_index() {
        assert_eq!(Segment::try_from(0), Ok(Segment::A));
        assert_eq!(Segment::try_from(6), Ok(Segment::G));
        assert_eq!(Segment::try_from(7), Ok(Segment::DecimalPoint));
        assert_eq!(Segment::try_from(8), Err(InvalidSegment(8)));
        assert_eq!(Segment::try_from(255), Err(InvalidSegment(255)));
    }

    #[test]
    fn test_index_roundtrip() {
        for (i, segment) in Segment::ALL.iter().enumerate() {
            assert_eq!(segment.index(), i);
            assert_eq!(Segment::try_from(i as u8), Ok(*segment));
        }
    }

    #[test]
    fn test_channel_map() {
        // OUT17/16/15 -> zero-based 16/15/14
        assert_eq!(
            Segment::A.channels(),
            SegmentChannels {
                red: 16,
                green: 15,
                blue: 14
            }
        );
        // F has its red wired after green and blue
        assert_eq!(Segment::F.channels().as_array(), [8, 6, 7]);
        assert_eq!(Segment::C.channels().blue, 27);
        assert_eq!(Segment::D.channels().red, 0);
    }

    #[test]
    fn test_channels_unique_and_in_range() {
        let mut used = [false; CHANNEL_COUNT];
        for segment in Segment::ALL {
            for channel in segment.channels().as_array() {
                assert!((channel as usize) < CHANNEL_COUNT);
                assert!(!used[channel as usize], "channel {} reused", channel);
                used[channel as usize] = true;
            }
        }
        // 8 segments x 3 colors, OUT10, OUT11, OUT18 and OUT19 are unconnected
        assert_eq!(used.iter().filter(|u| **u).count(), 24);
        assert!(!used[9] && !used[10] && !used[17] && !used[18]);
    }
}
