//! GSM TDMA frame time as delivered by the L1 frame clock.

use std::fmt;

/// Frames per 51-multiframe, the repetition period of the CCCH layout.
pub const TDMA51_LEN: u32 = 51;

const T2_LEN: u32 = 26;
const SUPERFRAME_LEN: u32 = 26 * 51;
const T1_MOD: u32 = 2048;

/// A point in GSM air-interface time. `t3` is the frame's position within
/// the current 51-multiframe, which is what the CCCH block layout is keyed
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GsmTime {
    pub frame_number: u32,
    pub t1: u16,
    pub t2: u8,
    pub t3: u8,
}

impl GsmTime {
    /// Derive the t1/t2/t3 decomposition from an absolute frame number.
    pub fn from_frame_number(frame_number: u32) -> Self {
        GsmTime {
            frame_number,
            t1: ((frame_number / SUPERFRAME_LEN) % T1_MOD) as u16,
            t2: (frame_number % T2_LEN) as u8,
            t3: (frame_number % TDMA51_LEN) as u8,
        }
    }
}

impl fmt::Display for GsmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.frame_number, self.t1, self.t2, self.t3
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frame_number() {
        assert_eq!(
            GsmTime::from_frame_number(0),
            GsmTime {
                frame_number: 0,
                t1: 0,
                t2: 0,
                t3: 0
            }
        );
        assert_eq!(
            GsmTime::from_frame_number(57),
            GsmTime {
                frame_number: 57,
                t1: 0,
                t2: 5,
                t3: 6
            }
        );
        // one full superframe later, t2/t3 wrap back to zero
        assert_eq!(
            GsmTime::from_frame_number(26 * 51),
            GsmTime {
                frame_number: 1326,
                t1: 1,
                t2: 0,
                t3: 0
            }
        );
    }
}
