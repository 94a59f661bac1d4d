//! CCCH block layout: which positions of the 51-multiframe carry paging,
//! and how a frame time maps onto a paging sub-channel under the broadcast
//! control channel configuration (3GPP TS 05.02 clause 6.5).

use crate::gsm_time::{GsmTime, TDMA51_LEN};

/// Paging-capable CCCH blocks per 51-multiframe on a non-combined CCCH.
pub const MAX_PAGING_BLOCKS_CCCH: usize = 9;
/// Upper bound of the effective paging multiframe spread.
pub const MAX_BS_PA_MFRMS: usize = 9;
/// Worst-case number of addressable paging sub-channels.
pub const MAX_PAGING_GROUPS: usize = MAX_PAGING_BLOCKS_CCCH * MAX_BS_PA_MFRMS;

/// Marks FCCH/SCH/BCCH/idle positions in [`BLOCK_BY_TDMA51`].
const NOT_PAGING: u8 = 255;

/// Paging block numbers in a simple non-combined CCCH, indexed by t3.
pub const BLOCK_BY_TDMA51: [u8; 51] = [
    255, 255, // FCCH, SCH
    255, 255, 255, 255, // BCCH
    0, 0, 0, 0, // B0(6..9)
    255, 255, // FCCH, SCH
    1, 1, 1, 1, // B1(12..15)
    2, 2, 2, 2, // B2(16..19)
    255, 255, // FCCH, SCH
    3, 3, 3, 3, // B3(22..25)
    4, 4, 4, 4, // B4(26..29)
    255, 255, // FCCH, SCH
    5, 5, 5, 5, // B5(32..35)
    6, 6, 6, 6, // B6(36..39)
    255, 255, // FCCH, SCH
    7, 7, 7, 7, // B7(42..45)
    8, 8, 8, 8, // B8(46..49)
    255, // idle
];

/// Control channel description interpreted from System Information Type 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CcchConfig {
    /// CCCH blocks reserved for the Access Grant channel (0..=7).
    pub bs_ag_blks_res: u8,
    /// Paging multiframe spread (0..=7); mobiles listen to their paging
    /// group once every `bs_pa_mfrms + 2` 51-multiframes.
    pub bs_pa_mfrms: u8,
}

impl CcchConfig {
    /// Paging blocks per 51-multiframe left over after AGCH reservation.
    pub fn n_pag_blocks(&self) -> u32 {
        MAX_PAGING_BLOCKS_CCCH as u32 - u32::from(self.bs_ag_blks_res)
    }

    /// Effective paging multiframe spread.
    pub fn mfrms(&self) -> u32 {
        u32::from(self.bs_pa_mfrms) + 2
    }

    /// Paging block number within the current 51-multiframe, or `None` when
    /// the frame does not fall on a block this configuration pages on.
    fn paging_block_index(&self, time: &GsmTime) -> Option<u32> {
        let block = BLOCK_BY_TDMA51.get(time.t3 as usize).copied()?;
        if block == NOT_PAGING {
            return None;
        }
        let reserved = u32::from(self.bs_ag_blks_res);
        u32::from(block).checked_sub(reserved)
    }

    /// Paging sub-channel index across the multiframe rotation, the key
    /// into the per-group paging queues.
    pub fn paging_subchannel(&self, time: &GsmTime) -> Option<usize> {
        let block_idx = self.paging_block_index(time)?;
        let mfrm_part = (time.frame_number / TDMA51_LEN) % self.mfrms() * self.n_pag_blocks();
        Some((block_idx + mfrm_part) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_paging_positions() {
        for t3 in [0, 1, 2, 3, 4, 5, 10, 11, 20, 21, 30, 31, 40, 41, 50] {
            assert_eq!(BLOCK_BY_TDMA51[t3], NOT_PAGING, "t3={t3}");
        }
        assert_eq!(
            BLOCK_BY_TDMA51.iter().filter(|&&b| b == NOT_PAGING).count(),
            15
        );
    }

    #[test]
    fn test_agch_reservation() {
        let config = CcchConfig {
            bs_ag_blks_res: 2,
            bs_pa_mfrms: 0,
        };
        // blocks 0 and 1 belong to the AGCH now
        assert_eq!(config.paging_subchannel(&GsmTime::from_frame_number(6)), None);
        assert_eq!(config.paging_subchannel(&GsmTime::from_frame_number(12)), None);
        // block 2 becomes paging block 0
        assert_eq!(
            config.paging_subchannel(&GsmTime::from_frame_number(16)),
            Some(0)
        );
    }

    #[test]
    fn test_multiframe_rotation() {
        let config = CcchConfig {
            bs_ag_blks_res: 0,
            bs_pa_mfrms: 1,
        };
        // same t3, successive 51-multiframes: the group advances by
        // n_pag_blocks and wraps after bs_pa_mfrms + 2 rounds
        assert_eq!(
            config.paging_subchannel(&GsmTime::from_frame_number(6)),
            Some(0)
        );
        assert_eq!(
            config.paging_subchannel(&GsmTime::from_frame_number(6 + 51)),
            Some(9)
        );
        assert_eq!(
            config.paging_subchannel(&GsmTime::from_frame_number(6 + 2 * 51)),
            Some(18)
        );
        assert_eq!(
            config.paging_subchannel(&GsmTime::from_frame_number(6 + 3 * 51)),
            Some(0)
        );
    }

    #[test]
    fn test_subchannel_range() {
        for bs_ag_blks_res in 0..=7 {
            for bs_pa_mfrms in 0..=7 {
                let config = CcchConfig {
                    bs_ag_blks_res,
                    bs_pa_mfrms,
                };
                let limit = config.n_pag_blocks() * config.mfrms();
                for frame_number in 0..(TDMA51_LEN * config.mfrms() * 2) {
                    let time = GsmTime::from_frame_number(frame_number);
                    if let Some(group) = config.paging_subchannel(&time) {
                        assert!(
                            (group as u32) < limit,
                            "group {group} out of range for res={bs_ag_blks_res} mfrms={bs_pa_mfrms}"
                        );
                        assert!(group < MAX_PAGING_GROUPS);
                    }
                }
            }
        }
    }
}
