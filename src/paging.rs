//! Paging queue management and Paging Request message generation.
//!
//! Producers (the RSL paging command path) add subscriber identities to a
//! per-cell queue keyed by paging group; the frame clock calls
//! [`PagingState::generate`] once per downlink paging block, which picks
//! the identities for that block, packs them into the densest Paging
//! Request format, and pads the result to a full MAC block.

use chrono::TimeDelta;
use deku::prelude::*;
use log::{debug, error, info};
use serde::Serialize;
use thiserror::Error;

use crate::ccch::CcchConfig;
use crate::clock::{Clock, system_clock};
use crate::config::PagingConfig;
use crate::gsm_time::GsmTime;
use crate::messages::{
    GSM_MACBLOCK_LEN, PagingRequestType1, PagingRequestType2, PagingRequestType3, pad_mac_block,
};
use crate::mobile_identity::{EMPTY_IDENTITY_LV, MobileIdentityError};
use crate::queue::{PagingQueue, PagingRecord};

#[derive(Debug, Error)]
pub enum PagingError {
    #[error("paging queue full ({0} records)")]
    QueueFull(usize),
    #[error("identity is already in the paging queue")]
    DuplicateIdentity,
    #[error("paging group {0} out of range")]
    InvalidPagingGroup(u8),
    #[error(transparent)]
    Identity(#[from] MobileIdentityError),
    #[error("no paging block at GSM time {0}")]
    WrongTime(GsmTime),
    #[error("failed to encode paging request: {0}")]
    Encode(#[from] DekuError),
    #[error("failed to parse config file: {0}")]
    ConfigFileParsing(#[from] toml::de::Error),
}

/// Point-in-time view of the paging load, for operational monitoring.
#[derive(Debug, Serialize)]
pub struct PagingStats {
    pub num_paging: usize,
    pub num_paging_max: usize,
    pub paging_lifetime_secs: i64,
}

/// Per-cell paging state: the broadcast CCCH configuration, the runtime
/// knobs, and one record queue per paging sub-channel.
pub struct PagingState {
    chan_desc: CcchConfig,
    paging_lifetime: TimeDelta,
    queue: PagingQueue,
    clock: Clock,
}

impl PagingState {
    pub fn new(config: &PagingConfig) -> Self {
        Self::with_clock(config, system_clock())
    }

    /// Build a paging state that reads "now" from the given clock.
    pub fn with_clock(config: &PagingConfig, clock: Clock) -> Self {
        PagingState {
            chan_desc: CcchConfig::default(),
            paging_lifetime: TimeDelta::seconds(config.paging_lifetime as i64),
            queue: PagingQueue::new(config.num_paging_max),
            clock,
        }
    }

    /// Queue one paging attempt. [`PagingError::DuplicateIdentity`] only
    /// means the identity's pending record had its lifetime refreshed;
    /// callers may treat it as success.
    pub fn add_identity(
        &mut self,
        paging_group: u8,
        identity_lv: &[u8],
        chan_needed: u8,
    ) -> Result<(), PagingError> {
        let expiration_time = (self.clock)() + self.paging_lifetime;
        self.queue
            .add(paging_group, identity_lv, chan_needed, expiration_time)
    }

    /// Produce the downlink paging block for the given frame time. On
    /// success exactly [`GSM_MACBLOCK_LEN`] bytes are written; on
    /// [`PagingError::WrongTime`] the buffer is left untouched.
    pub fn generate(
        &mut self,
        time: &GsmTime,
        out_buf: &mut [u8; GSM_MACBLOCK_LEN],
    ) -> Result<usize, PagingError> {
        let Some(group) = self.chan_desc.paging_subchannel(time) else {
            error!("paging requested at GSM wrong time: FN {time}");
            return Err(PagingError::WrongTime(*time));
        };

        let msg = if self.queue.group_empty(group) {
            // nobody to be paged, send Type 1 with two empty identities
            PagingRequestType1::new(&EMPTY_IDENTITY_LV, 0, None, 0).to_bytes()?
        } else {
            self.page_group(group)?
        };

        Ok(pad_mac_block(out_buf, &msg))
    }

    /// Drain up to four records from one group and encode them into the
    /// densest format they fit: Type 3 takes four TMSIs, Type 2 two TMSIs
    /// plus one identity of any kind, Type 1 up to two of any kind.
    /// Records that were drained but did not fit go back to the tail of
    /// the queue for a later block.
    fn page_group(&mut self, group: usize) -> Result<Vec<u8>, PagingError> {
        let now = (self.clock)();

        let mut selected: Vec<PagingRecord> = Vec::with_capacity(4);
        while selected.len() < 4 {
            match self.queue.take_front(group) {
                Some(record) => selected.push(record),
                None => break,
            }
        }
        let num_pr = selected.len();
        let num_imsi = selected.iter().filter(|pr| pr.identity.is_imsi()).count();

        // TMSIs ahead of IMSIs, preserving relative order within each class
        selected.sort_by_key(|pr| pr.identity.is_imsi());

        let msg = if num_pr == 4 && num_imsi == 0 {
            debug!("Tx PAGING TYPE 3 (4 TMSI)");
            PagingRequestType3::new(
                selected[0].identity.tmsi().unwrap_or(0),
                selected[0].chan_needed,
                selected[1].identity.tmsi().unwrap_or(0),
                selected[1].chan_needed,
                selected[2].identity.tmsi().unwrap_or(0),
                selected[3].identity.tmsi().unwrap_or(0),
            )
            .to_bytes()?
        } else if num_pr >= 3 && num_imsi <= 1 {
            debug!("Tx PAGING TYPE 2 (2 TMSI, 1 xMSI)");
            let msg = PagingRequestType2::new(
                selected[0].identity.tmsi().unwrap_or(0),
                selected[0].chan_needed,
                selected[1].identity.tmsi().unwrap_or(0),
                selected[1].chan_needed,
                Some(selected[2].identity.as_lv()),
            )
            .to_bytes()?;
            // keep the fourth record for a later block
            for extra in selected.split_off(3) {
                self.queue.requeue_tail(group, extra);
            }
            msg
        } else if num_pr == 1 {
            debug!("Tx PAGING TYPE 1 (1 xMSI, 1 empty)");
            PagingRequestType1::new(selected[0].identity.as_lv(), selected[0].chan_needed, None, 0)
                .to_bytes()?
        } else {
            // two of any kind, or three or four of which only two fit
            debug!("Tx PAGING TYPE 1 (2 xMSI)");
            let msg = PagingRequestType1::new(
                selected[0].identity.as_lv(),
                selected[0].chan_needed,
                Some(selected[1].identity.as_lv()),
                selected[1].chan_needed,
            )
            .to_bytes()?;
            for extra in selected.split_off(2) {
                self.queue.requeue_tail(group, extra);
            }
            msg
        };

        // expire the paged records, or give them another pass
        for record in selected {
            if record.expiration_time >= now {
                self.queue.retire(record);
            } else {
                self.queue.requeue_tail(group, record);
            }
        }

        Ok(msg)
    }

    /// Take over a new control channel description from a system
    /// information update. Records already queued keep their old group
    /// assignment.
    // TODO: rebucket queued records when the sub-channel count changes
    pub fn update_ccch(&mut self, chan_desc: CcchConfig) {
        info!("paging CCCH configuration update");
        self.chan_desc = chan_desc;
    }

    /// Drop every pending record.
    pub fn reset(&mut self) {
        self.queue.reset();
    }

    pub fn queue_length(&self) -> usize {
        self.queue.len()
    }

    pub fn group_queue_empty(&self, group: u8) -> bool {
        self.queue.group_empty(usize::from(group))
    }

    pub fn stats(&self) -> PagingStats {
        PagingStats {
            num_paging: self.queue.len(),
            num_paging_max: self.queue.capacity(),
            paging_lifetime_secs: self.paging_lifetime.num_seconds(),
        }
    }
}
