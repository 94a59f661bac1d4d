//! Per-group FIFO store for pending paging requests.
//!
//! Each paging sub-channel owns one ordered queue. New requests go in at
//! the head so a fresh identity is paged in the very next block; records
//! that have to wait for another pass go back in at the tail.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::ccch::MAX_PAGING_GROUPS;
use crate::mobile_identity::MobileIdentity;
use crate::paging::PagingError;

/// One pending paging attempt for a single subscriber identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingRecord {
    pub identity: MobileIdentity,
    pub chan_needed: u8,
    pub expiration_time: DateTime<Utc>,
}

/// The queue array, allocated at the worst-case sub-channel count. Only a
/// prefix is addressed under any given CCCH configuration.
#[derive(Debug)]
pub struct PagingQueue {
    groups: Vec<VecDeque<PagingRecord>>,
    num_paging: usize,
    num_paging_max: usize,
}

impl PagingQueue {
    pub fn new(num_paging_max: usize) -> Self {
        PagingQueue {
            groups: (0..MAX_PAGING_GROUPS).map(|_| VecDeque::new()).collect(),
            num_paging: 0,
            num_paging_max,
        }
    }

    /// Queue an identity for its paging group. A duplicate of a record
    /// already in the group only refreshes that record's expiration time.
    pub fn add(
        &mut self,
        paging_group: u8,
        identity_lv: &[u8],
        chan_needed: u8,
        expiration_time: DateTime<Utc>,
    ) -> Result<(), PagingError> {
        if usize::from(paging_group) >= MAX_PAGING_GROUPS {
            return Err(PagingError::InvalidPagingGroup(paging_group));
        }
        if self.num_paging >= self.num_paging_max {
            warn!("dropping paging, queue full ({})", self.num_paging);
            return Err(PagingError::QueueFull(self.num_paging));
        }

        let identity = MobileIdentity::from_lv(identity_lv)?;
        let group_queue = &mut self.groups[usize::from(paging_group)];
        if let Some(existing) = group_queue.iter_mut().find(|pr| pr.identity == identity) {
            info!("ignoring duplicate paging");
            existing.expiration_time = expiration_time;
            return Err(PagingError::DuplicateIdentity);
        }

        info!(
            "add paging to queue (group={paging_group}, queue_len={})",
            self.num_paging + 1
        );
        group_queue.push_front(PagingRecord {
            identity,
            chan_needed,
            expiration_time,
        });
        self.num_paging += 1;
        Ok(())
    }

    /// Remove the next record to page. The caller owns it until it is
    /// either retired or requeued.
    pub fn take_front(&mut self, group: usize) -> Option<PagingRecord> {
        self.groups.get_mut(group)?.pop_front()
    }

    /// Put a record back behind everything else in its group.
    pub fn requeue_tail(&mut self, group: usize, record: PagingRecord) {
        if let Some(group_queue) = self.groups.get_mut(group) {
            group_queue.push_back(record);
        }
    }

    /// Drop a record that has been paged for the last time.
    pub fn retire(&mut self, _record: PagingRecord) {
        self.num_paging -= 1;
        info!("removed paging record, queue_len={}", self.num_paging);
    }

    /// Drop every queued record.
    pub fn reset(&mut self) {
        let mut drained = 0;
        for group_queue in &mut self.groups {
            drained += group_queue.len();
            group_queue.clear();
        }
        if self.num_paging != drained {
            warn!(
                "num_paging ({}) does not match the {drained} records flushed",
                self.num_paging
            );
        }
        self.num_paging = 0;
    }

    pub fn group_empty(&self, group: usize) -> bool {
        self.groups.get(group).is_none_or(VecDeque::is_empty)
    }

    pub fn len(&self) -> usize {
        self.num_paging
    }

    pub fn is_empty(&self) -> bool {
        self.num_paging == 0
    }

    pub fn capacity(&self) -> usize {
        self.num_paging_max
    }
}
