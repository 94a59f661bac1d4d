pub mod ccch;
pub mod clock;
pub mod config;
pub mod gsm_time;
pub mod messages;
pub mod mobile_identity;
pub mod paging;
pub mod queue;
