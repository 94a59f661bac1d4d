//! Bit-exact encoders for the Layer 3 Paging Request messages transmitted
//! on the downlink CCCH (3GPP TS 04.08 sections 9.1.22 to 9.1.24).

use deku::prelude::*;

use crate::mobile_identity::EMPTY_IDENTITY_LV;

/// Fixed length of a downlink MAC block on the CCCH.
pub const GSM_MACBLOCK_LEN: usize = 23;
/// Layer 2 filler octet used to pad short messages up to the block length.
pub const PADDING_OCTET: u8 = 0x2B;

/// Radio Resource management protocol discriminator.
const PDISC_RR: u8 = 0x06;
/// Page mode "normal paging".
const PAGE_MODE_NORMAL: u8 = 0x00;

const MSG_TYPE_PAGING_REQUEST_1: u8 = 0x21;
const MSG_TYPE_PAGING_REQUEST_2: u8 = 0x22;
const MSG_TYPE_PAGING_REQUEST_3: u8 = 0x24;

/// The L2 pseudo-length octet: the octet count up to and including the last
/// information element, shifted left twice, with the low bits fixed at 0b01.
fn l2_pseudo_length(msg_len: usize) -> u8 {
    (((msg_len - 1) << 2) | 0x01) as u8
}

/// Paging Request Type 1: up to two identities of any kind. A slot without
/// a real identity carries the two-octet "no identity" element, so the
/// message always holds exactly two LVs.
#[derive(Debug, Clone, PartialEq, DekuWrite)]
#[deku(endian = "big")]
pub struct PagingRequestType1 {
    pub l2_plen: u8,
    pub proto_discr: u8,
    pub msg_type: u8,
    #[deku(bits = 2)]
    pub cneed2: u8,
    #[deku(bits = 2)]
    pub cneed1: u8,
    #[deku(bits = 2)]
    pub spare: u8,
    #[deku(bits = 2)]
    pub page_mode: u8,
    pub mobile_id1: Vec<u8>,
    pub mobile_id2: Vec<u8>,
}

impl PagingRequestType1 {
    pub fn new(identity1_lv: &[u8], chan1: u8, identity2_lv: Option<&[u8]>, chan2: u8) -> Self {
        let mobile_id1 = identity1_lv.to_vec();
        let mobile_id2 = identity2_lv.unwrap_or(EMPTY_IDENTITY_LV.as_slice()).to_vec();
        PagingRequestType1 {
            l2_plen: l2_pseudo_length(4 + mobile_id1.len() + mobile_id2.len()),
            proto_discr: PDISC_RR,
            msg_type: MSG_TYPE_PAGING_REQUEST_1,
            cneed2: chan2 & 3,
            cneed1: chan1 & 3,
            spare: 0,
            page_mode: PAGE_MODE_NORMAL,
            mobile_id1,
            mobile_id2,
        }
    }
}

/// Paging Request Type 2: two TMSIs carried as fixed 32-bit fields plus an
/// optional third identity of any kind.
#[derive(Debug, Clone, PartialEq, DekuWrite)]
#[deku(endian = "big")]
pub struct PagingRequestType2 {
    pub l2_plen: u8,
    pub proto_discr: u8,
    pub msg_type: u8,
    #[deku(bits = 2)]
    pub cneed2: u8,
    #[deku(bits = 2)]
    pub cneed1: u8,
    #[deku(bits = 2)]
    pub spare: u8,
    #[deku(bits = 2)]
    pub page_mode: u8,
    pub tmsi1: u32,
    pub tmsi2: u32,
    pub mobile_id3: Vec<u8>,
}

impl PagingRequestType2 {
    pub fn new(tmsi1: u32, chan1: u8, tmsi2: u32, chan2: u8, identity3_lv: Option<&[u8]>) -> Self {
        let mobile_id3 = identity3_lv.map(<[u8]>::to_vec).unwrap_or_default();
        PagingRequestType2 {
            l2_plen: l2_pseudo_length(12 + mobile_id3.len()),
            proto_discr: PDISC_RR,
            msg_type: MSG_TYPE_PAGING_REQUEST_2,
            cneed2: chan2 & 3,
            cneed1: chan1 & 3,
            spare: 0,
            page_mode: PAGE_MODE_NORMAL,
            tmsi1,
            tmsi2,
            mobile_id3,
        }
    }
}

/// Paging Request Type 3: four TMSIs, nothing else.
#[derive(Debug, Clone, PartialEq, DekuWrite)]
#[deku(endian = "big")]
pub struct PagingRequestType3 {
    pub l2_plen: u8,
    pub proto_discr: u8,
    pub msg_type: u8,
    #[deku(bits = 2)]
    pub cneed2: u8,
    #[deku(bits = 2)]
    pub cneed1: u8,
    #[deku(bits = 2)]
    pub spare: u8,
    #[deku(bits = 2)]
    pub page_mode: u8,
    pub tmsi1: u32,
    pub tmsi2: u32,
    pub tmsi3: u32,
    pub tmsi4: u32,
}

impl PagingRequestType3 {
    pub fn new(tmsi1: u32, chan1: u8, tmsi2: u32, chan2: u8, tmsi3: u32, tmsi4: u32) -> Self {
        PagingRequestType3 {
            l2_plen: l2_pseudo_length(20),
            proto_discr: PDISC_RR,
            msg_type: MSG_TYPE_PAGING_REQUEST_3,
            cneed2: chan2 & 3,
            cneed1: chan1 & 3,
            spare: 0,
            page_mode: PAGE_MODE_NORMAL,
            tmsi1,
            tmsi2,
            tmsi3,
            tmsi4,
        }
    }
}

/// Copy an encoded message into the caller's MAC block and fill the rest
/// with the L2 filler octet. `msg` must not exceed [`GSM_MACBLOCK_LEN`];
/// all three paging request encodings are 22 octets or shorter.
pub fn pad_mac_block(out_buf: &mut [u8; GSM_MACBLOCK_LEN], msg: &[u8]) -> usize {
    out_buf[..msg.len()].copy_from_slice(msg);
    for octet in &mut out_buf[msg.len()..] {
        *octet = PADDING_OCTET;
    }
    GSM_MACBLOCK_LEN
}
