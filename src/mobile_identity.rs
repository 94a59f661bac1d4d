//! Mobile Identity information elements in their length-value encoding, as
//! carried by RSL paging commands and re-emitted in Paging Request messages
//! (3GPP TS 04.08 section 10.5.1.4).

use num_enum::TryFromPrimitive;
use thiserror::Error;

/// Largest identity LV blob we accept: one length octet plus up to eight
/// value octets.
pub const MAX_IDENTITY_LV_LEN: usize = 9;

/// The "no identity" element broadcast when a paging slot has nobody to
/// page.
pub const EMPTY_IDENTITY_LV: [u8; 2] = [0x01, 0xF0];

/// Identity type carried in the low three bits of the first value octet.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, TryFromPrimitive)]
pub enum MobileIdentityType {
    NoIdentity = 0,
    Imsi = 1,
    Imei = 2,
    Imeisv = 3,
    Tmsi = 4,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MobileIdentityError {
    #[error("identity LV of {0} bytes exceeds the {MAX_IDENTITY_LV_LEN} byte maximum")]
    TooBig(usize),
    #[error("identity LV truncated ({0} bytes present, length octet says {1})")]
    Truncated(usize, u8),
    #[error("identity is not a TMSI")]
    NotATmsi,
}

/// An identity LV blob: byte 0 is the value length, the remaining bytes are
/// the Mobile Identity value part. Equality covers the length octet too, so
/// two identities compare equal exactly when their wire encodings do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileIdentity {
    lv: Vec<u8>,
}

impl MobileIdentity {
    /// Validate and take ownership of an identity LV. Trailing bytes past
    /// the encoded length are dropped.
    pub fn from_lv(identity_lv: &[u8]) -> Result<Self, MobileIdentityError> {
        let Some(&value_len) = identity_lv.first() else {
            return Err(MobileIdentityError::Truncated(0, 0));
        };
        let total_len = value_len as usize + 1;
        if identity_lv.len() < total_len {
            return Err(MobileIdentityError::Truncated(identity_lv.len(), value_len));
        }
        if total_len > MAX_IDENTITY_LV_LEN {
            return Err(MobileIdentityError::TooBig(total_len));
        }
        Ok(MobileIdentity {
            lv: identity_lv[..total_len].to_vec(),
        })
    }

    pub fn as_lv(&self) -> &[u8] {
        &self.lv
    }

    pub fn mi_type(&self) -> Option<MobileIdentityType> {
        self.lv
            .get(1)
            .and_then(|octet| MobileIdentityType::try_from(octet & 7).ok())
    }

    pub fn is_imsi(&self) -> bool {
        self.mi_type() == Some(MobileIdentityType::Imsi)
    }

    /// The TMSI in wire byte order. Requires the canonical TMSI shape: a
    /// five-octet value part whose type bits say TMSI.
    pub fn tmsi(&self) -> Result<u32, MobileIdentityError> {
        if self.lv[0] != 5 || (self.lv[1] & 7) != MobileIdentityType::Tmsi as u8 {
            return Err(MobileIdentityError::NotATmsi);
        }
        Ok(u32::from_be_bytes([
            self.lv[2], self.lv[3], self.lv[4], self.lv[5],
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmsi_extraction() {
        let mi = MobileIdentity::from_lv(&[0x05, 0xF4, 0x11, 0x22, 0x33, 0x44]).unwrap();
        assert_eq!(mi.mi_type(), Some(MobileIdentityType::Tmsi));
        assert!(!mi.is_imsi());
        assert_eq!(mi.tmsi(), Ok(0x11223344));
    }

    #[test]
    fn test_tmsi_rejects_wrong_shape() {
        // IMSI type bits
        let mi = MobileIdentity::from_lv(&[0x05, 0xF1, 0x11, 0x22, 0x33, 0x44]).unwrap();
        assert_eq!(mi.tmsi(), Err(MobileIdentityError::NotATmsi));

        // TMSI type bits but wrong value length
        let mi = MobileIdentity::from_lv(&[0x06, 0xF4, 0x11, 0x22, 0x33, 0x44, 0x55]).unwrap();
        assert_eq!(mi.tmsi(), Err(MobileIdentityError::NotATmsi));
    }

    #[test]
    fn test_imsi_type() {
        let mi = MobileIdentity::from_lv(&[0x08, 0x29, 0x43, 0x65, 0x87, 0x09, 0x21, 0x43, 0x65])
            .unwrap();
        assert_eq!(mi.mi_type(), Some(MobileIdentityType::Imsi));
        assert!(mi.is_imsi());
    }

    #[test]
    fn test_empty_identity() {
        let mi = MobileIdentity::from_lv(&EMPTY_IDENTITY_LV).unwrap();
        assert_eq!(mi.mi_type(), Some(MobileIdentityType::NoIdentity));
        assert!(!mi.is_imsi());
        assert_eq!(mi.tmsi(), Err(MobileIdentityError::NotATmsi));
    }

    #[test]
    fn test_lv_bounds() {
        assert_eq!(
            MobileIdentity::from_lv(&[]),
            Err(MobileIdentityError::Truncated(0, 0))
        );
        assert_eq!(
            MobileIdentity::from_lv(&[0x05, 0xF4, 0x11]),
            Err(MobileIdentityError::Truncated(3, 5))
        );
        let oversized = [0x09; 10];
        assert_eq!(
            MobileIdentity::from_lv(&oversized),
            Err(MobileIdentityError::TooBig(10))
        );

        // trailing bytes past the encoded length are not part of the identity
        let padded = MobileIdentity::from_lv(&[0x01, 0xF0, 0xAA, 0xBB]).unwrap();
        assert_eq!(padded.as_lv(), &EMPTY_IDENTITY_LV);
    }
}
