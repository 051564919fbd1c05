// libclf/src/constants.rs
//! Protocol constants shared by the validators and the peer-link defaults.

/// Accepted SEL_REQ lengths (single, double and triple size UID).
pub const SEL_REQ_LENGTHS: [usize; 3] = [4, 7, 10];

/// Accepted NFCID1 lengths in an SDD_RES, indexed by the UID size bits of
/// SENS_RES byte 0 (bits 7..6).
pub const NFCID1_LENGTHS: [usize; 3] = [4, 7, 10];

/// SENS_RES byte 0 bits 4..0 are zero for a Type 1 tag, which skips
/// anti-collision and answers RID instead.
pub const SENS_RES_ANTICOLLISION_MASK: u8 = 0b0001_1111;

/// SENS_RES byte 1 low nibble carries the Type 1 platform configuration.
pub const T1T_PLATFORM_CONFIG: u8 = 0b0000_1100;

pub const SENS_RES_LEN: usize = 2;
pub const SEL_RES_LEN: usize = 1;
pub const RID_RES_LEN: usize = 6;

/// HR0 high nibble of a Type 1 RID_RES.
pub const RID_RES_HR0_NIBBLE: u8 = 0b0001;

/// Length of SDD_RES a local Type A target answers with (single size UID,
/// random NFCID1 prefixed by 08h).
pub const LISTEN_SDD_RES_LEN: usize = 4;
pub const LISTEN_SDD_RES_PREFIX: u8 = 0x08;

pub const SENSB_REQ_LEN: usize = 3;
pub const SENSB_RES_LENGTHS: [usize; 2] = [12, 13];
pub const LISTEN_SENSB_RES_LEN: usize = 12;
pub const SENSB_RES_CODE: u8 = 0x50;

pub const SENSF_REQ_LEN: usize = 5;
pub const SENSF_RES_LENGTHS: [usize; 2] = [17, 19];
pub const LISTEN_SENSF_RES_LEN: usize = 19;
pub const SENSF_RES_CODE: u8 = 0x01;

pub const ATR_REQ_MIN_LEN: usize = 16;
pub const ATR_REQ_MAX_LEN: usize = 64;
pub const ATR_RES_MIN_LEN: usize = 17;
pub const ATR_RES_MAX_LEN: usize = 64;

/// Command bytes opening an ATR_REQ (D4 00) and an ATR_RES (D5 01).
pub const ATR_REQ_CMD: [u8; 2] = [0xD4, 0x00];
pub const ATR_RES_CMD: [u8; 2] = [0xD5, 0x01];

/// General bytes of an LLCP-capable ATR start with this magic.
pub const LLCP_MAGIC: [u8; 3] = [0x46, 0x66, 0x6D];

/// LLCP VERSION parameter (type 01, length 01, version 1.1).
pub const LLCP_VERSION_TLV: [u8; 3] = [0x01, 0x01, 0x11];

/// Type 3 system code advertised by the default card-emulation target.
pub const NDEF_SYSTEM_CODE: [u8; 2] = [0x12, 0xFC];
