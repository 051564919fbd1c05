// libclf/src/types.rs

use std::fmt;
use std::str::FromStr;

use derive_more::Display;

use crate::Error;

/// Supported bit rates in kbit/s.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitRate {
    #[display(fmt = "106")]
    Kbps106,
    #[display(fmt = "212")]
    Kbps212,
    #[display(fmt = "424")]
    Kbps424,
    #[display(fmt = "848")]
    Kbps848,
}

impl BitRate {
    pub fn from_kbps(kbps: u16) -> Option<Self> {
        match kbps {
            106 => Some(Self::Kbps106),
            212 => Some(Self::Kbps212),
            424 => Some(Self::Kbps424),
            848 => Some(Self::Kbps848),
            _ => None,
        }
    }

    pub fn kbps(&self) -> u16 {
        match self {
            Self::Kbps106 => 106,
            Self::Kbps212 => 212,
            Self::Kbps424 => 424,
            Self::Kbps848 => 848,
        }
    }
}

/// Technology letter of a rate-type.
///
/// Any uppercase letter is accepted by the grammar. Letters other than
/// A, B and F parse as `Other` and are rejected later by the dispatcher
/// with an unsupported-target error, so that a single unknown candidate
/// does not prevent the rest of a candidate list from being tried.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Technology {
    #[display(fmt = "A")]
    A,
    #[display(fmt = "B")]
    B,
    #[display(fmt = "F")]
    F,
    #[display(fmt = "{}", _0)]
    Other(char),
}

impl Technology {
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'A' => Self::A,
            'B' => Self::B,
            'F' => Self::F,
            other => Self::Other(other),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// A (bit rate, technology) pair such as `106A` or `212F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateType {
    bitrate: BitRate,
    technology: Technology,
}

impl RateType {
    pub const fn new(bitrate: BitRate, technology: Technology) -> Self {
        Self {
            bitrate,
            technology,
        }
    }

    pub fn bitrate(&self) -> BitRate {
        self.bitrate
    }

    pub fn technology(&self) -> Technology {
        self.technology
    }

    /// Parse one `<rate><tech>` leg. Returns None on any grammar violation.
    fn parse_leg(leg: &str) -> Option<Self> {
        let split = leg.find(|c: char| !c.is_ascii_digit())?;
        let (digits, tech) = leg.split_at(split);
        let bitrate = BitRate::from_kbps(digits.parse().ok()?)?;

        let mut chars = tech.chars();
        let letter = chars.next()?;
        if chars.next().is_some() || !letter.is_ascii_uppercase() {
            return None;
        }
        Some(Self::new(bitrate, Technology::from_letter(letter)))
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.bitrate, self.technology)
    }
}

impl FromStr for RateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_leg(s).ok_or_else(|| Error::Pattern(s.to_string()))
    }
}

/// Send/receive rate-type pair parsed from `<rate><tech>[/<rate><tech>]`.
///
/// With a single leg both directions use the same rate-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Brty {
    pub send: RateType,
    pub recv: RateType,
}

impl Brty {
    pub const fn symmetric(rate: RateType) -> Self {
        Self {
            send: rate,
            recv: rate,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        self.send == self.recv
    }
}

impl FromStr for Brty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || Error::Pattern(s.to_string());
        let mut legs = s.split('/');

        let send = legs
            .next()
            .and_then(RateType::parse_leg)
            .ok_or_else(err)?;
        let recv = match legs.next() {
            Some(leg) => RateType::parse_leg(leg).ok_or_else(err)?,
            None => send,
        };
        if legs.next().is_some() {
            return Err(err());
        }

        Ok(Self { send, recv })
    }
}

impl fmt::Display for Brty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_symmetric() {
            write!(f, "{}", self.send)
        } else {
            write!(f, "{}/{}", self.send, self.recv)
        }
    }
}

/// Name of a protocol field stored on a target.
///
/// Names outside the known protocol set are kept as `Custom` so callers can
/// attach their own annotations next to protocol fields. Build fields from
/// names with `Field::from`; a known name always maps to its variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    SensReq,
    SensRes,
    SddReq,
    SddRes,
    SelReq,
    SelRes,
    RidReq,
    RidRes,
    SensbReq,
    SensbRes,
    AttribReq,
    AttribRes,
    SensfReq,
    SensfRes,
    AtrReq,
    AtrRes,
    PslReq,
    PslRes,
    DepReq,
    DepRes,
    Tt2Cmd,
    Tt3Cmd,
    Tt4Cmd,
    Custom(CustomName),
}

/// A field name outside the known protocol set. Only produced by parsing,
/// so it never spells a known field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomName(String);

impl CustomName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Field {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SensReq => "sens_req",
            Self::SensRes => "sens_res",
            Self::SddReq => "sdd_req",
            Self::SddRes => "sdd_res",
            Self::SelReq => "sel_req",
            Self::SelRes => "sel_res",
            Self::RidReq => "rid_req",
            Self::RidRes => "rid_res",
            Self::SensbReq => "sensb_req",
            Self::SensbRes => "sensb_res",
            Self::AttribReq => "attrib_req",
            Self::AttribRes => "attrib_res",
            Self::SensfReq => "sensf_req",
            Self::SensfRes => "sensf_res",
            Self::AtrReq => "atr_req",
            Self::AtrRes => "atr_res",
            Self::PslReq => "psl_req",
            Self::PslRes => "psl_res",
            Self::DepReq => "dep_req",
            Self::DepRes => "dep_res",
            Self::Tt2Cmd => "tt2_cmd",
            Self::Tt3Cmd => "tt3_cmd",
            Self::Tt4Cmd => "tt4_cmd",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "sens_req" => Self::SensReq,
            "sens_res" => Self::SensRes,
            "sdd_req" => Self::SddReq,
            "sdd_res" => Self::SddRes,
            "sel_req" => Self::SelReq,
            "sel_res" => Self::SelRes,
            "rid_req" => Self::RidReq,
            "rid_res" => Self::RidRes,
            "sensb_req" => Self::SensbReq,
            "sensb_res" => Self::SensbRes,
            "attrib_req" => Self::AttribReq,
            "attrib_res" => Self::AttribRes,
            "sensf_req" => Self::SensfReq,
            "sensf_res" => Self::SensfRes,
            "atr_req" => Self::AtrReq,
            "atr_res" => Self::AtrRes,
            "psl_req" => Self::PslReq,
            "psl_res" => Self::PslRes,
            "dep_req" => Self::DepReq,
            "dep_res" => Self::DepRes,
            "tt2_cmd" => Self::Tt2Cmd,
            "tt3_cmd" => Self::Tt3Cmd,
            "tt4_cmd" => Self::Tt4Cmd,
            other => Self::Custom(CustomName(other.to_string())),
        })
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        match name.parse() {
            Ok(field) => field,
            Err(never) => match never {},
        }
    }
}
