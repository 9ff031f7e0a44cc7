//! BSSIDs and radio-family matching.
//!
//! A site file lists one BSSID per physical radio, but a radio that serves
//! several SSIDs (or several bands) broadcasts a family of virtual BSSIDs
//! derived from its base address. Vendors derive them by flipping a bit in the
//! first octet and/or counting up in the last one, so a scanned BSSID belongs
//! to a configured radio when:
//!
//! ```text
//! scanned[1..5] == base[1..5]
//! |scanned[0] - base[0]| ∈ {0, 8}
//! 0 <= scanned[5] - base[5] < 16
//! ```

use crate::error::{Error, Result};
use crate::{BSSID_OCTETS, VIRTUAL_BSSID_SPAN};
use std::str::FromStr;

/// A MAC-48 access point identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bssid(pub [u8; BSSID_OCTETS]);

impl Bssid {
    /// Parse `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff` or `aabbccddeeff`.
    pub fn parse(s: &str) -> Result<Self> {
        let digits: String = s
            .trim()
            .chars()
            .filter(|c| *c != ':' && *c != '-')
            .collect();
        if digits.len() != BSSID_OCTETS * 2 {
            return Err(Error::InvalidBssid(s.to_string()));
        }
        let mut octets = [0u8; BSSID_OCTETS];
        hex::decode_to_slice(&digits, &mut octets)
            .map_err(|_| Error::InvalidBssid(s.to_string()))?;
        Ok(Self(octets))
    }

    /// Raw octets.
    #[inline]
    pub const fn octets(&self) -> [u8; BSSID_OCTETS] {
        self.0
    }

    /// Whether this (scanned) BSSID is one of the virtual BSSIDs of the
    /// radio whose base address is `base`.
    pub fn same_radio(&self, base: &Bssid) -> bool {
        let scanned = self.0;
        let base = base.0;

        if scanned[1..5] != base[1..5] {
            return false;
        }
        let first = scanned[0].abs_diff(base[0]);
        if first != 0 && first != 8 {
            return false;
        }
        scanned[5]
            .checked_sub(base[5])
            .is_some_and(|offset| offset < VIRTUAL_BSSID_SPAN)
    }
}

/// Whether a scanned identifier belongs to a configured AP id.
///
/// MAC-formatted ids use [`Bssid::same_radio`]; anything else must match
/// exactly.
pub fn matches_ap(scanned: &str, configured: &str) -> bool {
    match (Bssid::parse(scanned), Bssid::parse(configured)) {
        (Ok(scanned), Ok(base)) => scanned.same_radio(&base),
        _ => scanned == configured,
    }
}

/// Configured AP ids a scanned identifier could belong to, best first.
///
/// An exact match on the configured id ranks ahead of radio-family matches,
/// which follow in id order. Radios whose virtual windows overlap yield more
/// than one candidate.
pub fn candidate_aps<'a, I>(scanned: &str, configured: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let scanned_bssid = Bssid::parse(scanned).ok();
    let mut exact = Vec::new();
    let mut family = Vec::new();

    for id in configured {
        let same_id = match (scanned_bssid, Bssid::parse(id).ok()) {
            (Some(scanned), Some(base)) => scanned == base,
            _ => scanned == id,
        };
        if same_id {
            exact.push(id);
        } else if matches_ap(scanned, id) {
            family.push(id);
        }
    }

    exact.sort_unstable();
    family.sort_unstable();
    exact.extend(family);
    exact.dedup();
    exact
}

impl FromStr for Bssid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Bssid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}
