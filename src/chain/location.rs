//! Multilocation decoding for external asset origins.
//!
//! `AssetManager::AssetIdType` stores `AssetType::Xcm(MultiLocation)`. Only
//! the head of the interior matters for the dashboard, so decoding stops
//! after the first junction: every XCM version encodes `Parachain` as
//! junction variant 0 with a compact `u32`, and the remaining junction
//! layouts differ between versions. Unknown tags decode to `Unrecognized`
//! rather than failing; only truncated input is an error.

use codec::{Compact, Decode, Input};
use serde::{Serialize, Serializer};

const ASSET_TYPE_XCM: u8 = 0;
const JUNCTION_PARACHAIN: u8 = 0;
const INTERIOR_HERE: u8 = 0;
const INTERIOR_X1: u8 = 1;
const INTERIOR_X8: u8 = 8;

/// Source chain of an external asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParachainOrigin {
    Parachain(u32),
    /// Native to the relay chain (or no parachain in the location). Orders
    /// after every parachain id.
    Relay,
}

impl std::fmt::Display for ParachainOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parachain(id) => write!(f, "{id}"),
            Self::Relay => f.write_str("Relay"),
        }
    }
}

impl Serialize for ParachainOrigin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Parachain(id) => serializer.serialize_u32(*id),
            Self::Relay => serializer.serialize_str("Relay"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junction {
    Parachain(u32),
    /// Any other junction variant, kept by tag only.
    Other { tag: u8 },
}

/// Interior of a location, decoded as far as origin resolution needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interior {
    Here,
    /// `X1`: the payload is a single junction.
    Single(Junction),
    /// `X2`..`X8`: the payload is a collection; only its head is decoded.
    Collection { len: u8, head: Junction },
    Unrecognized { tag: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetLocation {
    pub parents: u8,
    pub interior: Interior,
}

impl AssetLocation {
    /// Resolve the origin: a direct parachain junction, else a collection
    /// headed by one, else the relay sentinel.
    #[must_use]
    pub fn parachain_origin(&self) -> ParachainOrigin {
        match self.interior {
            Interior::Single(Junction::Parachain(id)) | Interior::Collection { head: Junction::Parachain(id), .. } => {
                ParachainOrigin::Parachain(id)
            }
            Interior::Here
            | Interior::Single(Junction::Other { .. })
            | Interior::Collection { head: Junction::Other { .. }, .. }
            | Interior::Unrecognized { .. } => ParachainOrigin::Relay,
        }
    }
}

impl Decode for Junction {
    fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
        match input.read_byte()? {
            JUNCTION_PARACHAIN => Ok(Self::Parachain(Compact::<u32>::decode(input)?.0)),
            tag => Ok(Self::Other { tag }),
        }
    }
}

impl Decode for AssetLocation {
    fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
        let asset_type = input.read_byte()?;
        if asset_type != ASSET_TYPE_XCM {
            return Ok(Self { parents: 0, interior: Interior::Unrecognized { tag: asset_type } });
        }
        let parents = input.read_byte()?;
        let interior = match input.read_byte()? {
            INTERIOR_HERE => Interior::Here,
            INTERIOR_X1 => Interior::Single(Junction::decode(input)?),
            len @ 2..=INTERIOR_X8 => Interior::Collection { len, head: Junction::decode(input)? },
            tag => Interior::Unrecognized { tag },
        };
        Ok(Self { parents, interior })
    }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
