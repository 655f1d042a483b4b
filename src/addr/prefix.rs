use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;
use std::{error, fmt};

use super::af::{AddressFamily, IPv4, IPv6};
use crate::util::macros::prefixint;

//------------ Prefix --------------------------------------------------------

/// The length of an address prefix, the `N` in `/N`.
///
/// A prefix length is only meaningful within an address family, which
/// decides how wide the mask is and thus which lengths are valid. Every
/// constructor checks that `1 <= len <= AF::BITS`, so a value of this type
/// is always a valid length for its family.
///
/// Prefixes are ordered by their length. Prefixes of different families
/// are different types and cannot be compared with each other.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Prefix<AF: AddressFamily> {
    len: u8,
    af: PhantomData<AF>,
}

/// A prefix length in the 32 bit family.
pub type Prefix32 = Prefix<IPv4>;

/// A prefix length in the 128 bit family.
pub type Prefix128 = Prefix<IPv6>;

#[allow(clippy::len_without_is_empty)]
impl<AF: AddressFamily> Prefix<AF> {
    /// Creates a prefix of length `len`.
    ///
    /// Returns an error unless `len` is between 1 and the width of the
    /// family, inclusive.
    pub fn new(len: u8) -> Result<Self, PrefixRangeError> {
        Self::from_len(len.into())
    }

    fn from_len(len: i16) -> Result<Self, PrefixRangeError> {
        if len < 1 || len > i16::from(AF::BITS) {
            return Err(PrefixRangeError { len, max: AF::BITS });
        }
        Ok(Prefix { len: len as u8, af: PhantomData })
    }

    /// Creates a prefix from the number of one-bits in `mask`.
    ///
    /// All one-bits are counted, wherever they are. A non-contiguous mask
    /// such as `0xff00ff00` is accepted and results in the same length as
    /// the contiguous mask with the same number of bits set.
    pub fn from_mask(mask: AF) -> Result<Self, PrefixRangeError> {
        let ones = mask.ones();
        note_non_contiguous(mask, ones);
        Self::from_len(ones as i16)
    }

    /// The width of the family, i.e. the largest valid length.
    pub fn family_size() -> u8 {
        AF::BITS
    }

    /// The all-ones mask of the family.
    pub fn mask_max() -> AF {
        AF::BITMASK
    }

    /// Returns the length of the prefix.
    pub fn len(self) -> u8 {
        self.len
    }

    /// Returns the number of host bits, i.e. the bits not covered by the
    /// prefix.
    pub fn host_len(self) -> u8 {
        AF::BITS - self.len
    }

    /// Returns the mask: `len` one-bits followed by zero-bits.
    pub fn mask(self) -> AF {
        AF::mask(self.len)
    }

    /// Returns the complement of the mask.
    pub fn hostmask_bits(self) -> AF {
        !self.mask()
    }

    /// Returns the bits of the mask, most significant first.
    pub fn bits(self) -> Bits<AF> {
        Bits { mask: self.mask(), pos: 0 }
    }

    /// Returns the mask in the dotted notation of the family.
    pub fn netmask(self) -> AF::Addr {
        self.mask().into_addr()
    }

    /// Returns the complement of the mask in the dotted notation of the
    /// family.
    pub fn hostmask(self) -> AF::Addr {
        self.hostmask_bits().into_addr()
    }

    /// Returns a prefix that is `n` bits longer.
    pub fn checked_add(self, n: u8) -> Result<Self, PrefixRangeError> {
        Self::from_len(i16::from(self.len) + i16::from(n))
    }

    /// Returns a prefix that is `n` bits shorter.
    pub fn checked_sub(self, n: u8) -> Result<Self, PrefixRangeError> {
        Self::from_len(i16::from(self.len) - i16::from(n))
    }
}

#[cfg(feature = "log")]
fn note_non_contiguous<AF: AddressFamily>(mask: AF, ones: u32) {
    if !mask.is_contiguous() {
        log::debug!(
            "accepting non-contiguous mask {} as /{}",
            mask.into_addr(), ones
        );
    }
}

#[cfg(not(feature = "log"))]
fn note_non_contiguous<AF: AddressFamily>(_mask: AF, _ones: u32) { }

prefixint!(IPv4, u32);
prefixint!(IPv6, u128);

impl Prefix<IPv4> {
    /// Returns the four octets of the netmask in network order.
    pub fn octets(self) -> [u8; 4] {
        self.to_u32().to_be_bytes()
    }

    /// Returns the octet of the netmask at `index`.
    ///
    /// Fails unless `index` is between 0 and 3.
    pub fn octet(self, index: usize) -> Result<u8, OctetIndexError> {
        self.octets().get(index).copied().ok_or(OctetIndexError { index })
    }

    /// Returns the netmask in dotted-decimal notation, e.g.
    /// `"255.255.255.0"` for a /24.
    pub fn to_netmask_string(self) -> String {
        self.netmask().to_string()
    }

    /// Returns the hostmask in dotted-decimal notation, e.g. `"0.0.0.255"`
    /// for a /24.
    pub fn to_hostmask_string(self) -> String {
        self.hostmask().to_string()
    }

    /// Parses a dotted-decimal netmask into a prefix.
    ///
    /// The netmask must consist of exactly four decimal octets. The
    /// resulting length is the total number of one-bits in the netmask.
    /// Contiguity is not checked: `"255.0.255.0"` is accepted as a /16.
    /// A netmask without any one-bits is rejected since a zero length is
    /// not a valid prefix.
    pub fn parse_netmask(netmask: &str) -> Result<Self, ParseNetmaskError> {
        let tokens: Vec<&str> = netmask.trim().split('.').collect();
        if tokens.len() != 4 {
            return Err(ParseNetmaskError::Components(tokens.len()));
        }
        let mut octets = [0u8; 4];
        for (octet, token) in octets.iter_mut().zip(tokens) {
            *octet = u8::from_str(token)?;
        }
        Ok(Self::from_mask(u32::from_be_bytes(octets))?)
    }
}

impl Prefix<IPv6> {
    /// Returns the first 32 bits of the mask as a big-endian `u32`.
    pub fn leading_u32(self) -> u32 {
        (self.to_u128() >> 96) as u32
    }
}

//--- TryFrom and From

impl<AF: AddressFamily> TryFrom<u8> for Prefix<AF> {
    type Error = PrefixRangeError;

    fn try_from(len: u8) -> Result<Self, Self::Error> {
        Self::new(len)
    }
}

impl<AF: AddressFamily> From<Prefix<AF>> for u8 {
    fn from(prefix: Prefix<AF>) -> Self {
        prefix.len
    }
}

impl<AF: AddressFamily> TryFrom<inetnum::addr::Prefix> for Prefix<AF> {
    type Error = FromInetnumError;

    /// Takes the length of an address prefix.
    ///
    /// The address of `prefix` must belong to the family `AF`.
    fn try_from(prefix: inetnum::addr::Prefix) -> Result<Self, Self::Error> {
        if !AF::matches(prefix.addr()) {
            return Err(FromInetnumError::Family);
        }
        Ok(Self::new(prefix.len())?)
    }
}

//--- FromStr

impl<AF: AddressFamily> FromStr for Prefix<AF> {
    type Err = ParsePrefixError;

    /// Parses a decimal length, with or without a leading slash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('/').unwrap_or(s);
        Ok(Self::new(u8::from_str(s)?)?)
    }
}

//--- Display and Debug

impl<AF: AddressFamily> fmt::Display for Prefix<AF> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.len)
    }
}

impl<AF: AddressFamily> fmt::Debug for Prefix<AF> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Prefix{}(/{})", AF::BITS, self.len)
    }
}

//--- Serialize and Deserialize
//
// A prefix is serialized as its length. Deserializing accepts an integer
// or a string as understood by `FromStr`.

#[cfg(feature = "serde")]
impl<AF: AddressFamily> serde::Serialize for Prefix<AF> {
    fn serialize<S: serde::Serializer>(
        &self, serializer: S
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.len)
    }
}

#[cfg(feature = "serde")]
impl<'de, AF: AddressFamily> serde::de::Deserialize<'de> for Prefix<AF> {
    fn deserialize<D: serde::de::Deserializer<'de>>(
        deserializer: D
    ) -> Result<Self, D::Error> {
        use serde::de::Unexpected;

        struct Visitor<AF>(PhantomData<AF>);

        impl<'de, AF: AddressFamily> serde::de::Visitor<'de> for Visitor<AF> {
            type Value = Prefix<AF>;

            fn expecting(
                &self, formatter: &mut fmt::Formatter
            ) -> fmt::Result {
                write!(
                    formatter,
                    "a prefix length between 1 and {}", AF::BITS
                )
            }

            fn visit_u64<E: serde::de::Error>(
                self, v: u64
            ) -> Result<Self::Value, E> {
                let len = u8::try_from(v).map_err(|_| {
                    E::invalid_value(Unexpected::Unsigned(v), &self)
                })?;
                Prefix::new(len).map_err(E::custom)
            }

            fn visit_i64<E: serde::de::Error>(
                self, v: i64
            ) -> Result<Self::Value, E> {
                match u64::try_from(v) {
                    Ok(v) => self.visit_u64(v),
                    Err(_) => Err(
                        E::invalid_value(Unexpected::Signed(v), &self)
                    ),
                }
            }

            fn visit_str<E: serde::de::Error>(
                self, v: &str
            ) -> Result<Self::Value, E> {
                Prefix::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(Visitor(PhantomData))
    }
}

//--- Arbitrary

#[cfg(feature = "arbitrary")]
impl<'a, AF: AddressFamily> arbitrary::Arbitrary<'a> for Prefix<AF> {
    fn arbitrary(
        u: &mut arbitrary::Unstructured<'a>
    ) -> arbitrary::Result<Self> {
        let len = u.int_in_range(1..=AF::BITS)?;
        Ok(Prefix { len, af: PhantomData })
    }
}


//------------ Bits ----------------------------------------------------------

/// An iterator over the bits of a prefix mask, most significant first.
///
/// Created by [`Prefix::bits`]. It yields exactly `AF::BITS` items.
#[derive(Clone, Debug)]
pub struct Bits<AF: AddressFamily> {
    mask: AF,
    pos: u8,
}

impl<AF: AddressFamily> Iterator for Bits<AF> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= AF::BITS {
            return None;
        }
        let bit = self.mask.bit(self.pos);
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::from(AF::BITS - self.pos);
        (left, Some(left))
    }
}

impl<AF: AddressFamily> ExactSizeIterator for Bits<AF> { }


//============ Error Types ===================================================

//------------ PrefixRangeError ----------------------------------------------

/// A prefix length was outside the range valid for its family.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrefixRangeError {
    len: i16,
    max: u8,
}

impl PrefixRangeError {
    /// The length that was asked for.
    ///
    /// This can be negative or exceed `u8::MAX` when it was the result of
    /// [`Prefix::checked_sub`] or [`Prefix::checked_add`].
    pub fn len(&self) -> i16 {
        self.len
    }

    /// The largest length of the family.
    pub fn max(&self) -> u8 {
        self.max
    }
}

impl fmt::Display for PrefixRangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "prefix length {} out of range 1..={}", self.len, self.max
        )
    }
}

impl error::Error for PrefixRangeError {}


//------------ OctetIndexError -----------------------------------------------

/// An octet of a 32 bit netmask was asked for at an invalid position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OctetIndexError {
    index: usize,
}

impl OctetIndexError {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for OctetIndexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "octet index {} out of range 0..=3", self.index)
    }
}

impl error::Error for OctetIndexError {}


//------------ ParseNetmaskError ---------------------------------------------

/// A dotted-decimal netmask could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseNetmaskError {
    /// The netmask did not have four components; holds the number found.
    Components(usize),

    /// A component was not a decimal octet.
    Octet(ParseIntError),

    /// The netmask had no one-bits.
    Range(PrefixRangeError),
}

impl From<ParseIntError> for ParseNetmaskError {
    fn from(err: ParseIntError) -> Self {
        ParseNetmaskError::Octet(err)
    }
}

impl From<PrefixRangeError> for ParseNetmaskError {
    fn from(err: PrefixRangeError) -> Self {
        ParseNetmaskError::Range(err)
    }
}

impl fmt::Display for ParseNetmaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseNetmaskError::Components(n) => write!(
                f, "netmask must have 4 dotted octets, found {}", n
            ),
            ParseNetmaskError::Octet(err) => {
                write!(f, "invalid netmask octet: {}", err)
            }
            ParseNetmaskError::Range(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl error::Error for ParseNetmaskError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseNetmaskError::Components(_) => None,
            ParseNetmaskError::Octet(err) => Some(err),
            ParseNetmaskError::Range(err) => Some(err),
        }
    }
}


//------------ ParsePrefixError ----------------------------------------------

/// A decimal prefix length could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsePrefixError {
    Int(ParseIntError),
    Range(PrefixRangeError),
}

impl From<ParseIntError> for ParsePrefixError {
    fn from(err: ParseIntError) -> Self {
        ParsePrefixError::Int(err)
    }
}

impl From<PrefixRangeError> for ParsePrefixError {
    fn from(err: PrefixRangeError) -> Self {
        ParsePrefixError::Range(err)
    }
}

impl fmt::Display for ParsePrefixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParsePrefixError::Int(err) => {
                write!(f, "invalid prefix length: {}", err)
            }
            ParsePrefixError::Range(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl error::Error for ParsePrefixError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParsePrefixError::Int(err) => Some(err),
            ParsePrefixError::Range(err) => Some(err),
        }
    }
}


//------------ FromInetnumError ----------------------------------------------

/// An address prefix could not be turned into a prefix length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FromInetnumError {
    /// The address belongs to the other family.
    Family,

    /// The length is not valid, i.e. zero.
    Range(PrefixRangeError),
}

impl From<PrefixRangeError> for FromInetnumError {
    fn from(err: PrefixRangeError) -> Self {
        FromInetnumError::Range(err)
    }
}

impl fmt::Display for FromInetnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FromInetnumError::Family => f.write_str("address family mismatch"),
            FromInetnumError::Range(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl error::Error for FromInetnumError {}


//============ Tests =========================================================
