use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::net::IpAddr;
use std::ops::Not;

use crate::util::macros::addressfamily;

//------------ AddressFamily (trait) -----------------------------------------

/// The address family of a prefix as a Trait.
///
/// Each family is represented by the unsigned integer that holds a full
/// address of that family, so a mask of the family is simply a value of
/// the implementing type. The family decides the width of a mask and thus
/// the range of valid prefix lengths.
pub trait AddressFamily:
    Copy + Debug + Eq + Ord + Hash + Not<Output = Self> + Send + Sync + 'static
{
    /// The dotted representation of a mask in this family.
    type Addr: Copy + Display;

    /// The byte representation of the family filled with 1s.
    const BITMASK: Self;
    /// The number of bits in the byte representation of the family.
    const BITS: u8;

    /// Returns `len` one-bits followed by zero-bits, most significant first.
    ///
    /// `len` must not exceed [`Self::BITS`].
    fn mask(len: u8) -> Self;

    /// Returns the number of one-bits, contiguous or not.
    fn ones(self) -> u32;

    /// Returns whether all one-bits form a single leading run.
    fn is_contiguous(self) -> bool;

    /// Returns the bit at `pos`, counting from the most significant bit.
    fn bit(self, pos: u8) -> bool;

    fn into_addr(self) -> Self::Addr;

    /// Returns whether `addr` belongs to this family.
    fn matches(addr: IpAddr) -> bool;
}


//-------------- Ipv4 Type ---------------------------------------------------

addressfamily!(
    /// The 32 bit address family.
    IPv4, u32, std::net::Ipv4Addr, V4
);


//-------------- Ipv6 Type ---------------------------------------------------

addressfamily!(
    /// The 128 bit address family.
    IPv6, u128, std::net::Ipv6Addr, V6
);


//============ Tests =========================================================
