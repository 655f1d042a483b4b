/// Implement [`AddressFamily`] for a primitive unsigned integer.
///
/// # Example
///
/// ```rust,ignore
/// addressfamily!(
///     /// The 32 bit family.
///     IPv4, u32, std::net::Ipv4Addr, V4
/// );
/// ```
/// This creates a `pub type IPv4 = u32` and implements the trait for it,
/// using the integer's width as the family size, `$addr` as the dotted
/// rendering of a mask and `IpAddr::$variant` to recognise addresses of
/// this family.
///
/// [`AddressFamily`]: crate::addr::AddressFamily
macro_rules! addressfamily {
    ($(#[$attr:meta])* $name:ident, $ty:ty, $addr:ty, $variant:ident) => {
        $(#[$attr])*
        pub type $name = $ty;

        impl $crate::addr::AddressFamily for $name {
            type Addr = $addr;

            const BITMASK: $ty = <$ty>::MAX;
            const BITS: u8 = <$ty>::BITS as u8;

            fn mask(len: u8) -> Self {
                // A shift by the full width is the zero-length mask.
                <$ty>::MAX
                    .checked_shl(<$ty>::BITS - u32::from(len))
                    .unwrap_or(0)
            }

            fn ones(self) -> u32 {
                self.count_ones()
            }

            fn is_contiguous(self) -> bool {
                self.leading_ones() + self.trailing_zeros() == <$ty>::BITS
            }

            fn bit(self, pos: u8) -> bool {
                (self >> (<$ty>::BITS - 1 - u32::from(pos))) & 1 == 1
            }

            fn into_addr(self) -> $addr {
                <$addr>::from(self)
            }

            fn matches(addr: std::net::IpAddr) -> bool {
                matches!(addr, std::net::IpAddr::$variant(_))
            }
        }
    }
}

/// Generate the integer conversions of a [`Prefix`] of one family.
///
/// For `prefixint!(IPv4, u32)` this creates `Prefix<IPv4>::to_u32` and a
/// `From<Prefix<IPv4>>` impl for `u32`, both returning the full mask.
///
/// [`Prefix`]: crate::addr::Prefix
macro_rules! prefixint {
    ($af:ident, $ty:ident) => { ::paste::paste! {
        impl $crate::addr::Prefix<$af> {
            #[doc = "Returns the mask as a big-endian `" $ty "`."]
            ///
            /// This is the bit pattern of the prefix: `len` one-bits
            /// followed by zero-bits up to the width of the family.
            pub fn [<to_ $ty>](self) -> $ty {
                self.mask()
            }
        }

        impl From<$crate::addr::Prefix<$af>> for $ty {
            fn from(prefix: $crate::addr::Prefix<$af>) -> $ty {
                prefix.[<to_ $ty>]()
            }
        }
    }}
}

pub(crate) use addressfamily;
pub(crate) use prefixint;
