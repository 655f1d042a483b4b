//! Prefix lengths for IPv4 and IPv6 and the masks they describe.
//!
//! The central type is [`Prefix`][addr::Prefix], the `N` in a CIDR `/N`,
//! generic over the [`AddressFamily`][addr::AddressFamily]. The aliases
//! [`Prefix32`][addr::Prefix32] and [`Prefix128`][addr::Prefix128] name
//! the two families.
//!
//! ```
//! use prefixlen::addr::Prefix32;
//!
//! let p = Prefix32::new(24).unwrap();
//! assert_eq!(p.to_netmask_string(), "255.255.255.0");
//! assert_eq!(p.to_hostmask_string(), "0.0.0.255");
//! assert_eq!(p.to_u32(), 0xffff_ff00);
//! assert_eq!(Prefix32::parse_netmask("255.255.0.0").unwrap().len(), 16);
//! ```

pub mod addr;

pub use addr::{Prefix, Prefix128, Prefix32};

//--- Private modules

mod util;
