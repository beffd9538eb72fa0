//! Resolves IEEE hardware (MAC) addresses to the organization that registered
//! the address's vendor prefix.
//!
//! Addresses are parsed from text with [`parse_mac`] and matched against an
//! [`OuiDb`] built from a tab-separated vendor list. Prefixes are variable
//! length, so a block may cover a classic 24-bit OUI or a narrower 28/36-bit
//! assignment.

mod errors;
pub use self::errors::*;

mod hwaddr;
pub use self::hwaddr::*;

mod mask;
pub use self::mask::*;

mod block;
pub use self::block::*;

mod db;
pub use self::db::*;
