//! # Intelhex Core
//!
//! Intel HEX record codec and the two conversions built on it: splitting a
//! binary stream into records, and rebuilding a binary image from records.
//!
//! ## Modules
//!
//! - `constants`: Record format constants and limits
//! - `hexdigit`: ASCII hex digit decoding
//! - `checksum`: Record checksum
//! - `types`: Decoded record types
//! - `encoder`: Record encoding
//! - `decoder`: Strict record decoding
//! - `image`: 64 KiB memory image
//! - `converter`: Binary to hex conversion
//! - `reconstructor`: Hex to binary reconstruction with bounded warnings
//!
//! Addressing is 16-bit only. Extended linear address records are parsed but
//! their value is never applied, and the converter always emits zero for it.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod checksum;
pub mod constants;
pub mod converter;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod hexdigit;
pub mod image;
pub mod reconstructor;
pub mod types;

// Re-export commonly used types
pub use constants::RecordType;
pub use error::{ConvertError, DecodeError, FormatError};
pub use types::{Address, Record};

/// Result type alias for conversion runs
pub type Result<T> = core::result::Result<T, ConvertError>;
