//! # Chain Crypto
//!
//! The Hasher (spec.md §4.1), Merkle Builder (§4.2), and secp256k1
//! recoverable-ECDSA signing/recovery half of the Transaction Codec &
//! Signer (§4.3).
//!
//! ## Components
//!
//! | Module | Responsibility |
//! |--------|-----------------|
//! | `hashing` | `sha256_hex` over byte strings |
//! | `merkle` | Binary Merkle root over an ordered leaf list |
//! | `ecdsa` | secp256k1 signing, public-key recovery, address derivation |

#![warn(missing_docs)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod merkle;

pub use errors::CryptoError;
pub use hashing::{sha256_bytes, sha256_hex, sha256_hex_concat};
pub use merkle::{merkle_root, merkle_root_indexed};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
