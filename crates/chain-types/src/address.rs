//! Account and contract addresses.
//!
//! spec.md §3: "64-hex-character string, defined as SHA-256 of a transaction
//! sender's public key (uncompressed, hex)." This type only enforces the
//! *shape* (64 lowercase hex characters); deriving an address from a public
//! key is `chain-crypto`'s job, since that requires the hasher.

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 64-hex-character address, used for both externally-owned accounts and
/// contract accounts (spec.md §3 — both follow the same form) as well as
/// `codeHash` and Merkle root values, which share the shape but not the
/// type, to avoid accidentally mixing an address with a hash at a call site.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

/// A bare 64-hex-character digest (code hash or Merkle/storage root).
///
/// Distinct from `Address` only at the type level — both are SHA-256 hex
/// digests — so that a `CodeHash` can never be passed where an `Address` is
/// expected, or vice versa.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Digest(String);

fn validate_hex64(value: &str) -> Result<(), TypeError> {
    if value.len() != 64 {
        return Err(TypeError::WrongHexLength {
            len: value.len(),
            value: value.to_string(),
        });
    }
    if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TypeError::NotHex(value.to_string()));
    }
    Ok(())
}

impl Address {
    /// Build an address from an already-lowercased 64-hex-character string.
    pub fn new(hex: impl Into<String>) -> Result<Self, TypeError> {
        let hex = hex.into();
        validate_hex64(&hex)?;
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// The address as its hex string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the address, returning the inner hex string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Digest {
    /// Build a digest from a 64-hex-character string.
    pub fn new(hex: impl Into<String>) -> Result<Self, TypeError> {
        let hex = hex.into();
        validate_hex64(&hex)?;
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// The digest as its hex string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Digest> for Address {
    fn from(d: Digest) -> Self {
        Address(d.0)
    }
}

impl From<Address> for Digest {
    fn from(a: Address) -> Self {
        Digest(a.0)
    }
}
