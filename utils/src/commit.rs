//! Structured commitments over named, typed fields.
//!
//! The scheme is the espresso sequencer's: Keccak-256 over a byte stream of
//! NUL-terminated UTF-8 tag and field-name strings, little-endian
//! fixed-width integers and length-prefixed variable-size byte strings. A
//! commitment's layout is spelled out as a slice of [`CommitmentField`]s
//! handed to [`commit_fields`] in one call, so the field order is a visible
//! data structure rather than an implicit sequence of builder calls.

use committable::{Commitment, Committable, RawCommitmentBuilder};

use crate::ser::U256;

/// One named field of a structured commitment.
///
/// Order matters: permuting the slice handed to [`commit_fields`] changes
/// the digest.
#[derive(Clone, Copy, Debug)]
pub enum CommitmentField<'a> {
    /// A fixed-width integer, hashed as 8 bytes little-endian.
    U64 { name: &'static str, value: u64 },
    /// A fixed-width integer, hashed as 32 bytes little-endian, zero-padded.
    U256 { name: &'static str, value: U256 },
    /// The digest of a nested structure. Nesting by digest lets structures
    /// compose without re-serializing the nested structure's source fields.
    Commitment { name: &'static str, raw: [u8; 32] },
    /// Variable-size bytes, hashed behind a length prefix so that adjacent
    /// variable-size fields cannot absorb each other's content.
    VarSize { name: &'static str, bytes: &'a [u8] },
}

impl<'a> CommitmentField<'a> {
    pub fn u64(name: &'static str, value: u64) -> Self {
        Self::U64 { name, value }
    }

    pub fn u256(name: &'static str, value: U256) -> Self {
        Self::U256 { name, value }
    }

    pub fn commitment<T: Committable>(name: &'static str, commitment: &Commitment<T>) -> Self {
        let mut raw = [0u8; 32];
        raw.copy_from_slice(commitment.as_ref());
        Self::Commitment { name, raw }
    }

    pub fn var_size(name: &'static str, bytes: &'a [u8]) -> Self {
        Self::VarSize { name, bytes }
    }
}

/// Commits to `fields`, in slice order, under the domain tag `tag`.
///
/// Equal tags and equal field lists always produce equal digests.
pub fn commit_fields<T: Committable>(tag: &str, fields: &[CommitmentField<'_>]) -> Commitment<T> {
    let mut builder = RawCommitmentBuilder::new(tag);
    for field in fields {
        builder = match *field {
            CommitmentField::U64 { name, value } => builder.u64_field(name, value),
            // `RawCommitmentBuilder` doesn't have a `u256_field` method, so we
            // simulate it.
            CommitmentField::U256 { name, value } => builder
                .constant_str(name)
                .fixed_size_bytes(&value.to_le_bytes()),
            CommitmentField::Commitment { name, raw } => {
                builder.constant_str(name).fixed_size_bytes(&raw)
            }
            CommitmentField::VarSize { name, bytes } => builder.var_size_field(name, bytes),
        };
    }
    builder.finalize()
}
