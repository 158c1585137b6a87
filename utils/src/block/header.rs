//! The espresso block header and its commitment scheme.

use serde::{Deserialize, Serialize};

#[cfg(feature = "commit")]
use committable::{Commitment, Committable};

#[cfg(feature = "commit")]
use crate::commit::{commit_fields, CommitmentField};
use crate::ser::{Bytes, U256};

/// An espresso block header, as served by the sequencer's query API.
///
/// Field declaration order is the commitment order. Reordering fields
/// changes [`Header::commit`] and silently breaks verification against the
/// sequencer, so it is a wire contract, not a stylistic choice.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Header {
    pub timestamp: u64,
    pub l1_block: L1BlockInfo,
    pub transactions_root: NmtRoot,
}

#[cfg(feature = "commit")]
impl Committable for Header {
    fn commit(&self) -> Commitment<Self> {
        commit_fields(
            &Self::tag(),
            &[
                CommitmentField::u64("timestamp", self.timestamp),
                CommitmentField::commitment("l1_block", &self.l1_block.commit()),
                CommitmentField::commitment("transactions_root", &self.transactions_root.commit()),
            ],
        )
    }

    fn tag() -> String {
        // We use the tag "BLOCK" since blocks are identified by the hash of
        // their header. This will thus be more intuitive to users than
        // "HEADER".
        "BLOCK".into()
    }
}

/// The L1 chain reference point claimed by the sequencer for this block.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct L1BlockInfo {
    pub number: u64,
    pub timestamp: U256,
}

#[cfg(feature = "commit")]
impl Committable for L1BlockInfo {
    fn commit(&self) -> Commitment<Self> {
        commit_fields(
            &Self::tag(),
            &[
                CommitmentField::u64("number", self.number),
                CommitmentField::u256("timestamp", self.timestamp),
            ],
        )
    }

    fn tag() -> String {
        "L1BLOCK".into()
    }
}

/// Root of the namespaced Merkle tree over the block's transactions.
/// Produced by the sequencer; opaque to the rollup.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NmtRoot {
    pub root: Bytes,
}

#[cfg(feature = "commit")]
impl Committable for NmtRoot {
    fn commit(&self) -> Commitment<Self> {
        commit_fields(
            &Self::tag(),
            &[CommitmentField::var_size("root", self.root.as_ref())],
        )
    }

    fn tag() -> String {
        "NMTROOT".into()
    }
}
