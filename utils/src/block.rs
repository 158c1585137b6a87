//! Definitions of the parts of an espresso block visible to rollups.

use crate::ser::Bytes;

pub mod header;

/// Proof that a header belongs to the sequencer's batch Merkle tree. Opaque
/// to the rollup; handed to an external verifier unmodified.
pub type BatchMerkleProof = Bytes;

/// Proof about the transactions of one namespace under a block's
/// [`header::NmtRoot`]. Opaque to the rollup.
pub type NmtProof = Bytes;
