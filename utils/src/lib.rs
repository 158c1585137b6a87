//! Espresso block header types for rollup integration.
//!
//! A rollup sequencing through espresso must reproduce, on its own, the
//! commitment the sequencer computes over each block header and compare it
//! against the value the sequencer serves. These types decode the
//! sequencer's JSON wire format and recompute that commitment byte for
//! byte; any divergence in field order, integer width or string formatting
//! silently breaks verification.

use serde::{Deserialize, Serialize};

use block::{header::Header, BatchMerkleProof, NmtProof};

pub mod block;
#[cfg(feature = "commit")]
pub mod commit;
pub mod ser;

/// Ties a batch of rollup transactions to a sequenced espresso block: the
/// header the rollup's view is bound to, plus the opaque proofs an external
/// verifier consumes alongside it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BatchDerivationProof {
    /// Merkle proof that `header` is part of the sequencer's chain of
    /// batches.
    pub batch_proof: BatchMerkleProof,
    /// The espresso block header.
    pub header: Header,
    /// Namespace proof for the rollup's transactions under the header's
    /// transactions root.
    pub ns_proof: NmtProof,
}
