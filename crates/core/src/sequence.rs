//! Sequence types shared between the decoder loop and the orchestrator

/// Integer token id as the inference engine consumes it.
pub type TokenId = i64;

/// All-ones attention mask for a batch-of-one sequence.
///
/// There is no padding within a single request, so every source position
/// is attended to.
pub fn attention_mask(len: usize) -> Vec<TokenId> {
    vec![1; len]
}

/// Why the greedy decode loop stopped.
///
/// Modeled as an explicit state rather than inferred from output length,
/// so tests can assert on the termination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The model emitted the end-of-sequence id.
    EosReached,
    /// The model emitted the pad id (Marian models use pad as a terminal).
    PadReached,
    /// The iteration bound was hit before any terminal token appeared.
    MaxTokensHit,
}

/// The finalized output of the greedy decoder.
///
/// Invariant: `ids[0]` is always the decoder-start id; it is stripped by
/// the subword codec before text is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSequence {
    pub ids: Vec<TokenId>,
    pub stop: StopReason,
}

impl GeneratedSequence {
    /// Tokens generated after the decoder-start id.
    pub fn new_tokens(&self) -> &[TokenId] {
        self.ids.get(1..).unwrap_or_default()
    }
}
