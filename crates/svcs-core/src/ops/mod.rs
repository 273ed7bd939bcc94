//! Decision logic for the staging, commit and checkout procedures.
//!
//! Every function here is pure over the state handed to it; reading that
//! state from a [`Repository`] and applying the resulting decision is the
//! engine's job.

pub mod checkout_ops;
pub mod commit_ops;
pub mod index_ops;
pub mod repository;

pub use checkout_ops::{
    decide_checkout, missing_snapshot_refusal, CheckoutDecision, CheckoutRefusal,
};
pub use commit_ops::{decide_commit, CommitDecision, CommitInputs, CommitPlan, CommitRefusal};
pub use index_ops::{decide_stage, StageDecision};
pub use repository::{MemoryRepository, Repository};
