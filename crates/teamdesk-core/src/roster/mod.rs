//! Event participant roster reconciliation.
//!
//! Merges a selected team's roster and individually picked students into one
//! deduplicated selection set, derives the pool of students still available
//! for individual selection, and submits the selection as enrollment batches.
//!
//! - `ParticipantReconciler`: owns the selection set for one enrollment session
//! - `compute_selectable_pool`: pure derivation of the selectable candidates
//! - `TeamDirectory`, `EnrollmentGateway`: the API calls the reconciler makes

pub mod error;
pub mod gateway;
pub mod pool;
pub mod reconciler;

pub use error::{ReconcileError, GENERIC_SUBMIT_FAILURE};
pub use gateway::{EnrollmentGateway, TeamDirectory};
pub use pool::{available_classes, compute_selectable_pool};
pub use reconciler::{ParticipantReconciler, PendingSubmission, SubmitOutcome, TeamSelection};
