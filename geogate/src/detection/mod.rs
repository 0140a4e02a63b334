//! The detection provider chain.
//!
//! ```text
//! ip ──► local? ──yes──► heuristic ─────────────────────────────┐
//!          │ no                                                 │
//!          ▼                                                    ▼
//!        primary ──fail──► secondary ──fail──► tertiary ──fail──► heuristic
//!          │ ok              │ ok                │ ok             │
//!          └─────────────────┴───────────────────┴──────────► classify
//! ```

mod chain;

pub use chain::{Detection, DetectionChain, DetectionSource, DEFAULT_ATTEMPT_TIMEOUT};
