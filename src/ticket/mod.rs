//! Ticket pipeline: title validation, two-pass scope generation,
//! description formatting, and submission to the issue tracker.
//!
//! Control flow is strictly sequential:
//! validate → generate → evaluate → format → (on demand) submit.
//! Every stage converts its failures into a [`TicketError`] carrying the
//! upstream message; nothing is retried.

pub mod error;
pub mod evaluator;
pub mod format;
pub mod generator;
pub mod prompts;
pub mod scope;
pub mod session;
pub mod submit;
pub mod title;

pub use error::{Stage, TicketError};
pub use evaluator::ScopeEvaluator;
pub use format::format_description;
pub use generator::ScopeGenerator;
pub use scope::{RawScope, ScopeDetails, ScopeQuality, ScopeValue, ScopedTask};
pub use session::{PipelineState, TicketSession};
pub use submit::TicketSubmitter;
pub use title::is_valid_title;
