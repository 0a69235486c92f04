//! # ScaraKit Commands
//!
//! Reads command files line by line and drives the robot.
//!
//! Each line is tokenized, matched against the [`Keyword`] table, parsed into a
//! [`Command`] and executed by the [`CommandDispatcher`] against an explicit
//! [`Session`]. A bad line is reported and skipped; only transport failures stop a run.

pub mod dispatcher;
pub mod keyword;
pub mod parser;
pub mod session;
pub mod tokenizer;

pub use dispatcher::{
    CommandDispatcher, DispatchOptions, LineOutcome, LineState, RejectReason, RunSummary,
    SUCCESS_MESSAGE,
};
pub use keyword::Keyword;
pub use parser::{parse_parameters, Command};
pub use session::Session;
pub use tokenizer::{tokenize, SEPARATORS};
