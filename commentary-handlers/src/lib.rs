//! # commentary-handlers
//!
//! Handlers for the channel commentary bot, in chain order:
//!
//! - [`LoggingHandler`]: logs every inbound message and the final response.
//! - [`CommandHandler`]: admin commands (status, allow, remove, dump_whitelist) and `/report`.
//! - [`CommentaryHandler`]: plain posts; generates a comment, records the post and replies.
//!
//! [`ReportExporter`] builds and sends a channel's post log as a JSON document.

mod command;
mod command_handler;
mod commentary_handler;
mod error;
mod logging;
mod report;
mod resolve;

pub use command::{classify, Command, Denial, InboundEvent};
pub use command_handler::{CommandHandler, ACCESS_DENIED, NO_ACTIVITY, WHITELIST_NOT_FOUND};
pub use commentary_handler::{CommentaryHandler, PLACEHOLDER_COMMENT};
pub use error::{ReportError, ResolutionError};
pub use logging::LoggingHandler;
pub use report::{report_filename, ReportArtifact, ReportExporter, REPORT_CAPTION};
pub use resolve::{resolve_target, Target};
