//! fieldlog
//!
//! Structured logging setup on top of `tracing`.
//!
//! # Features
//!
//! - **Error chain fields**: errors carrying structured fields render as
//!   `{"msg": ..., "fields": {...}}`, with fields collected across the whole
//!   cause chain
//! - **Split output**: one record stream to two destinations, each with its
//!   own format and minimum level
//! - **Forgiving configuration**: unknown level strings mean `trace`, unknown
//!   format strings mean `json`
//! - **Console formats**: plain or colored, with or without time
//!
//! # Example
//!
//! ```no_run
//! use fieldlog::{setup, Format, Level, SetupOptions, SplitWriter, StructuredError};
//!
//! fn main() -> Result<(), fieldlog::LogError> {
//!     let split = SplitWriter::new(
//!         std::io::stdout(),
//!         std::io::stderr(),
//!         Format::Color,
//!         Format::Json,
//!         Level::Info,
//!         Level::Debug,
//!     );
//!     setup(
//!         SetupOptions::new()
//!             .service_name("billing")
//!             .with_format(Format::Custom)
//!             .with_level_output(split),
//!     )?;
//!
//!     let err = StructuredError::new("card declined").with_field("order_id", 42);
//!     fieldlog::log_err!(Some(&err), "charge failed");
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod console;
pub mod error;
pub mod fields;
pub mod format;
pub mod initialization;
pub mod layer;
pub mod level;
pub mod macros;
pub mod options;
pub mod sink;
pub mod split;
pub mod structured;

pub use adapter::ErrorfAdapter;
pub use error::{LogError, LogResult};
pub use fields::{collect_fields, error_stack, marshal_error, ErrorLink, ErrorRecord, Fields, RichError};
pub use format::{resolve_format, Format, FormatInput};
pub use initialization::{build, global, setup, Logger};
pub use layer::JsonLayer;
pub use level::{resolve_level, Level, LevelInput};
pub use options::SetupOptions;
pub use sink::{FanoutSink, LevelWrite, WriterSink};
pub use split::SplitWriter;
pub use structured::{BoxError, BoxRichError, StructuredError};

pub use fieldlog_config::Config;

#[doc(hidden)]
pub use tracing;
