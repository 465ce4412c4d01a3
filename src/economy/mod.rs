//! Balance placeholder module: directives, formatters and the economies they read from.
mod compact;
mod directive;
mod formatter;
mod number_format;
mod precision;
mod provider;
mod resolver;
mod types;

pub use compact::*;
pub use directive::*;
pub use formatter::*;
pub use number_format::*;
pub use precision::*;
pub use provider::*;
pub use resolver::*;
pub use types::*;
