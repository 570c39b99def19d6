//! CLI command implementations.

pub(crate) mod export;
pub(crate) mod formats;

pub(crate) use export::ExportArgs;
pub(crate) use formats::list_formats;
