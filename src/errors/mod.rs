//! Error normalization for remote workbook calls

pub mod remote;
pub mod status;

pub use remote::RemoteError;
pub use status::StatusError;
