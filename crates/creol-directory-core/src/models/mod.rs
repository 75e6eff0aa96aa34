//! Data models for CREOL directory entities.
//!
//! - `RawRecord`: an untrusted element of the remote `response` array
//! - `Person`, `Alumnus`: typed records produced by fallible normalization
//! - `DirectoryRequest`, `DisplayMode`: the resolved description of one render call

pub mod alumnus;
pub mod person;
pub mod record;
pub mod request;

pub use alumnus::Alumnus;
pub use person::Person;
pub use record::{DirectoryRecord, InvalidRecord, RawRecord, RecordKind};
pub use request::{DirectoryRequest, DisplayMode};
