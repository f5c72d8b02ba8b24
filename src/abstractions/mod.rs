//! Trait-based abstractions for external collaborators
//!
//! The engine never talks to a remote service, the filesystem, or the console
//! directly; it goes through the traits in this module so every collaborator
//! can be substituted in tests.

pub mod clients;
pub mod fs;
pub mod output;

pub use clients::{ClientProvider, ClientRegistry, MockServiceClient, ServiceClient};
pub use fs::{FileSystem, InMemoryFileSystem, OsFileSystem};
pub use output::{BufferSink, OutputSink, StdoutSink};
