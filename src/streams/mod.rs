//! Resource streams
//!
//! Each Syncro resource is described by static data: its path, where its
//! records live in the response, which statuses it tolerates, and which
//! post-processor normalizes its records. The `Resource` trait is the
//! capability interface the extraction engine works against.

mod post_process;
mod registry;
mod types;

pub use post_process::{IdentifierNormalizer, NoopPostProcessor, RecordPostProcessor};
pub use registry::{get_resource, list_resources, select_resources, RESOURCES};
pub use types::{Resource, ResourceDefinition};

#[cfg(test)]
mod tests;
