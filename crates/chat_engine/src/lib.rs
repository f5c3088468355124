//! Chat engine: endpoint IO, markdown rendering and effect execution.
mod controller;
mod endpoint;
mod engine;
mod render;
mod sink;
mod types;

pub use controller::{DispatchError, RequestDispatcher, SubmissionController};
pub use endpoint::{ChatEndpoint, EndpointSettings, ReqwestEndpoint, DEFAULT_ENDPOINT_URL};
pub use engine::EngineHandle;
pub use render::{CommonMarkRenderer, MarkdownRenderer};
pub use sink::{ContentKind, PresentationSink};
pub use types::{into_outcome, EndpointError, EngineEvent};
