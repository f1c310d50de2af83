//! Tool catalog, call validation and result formatting.

pub mod catalog;
pub mod dispatcher;
pub mod format;
pub mod types;

pub use catalog::{DEFAULT_MAX_RESULTS, tool_catalog};
pub use dispatcher::ToolDispatcher;
pub use format::UNABLE_TO_RETRIEVE;
pub use types::{
    ContentBlock, DispatchError, ToolCallRequest, ToolCallResponse, ToolDescriptor, ToolName,
};
