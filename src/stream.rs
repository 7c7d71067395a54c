//! Generator-shaped invocation: the tool as a stream of messages.
//!
//! ## Why a stream?
//!
//! Plugin hosts drive a tool as a generator and collect messages until it is
//! exhausted. An export yields exactly one message today, but the generator
//! shape keeps the calling convention stable if intermediate progress
//! messages are ever emitted, and lets hosts consume the tool with the same
//! `StreamExt` loop they use for everything else.

use crate::message::ToolMessage;
use crate::tool::{SlidevTool, ToolParameters};
use futures::stream;
use std::pin::Pin;
use tokio_stream::Stream;

/// A boxed stream of tool messages.
pub type MessageStream = Pin<Box<dyn Stream<Item = ToolMessage> + Send>>;

impl SlidevTool {
    /// Run one invocation as a message stream.
    ///
    /// Yields exactly one message: the artifact blob on success, or a JSON
    /// error message on failure.
    pub fn invoke_stream(&self, params: ToolParameters) -> MessageStream {
        let tool = self.clone();
        Box::pin(stream::once(async move { tool.invoke(params).await }))
    }
}
