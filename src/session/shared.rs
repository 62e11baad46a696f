//! Cloneable handle that serialises concurrent callers

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::Transport;
use crate::error::Result;
use crate::protocol::JsonRpcResponse;
use crate::transport::SubprocessTransport;
use crate::types::identifiers::ToolName;
use crate::types::tool::ToolDescriptor;

use super::{Session, SessionState};

/// Session shared between tasks
///
/// Each operation holds the lock for its whole request/response exchange, so
/// at most one request is ever outstanding on the underlying session.
pub struct SharedSession<T: Transport = SubprocessTransport> {
    inner: Arc<Mutex<Session<T>>>,
}

impl<T: Transport> Clone for SharedSession<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> SharedSession<T> {
    /// Wrap a session
    pub fn new(session: Session<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Current lifecycle state
    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state()
    }

    /// See [`Session::send_call`]
    ///
    /// # Errors
    /// Same as [`Session::send_call`]
    pub async fn send_call(&self, method: &str, params: Value) -> Result<JsonRpcResponse> {
        self.inner.lock().await.send_call(method, params).await
    }

    /// See [`Session::list_tools`]
    ///
    /// # Errors
    /// Same as [`Session::list_tools`]
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        self.inner.lock().await.list_tools().await
    }

    /// See [`Session::call_tool`]
    ///
    /// # Errors
    /// Same as [`Session::call_tool`]
    pub async fn call_tool(&self, name: impl Into<ToolName>, arguments: Value) -> Result<Value> {
        let name = name.into();
        self.inner.lock().await.call_tool(name, arguments).await
    }

    /// See [`Session::terminate`]
    ///
    /// # Errors
    /// Same as [`Session::terminate`]
    pub async fn terminate(&self) -> Result<()> {
        self.inner.lock().await.terminate()
    }
}

impl<T: Transport> From<Session<T>> for SharedSession<T> {
    fn from(session: Session<T>) -> Self {
        Self::new(session)
    }
}
