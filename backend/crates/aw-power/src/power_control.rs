use async_trait::async_trait;

/// Start, stop and status operations on the managed server.
///
/// Implementations never retry. Each call resolves to a plain outcome;
/// retry policy belongs to the caller. Calls may take arbitrarily long.
#[async_trait]
pub trait PowerControl: Send + Sync {
    /// Ask the control API to power the server on.
    async fn request_start(&self, server_id: &str) -> bool;

    /// Ask the control API to power the server off.
    async fn request_stop(&self, server_id: &str) -> bool;

    /// Coarse status label. [`crate::OFFLINE_STATUS`] is the only label with
    /// a defined meaning.
    async fn query_status(&self, server_id: &str) -> String;

    /// Release the underlying connection pool. Later calls fail.
    fn release(&self);
}
