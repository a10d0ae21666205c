use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Lifecycle state, reachability, player count and control API status
    Status,

    /// Auto-shutdown countdown
    Timer,

    /// Stop the managed server after the grace period
    Shutdown,

    /// Re-read configuration from disk
    Reload,

    /// Report a client connection attempt (starts the server if it is off)
    Connect {
        /// Client identifier
        client_id: String,
    },

    /// Report that a waiting client gave up
    Disconnect {
        /// Client identifier
        client_id: String,
    },
}
