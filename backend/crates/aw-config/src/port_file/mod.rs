pub(crate) mod port_file_info;

/// Check if a process with the given PID is currently running.
///
/// Uses `kill(pid, 0)` on Unix, which checks existence without sending a signal.
#[cfg(unix)]
pub fn is_process_running(pid: u32) -> bool {
    // pid 0 would address the caller's own process group
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pid <= 0 {
        return false;
    }
    // SAFETY: kill with signal 0 only checks existence, no signal is sent.
    unsafe { libc::kill(pid, 0) == 0 }
}

#[cfg(not(unix))]
pub fn is_process_running(_pid: u32) -> bool {
    // Assume alive; the CLI gets a connection error if the server is gone.
    true
}
