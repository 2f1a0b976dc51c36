//! Audio server process detection.

/// Process name of the JACK audio server.
pub const DEFAULT_SERVER_PROCESS: &str = "jackd";

/// PID of the first running process whose name contains `name`.
///
/// Only Linux is inspected (via `/proc/<pid>/comm`); other platforms report `None`.
pub fn server_pid(name: &str) -> Option<u32> {
    #[cfg(target_os = "linux")]
    {
        let entries = std::fs::read_dir("/proc").ok()?;
        let mut pids: Vec<u32> = entries
            .filter_map(|e| e.ok()?.file_name().to_str()?.parse().ok())
            .collect();
        pids.sort_unstable();

        pids.into_iter().find(|pid| {
            std::fs::read_to_string(format!("/proc/{pid}/comm"))
                .is_ok_and(|comm| comm.trim_end().contains(name))
        })
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = name;
        None
    }
}
