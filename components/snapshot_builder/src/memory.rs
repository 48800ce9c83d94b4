//! Process memory probe

/// Peak resident set size of this process in bytes
///
/// Reads `VmHWM` from `/proc/self/status`. Returns 0 where that file does not
/// exist or cannot be parsed.
pub fn peak_memory_bytes() -> u64 {
    std::fs::read_to_string("/proc/self/status")
        .map(|content| parse_peak_kb(&content) * 1024)
        .unwrap_or(0)
}

/// Extract `VmHWM` (in kB) from `/proc/[pid]/status` content
pub fn parse_peak_kb(content: &str) -> u64 {
    content
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "VmHWM")
        .and_then(|(_, value)| value.split_whitespace().next())
        .and_then(|kb| kb.parse().ok())
        .unwrap_or(0)
}
