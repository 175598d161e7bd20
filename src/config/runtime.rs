use super::DwellConfig;
use tracing::warn;

/// Apply `DWELL_*` environment variables on top of file configuration.
pub fn apply_env_overrides(config: &mut DwellConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary variable source. Unparseable values are
/// logged and ignored.
pub fn apply_overrides(config: &mut DwellConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("DWELL_NOISE_THRESHOLD_MS") {
        match v.parse::<u32>() {
            Ok(n) => config.presence.noise_threshold_ms = n,
            Err(_) => warn!(value = %v, "Ignoring invalid DWELL_NOISE_THRESHOLD_MS"),
        }
    }
    if let Some(v) = lookup("DWELL_SILENCE_THRESHOLD_SECS") {
        match v.parse::<u64>() {
            Ok(n) => config.presence.silence_threshold_secs = n,
            Err(_) => warn!(value = %v, "Ignoring invalid DWELL_SILENCE_THRESHOLD_SECS"),
        }
    }
    if let Some(v) = lookup("DWELL_QUEUE_CAPACITY") {
        match v.parse::<usize>() {
            Ok(n) if n > 0 => config.service.queue_capacity = n,
            _ => warn!(value = %v, "Ignoring invalid DWELL_QUEUE_CAPACITY"),
        }
    }
}
