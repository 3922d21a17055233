//! Optional `tracing-subscriber` bootstrap for binaries and tests.

/// Installs a plain fmt subscriber at `level` as the global default.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(level: tracing::Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(tracing::Level::DEBUG);
        assert!(!init(tracing::Level::DEBUG));
    }
}
