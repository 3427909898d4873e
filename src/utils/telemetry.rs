use tracing::Level;

// installs a json fmt subscriber for the demo binary; library code only emits events
pub fn setup_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .json()
        .try_init();
}

pub fn level_from_str(level: Option<&str>) -> Level {
    level.and_then(|l| l.trim().parse().ok()).unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use tracing::Level;
    use crate::utils::telemetry::{level_from_str, setup_tracing};

    #[tokio::test]
    async fn test_should_parse_level() {
        assert_eq!(Level::DEBUG, level_from_str(Some("DEBUG")));
        assert_eq!(Level::WARN, level_from_str(Some(" warn ")));
        assert_eq!(Level::ERROR, level_from_str(Some("error")));
        assert_eq!(Level::INFO, level_from_str(Some("verbose")));
        assert_eq!(Level::INFO, level_from_str(None));
    }

    #[tokio::test]
    async fn test_should_setup_tracing_twice() {
        setup_tracing(Level::INFO);
        setup_tracing(Level::DEBUG);
    }
}
