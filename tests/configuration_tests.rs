#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use cryptowork_bot::configuration::{DEFAULT_API_URL, Settings};
    use serial_test::serial;
    use std::env;
    use std::time::Duration;

    const KEYS: [&str; 6] = [
        "BOT_TOKEN",
        "TELEGRAM_API_URL",
        "POLL_TIMEOUT_SECS",
        "RETRY_DELAY_MS",
        "HEALTH_ADDR",
        "LOG_LEVEL",
    ];

    fn clear_env() {
        for key in KEYS {
            unsafe { env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        unsafe { env::set_var("BOT_TOKEN", "123:abc") };

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.bot_token, "123:abc");
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.poll_timeout_secs, 30);
        assert_eq!(settings.retry_delay, Duration::from_secs(1));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_token() {
        clear_env();

        let result = Settings::from_env();

        assert_matches!(result, Err(e) if e.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_health_addr() {
        clear_env();
        unsafe {
            env::set_var("BOT_TOKEN", "123:abc");
            env::set_var("HEALTH_ADDR", "not-an-address");
        }

        let result = Settings::from_env();

        assert_matches!(result, Err(e) if e.to_string().contains("HEALTH_ADDR"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            env::set_var("BOT_TOKEN", "123:abc");
            env::set_var("TELEGRAM_API_URL", "http://127.0.0.1:8081/");
            env::set_var("POLL_TIMEOUT_SECS", "0");
            env::set_var("LOG_LEVEL", "debug");
        }

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.api_url, "http://127.0.0.1:8081");
        assert_eq!(settings.poll_timeout_secs, 0);
        assert_eq!(settings.log_level, "debug");
        clear_env();
    }
}
