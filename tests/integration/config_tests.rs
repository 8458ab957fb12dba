//! Configuration integration tests
//!
//! Loads the shipped example file and checks it matches the built-in
//! defaults.

#[cfg(test)]
mod tests {
    use backoffice_authz::{AuthzConfig, AuthzError};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn example_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/authz.yaml.example")
    }

    #[tokio::test]
    async fn test_example_config_loads() {
        let config = AuthzConfig::from_file(example_path()).await;
        assert!(config.is_ok(), "Example config failed: {:?}", config.err());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let content = std::fs::read_to_string(example_path()).unwrap();
        let example = AuthzConfig::from_yaml(&content).unwrap();
        let defaults = AuthzConfig::default();

        assert_eq!(example.to_yaml().unwrap(), defaults.to_yaml().unwrap());
    }

    #[test]
    fn test_env_overrides_then_validation() {
        let content = std::fs::read_to_string(example_path()).unwrap();
        let mut config = AuthzConfig::from_yaml(&content).unwrap();

        let vars: HashMap<&str, &str> = [("AUTHZ_CACHE_SLIDING_SECS", "7200")].into();
        config
            .apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        // Sliding window longer than the absolute one
        assert!(matches!(config.validate(), Err(AuthzError::Config(_))));
    }
}
