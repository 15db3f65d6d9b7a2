//! Configuration Module Tests

#[cfg(test)]
mod tests {
    use crate::config::{CoordinatorConfig, WorkerConfig};
    use crate::error::RecommenderError;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_coordinator_config_full() {
        let yaml = r#"
server:
  bind: "0.0.0.0:7000"
  query_bind: "127.0.0.1:7001"
  accept_timeout: 2m
  session_timeout: 30s
dataset:
  path: /srv/reviews.csv
  partitions: 8
  shuffle_seed: 42
"#;

        let config = CoordinatorConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:7000");
        assert_eq!(config.server.query_bind, "127.0.0.1:7001");
        assert_eq!(config.server.accept_timeout, Duration::from_secs(120));
        assert_eq!(config.server.session_timeout, Duration::from_secs(30));
        assert_eq!(config.dataset.path, PathBuf::from("/srv/reviews.csv"));
        assert_eq!(config.dataset.partitions, 8);
        assert_eq!(config.dataset.shuffle_seed, Some(42));
    }

    #[test]
    fn test_coordinator_config_defaults() {
        let config = CoordinatorConfig::from_yaml_str("dataset:\n  partitions: 2\n").unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.server.accept_timeout, Duration::from_secs(60));
        assert_eq!(config.server.session_timeout, Duration::from_secs(120));
        assert_eq!(config.dataset.partitions, 2);
        assert_eq!(config.dataset.path, PathBuf::from("data/sample_reviews.csv"));
        assert_eq!(config.dataset.shuffle_seed, None);
    }

    #[test]
    fn test_zero_partitions_rejected() {
        let result = CoordinatorConfig::from_yaml_str("dataset:\n  partitions: 0\n");

        assert!(matches!(result, Err(RecommenderError::Config(_))));
    }

    #[test]
    fn test_bad_duration_rejected() {
        let result = CoordinatorConfig::from_yaml_str("server:\n  accept_timeout: soon\n");

        assert!(matches!(result, Err(RecommenderError::Config(_))));
    }

    #[test]
    fn test_worker_config_full_and_defaults() {
        let config = WorkerConfig::from_yaml_str(
            "server:\n  address: \"10.0.0.5:9000\"\ncomputation:\n  threshold: 3.5\n",
        )
        .unwrap();
        assert_eq!(config.server.address, "10.0.0.5:9000");
        assert_eq!(config.server.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.computation.threshold, 3.5);

        let defaults = WorkerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(defaults, WorkerConfig::default());
        assert_eq!(defaults.computation.threshold, 2.0);
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let result = WorkerConfig::from_yaml_str("computation:\n  threshold: .nan\n");

        assert!(matches!(result, Err(RecommenderError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  address: \"127.0.0.1:9100\"").unwrap();

        let config = WorkerConfig::load(file.path()).unwrap();

        assert_eq!(config.server.address, "127.0.0.1:9100");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = CoordinatorConfig::load(&dir.path().join("absent.yaml"));

        assert!(matches!(result, Err(RecommenderError::Config(_))));
    }
}
