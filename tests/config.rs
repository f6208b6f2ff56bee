#[cfg(test)]
mod tests {
    use activity_logger::libs::config::{Config, SchedulerConfig, CONFIG_FILE_NAME};
    use activity_logger::libs::data_storage::DataStorage;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        storage: DataStorage,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::with_base_path(temp_dir.path().join("data"));
            ConfigTestContext {
                _temp_dir: temp_dir,
                storage,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.scheduler.is_none());
        assert_eq!(config.notification_title, "Activity Logger");
        assert!(config.autostart);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        assert!(!Config::exists_in(&ctx.storage));
        assert_eq!(Config::read_from(&ctx.storage).unwrap(), Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            scheduler: Some(SchedulerConfig { poll_interval: 250 }),
            notification_title: "Timesheet".to_string(),
            autostart: false,
        };
        config.save_to(&ctx.storage).unwrap();

        assert!(Config::exists_in(&ctx.storage));
        let read_config = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(read_config, config);
        assert_eq!(read_config.poll_interval(), Duration::from_millis(250));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_uses_defaults(ctx: &mut ConfigTestContext) {
        let path = ctx.storage.get_path(CONFIG_FILE_NAME).unwrap();
        fs::write(path, r#"{ "autostart": false }"#).unwrap();

        let config = Config::read_from(&ctx.storage).unwrap();
        assert!(!config.autostart);
        assert_eq!(config.notification_title, "Activity Logger");
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_zero_poll_interval_is_raised(ctx: &mut ConfigTestContext) {
        let config = Config {
            scheduler: Some(SchedulerConfig { poll_interval: 0 }),
            ..Config::default()
        };
        config.save_to(&ctx.storage).unwrap();
        assert_eq!(Config::read_from(&ctx.storage).unwrap().poll_interval(), Duration::from_millis(1));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupt_config_is_an_error(ctx: &mut ConfigTestContext) {
        let path = ctx.storage.get_path(CONFIG_FILE_NAME).unwrap();
        fs::write(path, "not json").unwrap();
        assert!(Config::read_from(&ctx.storage).is_err());
    }
}
