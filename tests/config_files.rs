use cli_adventures::config::Config;
use tempfile::TempDir;

#[tokio::test]
async fn default_config_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();

    Config::create_default(path).await.unwrap();
    let loaded = Config::load(path).await.unwrap();
    assert_eq!(loaded, Config::default());
}

#[tokio::test]
async fn partial_file_overrides_only_what_it_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[server]\nbind = \"0.0.0.0:9000\"\n\n[logging]\nlevel = \"debug\"\nfile = \"adventures.log\"\n",
    )
    .unwrap();

    let config = Config::load(path.to_str().unwrap()).await.unwrap();
    assert_eq!(config.server.bind, "0.0.0.0:9000");
    assert_eq!(config.server.max_sessions, 64);
    assert_eq!(config.logging.file.as_deref(), Some("adventures.log"));
    assert_eq!(config.logging.level_filter(), log::LevelFilter::Debug);
    assert!(config.game.color);
}

#[tokio::test]
async fn broken_or_missing_files() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "[server\nbind = 1").unwrap();
    let err = Config::load(broken.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse config file"));

    let missing = dir.path().join("missing.toml");
    let missing = missing.to_str().unwrap();
    assert!(Config::load(missing).await.is_err());
    assert_eq!(Config::load_or_default(missing).await.unwrap(), Config::default());
}
