use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::AppConfig;

const CONFIG_ENV: &str = "GELF_TEE_CONFIG";
const LOGSERVER_ENV: &str = "GELF_TEE_LOGSERVER";
const PORT_ENV: &str = "GELF_TEE_PORT";

/// Implicit config locations, highest priority first. Missing files are skipped.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".gelf-tee").join("config.toml"));
    }
    paths.push(PathBuf::from("gelf-tee.toml"));
    paths
}

fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}

/// `path` (from `--config`) wins over `$GELF_TEE_CONFIG`. Environment
/// overrides are applied on top of whichever file was loaded.
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut cfg = match path {
        Some(path) => load_from_path(path)?,
        None => {
            let explicit = std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
            resolve(explicit.as_deref(), &config_search_paths())?
        }
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// An explicit path must load; the implicit ones are used only if present.
fn resolve(explicit: Option<&Path>, fallbacks: &[PathBuf]) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_from_path(path).with_context(|| format!("{CONFIG_ENV} is set"));
    }
    match fallbacks.iter().find(|p| p.exists()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_from_path(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(LOGSERVER_ENV) {
        if !v.trim().is_empty() {
            cfg.sink.host = v.trim().to_string();
        }
    }
    if let Some(v) = lookup(PORT_ENV) {
        if !v.trim().is_empty() {
            cfg.sink.port = v
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV} is not a valid port: {v}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_file_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sink]\nhost = \"logs.example\"\nport = 5555\ncompress = false").unwrap();

        let cfg = load_from_path(file.path()).unwrap();
        assert_eq!(cfg.sink.host, "logs.example");
        assert_eq!(cfg.sink.port, 5555);
        assert!(!cfg.sink.compress);
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sink\nhost=").unwrap();

        let err = load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let mut fallback = tempfile::NamedTempFile::new().unwrap();
        writeln!(fallback, "[sink]\nport = 7000").unwrap();

        let err = resolve(Some(&missing), &[fallback.path().to_path_buf()]).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains(CONFIG_ENV));
        assert!(msg.contains("failed to read config"));
    }

    #[test]
    fn first_existing_fallback_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut present = tempfile::NamedTempFile::new().unwrap();
        writeln!(present, "[sink]\nport = 7000").unwrap();

        let cfg = resolve(
            None,
            &[dir.path().join("absent.toml"), present.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(cfg.sink.port, 7000);

        let cfg = resolve(None, &[dir.path().join("absent.toml")]).unwrap();
        assert_eq!(cfg.sink.port, 12201);
    }

    #[test]
    fn env_overrides_replace_sink_endpoint() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(
            &mut cfg,
            env(&[(LOGSERVER_ENV, " graylog "), (PORT_ENV, "12202")]),
        )
        .unwrap();
        assert_eq!(cfg.sink.address(), "graylog:12202");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, env(&[(LOGSERVER_ENV, "  ")])).unwrap();
        assert_eq!(cfg.sink.host, "localhost");
    }

    #[test]
    fn invalid_port_override_is_an_error() {
        let mut cfg = AppConfig::default();
        let err = apply_env_overrides(&mut cfg, env(&[(PORT_ENV, "not-a-port")])).unwrap_err();
        assert!(err.to_string().contains(PORT_ENV));
    }
}
