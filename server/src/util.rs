use crate::fixtures::FixtureSet;
use anyhow::{anyhow, bail, Context, Result};
use std::default::Default;
use std::env;
use std::fs;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use toml::Value;
use trickler_mock_charge::MAX_SET_POINT;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub address: IpAddr,
    pub http_port: u16,
    pub set_point: f64,
    pub fixtures: FixtureSet,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            http_port: 5000,
            set_point: 0.0,
            fixtures: FixtureSet::Portal,
        }
    }
}

pub fn read_mock_config(config_path: &str) -> Result<Settings> {
    let mut settings = Settings::default();
    match fs::read_to_string(config_path) {
        Ok(set) => {
            settings = parse_mock_config(&set, settings)
                .with_context(|| format!("invalid config file {}", config_path))?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("File {} not found, using default settings", config_path);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("couldn't read config file {}", config_path))
        }
    }
    apply_env(&mut settings, |key| env::var(key).ok());
    Ok(settings)
}

pub fn parse_mock_config(contents: &str, mut settings: Settings) -> Result<Settings> {
    let table = Value::from_str(contents).context("config must follow the toml format")?;
    if let Some(address) = table.get("address") {
        let address = address
            .as_str()
            .ok_or_else(|| anyhow!("address must be a string"))?;
        settings.address = address
            .parse()
            .with_context(|| format!("bad address {}", address))?;
        log::info!("Read address setting: {}", settings.address);
    }
    if let Some(port) = table.get("http_port") {
        let port = port
            .as_integer()
            .ok_or_else(|| anyhow!("http_port must be an integer"))?;
        settings.http_port = check_http_port(port)?;
        log::info!("Read http port setting: {}", settings.http_port);
    }
    if let Some(set_point) = table.get("set_point") {
        let set_point = match set_point {
            Value::Float(f) => *f,
            Value::Integer(i) => *i as f64,
            _ => bail!("set_point must be a number"),
        };
        settings.set_point = check_set_point(set_point)?;
        log::info!("Read set point setting: {}", settings.set_point);
    }
    if let Some(fixtures) = table.get("fixtures") {
        let fixtures = fixtures
            .as_str()
            .ok_or_else(|| anyhow!("fixtures must be a string"))?;
        settings.fixtures = fixtures.parse().map_err(|e: String| anyhow!(e))?;
        log::info!("Read fixtures setting: {}", settings.fixtures);
    }
    Ok(settings)
}

/// Overrides settings from `MOCK_*` variables as returned by `var`.
/// Unparsable values are skipped with a warning.
pub fn apply_env<F>(settings: &mut Settings, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(env_addr) = var("MOCK_ADDRESS") {
        match env_addr.parse() {
            Ok(addr) => settings.address = addr,
            Err(_) => log::warn!("ignoring MOCK_ADDRESS={}", env_addr),
        }
    }
    if let Some(env_port) = var("MOCK_HTTP_PORT") {
        match env_port.parse::<i64>().map_err(|e| anyhow!(e)).and_then(check_http_port) {
            Ok(port) => settings.http_port = port,
            Err(e) => log::warn!("ignoring MOCK_HTTP_PORT={}: {}", env_port, e),
        }
    }
    if let Some(env_sp) = var("MOCK_SET_POINT") {
        match env_sp.parse::<f64>().map_err(|e| anyhow!(e)).and_then(check_set_point) {
            Ok(sp) => settings.set_point = sp,
            Err(e) => log::warn!("ignoring MOCK_SET_POINT={}: {}", env_sp, e),
        }
    }
    if let Some(env_fix) = var("MOCK_FIXTURES") {
        match env_fix.parse() {
            Ok(fixtures) => settings.fixtures = fixtures,
            Err(e) => log::warn!("ignoring MOCK_FIXTURES: {}", e),
        }
    }
}

pub fn check_http_port(port: i64) -> Result<u16> {
    if port <= 1023 {
        bail!("The http port number is not an integer greater than 1023")
    }
    u16::try_from(port).map_err(|_| anyhow!("The http port number is way too big!"))
}

pub fn check_set_point(set_point: f64) -> Result<f64> {
    if !set_point.is_finite() || set_point < 0.0 {
        bail!("The set point must be a finite number >= 0, got {}", set_point)
    }
    if set_point > MAX_SET_POINT {
        bail!(
            "The set point {} is too large, the weight can't step past it (max {})",
            set_point,
            MAX_SET_POINT
        )
    }
    Ok(set_point)
}

pub fn setup_logging(who: &str, level_arg: &str) -> Result<()> {
    use fern::colors::{Color, ColoredLevelConfig};
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .error(Color::Red)
        .warn(Color::Yellow);
    let level = env::var("RUST_LOG").unwrap_or(level_arg.to_string());
    let level = log::LevelFilter::from_str(&level)
        .with_context(|| format!("bad log level {}", level))?;
    let who = who.to_string();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}/{} {}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                who,
                record.target(),
                colors.color(record.level()),
                message
            ))
        })
        .level(level)
        .level_for("rocket", log::LevelFilter::Warn)
        .level_for("_", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::fixtures::FixtureSet;
    use crate::util::*;

    #[test]
    fn test_parse_full_config() {
        let conf = r#"
            address = "0.0.0.0"
            http_port = 8080
            set_point = 3
            fixtures = "legacy"
        "#;
        let s = parse_mock_config(conf, Settings::default()).unwrap();
        assert_eq!(s.address, "0.0.0.0".parse::<IpAddr>().unwrap());
        assert_eq!(s.http_port, 8080);
        assert_eq!(s.set_point, 3.0);
        assert_eq!(s.fixtures, FixtureSet::Legacy);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let s = parse_mock_config("set_point = 2.5", Settings::default()).unwrap();
        assert_eq!(s.set_point, 2.5);
        assert_eq!(s.http_port, 5000);
        assert_eq!(s.fixtures, FixtureSet::Portal);
    }

    #[test]
    fn test_rejects_bad_values() {
        let d = Settings::default();
        assert!(parse_mock_config("http_port = 80", d).is_err());
        assert!(parse_mock_config("http_port = 70000", d).is_err());
        assert!(parse_mock_config("set_point = -1.0", d).is_err());
        assert!(parse_mock_config("set_point = \"three\"", d).is_err());
        assert!(parse_mock_config("fixtures = \"wizard\"", d).is_err());
        assert!(parse_mock_config("not toml at all [", d).is_err());
    }

    #[test]
    fn test_missing_file_is_default_but_unreadable_is_error() {
        let s = read_mock_config("/nonexistent/mock.conf").unwrap();
        assert_eq!(s.fixtures, Settings::default().fixtures);
        // a directory exists but can't be read as a file
        assert!(read_mock_config(env!("CARGO_MANIFEST_DIR")).is_err());
    }

    #[test]
    fn test_checks() {
        assert_eq!(check_http_port(1024).unwrap(), 1024);
        assert!(check_set_point(f64::NAN).is_err());
        assert_eq!(check_set_point(0.0).unwrap(), 0.0);
        assert_eq!(check_set_point(16_777_216.0).unwrap(), 16_777_216.0);
        assert_eq!(check_set_point(MAX_SET_POINT).unwrap(), MAX_SET_POINT);
        assert!(check_set_point(MAX_SET_POINT + 2.0).is_err());
        assert!(check_set_point(1e30).is_err());
    }

    fn env_of(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_env_overrides_file() {
        let file = parse_mock_config("http_port = 8080\nset_point = 3", Settings::default()).unwrap();
        let mut s = file;
        apply_env(
            &mut s,
            env_of(&[("MOCK_SET_POINT", "7.5"), ("MOCK_FIXTURES", "legacy")]),
        );
        assert_eq!(s.http_port, 8080);
        assert_eq!(s.set_point, 7.5);
        assert_eq!(s.fixtures, FixtureSet::Legacy);
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let mut s = Settings::default();
        apply_env(
            &mut s,
            env_of(&[
                ("MOCK_ADDRESS", "nowhere"),
                ("MOCK_HTTP_PORT", "80"),
                ("MOCK_SET_POINT", "-2"),
                ("MOCK_FIXTURES", "wizard"),
            ]),
        );
        assert_eq!(s, Settings::default());
    }
}
