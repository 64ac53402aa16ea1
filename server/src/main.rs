mod fixtures;
mod routes;
mod util;

use crate::util::{check_http_port, check_set_point, read_mock_config, Settings};
use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command};

const MOCK_CONFIG_PATH: &str = "mock.conf";

#[rocket::main]
async fn main() -> Result<()> {
    util::setup_logging("mock  ", "info")?;
    let matches = cli().get_matches();

    let config_path = matches.value_of("config").unwrap_or(MOCK_CONFIG_PATH);
    let mut settings = read_mock_config(config_path)?;
    apply_args(&matches, &mut settings)?;

    log::info!(
        "=> serving {} fixtures on {}:{}, set point {}",
        settings.fixtures,
        settings.address,
        settings.http_port,
        settings.set_point
    );
    log::info!(
        "=> /rest routes: charge_mode_state, {}",
        settings.fixtures.routes().collect::<Vec<_>>().join(", ")
    );
    routes::launch_rocket(settings)
        .launch()
        .await
        .map_err(|e| anyhow!("rocket failed: {}", e))?;
    Ok(())
}

fn cli() -> Command<'static> {
    Command::new("trickler-mock")
        .about("Serves the trickler REST api with canned and simulated data")
        .arg(
            Arg::new("config")
                .help("path to a toml settings file")
                .long("config")
                .takes_value(true),
        )
        .arg(
            Arg::new("address")
                .help("address to bind")
                .long("address")
                .takes_value(true),
        )
        .arg(
            Arg::new("port")
                .help("http port, above 1023")
                .long("port")
                .takes_value(true),
        )
        .arg(
            Arg::new("set-point")
                .help("charge weight target for the simulated scale")
                .long("set-point")
                .takes_value(true),
        )
        .arg(
            Arg::new("fixtures")
                .help("canned response set: portal or legacy")
                .long("fixtures")
                .takes_value(true),
        )
}

fn apply_args(matches: &ArgMatches, settings: &mut Settings) -> Result<()> {
    if let Some(address) = matches.value_of("address") {
        settings.address = address
            .parse()
            .with_context(|| format!("bad --address {}", address))?;
    }
    if let Some(port) = matches.value_of("port") {
        let port = port
            .parse::<i64>()
            .with_context(|| format!("bad --port {}", port))?;
        settings.http_port = check_http_port(port)?;
    }
    if let Some(set_point) = matches.value_of("set-point") {
        let set_point = set_point
            .parse::<f64>()
            .with_context(|| format!("bad --set-point {}", set_point))?;
        settings.set_point = check_set_point(set_point)?;
    }
    if let Some(fixtures) = matches.value_of("fixtures") {
        settings.fixtures = fixtures.parse().map_err(|e: String| anyhow!(e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::fixtures::FixtureSet;
    use crate::util::{apply_env, parse_mock_config, Settings};
    use crate::{apply_args, cli};

    fn args(argv: &[&str]) -> clap::ArgMatches {
        let mut full = vec!["trickler-mock"];
        full.extend_from_slice(argv);
        cli().try_get_matches_from(full).expect("valid args")
    }

    #[test]
    fn test_args_override_env_and_file() {
        let mut s = parse_mock_config("http_port = 8080\nset_point = 3", Settings::default()).unwrap();
        apply_env(&mut s, |key| match key {
            "MOCK_HTTP_PORT" => Some("9090".to_string()),
            "MOCK_SET_POINT" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!((s.http_port, s.set_point), (9090, 5.0));
        let m = args(&["--set-point", "12.5", "--fixtures", "legacy"]);
        apply_args(&m, &mut s).unwrap();
        assert_eq!(s.http_port, 9090);
        assert_eq!(s.set_point, 12.5);
        assert_eq!(s.fixtures, FixtureSet::Legacy);
        let m = args(&["--port", "7000", "--address", "0.0.0.0"]);
        apply_args(&m, &mut s).unwrap();
        assert_eq!(s.http_port, 7000);
        assert_eq!(s.address.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_bad_args_rejected() {
        for argv in [
            ["--port", "80"],
            ["--port", "eighty"],
            ["--set-point=-1", "--fixtures=portal"],
            ["--set-point", "1e30"],
            ["--fixtures", "wizard"],
            ["--address", "nowhere"],
        ] {
            let mut s = Settings::default();
            assert!(apply_args(&args(&argv), &mut s).is_err(), "{:?}", argv);
        }
    }

    #[test]
    fn test_config_path_arg() {
        assert_eq!(args(&[]).value_of("config"), None);
        assert_eq!(
            args(&["--config", "other.conf"]).value_of("config"),
            Some("other.conf")
        );
    }
}
