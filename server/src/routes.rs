use crate::fixtures::FixtureSet;
use crate::util::Settings;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::response::content::RawJson;
use rocket::serde::json::Json;
use rocket::*;
use trickler_mock_charge::{ChargeModeSimulator, StatusSnapshot};

pub type Result<T> = std::result::Result<T, Error>;

#[get("/charge_mode_state")]
pub fn charge_mode_state(sim: &State<ChargeModeSimulator>) -> Json<StatusSnapshot> {
    Json(sim.advance())
}

#[get("/<route>", rank = 2)]
pub fn fixture(fixtures: &State<FixtureSet>, route: &str) -> Result<RawJson<&'static str>> {
    match fixtures.lookup(route) {
        Some(body) => Ok(RawJson(body)),
        None => {
            ::log::info!("no {} fixture for /rest/{}", fixtures.inner(), route);
            Err(Error::NotFound(route.to_string()))
        }
    }
}

pub fn launch_rocket(settings: Settings) -> Rocket<Build> {
    let config = Config {
        address: settings.address,
        port: settings.http_port,
        ..Config::debug_default()
    };
    build_rocket(config, settings)
}

pub fn build_rocket(config: Config, settings: Settings) -> Rocket<Build> {
    rocket::custom(config)
        .mount("/rest/", routes![charge_mode_state, fixture])
        .attach(CORS)
        .manage(ChargeModeSimulator::new(settings.set_point))
        .manage(settings.fixtures)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no fixture for {0}")]
    NotFound(String),
}

use rocket::http::Status;
use rocket::response::{self, Responder};
impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> response::Result<'o> {
        match self {
            Error::NotFound(_) => Status::NotFound.respond_to(req),
        }
    }
}

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}
