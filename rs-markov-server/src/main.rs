use std::env;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use rs_markov_core::io::{list_corpora, read_file, CORPUS_EXTENSION};
use rs_markov_core::{ChainBuilder, ChainTable, GenerationInput, MarkovError, StartSeed, TextGenerator};

const DEFAULT_ORDER: i64 = 2;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<u64>,
	max_steps: Option<usize>,
	nb_try: Option<usize>,
	start: Option<String> // -> capitalized, random or custom:<words>
}

#[derive(Deserialize)]
struct LoadQuery {
	name: Option<String>,
	n: Option<i64>
}

/// Server settings, read once from the environment.
#[derive(Clone, Debug)]
struct ServerConfig {
	addr: String,
	port: u16,
	data_dir: PathBuf
}

struct LoadedCorpus {
	name: String,
	table: ChainTable
}

struct SharedData {
	corpus: Option<LoadedCorpus>
}

impl ServerConfig {
	/// Reads `RS_MARKOV_ADDR`, `RS_MARKOV_PORT` and `RS_MARKOV_DATA`.
	fn from_env() -> Self {
		let addr = env::var("RS_MARKOV_ADDR").unwrap_or_else(|_| "127.0.0.1".to_owned());
		let port = match env::var("RS_MARKOV_PORT") {
			Ok(raw) => raw.parse().unwrap_or_else(|_| {
				warn!("Ignoring invalid RS_MARKOV_PORT {:?}", raw);
				5000
			}),
			Err(_) => 5000,
		};
		let data_dir = PathBuf::from(env::var("RS_MARKOV_DATA").unwrap_or_else(|_| "./data".to_owned()));
		Self { addr, port, data_dir }
	}
}

/// Case-insensitive `strip_prefix` for an ASCII prefix.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
	let head = s.get(..prefix.len())?;
	if head.eq_ignore_ascii_case(prefix) {
		Some(&s[prefix.len()..])
	} else {
		None
	}
}

impl GenerateParams {
	/// Determines the start key strategy.
	fn start_seed(&self) -> Result<StartSeed, String> {
		match &self.start {
			None => Ok(StartSeed::Capitalized),
			Some(s) if s.eq_ignore_ascii_case("capitalized") => Ok(StartSeed::Capitalized),
			Some(s) if s.eq_ignore_ascii_case("random") => Ok(StartSeed::Random),
			Some(s) => match strip_prefix_ignore_case(s, "custom:") {
				Some(value) if value.trim().is_empty() => Err("Custom start cannot be empty".into()),
				Some(value) => Ok(StartSeed::Custom(value.to_owned())),
				None => Err("Start must be 'capitalized', 'random' or 'custom:<words>'".into()),
			},
		}
	}

	fn generation_input(&self) -> Result<GenerationInput, String> {
		Ok(GenerationInput {
			max_steps: self.max_steps.unwrap_or(0),
			nb_try: self.nb_try.unwrap_or(0),
			start_seed: self.start_seed()?,
		})
	}
}

/// A corpus name must stay inside the data folder: no separator, no `.`/`..`.
fn is_plain_name(name: &str) -> bool {
	!name.contains(['/', '\\']) && name != "." && name != ".."
}

/// Maps a core error to the matching HTTP status.
fn error_response(e: &MarkovError) -> HttpResponse {
	match e {
		MarkovError::InvalidNGramOrder(_) | MarkovError::CorpusTooShort { .. } => HttpResponse::BadRequest().body(e.to_string()),
		MarkovError::InvalidStart | MarkovError::UnknownSeed(_) => HttpResponse::UnprocessableEntity().body(e.to_string()),
		MarkovError::Io(io) if io.kind() == ErrorKind::NotFound => HttpResponse::NotFound().body(e.to_string()),
		MarkovError::Io(_) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a text from the loaded corpus based on query parameters.
/// Unset parameters fall back to `GenerationInput::default()`.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let generator = match query.generation_input() {
		Ok(input) => TextGenerator::new(input),
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};
	let Some(corpus) = &shared_data.corpus else {
		return HttpResponse::Conflict().body("No corpus loaded");
	};

	let mut rng = match query.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	match generator.generate(&corpus.table, &mut rng) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => error_response(&e),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(config: web::Data<ServerConfig>) -> impl Responder {
	match list_corpora(&config.data_dir) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

#[get("/v1/loaded_corpus")]
async fn get_loaded_corpus(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};
	match &shared_data.corpus {
		Some(corpus) => HttpResponse::Ok().body(format!("{} n={}", corpus.name, corpus.table.n())),
		None => HttpResponse::NotFound().body("No corpus loaded"),
	}
}

#[put("/v1/load_corpus")]
async fn put_corpus(data: web::Data<Mutex<SharedData>>, config: web::Data<ServerConfig>, query: web::Query<LoadQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	if !is_plain_name(name) {
		return HttpResponse::BadRequest().body("Corpus name must not contain a path");
	}

	let order = match ChainBuilder::parse_order(query.n.unwrap_or(DEFAULT_ORDER)) {
		Ok(order) => order,
		Err(e) => return error_response(&e),
	};

	let corpus_path = config.data_dir.join(format!("{}.{}", name, CORPUS_EXTENSION));
	let table = match read_file(&corpus_path)
		.map_err(MarkovError::from)
		.and_then(|text| ChainBuilder::build(&text, order))
	{
		Ok(table) => table,
		Err(e) => return error_response(&e),
	};
	info!("Loaded corpus {} ({} keys, order {})", name, table.len(), order);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};
	shared_data.corpus = Some(LoadedCorpus { name: name.to_owned(), table });

	HttpResponse::Ok().body("Corpus loaded successfully")
}

/// Main entry point for the server.
///
/// Holds at most one chain table, wrapped in a `Mutex`, and serves
/// generation requests over it.
///
/// # Notes
/// - Binds to `RS_MARKOV_ADDR:RS_MARKOV_PORT` (default 127.0.0.1:5000).
/// - Corpora are `.txt` files of `RS_MARKOV_DATA` (default `./data`).
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let config = ServerConfig::from_env();
	info!("Serving corpora from {}", config.data_dir.display());
	let bind = (config.addr.clone(), config.port);

	let shared_data = web::Data::new(Mutex::new(SharedData { corpus: None }));
	let config = web::Data::new(config);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.app_data(shared_data.clone())
			.app_data(config.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(put_corpus)
			.service(get_loaded_corpus)
	})
		.bind(bind)?
		.run()
		.await
}
