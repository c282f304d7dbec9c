// Converts a hedged, pure-mode ML-DSA KAT file into JSON test vectors.
// stdout gets the JSON array only; diagnostics go to stderr.

use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use mldsa_kat_vectors::kat_config::ConverterConfig;
use mldsa_kat_vectors::kat_convert::{convert_file, to_json_pretty};
use mldsa_kat_vectors::RustCryptoMlDsa;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mldsa_kat_vectors=warn,mldsa_kat_convert=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run() -> Result<String, String> {
    let config = ConverterConfig::from_args(std::env::args().skip(1)).map_err(|e| e.to_string())?;
    let vectors = convert_file(&config.path, &RustCryptoMlDsa)
        .map_err(|e| format!("could not convert {}: {e}", config.path.display()))?;
    to_json_pretty(&vectors).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(msg) => {
            // one line only; usage text is appended after the first line
            let first = msg.lines().next().unwrap_or_default();
            debug!(detail = %msg, "conversion failed");
            eprintln!("error: {first}");
            ExitCode::FAILURE
        }
    }
}
