// Command-line configuration for the converter binary.

use std::path::PathBuf;

use crate::kat_error::{KatError, Result};

pub const USAGE: &str = "usage: mldsa_kat_convert [--path] <file>\n\
    \n\
    Converts a hedged, pure-mode ML-DSA KAT file (key = value records) into a\n\
    JSON array of test vectors on stdout. Set RUST_LOG for diagnostics.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterConfig {
    /// KAT input file.
    pub path: PathBuf,
}

impl ConverterConfig {
    /// Parse arguments, program name excluded.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path: Option<String> = None;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let value = match arg.as_str() {
                "-h" | "--help" => return Err(KatError::Usage(USAGE.to_owned())),
                "--path" => args
                    .next()
                    .ok_or_else(|| usage("--path needs a value"))?,
                flag if flag.starts_with("--path=") => flag["--path=".len()..].to_owned(),
                flag if flag.starts_with('-') => {
                    return Err(usage(&format!("unknown flag {flag:?}")))
                }
                _ => arg.clone(),
            };
            if path.replace(value).is_some() {
                return Err(usage("expected exactly one input file"));
            }
        }

        match path {
            Some(p) if !p.is_empty() => Ok(Self { path: PathBuf::from(p) }),
            _ => Err(usage("no --path provided")),
        }
    }
}

fn usage(problem: &str) -> KatError {
    KatError::Usage(format!("{problem}\n{USAGE}"))
}
