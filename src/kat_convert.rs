// Whole-file conversion: KAT text in, ordered test vectors (and JSON) out.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::dilithium_mldsa::MlDsaBackend;
use crate::kat_error::{KatError, Result};
use crate::kat_scan::stream_kats;
use crate::kat_vector::{compute_test_vector, TestVector};

/// Convert every record in `reader`, in input order. The first failing
/// record aborts the run; its 1-based position is attached to the error.
pub fn convert_kats<R: BufRead>(reader: R, backend: &dyn MlDsaBackend) -> Result<Vec<TestVector>> {
    let mut vectors = Vec::new();
    for (i, kat) in stream_kats(reader).enumerate() {
        let vector = kat
            .and_then(|kat| compute_test_vector(&kat, backend))
            .map_err(|e| KatError::Record {
                index: i + 1,
                source: Box::new(e),
            })?;
        vectors.push(vector);
    }
    info!(count = vectors.len(), "converted KAT records");
    Ok(vectors)
}

pub fn convert_file(path: &Path, backend: &dyn MlDsaBackend) -> Result<Vec<TestVector>> {
    let file = File::open(path).map_err(|source| KatError::Open {
        path: path.display().to_string(),
        source,
    })?;
    convert_kats(BufReader::new(file), backend)
}

/// JSON array, two-space indentation.
pub fn to_json_pretty(vectors: &[TestVector]) -> Result<String> {
    Ok(serde_json::to_string_pretty(vectors)?)
}
