use serde::Serialize;

use super::{CodeEmitter, EmitError, GeneratedUnit};

/// Emits the unit as pretty-printed JSON with a top-level `fingerprint`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

#[derive(Serialize)]
struct Document<'a> {
    fingerprint: String,
    #[serde(flatten)]
    unit: &'a GeneratedUnit,
}

impl CodeEmitter for JsonEmitter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn emit(&self, unit: &GeneratedUnit) -> Result<String, EmitError> {
        let document = Document {
            fingerprint: unit.fingerprint()?.to_string(),
            unit,
        };
        let mut text = serde_json::to_string_pretty(&document)?;
        text.push('\n');
        Ok(text)
    }
}
