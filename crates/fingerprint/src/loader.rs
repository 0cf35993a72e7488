//! Fingerprint definition loading
//!
//! Definitions are a JSON object mapping a fingerprint name to
//! `{"pattern": "...", "process_on_200": bool}`. Any malformed entry rejects
//! the whole document.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sdto_common::{Fingerprint, SdtoError, SdtoResult};

/// Raw, uncompiled form of a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintDefinition {
    pub pattern: String,
    #[serde(default, alias = "process_200")]
    pub process_on_200: bool,
}

impl FingerprintDefinition {
    #[must_use]
    pub fn new<S: Into<String>>(pattern: S) -> Self {
        Self {
            pattern: pattern.into(),
            process_on_200: false,
        }
    }

    #[must_use]
    pub fn with_process_on_200(mut self, process_on_200: bool) -> Self {
        self.process_on_200 = process_on_200;
        self
    }
}

/// Compile named definitions in iteration order.
pub fn load_definitions<I>(definitions: I) -> SdtoResult<Vec<Fingerprint>>
where
    I: IntoIterator<Item = (String, FingerprintDefinition)>,
{
    definitions
        .into_iter()
        .map(|(name, def)| Fingerprint::new(name, &def.pattern, def.process_on_200))
        .collect()
}

/// Parse and compile a JSON fingerprint document, keeping declaration order.
pub fn load_from_str(json: &str) -> SdtoResult<Vec<Fingerprint>> {
    let document: Map<String, Value> = serde_json::from_str(json)
        .map_err(|e| SdtoError::Format(format!("expected an object of fingerprints: {e}")))?;

    let mut definitions = Vec::with_capacity(document.len());
    for (name, value) in document {
        let def: FingerprintDefinition = serde_json::from_value(value)
            .map_err(|e| SdtoError::Format(format!("entry {name:?}: {e}")))?;
        definitions.push((name, def));
    }

    load_definitions(definitions)
}

/// Read a whole document from `reader` and load it.
pub fn load_from_reader<R: Read>(mut reader: R) -> SdtoResult<Vec<Fingerprint>> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    load_from_str(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_in_declaration_order() {
        let fps = load_from_str(
            r#"{
                "Zeta": {"pattern": "zzz"},
                "Alpha": {"pattern": "aaa", "process_on_200": true},
                "Mid": {"pattern": "mmm", "process_on_200": false}
            }"#,
        )
        .unwrap();
        let names: Vec<&str> = fps.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert!(!fps[0].process_on_200);
        assert!(fps[1].process_on_200);
    }

    #[test]
    fn accepts_legacy_process_200_key() {
        let fps = load_from_str(r#"{"Legacy": {"pattern": "x", "process_200": true}}"#).unwrap();
        assert!(fps[0].process_on_200);
    }

    #[test]
    fn ignores_unknown_fields() {
        let fps = load_from_str(r#"{"A": {"pattern": "x", "cname": ["a.example"]}}"#).unwrap();
        assert_eq!(fps.len(), 1);
    }

    #[test]
    fn missing_pattern_rejects_everything() {
        let err = load_from_str(r#"{"Good": {"pattern": "ok"}, "Bad": {"process_on_200": true}}"#)
            .unwrap_err();
        assert!(matches!(err, SdtoError::Format(_)));
    }

    #[test]
    fn bad_regex_rejects_everything() {
        let err = load_from_str(r#"{"Good": {"pattern": "ok"}, "Bad": {"pattern": "(oops"}}"#)
            .unwrap_err();
        assert!(matches!(err, SdtoError::Format(_)));
    }

    #[test]
    fn non_object_documents_are_format_errors() {
        for doc in ["[]", "42", "not json", r#"{"A": "pattern"}"#, r#"{"A": {"pattern": 5}}"#] {
            assert!(
                matches!(load_from_str(doc), Err(SdtoError::Format(_))),
                "document {doc:?}"
            );
        }
    }

    #[test]
    fn empty_document_is_an_empty_set() {
        assert!(load_from_str("{}").unwrap().is_empty());
    }

    #[test]
    fn loads_from_reader() {
        let fps = load_from_reader(r#"{"A": {"pattern": "x"}}"#.as_bytes()).unwrap();
        assert_eq!(fps[0].name, "A");
    }
}
