//! Integration tests for single-document structure extraction

use assert_matches::assert_matches;
use jsonshape::{
    extract_structure, AnalysisConfig, AnalysisEngine, AnalysisError, ArraySampling, JsonSource,
    TypeTag,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn triples(json: &serde_json::Value) -> Vec<(String, TypeTag, usize)> {
    extract_structure("doc", json)
        .unwrap()
        .records
        .into_iter()
        .map(|r| (r.path, r.field_type, r.depth))
        .collect()
}

#[test]
fn test_documented_scenario() {
    assert_eq!(
        triples(&json!({"a": 1, "b": {"c": "x"}})),
        vec![
            ("a".to_string(), TypeTag::Integer, 1),
            ("b".to_string(), TypeTag::Object, 1),
            ("b.c".to_string(), TypeTag::String, 2),
        ]
    );
}

#[test]
fn test_empty_object_document() {
    assert_eq!(
        triples(&json!({})),
        vec![("$".to_string(), TypeTag::Object, 0)]
    );
}

#[test]
fn test_heterogeneous_array_elements_are_data() {
    let records = triples(&json!({"mixed": [1, "two", null, 4.5, false, [], {}]}));
    let types: Vec<TypeTag> = records.iter().skip(1).map(|(_, t, _)| *t).collect();

    assert_eq!(
        types,
        vec![
            TypeTag::Integer,
            TypeTag::String,
            TypeTag::Null,
            TypeTag::Float,
            TypeTag::Boolean,
            TypeTag::Array,
            TypeTag::Object,
        ]
    );
    assert_eq!(records[6].0, "mixed[5]");
}

#[test]
fn test_keys_needing_quotes() {
    let records = triples(&json!({"db.host": "x", "nested": {"a b": 1}}));
    let paths: Vec<&str> = records.iter().map(|(p, _, _)| p.as_str()).collect();
    assert_eq!(paths, vec![r#"["db.host"]"#, "nested", r#"nested["a b"]"#]);
}

#[test]
fn test_file_analysis_from_disk() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        r#"{{"user": {{"addresses": [{{"city": "Oslo"}}]}}, "score": 9.5}}"#
    )
    .unwrap();

    let engine = AnalysisEngine::default();
    let analysis = engine
        .analyze_source("users", &JsonSource::File(tmp.path().to_path_buf()))
        .unwrap();

    assert_eq!(analysis.stats.field_count, 5);
    assert_eq!(analysis.stats.max_depth, 4);
    assert!(analysis.structure.get("user.addresses[0].city").is_some());
}

#[test]
fn test_sampling_reduces_records() {
    let doc = json!({"rows": [{"a": 1}, {"a": 2}, {"a": 3}]});
    let every = AnalysisEngine::default().analyze_value("doc", &doc).unwrap();
    let first = AnalysisEngine::new(AnalysisConfig::default().with_array_sampling(ArraySampling::First))
        .analyze_value("doc", &doc)
        .unwrap();

    assert_eq!(every.stats.field_count, 7);
    assert_eq!(first.stats.field_count, 3);
}

#[test]
fn test_deep_document_reports_depth_error() {
    let mut doc = json!("leaf");
    for _ in 0..30 {
        doc = json!({ "n": doc });
    }

    let engine = AnalysisEngine::new(AnalysisConfig::default().with_max_depth(20));
    let err = engine.analyze_value("deep", &doc).unwrap_err();
    assert_matches!(err, AnalysisError::DepthExceeded { depth: 21, limit: 20, .. });

    assert!(AnalysisEngine::default().analyze_value("deep", &doc).is_ok());
}

#[test]
fn test_invalid_json_source() {
    let engine = AnalysisEngine::default();
    let err = engine
        .analyze_source("bad", &JsonSource::String("[1, 2,".to_string()))
        .unwrap_err();
    assert_matches!(err, AnalysisError::InvalidJson(_));
}
