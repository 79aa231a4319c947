//! End-to-end scenarios driving `generate` / `apply` / `diff-staged` against small
//! in-memory fixture trees.

use std::path::{Path, PathBuf};

use dipeo_codegen_core::{ApplyMode, CodegenConfig, Driver, FileSystem, MemoryFs, NoCache};

fn node_spec_source(body: &str) -> Vec<u8> {
    format!("export const spec = {body};\n").into_bytes()
}

fn config_for(root: &str) -> CodegenConfig {
    CodegenConfig::from_json(&format!(r#"{{ "root": "{root}" }}"#)).unwrap()
}

/// Scenario 1: a minimal spec (single required string field) stages a model, a
/// frontend model, and a schema file, and applies cleanly.
#[test]
fn minimal_spec_generates_and_applies() {
    let fs = MemoryFs::new();
    fs.add_file(
        PathBuf::from("/proj/models/src/specifications/nodes/note.spec.ts"),
        node_spec_source(
            r#"{
  nodeType: "note",
  displayName: "Note",
  category: "data",
  primaryDisplayField: "text",
  fields: [ { name: "text", fieldType: "string", required: true } ]
}"#,
        ),
    );

    let config = config_for("/proj");
    let cache = NoCache;
    let driver = Driver::new(&config, &fs, &cache);

    let output = driver.generate().unwrap();
    assert!(output.manifest.contains_key("models/note.py"));

    let entries = driver.apply(&output, ApplyMode::ApplySyntaxOnly).unwrap();
    assert!(entries.iter().all(|e| e.status != dipeo_codegen_core::DiffStatus::Removed));
    assert!(fs.exists(Path::new("/proj/diagram_generated/models/note.py")));
}

/// Scenario 2: a field whose `fieldType` names a TS-declared enum resolves to that
/// enum as its Python type (not a synthesized placeholder), and the declared enum
/// itself is staged as its own `enums/*.py` module.
#[test]
fn branded_field_type_resolves_to_declared_enum() {
    let fs = MemoryFs::new();
    fs.add_file(
        PathBuf::from("/proj/models/src/domain/http_method.ts"),
        b"export enum HttpMethod { Get = \"GET\", Post = \"POST\" }\n".to_vec(),
    );
    fs.add_file(
        PathBuf::from("/proj/models/src/specifications/nodes/http_request.spec.ts"),
        node_spec_source(
            r#"{
  nodeType: "http_request",
  displayName: "HTTP Request",
  category: "integration",
  primaryDisplayField: "url",
  fields: [
    { name: "url", fieldType: "string", required: true },
    { name: "method", fieldType: "HttpMethod", required: false, defaultValue: "GET" }
  ]
}"#,
        ),
    );

    let config = config_for("/proj");
    let cache = NoCache;
    let driver = Driver::new(&config, &fs, &cache);

    let output = driver.generate().unwrap();

    let model = output
        .staged_files
        .iter()
        .find(|f| f.path == "models/http_request.py")
        .expect("model file staged");
    assert!(model.content.contains("method: Optional[HttpMethod] = \"GET\""));

    let enum_file = output
        .staged_files
        .iter()
        .find(|f| f.path == "enums/HttpMethod.py")
        .expect("declared enum staged as its own module");
    assert!(enum_file.content.contains("class HttpMethod(str, Enum):"));
    assert!(enum_file.content.contains("Get = \"GET\""));
}

/// Scenario 3: a conditional field preserves its `(field, values)` pair verbatim
/// into the rendered frontend field configuration.
#[test]
fn conditional_field_is_preserved_in_field_config() {
    let fs = MemoryFs::new();
    fs.add_file(
        PathBuf::from("/proj/models/src/specifications/nodes/webhook.spec.ts"),
        node_spec_source(
            r#"{
  nodeType: "webhook",
  displayName: "Webhook",
  category: "integration",
  primaryDisplayField: "url",
  fields: [
    { name: "authType", fieldType: "string", required: true },
    {
      name: "apiKey",
      fieldType: "string",
      required: false,
      conditional: { field: "authType", values: ["api_key"] }
    }
  ]
}"#,
        ),
    );

    let config = config_for("/proj");
    let cache = NoCache;
    let driver = Driver::new(&config, &fs, &cache);

    driver.generate().unwrap();
    let content = fs
        .read_to_string(Path::new(
            "/proj/apps/web/src/__generated__/config/webhookFieldConfig.ts",
        ))
        .unwrap();
    assert!(content.contains("apiKey"));
    assert!(content.contains("authType"));
    assert!(content.contains("api_key"));
}

/// Scenario 4 (idempotency): `generate; apply; generate; diff-staged` reports zero
/// differences the second time around.
#[test]
fn generation_is_idempotent() {
    let fs = MemoryFs::new();
    fs.add_file(
        PathBuf::from("/proj/models/src/specifications/nodes/note.spec.ts"),
        node_spec_source(
            r#"{
  nodeType: "note",
  displayName: "Note",
  category: "data",
  primaryDisplayField: "text",
  fields: [ { name: "text", fieldType: "string", required: true } ]
}"#,
        ),
    );

    let config = config_for("/proj");
    let cache = NoCache;
    let driver = Driver::new(&config, &fs, &cache);

    let first = driver.generate().unwrap();
    driver.apply(&first, ApplyMode::ApplySyntaxOnly).unwrap();

    let second = driver.generate().unwrap();
    let entries = driver.diff_staged(&second.manifest);
    assert!(
        entries
            .iter()
            .all(|e| e.status == dipeo_codegen_core::DiffStatus::Unchanged),
        "expected no diff on a repeat run, got: {entries:?}"
    );
}

/// Scenario 5 (validation failure aborts apply): a duplicate node type is a spec
/// invariant violation, so `generate` itself fails and nothing is staged.
#[test]
fn duplicate_node_type_aborts_before_staging() {
    let fs = MemoryFs::new();
    let body = r#"{
  nodeType: "note",
  displayName: "Note",
  category: "data",
  primaryDisplayField: "text",
  fields: [ { name: "text", fieldType: "string", required: true } ]
}"#;
    fs.add_file(
        PathBuf::from("/proj/models/src/specifications/nodes/note_a.spec.ts"),
        node_spec_source(body),
    );
    fs.add_file(
        PathBuf::from("/proj/models/src/specifications/nodes/note_b.spec.ts"),
        node_spec_source(body),
    );

    let config = config_for("/proj");
    let cache = NoCache;
    let driver = Driver::new(&config, &fs, &cache);

    let err = driver.generate().unwrap_err();
    assert!(!err.into_diagnostics().is_empty());
    assert!(!fs.exists(Path::new("/proj/diagram_generated_staged/models/note.py")));
}
