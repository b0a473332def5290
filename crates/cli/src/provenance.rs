use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to a written artifact.
pub struct Payload {
    pub params: Value,
    pub tag: Option<String>,
    /// Input files the artifact was derived from.
    pub inputs: Vec<String>,
}

impl Payload {
    pub fn new(params: Value, tag: Option<String>) -> Self {
        Self {
            params,
            tag,
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }
}

/// Provenance block shared by sidecars and `report`.
pub fn header(tag: Option<&str>) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "solver_version": stadium::VERSION,
        "tag": tag,
    })
}

/// Write `<artifact>.provenance.json` with the git commit, solver version,
/// callsite, params, inputs, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let mut doc = header(payload.tag.as_deref());
    doc["callsite"] = json!({
        "file": callsite.file(),
        "line": callsite.line()
    });
    doc["params"] = payload.params;
    doc["inputs"] = json!(payload.inputs);
    doc["outputs"] = json!([artifact.to_string_lossy()]);
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|r| !r.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let base = Path::new("/tmp/bowl/section.json");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/bowl/section.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_tag_inputs_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("rows.csv");
        fs::write(&artifact, "tier,row\n").unwrap();
        let payload = Payload::new(json!({"posture": "seated"}), Some("north-stand".into()))
            .with_input("bowl.json");
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["tag"], "north-stand");
        assert_eq!(parsed["inputs"][0], "bowl.json");
        assert_eq!(parsed["params"]["posture"], "seated");
        assert_eq!(parsed["solver_version"], stadium::VERSION);
    }

    #[test]
    fn header_without_tag_is_null() {
        assert!(header(None)["tag"].is_null());
    }
}
