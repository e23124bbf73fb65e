//! Rendering and writing the generated files.
//!
//! Output layout is fixed:
//!
//! ```text
//! config/resolver-configuration.js
//! config/resolver-configuration.d.ts
//! ```

use crate::error::{Error, Result};
use crate::model::ResolverConfiguration;
use resconf_util::fs::{ensure_dir, remove_files, write_atomic};
use serde_json::{Number, Value};
use std::path::{Path, PathBuf};

/// Directory under the output root holding both generated files.
pub const OUTPUT_DIR: &str = "config";

/// Generated runtime module.
pub const MODULE_FILE: &str = "resolver-configuration.js";

/// Generated type declaration.
pub const DECLARATION_FILE: &str = "resolver-configuration.d.ts";

macro_rules! resolver_library_id {
    () => {
        "@glimmer/resolver"
    };
}

/// Module that declares the `ResolverConfiguration` type on the consumer side.
pub const RESOLVER_LIBRARY_ID: &str = resolver_library_id!();

/// Content of the declaration file. Independent of the resolved configuration.
pub const DECLARATION_SOURCE: &str = concat!(
    "import { ResolverConfiguration } from '",
    resolver_library_id!(),
    "';\n",
    "declare let config: ResolverConfiguration;\n",
    "export default config;\n",
);

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A rendered file, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// `/`-separated path relative to the output root.
    pub relative_path: String,
    pub contents: String,
}

impl OutputFile {
    /// Absolute location of this file under `output_root`.
    #[must_use]
    pub fn path_in(&self, output_root: &Path) -> PathBuf {
        self.relative_path
            .split('/')
            .fold(output_root.to_path_buf(), |acc, part| acc.join(part))
    }
}

/// Render the runtime module: `export default <json>;` plus a newline.
///
/// The JSON is compact and keys keep their model order. Integral floats are
/// printed without a fraction (`1e2` becomes `100`), as a JS engine would.
pub fn render_module(config: &ResolverConfiguration) -> Result<String> {
    let mut value = serde_json::to_value(config)?;
    normalize_numbers(&mut value);
    let json = serde_json::to_string(&value)?;
    Ok(format!("export default {json};\n"))
}

fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => {
            if let Some(int) = integral_float(n) {
                *n = Number::from(int);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral_float(n: &Number) -> Option<i64> {
    if !n.is_f64() {
        return None;
    }
    let f = n.as_f64()?;
    // -0.0 lands here too and prints as 0.
    (f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER).then(|| f as i64)
}

/// Render both output files, module first.
pub fn render_outputs(config: &ResolverConfiguration) -> Result<Vec<OutputFile>> {
    Ok(vec![
        OutputFile {
            relative_path: format!("{OUTPUT_DIR}/{MODULE_FILE}"),
            contents: render_module(config)?,
        },
        OutputFile {
            relative_path: format!("{OUTPUT_DIR}/{DECLARATION_FILE}"),
            contents: DECLARATION_SOURCE.to_string(),
        },
    ])
}

/// Write `files` under `output_root`, returning the paths written.
///
/// Each file is replaced atomically. If any write fails, files already
/// written by this call are removed before the error is returned, so a
/// failed call leaves none of its outputs behind.
pub fn write_outputs(output_root: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = file.path_in(output_root);
        if let Err(source) = write_one(&path, file.contents.as_bytes()) {
            // Best-effort rollback; the write error is what gets reported.
            let _ = remove_files(&written);
            return Err(Error::OutputWrite { path, source });
        }
        written.push(path);
    }

    Ok(written)
}

fn write_one(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    write_atomic(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;
    use crate::model::AppInfo;
    use resconf_util::fs::list_files;
    use serde_json::json;
    use tempfile::tempdir;

    fn config() -> ResolverConfiguration {
        ResolverConfiguration {
            app: AppInfo {
                name: "my-app".into(),
                root_name: "my-app".into(),
            },
            types: Some(json!({ "application": { "definitiveCollection": "main" } })),
            collections: Some(json!({ "main": { "types": ["application"] } })),
        }
    }

    #[test]
    fn test_render_module_exact() {
        assert_eq!(
            render_module(&config()).unwrap(),
            "export default {\"app\":{\"name\":\"my-app\",\"rootName\":\"my-app\"},\"types\":{\"application\":{\"definitiveCollection\":\"main\"}},\"collections\":{\"main\":{\"types\":[\"application\"]}}};\n"
        );
    }

    #[test]
    fn test_render_module_omits_absent_mappings() {
        let mut config = config();
        config.types = None;
        config.collections = Some(json!({}));
        assert_eq!(
            render_module(&config).unwrap(),
            "export default {\"app\":{\"name\":\"my-app\",\"rootName\":\"my-app\"},\"collections\":{}};\n"
        );
    }

    #[test]
    fn test_render_module_keeps_explicit_null() {
        let mut config = config();
        config.types = Some(Value::Null);
        assert_eq!(
            render_module(&config).unwrap(),
            "export default {\"app\":{\"name\":\"my-app\",\"rootName\":\"my-app\"},\"types\":null,\"collections\":{\"main\":{\"types\":[\"application\"]}}};\n"
        );
    }

    #[test]
    fn test_render_module_prints_integral_floats_as_integers() {
        let mut config = config();
        config.types = Some(
            serde_json::from_str(r#"{"weight":1e2,"ratio":0.5,"neg":-0.0,"list":[2.0,7]}"#)
                .unwrap(),
        );
        config.collections = None;
        assert_eq!(
            render_module(&config).unwrap(),
            "export default {\"app\":{\"name\":\"my-app\",\"rootName\":\"my-app\"},\"types\":{\"weight\":100,\"ratio\":0.5,\"neg\":0,\"list\":[2,7]}};\n"
        );
    }

    #[test]
    fn test_declaration_is_fixed() {
        assert_eq!(
            DECLARATION_SOURCE.lines().next(),
            Some("import { ResolverConfiguration } from '@glimmer/resolver';")
        );
        assert!(DECLARATION_SOURCE.contains(&format!("from '{RESOLVER_LIBRARY_ID}'")));
        assert!(DECLARATION_SOURCE.contains("declare let config: ResolverConfiguration;"));
        assert!(DECLARATION_SOURCE.ends_with("export default config;\n"));
    }

    #[test]
    fn test_render_outputs_paths() {
        let files = render_outputs(&config()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "config/resolver-configuration.js",
                "config/resolver-configuration.d.ts"
            ]
        );
    }

    #[test]
    fn test_write_outputs_tolerates_existing_dir() {
        let out = tempdir().unwrap();
        std::fs::create_dir_all(out.path().join(OUTPUT_DIR)).unwrap();

        let files = render_outputs(&config()).unwrap();
        let written = write_outputs(out.path(), &files).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            list_files(out.path()).unwrap(),
            vec![
                "config/resolver-configuration.d.ts",
                "config/resolver-configuration.js"
            ]
        );
        assert_eq!(
            std::fs::read_to_string(out.path().join("config").join(DECLARATION_FILE)).unwrap(),
            DECLARATION_SOURCE
        );
    }

    #[test]
    fn test_write_outputs_rolls_back_on_failure() {
        let out = tempdir().unwrap();
        // A directory squatting on the declaration path makes the second write fail.
        std::fs::create_dir_all(out.path().join(OUTPUT_DIR).join(DECLARATION_FILE)).unwrap();

        let files = render_outputs(&config()).unwrap();
        let err = write_outputs(out.path(), &files).unwrap_err();

        assert_eq!(err.code(), codes::OUTPUT_WRITE_FAILED);
        assert!(!out.path().join(OUTPUT_DIR).join(MODULE_FILE).exists());
    }

    #[test]
    fn test_write_outputs_output_root_is_file() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("out");
        std::fs::write(&root, "file").unwrap();

        let files = render_outputs(&config()).unwrap();
        let err = write_outputs(&root, &files).unwrap_err();
        assert_eq!(err.code(), codes::OUTPUT_WRITE_FAILED);
    }
}
