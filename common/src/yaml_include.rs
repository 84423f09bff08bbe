use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use yaml_rust2::{Yaml, YamlEmitter, YamlLoader};

use crate::config::ConfigError;

/// Loads a YAML file, resolving `!include <relative path>` lines first.
///
/// Included documents are merged in order, then the including file's own
/// keys are merged on top. Nested maps merge key by key, anything else is
/// replaced by the overriding value.
pub fn load_yaml_with_includes(path: &Path) -> Result<Yaml, ConfigError> {
    let res = process_includes_recursive(path.to_path_buf(), &mut Vec::new())?;
    debug!(path = %path.display(), "Resolved config includes");
    Ok(res)
}

/// Same as [`load_yaml_with_includes`] but emits the merged document back to text,
/// ready for `serde_yml`.
pub fn load_yaml_string_with_includes(path: &Path) -> Result<String, ConfigError> {
    let yaml = load_yaml_with_includes(path)?;
    let mut out_str = String::new();
    {
        let mut emitter = YamlEmitter::new(&mut out_str);
        emitter.dump(&yaml)?;
    }
    Ok(out_str)
}

fn process_includes_recursive(path: PathBuf, stack: &mut Vec<PathBuf>) -> Result<Yaml, ConfigError> {
    if stack.contains(&path) {
        return Err(ConfigError::IncludeCycle { path });
    }

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let base_path = path.parent().unwrap_or(Path::new("")).to_path_buf();

    let (includes, rest): (Vec<&str>, Vec<&str>) = contents
        .lines()
        .partition(|&line| line.trim().starts_with("!include"));

    stack.push(path.clone());
    let mut merged_includes: Option<Yaml> = None;
    for line in includes {
        let include_path = line.trim().trim_start_matches("!include").trim();
        let included = process_includes_recursive(base_path.join(include_path), stack)?;
        merged_includes = Some(match merged_includes {
            Some(acc) => merge_yaml(&acc, &included),
            None => included,
        });
    }
    stack.pop();

    let merged_rest = YamlLoader::load_from_str(&rest.join("\n"))?
        .into_iter()
        .reduce(|acc, doc| merge_yaml(&acc, &doc));

    match (merged_includes, merged_rest) {
        (Some(includes), Some(rest)) => Ok(merge_yaml(&includes, &rest)),
        (Some(includes), None) => Ok(includes),
        (None, Some(rest)) => Ok(rest),
        (None, None) => Err(ConfigError::Empty { path }),
    }
}

fn merge_yaml(base: &Yaml, override_yaml: &Yaml) -> Yaml {
    match (base, override_yaml) {
        (Yaml::Hash(base_hash), Yaml::Hash(override_hash)) => {
            let mut result = base_hash.clone();
            for (key, value) in override_hash {
                let merged = match base_hash.get(key) {
                    Some(base_value) => merge_yaml(base_value, value),
                    None => value.clone(),
                };
                result.insert(key.clone(), merged);
            }
            Yaml::Hash(result)
        }
        (base, Yaml::Null | Yaml::BadValue) => base.clone(),
        (_, override_value) => override_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn included_keys_are_overridden_by_including_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.yaml"),
            "viewer:\n  base_url: http://localhost:8081\n  log_level: info\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("dev.yaml"),
            "!include base.yaml\nviewer:\n  log_level: debug\n",
        )
        .unwrap();

        let yaml = load_yaml_with_includes(&dir.path().join("dev.yaml")).unwrap();
        assert_eq!(yaml["viewer"]["base_url"].as_str(), Some("http://localhost:8081"));
        assert_eq!(yaml["viewer"]["log_level"].as_str(), Some("debug"));
    }

    #[test]
    fn include_only_file_yields_included_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.yaml"), "common:\n  project_name: viewer\n").unwrap();
        fs::write(dir.path().join("alias.yaml"), "!include base.yaml\n").unwrap();

        let yaml = load_yaml_with_includes(&dir.path().join("alias.yaml")).unwrap();
        assert_eq!(yaml["common"]["project_name"].as_str(), Some("viewer"));
    }

    #[test]
    fn include_cycle_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), "!include b.yaml\nx: 1\n").unwrap();
        fs::write(dir.path().join("b.yaml"), "!include a.yaml\ny: 2\n").unwrap();

        let err = load_yaml_with_includes(&dir.path().join("a.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::IncludeCycle { .. }));
    }

    #[test]
    fn missing_include_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dev.yaml"), "!include nowhere.yaml\n").unwrap();

        let err = load_yaml_with_includes(&dir.path().join("dev.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
