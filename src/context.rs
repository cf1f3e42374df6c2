//! Assembly of the rendering context.
//!
//! Sources are layered in a fixed order and merged deeply: built-ins, manifest
//! variables, manifest data files, command line data files, the process
//! environment, then `--set` overrides. Mappings merge key by key, any other
//! value replaces what was there before.

use std::path::Path;

use log::{debug, trace};
use serde_json::{json, Map, Value};

use crate::constants::context_keys;
use crate::error::{Error, Result};
use crate::ioutils::load_data_file;
use crate::metadata::VERSION;

pub struct ContextBuilder {
    context: Value,
}

impl ContextBuilder {
    /// Starts from the built-in values every template can rely on.
    pub fn new() -> Self {
        let context = json!({
            context_keys::PLATFORM: {
                "os": std::env::consts::OS,
                "family": std::env::consts::FAMILY,
                "arch": std::env::consts::ARCH,
            },
            context_keys::SELF: {
                "version": VERSION,
            }
        });
        Self { context }
    }

    /// Starts from nothing at all.
    pub fn empty() -> Self {
        Self { context: Value::Object(Map::new()) }
    }

    pub fn merge(&mut self, overlay: Map<String, Value>) -> &mut Self {
        deep_merge(&mut self.context, Value::Object(overlay));
        self
    }

    /// Merges a JSON, YAML or TOML data file (`-` reads stdin).
    pub fn merge_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();
        debug!("Loading context from '{}'", path.display());
        let data = load_data_file(path)?;
        Ok(self.merge(data))
    }

    /// Exposes the given variables under `env`, replacing any earlier `env` map.
    pub fn with_env<I>(&mut self, vars: I) -> &mut Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: Map<String, Value> =
            vars.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        trace!("Exposing {} environment variables", env.len());
        if let Value::Object(map) = &mut self.context {
            map.insert(context_keys::ENV.to_string(), Value::Object(env));
        }
        self
    }

    /// Applies a `KEY=VALUE` override. Dotted keys address nested mappings.
    pub fn set(&mut self, assignment: &str) -> Result<&mut Self> {
        let (path, value) = parse_assignment(assignment)?;
        debug!("Setting '{}' from the command line", path.join("."));
        set_path(&mut self.context, &path, value);
        Ok(self)
    }

    pub fn build(self) -> Value {
        self.context
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merges `overlay` into `base`. Mappings merge recursively, everything else replaces.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Splits `a.b=value` into its key path and parsed value.
///
/// The value is read as YAML so `true`, `42` and `[1, 2]` keep their types.
/// Anything YAML cannot parse stays a string, and an empty value is an empty string.
pub fn parse_assignment(assignment: &str) -> Result<(Vec<String>, Value)> {
    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| Error::InvalidAssignment(assignment.to_string()))?;

    let path: Vec<String> = key.trim().split('.').map(|part| part.trim().to_string()).collect();
    if path.iter().any(String::is_empty) {
        return Err(Error::InvalidAssignment(assignment.to_string()));
    }

    let value = if raw.is_empty() || has_yaml_comment(raw) {
        Value::String(raw.to_string())
    } else {
        match serde_yaml::from_str::<Value>(raw) {
            Ok(Value::Null) if !is_yaml_null(raw) => Value::String(raw.to_string()),
            Ok(value) => value,
            Err(_) => Value::String(raw.to_string()),
        }
    };
    Ok((path, value))
}

/// YAML would drop everything after a `#` that starts a comment.
fn has_yaml_comment(raw: &str) -> bool {
    raw.starts_with('#') || raw.contains(" #") || raw.contains("\t#")
}

fn is_yaml_null(raw: &str) -> bool {
    matches!(raw.trim(), "null" | "Null" | "NULL" | "~")
}

fn set_path(target: &mut Value, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = target;
    for key in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => {
                map.entry(key.clone()).or_insert_with(|| Value::Object(Map::new()))
            }
            _ => unreachable!("non-mappings are replaced above"),
        };
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Value::Object(map) = current {
        map.insert(last.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn builtins_are_present() {
        let ctx = ContextBuilder::new().build();
        assert_eq!(ctx["platform"]["os"], json!(std::env::consts::OS));
        assert_eq!(ctx["config_render"]["version"], json!(VERSION));
    }

    #[test]
    fn deep_merge_combines_nested_maps() {
        let mut base = json!({"db": {"host": "localhost", "port": 5432}, "debug": false});
        deep_merge(&mut base, json!({"db": {"host": "db.internal"}, "debug": true}));
        assert_eq!(base, json!({"db": {"host": "db.internal", "port": 5432}, "debug": true}));
    }

    #[test]
    fn deep_merge_replaces_lists() {
        let mut base = json!({"hosts": ["a", "b"]});
        deep_merge(&mut base, json!({"hosts": ["c"]}));
        assert_eq!(base, json!({"hosts": ["c"]}));
    }

    #[test]
    fn later_sources_win() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("base.yaml");
        let second = dir.path().join("prod.toml");
        std::fs::write(&first, "name: app\nreplicas: 1\n").unwrap();
        std::fs::write(&second, "replicas = 3\n").unwrap();

        let mut builder = ContextBuilder::empty();
        builder.merge(map(json!({"name": "inline", "region": "eu"})));
        builder.merge_file(&first).unwrap();
        builder.merge_file(&second).unwrap();
        builder.set("region=us").unwrap();
        let ctx = builder.build();

        assert_eq!(ctx, json!({"name": "app", "replicas": 3, "region": "us"}));
    }

    #[test]
    fn env_is_namespaced() {
        let mut builder = ContextBuilder::empty();
        builder.with_env(vec![("HOME".to_string(), "/root".to_string())]);
        let ctx = builder.build();
        assert_eq!(ctx["env"]["HOME"], json!("/root"));
        assert!(ctx.get("HOME").is_none());
    }

    #[test]
    fn set_can_override_env() {
        let mut builder = ContextBuilder::empty();
        builder.with_env(vec![("MODE".to_string(), "dev".to_string())]);
        builder.set("env.MODE=prod").unwrap();
        assert_eq!(builder.build()["env"]["MODE"], json!("prod"));
    }

    #[test]
    fn assignment_values_keep_yaml_types() {
        assert_eq!(parse_assignment("a=1").unwrap().1, json!(1));
        assert_eq!(parse_assignment("a=true").unwrap().1, json!(true));
        assert_eq!(parse_assignment("a=[1, 2]").unwrap().1, json!([1, 2]));
        assert_eq!(parse_assignment("a=hello world").unwrap().1, json!("hello world"));
        assert_eq!(parse_assignment("a=").unwrap().1, json!(""));
        assert_eq!(parse_assignment("a=x=y").unwrap().1, json!("x=y"));
        assert_eq!(parse_assignment("a=null").unwrap().1, json!(null));
        assert_eq!(parse_assignment("a=~").unwrap().1, json!(null));
    }

    #[test]
    fn assignment_values_with_hash_stay_strings() {
        assert_eq!(parse_assignment("color=#ff0000").unwrap().1, json!("#ff0000"));
        assert_eq!(parse_assignment("password=s3cr#t").unwrap().1, json!("s3cr#t"));
        assert_eq!(parse_assignment("motd=hello #world").unwrap().1, json!("hello #world"));
    }

    #[test]
    fn assignment_key_path() {
        let (path, _) = parse_assignment("server.tls.enabled=yes").unwrap();
        assert_eq!(path, vec!["server", "tls", "enabled"]);
    }

    #[test]
    fn invalid_assignments() {
        assert!(matches!(parse_assignment("novalue"), Err(Error::InvalidAssignment(_))));
        assert!(matches!(parse_assignment("=1"), Err(Error::InvalidAssignment(_))));
        assert!(matches!(parse_assignment("a..b=1"), Err(Error::InvalidAssignment(_))));
    }

    #[test]
    fn set_creates_and_replaces_parents() {
        let mut builder = ContextBuilder::empty();
        builder.merge(map(json!({"server": "plain"})));
        builder.set("server.port=8080").unwrap();
        builder.set("a.b.c=deep").unwrap();
        let ctx = builder.build();
        assert_eq!(ctx["server"], json!({"port": 8080}));
        assert_eq!(ctx["a"]["b"]["c"], json!("deep"));
    }
}
