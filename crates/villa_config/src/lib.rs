use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::Path;
use tracing::warn;

pub mod models;
pub use models::*;

/// Prefix for structured overrides, e.g. `VILLA_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "VILLA";
/// Placeholder value that is swapped for the environment variable named after its path.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Alternative variable names tried when the canonical secret variable is unset.
const SECRET_ALIASES: &[(&str, &str)] = &[("STRIPE_SECRET_KEY", "STRIPE_PRIVATE_KEY")];

/// Plain variables the deployment already exports, mapped onto config keys.
const LEGACY_STRING_VARS: &[(&str, &str)] = &[
    ("CLIENT_URL", "checkout.client_url"),
    ("SUCCESS_URL", "checkout.success_url"),
    ("CANCEL_URL", "checkout.cancel_url"),
    ("VILLAS_DETAILS_BASE_URL", "checkout.villas_details_base_url"),
];

/// Loads the application configuration once at startup.
///
/// Sources, lowest precedence first:
/// 1. `<CONFIG_DIR>/default.{toml,yaml,json}` (CONFIG_DIR defaults to `config`)
/// 2. `<CONFIG_DIR>/<RUN_ENV>` (RUN_ENV defaults to `debug`)
/// 3. `VILLA_*` variables with `__` as the nesting separator
/// 4. the plain `PORT`, `CLIENT_URL`, `SUCCESS_URL`, `CANCEL_URL` and
///    `VILLAS_DETAILS_BASE_URL` variables
///
/// `secret_from_env` markers are resolved last.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    load_config_from(Path::new(&config_dir), &run_env)
}

/// Same as [`load_config`] with an explicit config directory and run environment.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    let builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000_i64)?
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let builder = apply_legacy_env(builder)?;
    let raw_config: AppConfig = builder.build()?.try_deserialize()?;

    apply_env_overrides_from_marker(raw_config)
}

fn apply_legacy_env(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let port = non_empty_env("PORT")
        .map(|raw| raw.parse::<i64>())
        .transpose()
        .map_err(|err| ConfigError::Message(format!("invalid PORT: {err}")))?;
    builder = builder.set_override_option("server.port", port)?;

    for (var, key) in LEGACY_STRING_VARS {
        builder = builder.set_override_option(*key, non_empty_env(var))?;
    }
    Ok(builder)
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Recursively replaces all "secret_from_env" string values with environment variable values.
///
/// The variable name is the upper-cased key path joined with `_`. Markers that cannot be
/// resolved become `null`, so an unset secret reads as "not configured".
fn inject_env_secrets(value: &mut Value) {
    fn lookup(env_key: &str) -> Option<String> {
        non_empty_env(env_key).or_else(|| {
            SECRET_ALIASES
                .iter()
                .find(|(canonical, _)| *canonical == env_key)
                .and_then(|(_, alias)| non_empty_env(alias))
        })
    }

    fn walk(path: &mut Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let env_key = path.join("_").to_uppercase();
                match lookup(&env_key) {
                    Some(env_val) => *obj = Value::String(env_val),
                    None => {
                        warn!("env var {} not found for {}", env_key, SECRET_MARKER);
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }
    }

    walk(&mut Vec::new(), value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config.
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, at most once.
///
/// `DOTENV_OVERRIDE` selects another file; the default is `.env` in the working
/// directory. A missing file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_inject_env_secrets_replaces_marker() {
        env::set_var("VILLA_CFG_TEST_VAULT_TOKEN", "tok_123");
        let mut value = json!({
            "villa_cfg_test": { "vault": { "token": "secret_from_env" } },
            "plain": "secret_from_env_but_not_exact"
        });

        inject_env_secrets(&mut value);

        assert_eq!(value["villa_cfg_test"]["vault"]["token"], "tok_123");
        assert_eq!(value["plain"], "secret_from_env_but_not_exact");
    }

    #[test]
    fn test_inject_env_secrets_unresolved_marker_becomes_null() {
        let mut value = json!({ "villa_cfg_missing": { "key": "secret_from_env" } });

        inject_env_secrets(&mut value);

        assert!(value["villa_cfg_missing"]["key"].is_null());
    }

    #[test]
    fn test_pricing_policy_defaults() {
        let policy = PricingPolicy::default();
        assert!(!policy.allow_negative_amounts);
        assert!(policy.allow_zero_base_rate);
    }

    #[test]
    fn test_load_config_from_layers_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("default.toml"),
            r#"
static_dir = "site"

[server]
host = "127.0.0.1"
port = 3000

[pricing]
allow_negative_amounts = false

[stripe]
api_base = "https://stripe.invalid"
timeout_secs = 12
"#,
        )
        .expect("write default.toml");
        fs::write(
            dir.path().join("staging.toml"),
            r#"
[pricing]
allow_zero_base_rate = false
"#,
        )
        .expect("write staging.toml");

        let config = load_config_from(dir.path(), "staging").expect("config loads");

        assert_eq!(config.static_dir, "site");
        assert_eq!(config.stripe.api_base, "https://stripe.invalid");
        assert_eq!(config.stripe.timeout_secs, 12);
        assert!(!config.pricing.allow_negative_amounts);
        assert!(!config.pricing.allow_zero_base_rate);
    }

    #[test]
    fn test_load_config_from_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");

        let config = load_config_from(&dir.path().join("absent"), "debug").expect("config loads");

        assert_eq!(config.static_dir, DEFAULT_STATIC_DIR);
        assert_eq!(config.stripe.api_base, DEFAULT_STRIPE_API_BASE);
        assert_eq!(config.pricing, PricingPolicy::default());
    }
}
