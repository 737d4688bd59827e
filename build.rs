use std::env;
use std::fs;
use std::path::Path;

// Variables que config.rs lee con option_env!
const KNOWN_KEYS: &[&str] = &[
    "BACKEND_URL_DEVELOPMENT",
    "BACKEND_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "NUM_RECIPES",
    "TOKEN_STORAGE_KEY",
    "KEYRING_SERVICE",
];

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let value = value.trim().trim_matches('"');
    Some((key.trim(), value))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in KNOWN_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    println!("cargo:rerun-if-changed=.env");

    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(_) => {
            println!("cargo:warning=Sin .env: se usan los valores por defecto (ver .env.example)");
            return;
        }
    };

    for (key, value) in contents.lines().filter_map(parse_line) {
        if !KNOWN_KEYS.contains(&key) {
            println!("cargo:warning=Variable desconocida en .env: {}", key);
            continue;
        }
        // El entorno real tiene prioridad sobre .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
