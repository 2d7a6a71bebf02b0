use std::env;
use std::fs;
use std::path::Path;

// Variables leídas con option_env! en src/config.rs
const SESSION_VARS: [&str; 4] = [
    "SESSION_TOKEN_KEY",
    "SESSION_USER_KEY",
    "SESSION_PROFILE_COMPLETE_KEY",
    "LOGIN_ROUTE",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for var in SESSION_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    let Ok(contents) = fs::read_to_string(Path::new(".env")) else {
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();

        // Real environment wins over .env
        if SESSION_VARS.contains(&key) && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value.trim());
        }
    }
}
