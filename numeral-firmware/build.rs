//! Build script for numeral-firmware
//!
//! Puts memory.x on the linker path and checks numerals.toml, so a bad
//! configuration fails the build instead of the boot.

use std::path::PathBuf;
use std::{env, fs};

const CONFIG: &str = "numerals.toml";

/// Highest numeral count the driver accepts
const MAX_NUMERALS: usize = 4;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    for arg in ["--nmagic", "-Tlink.x", "-Tdefmt.x"] {
        println!("cargo:rustc-link-arg-bins={}", arg);
    }
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed={}", CONFIG);

    let source = fs::read_to_string(CONFIG)
        .unwrap_or_else(|e| fail("cannot read numerals.toml", &[e.to_string()]));
    let config: toml::Value = toml::from_str(&source).unwrap_or_else(|e| {
        let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
        fail("numerals.toml is not valid TOML", &lines)
    });

    let errors = validate(&config);
    if !errors.is_empty() {
        fail("invalid numeral configuration", &errors);
    }
}

/// Abort the build with a boxed report
fn fail(title: &str, lines: &[String]) -> ! {
    let rule = "═".repeat(68);
    let body: Vec<String> = lines
        .iter()
        .map(|line| {
            let line = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", line)
        })
        .collect();

    panic!(
        "\n╔{rule}╗\n║  ERROR: {:<58} ║\n╠{rule}╣\n{}\n╚{rule}╝\n",
        title,
        body.join("\n"),
    );
}

/// Every problem in the [numerals] section
fn validate(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(table) = config.as_table() else {
        return errors;
    };
    for key in table.keys().filter(|k| *k != "numerals") {
        errors.push(format!("unknown section [{}]", key));
    }

    let numerals = match table.get("numerals") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[numerals] must be a table".to_string());
            return errors;
        }
        // Everything has a default
        None => return errors,
    };

    for (key, value) in numerals {
        match key.as_str() {
            "addresses" => check_addresses(value, &mut errors),
            "pwm_frequency" => check_choice(key, value, &["22khz", "3khz"], &mut errors),
            "place_order" => check_choice(key, value, &["ones_last", "ones_first"], &mut errors),
            "color" => check_color(value, &mut errors),
            _ => errors.push(format!("[numerals] unknown key '{}'", key)),
        }
    }

    errors
}

fn check_addresses(value: &toml::Value, errors: &mut Vec<String>) {
    let Some(addresses) = value.as_array() else {
        errors.push("[numerals] addresses must be an array".to_string());
        return;
    };

    if addresses.len() > MAX_NUMERALS {
        errors.push(format!("[numerals] at most {} addresses", MAX_NUMERALS));
    }

    let mut seen = Vec::new();
    for address in addresses {
        match address.as_integer() {
            Some(a) if (1..=0x7f).contains(&a) => {
                if seen.contains(&a) {
                    errors.push(format!("[numerals] address {:#x} listed twice", a));
                }
                seen.push(a);
            }
            Some(a) => errors.push(format!("[numerals] address {} is not 0x01-0x7f", a)),
            None => errors.push("[numerals] addresses must be integers".to_string()),
        }
    }
}

fn check_choice(key: &str, value: &toml::Value, choices: &[&str], errors: &mut Vec<String>) {
    let valid = value
        .as_str()
        .is_some_and(|v| choices.iter().any(|c| c.eq_ignore_ascii_case(v)));
    if !valid {
        errors.push(format!("[numerals] {} must be one of {}", key, choices.join(", ")));
    }
}

fn check_color(value: &toml::Value, errors: &mut Vec<String>) {
    let valid = value.as_array().is_some_and(|c| {
        c.len() == 3
            && c.iter()
                .all(|v| v.as_integer().is_some_and(|v| (0..=255).contains(&v)))
    });
    if !valid {
        errors.push("[numerals] color must be [r, g, b], each 0-255".to_string());
    }
}
