//! Build script for vitalwatch-sim
//!
//! Validates vitalwatch.toml at compile time so a broken embedded default
//! never reaches a binary.

use std::fs;
use std::path::Path;

fn main() {
    let config_path = Path::new("vitalwatch.toml");

    // Rerun if config changes
    println!("cargo:rerun-if-changed=vitalwatch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: vitalwatch.toml not found                                ║\n\
            ║                                                                  ║\n\
            ║  The simulator embeds vitalwatch.toml as its default config.     ║\n\
            ║  Restore it next to Cargo.toml.                                  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => panic!("Failed to read vitalwatch.toml: {}", e),
    };

    let config: toml::Value = match content.parse() {
        Ok(v) => v,
        Err(e) => {
            let error_msg = format!("{}", e);
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in vitalwatch.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_required_sections(&config, &mut errors);
    validate_heart_rate(&config, &mut errors);
    validate_location(&config, &mut errors);
    validate_positive(&config, "dispatch", "timeout_ms", &mut errors);
    validate_positive(&config, "display", "ecg_width", &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in vitalwatch.toml                 ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated: String = if line.chars().count() > 64 {
                let head: String = line.chars().take(61).collect();
                format!("{}...", head)
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["engine", "device", "location", "dispatch", "display"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// Heart-rate bands must be strictly increasing
fn validate_heart_rate(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(hr) = config.get("engine").and_then(|e| e.get("heart_rate")) else {
        return;
    };

    let keys = [
        "bradycardia_below",
        "normal_min",
        "normal_max",
        "tachycardia_above",
    ];
    let mut previous: Option<(&str, f64)> = None;
    for key in keys {
        let Some(value) = hr.get(key).and_then(number) else {
            continue;
        };
        if let Some((prev_key, prev)) = previous {
            if value <= prev {
                errors.push(format!("[engine.heart_rate] {} must exceed {}", key, prev_key));
            }
        }
        previous = Some((key, value));
    }
}

fn validate_location(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(location) = config.get("location") else {
        return;
    };

    let lat = location.get("lat").and_then(number);
    let lon = location.get("lon").and_then(number);
    if lat.is_some() != lon.is_some() {
        errors.push("[location] lat and lon must be set together".to_string());
    }
    if let Some(lat) = lat {
        if !(-90.0..=90.0).contains(&lat) {
            errors.push("[location] lat must be -90..90".to_string());
        }
    }
    if let Some(lon) = lon {
        if !(-180.0..=180.0).contains(&lon) {
            errors.push("[location] lon must be -180..180".to_string());
        }
    }

    if let Some(toml::Value::Array(hospitals)) = location.get("hospitals") {
        for (i, hospital) in hospitals.iter().enumerate() {
            if hospital.get("lat").and_then(number).is_none()
                || hospital.get("lon").and_then(number).is_none()
            {
                errors.push(format!("[[location.hospitals]] #{} missing lat/lon", i + 1));
            }
        }
    }
}

fn validate_positive(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = config.get(section).and_then(|s| s.get(key)).and_then(number) {
        if value <= 0.0 {
            errors.push(format!("[{}] {} must be positive", section, key));
        }
    }
}
