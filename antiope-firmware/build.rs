//! Build script for antiope-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pages.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_registry();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

const PALETTE: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

const CATEGORIES: [&str; 3] = ["news", "sport", "weather"];

/// Validate the page registry at compile time
fn validate_registry() {
    println!("cargo:rerun-if-changed=pages.toml");

    let path = Path::new("pages.toml");
    if !path.exists() {
        panic!("pages.toml not found - the firmware requires a page registry");
    }

    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read pages.toml: {}", e));

    let registry: toml::Value = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("invalid TOML syntax in pages.toml:\n{}", e));

    let mut errors = Vec::new();

    if registry.get("service_name").and_then(|v| v.as_str()).is_none() {
        errors.push("missing 'service_name'".to_string());
    }
    let home = registry.get("home_page").and_then(|v| v.as_integer());
    match home {
        Some(n) if (100..=999).contains(&n) => {}
        Some(n) => errors.push(format!("home_page {} outside 100-999", n)),
        None => errors.push("missing 'home_page'".to_string()),
    }

    let mut known_pages = Vec::new();
    if let Some(toml::Value::Array(pages)) = registry.get("page") {
        for (i, page) in pages.iter().enumerate() {
            validate_page(i, page, &mut known_pages, &mut errors);
        }
    } else {
        errors.push("missing [[page]] entries - at least the home page is required".to_string());
    }

    if let Some(toml::Value::Array(feeds)) = registry.get("feed") {
        for (i, feed) in feeds.iter().enumerate() {
            validate_feed(i, feed, &mut errors);
        }
    }

    if let Some(n) = home {
        if !known_pages.contains(&n) {
            errors.push(format!("home_page {} has no [[page]] entry", n));
        }
    }

    if !errors.is_empty() {
        panic!(
            "pages.toml validation failed:\n{}",
            errors
                .iter()
                .map(|e| format!("  - {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=pages.toml validated successfully");
}

fn validate_page(
    index: usize,
    page: &toml::Value,
    known_pages: &mut Vec<i64>,
    errors: &mut Vec<String>,
) {
    let table = match page.as_table() {
        Some(t) => t,
        None => {
            errors.push(format!("[[page]] entry {} must be a table", index));
            return;
        }
    };

    match table.get("number").and_then(|v| v.as_integer()) {
        Some(n) if (100..=999).contains(&n) => known_pages.push(n),
        Some(n) => errors.push(format!("[[page]] entry {}: number {} outside 100-999", index, n)),
        None => errors.push(format!("[[page]] entry {}: missing 'number'", index)),
    }

    if table.get("title").and_then(|v| v.as_str()).is_none() {
        errors.push(format!("[[page]] entry {}: missing 'title'", index));
    } else if table.get("title").and_then(|v| v.as_str()).unwrap().len() > 16 {
        errors.push(format!("[[page]] entry {}: title longer than 16 chars", index));
    }

    match table.get("lines") {
        Some(toml::Value::Array(lines)) => {
            if lines.len() > 24 {
                errors.push(format!("[[page]] entry {}: more than 24 lines", index));
            }
            for (row, line) in lines.iter().enumerate() {
                if line.as_str().is_none() {
                    errors.push(format!("[[page]] entry {}: line {} is not a string", index, row));
                }
            }
        }
        Some(_) => errors.push(format!("[[page]] entry {}: 'lines' must be an array", index)),
        None => errors.push(format!("[[page]] entry {}: missing 'lines'", index)),
    }

    if let Some(toml::Value::Array(colors)) = table.get("colors") {
        for (i, mark) in colors.iter().enumerate() {
            let mark = match mark.as_table() {
                Some(t) => t,
                None => {
                    errors.push(format!(
                        "[[page]] entry {}: colour {} must be an inline table",
                        index, i
                    ));
                    continue;
                }
            };
            match mark.get("color").and_then(|v| v.as_str()) {
                Some(name) if PALETTE.contains(&name) => {}
                Some(name) => errors.push(format!(
                    "[[page]] entry {}: unknown colour '{}'",
                    index, name
                )),
                None => errors.push(format!(
                    "[[page]] entry {}: colour {} missing 'color'",
                    index, i
                )),
            }
        }
    }
}

fn validate_feed(index: usize, feed: &toml::Value, errors: &mut Vec<String>) {
    let table = match feed.as_table() {
        Some(t) => t,
        None => {
            errors.push(format!("[[feed]] entry {} must be a table", index));
            return;
        }
    };

    match table.get("category").and_then(|v| v.as_str()) {
        Some(name) if CATEGORIES.contains(&name) => {}
        Some(name) => errors.push(format!("[[feed]] entry {}: unknown category '{}'", index, name)),
        None => errors.push(format!("[[feed]] entry {}: missing 'category'", index)),
    }

    match table.get("page").and_then(|v| v.as_integer()) {
        // The nine article pages must stay inside the addressable range
        Some(n) if (100..=990).contains(&n) => {}
        Some(n) => errors.push(format!("[[feed]] entry {}: page {} outside 100-990", index, n)),
        None => errors.push(format!("[[feed]] entry {}: missing 'page'", index)),
    }

    if table.get("title").and_then(|v| v.as_str()).is_none() {
        errors.push(format!("[[feed]] entry {}: missing 'title'", index));
    }
}
