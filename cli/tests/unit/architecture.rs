//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries
//! (domain → application → infra/output → commands) are maintained.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively, or the file itself.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    if dir.is_file() {
        return vec![dir.to_path_buf()];
    }
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

fn src(parts: &[&str]) -> PathBuf {
    parts
        .iter()
        .fold(Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), |p, part| {
            p.join(part)
        })
}

fn relative(file: &Path) -> String {
    file.strip_prefix(env!("CARGO_MANIFEST_DIR"))
        .unwrap_or(file)
        .display()
        .to_string()
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(test)]") || trimmed.starts_with("#[cfg(all(test") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-comment lines outside `#[cfg(test)]` blocks, with 1-based line numbers.
fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let mut tracker = CfgTestTracker::new();
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            !in_test && !trimmed.starts_with("//")
        })
        .map(|(i, line)| (i + 1, line.to_string()))
        .collect()
}

/// Every production line under `dir` containing one of `forbidden`.
fn find_in(dir: &Path, forbidden: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let rel = relative(&file);
        for (lineno, line) in production_lines(&file) {
            for needle in forbidden {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{lineno}: `{needle}`: {line}"));
                }
            }
        }
    }
    violations
}

#[test]
fn domain_is_pure() {
    let violations = find_in(
        &src(&["domain"]),
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio",
            "std::fs",
            "std::process",
            "std::net",
        ],
    );
    assert!(
        violations.is_empty(),
        "domain/ must stay free of I/O and outer layers:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_has_no_imports_from_outer_layers() {
    let violations = find_in(
        &src(&["application"]),
        &["crate::infra", "crate::commands", "crate::output"],
    );
    assert!(
        violations.is_empty(),
        "application/ must only depend on domain/ and its ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = find_in(&src(&["infra"]), &["crate::commands", "crate::output"]);
    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let violations = find_in(&src(&["infra"]), &["println!", "eprintln!"]);
    assert!(
        violations.is_empty(),
        "infra/ must not use println!/eprintln! outside #[cfg(test)]:\n{}",
        violations.join("\n")
    );
}

#[test]
fn presenter_does_no_printing() {
    let violations = find_in(&src(&["output", "presenter.rs"]), &["println!", "eprintln!"]);
    assert!(
        violations.is_empty(),
        "the presenter returns text and leaves printing to its caller:\n{}",
        violations.join("\n")
    );
}

#[test]
fn services_use_trait_bounds_not_concrete_adapters() {
    let violations = find_in(
        &src(&["application", "services"]),
        &["CfCli", "TokioCommandRunner", "YamlConfigStore", "SystemClock"],
    );
    assert!(
        violations.is_empty(),
        "services must take port traits, not infra types:\n{}",
        violations.join("\n")
    );
}

#[test]
fn services_log_below_the_default_filter() {
    // The reporter already shows warnings; stderr stays clean at the `warn` default.
    let violations = find_in(
        &src(&["application", "services"]),
        &["tracing::warn!", "tracing::error!"],
    );
    assert!(
        violations.is_empty(),
        "services report problems through ProgressReporter, not warn-level logs:\n{}",
        violations.join("\n")
    );
}
