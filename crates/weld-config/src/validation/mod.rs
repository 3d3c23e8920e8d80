//! Full configuration validation.
//!
//! Every check runs; errors are collected into a single `ConfigError`.


use std::sync::LazyLock;

use regex::Regex;
use weld_common::ConfigError;

use crate::schema::WeldConfig;

/// A CSS class identifier usable in a `.class` selector.
static CSS_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[_a-zA-Z][_a-zA-Z0-9-]*$").unwrap());

/// Widget names double as directory names and message addresses.
static WIDGET_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap());

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WeldConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_widget(&mut errors, config);
    validate_mask(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_widget(errors: &mut Vec<String>, config: &WeldConfig) {
    let widget = &config.widget;
    if widget.name.is_empty() {
        errors.push("widget.name must not be empty".into());
    } else if !WIDGET_NAME_RE.is_match(&widget.name) {
        errors.push(format!(
            "widget.name = {:?} may only contain letters, digits, '.', '_' and '-'",
            widget.name
        ));
    }
    if widget.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
        errors.push("widget.url must not be empty when set".into());
    }
    validate_range(errors, "widget.width", widget.width.into(), 1, 8192);
    validate_range(errors, "widget.height", widget.height.into(), 1, 8192);
}

fn validate_mask(errors: &mut Vec<String>, config: &WeldConfig) {
    let mask = &config.mask;
    if !CSS_IDENT_RE.is_match(&mask.marker_class) {
        errors.push(format!(
            "mask.marker_class = {:?} is not a CSS class identifier",
            mask.marker_class
        ));
    }
    validate_range(errors, "mask.throttle_ms", mask.throttle_ms, 0, 1000);
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
