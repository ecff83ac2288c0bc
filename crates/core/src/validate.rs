use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

pub const NAME_MAX: usize = 50;
pub const TEXT_MAX: usize = 100;
pub const YEAR_MIN: i64 = 1900;
pub const YEAR_MAX: i64 = 2030;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Vec<String>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn messages(&self) -> &[String] {
        match self {
            Validation::Valid => &[],
            Validation::Invalid(messages) => messages,
        }
    }
}

fn capacity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^\d+\s*(GB|TB|MB)$").expect("valid pattern"))
}

/// Check a draft's name and field texts. Messages come back in form
/// order: name first, then fields by key, then duplicate-key problems.
pub fn validate_item(name: &str, fields: &BTreeMap<String, String>) -> Validation {
    let mut messages = Vec::new();

    let trimmed_name = name.trim();
    if trimmed_name.is_empty() {
        messages.push("Name cannot be empty".to_string());
    } else if trimmed_name.chars().count() > NAME_MAX {
        messages.push(format!("Name cannot exceed {NAME_MAX} characters"));
    }

    for (key, value) in fields {
        messages.extend(validate_field(key, value));
    }

    let mut seen = HashSet::new();
    if fields.keys().any(|key| !seen.insert(key.to_lowercase())) {
        messages.push("Duplicate field names are not allowed".to_string());
    }

    if messages.is_empty() {
        Validation::Valid
    } else {
        Validation::Invalid(messages)
    }
}

fn validate_field(key: &str, value: &str) -> Vec<String> {
    let trimmed = value.trim();
    // Blank values are dropped on save, so nothing to check here
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut messages = Vec::new();
    match key.to_lowercase().as_str() {
        "price" => match trimmed.parse::<f64>() {
            Err(_) => messages.push("Price must be a valid number".to_string()),
            Ok(price) if price < 0.0 => {
                messages.push("Price cannot be negative".to_string());
            }
            Ok(_) => {}
        },
        "capacity" | "storage" => {
            if !capacity_pattern().is_match(trimmed) {
                messages.push(
                    "Capacity must be a valid format (e.g., '64 GB', '128GB', '1TB')".to_string(),
                );
            }
        }
        "year" => match trimmed.parse::<i64>() {
            Err(_) => messages.push("Year must be a valid number".to_string()),
            Ok(year) if !(YEAR_MIN..=YEAR_MAX).contains(&year) => {
                messages.push(format!("Year must be between {YEAR_MIN} and {YEAR_MAX}"));
            }
            Ok(_) => {}
        },
        "screen size" | "screensize" => {
            if trimmed.parse::<f64>().is_err() {
                messages.push("Screen size must be a valid number".to_string());
            }
        }
        _ => {
            if trimmed.chars().count() > TEXT_MAX {
                messages.push(format!(
                    "{} cannot exceed {TEXT_MAX} characters",
                    capitalized(key)
                ));
            }
        }
    }
    messages
}

fn capitalized(key: &str) -> String {
    key.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn well_formed_item_passes() {
        let result = validate_item(
            "iPhone 15",
            &fields(&[("price", "999.99"), ("capacity", "128 GB"), ("year", "2023")]),
        );
        assert_eq!(result, Validation::Valid);
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = validate_item("   ", &fields(&[]));
        assert_eq!(result.messages(), ["Name cannot be empty"]);
    }

    #[test]
    fn oversized_name_is_rejected() {
        let name = "x".repeat(51);
        let result = validate_item(&name, &fields(&[]));
        assert_eq!(result.messages(), ["Name cannot exceed 50 characters"]);

        let name = "x".repeat(50);
        assert!(validate_item(&name, &fields(&[])).is_valid());
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = validate_item("iPhone 15", &fields(&[("price", "-5")]));
        assert_eq!(result.messages(), ["Price cannot be negative"]);
    }

    #[test]
    fn unparseable_price_is_rejected() {
        let result = validate_item("iPhone 15", &fields(&[("Price", "about a grand")]));
        assert_eq!(result.messages(), ["Price must be a valid number"]);
    }

    #[test]
    fn capacity_formats() {
        for ok in ["64 GB", "128GB", "1TB", "256 mb", "2 tb"] {
            let result = validate_item("iPhone 15", &fields(&[("capacity", ok)]));
            assert!(result.is_valid(), "expected {ok:?} to pass");
        }
        for bad in ["lots", "GB 128", "128 KB", "12.5 GB"] {
            let result = validate_item("iPhone 15", &fields(&[("capacity", bad)]));
            assert_eq!(
                result.messages(),
                ["Capacity must be a valid format (e.g., '64 GB', '128GB', '1TB')"],
                "expected {bad:?} to fail"
            );
        }
        // The storage key follows the same rule
        let result = validate_item("iPhone 15", &fields(&[("storage", "lots")]));
        assert!(!result.is_valid());
    }

    #[test]
    fn year_bounds() {
        for ok in ["1900", "2030", "2023"] {
            assert!(validate_item("x", &fields(&[("year", ok)])).is_valid());
        }
        for bad in ["1899", "2031"] {
            let result = validate_item("x", &fields(&[("year", bad)]));
            assert_eq!(result.messages(), ["Year must be between 1900 and 2030"]);
        }
        let result = validate_item("x", &fields(&[("year", "20x3")]));
        assert_eq!(result.messages(), ["Year must be a valid number"]);
    }

    #[test]
    fn screen_size_must_be_numeric() {
        assert!(validate_item("x", &fields(&[("screen size", "6.1")])).is_valid());
        assert!(validate_item("x", &fields(&[("screensize", "6.1")])).is_valid());

        let result = validate_item("x", &fields(&[("Screen Size", "big")]));
        assert_eq!(result.messages(), ["Screen size must be a valid number"]);
    }

    #[test]
    fn free_form_fields_have_a_length_cap() {
        let long = "y".repeat(101);
        let result = validate_item("x", &fields(&[("custom note", &long)]));
        assert_eq!(
            result.messages(),
            ["Custom Note cannot exceed 100 characters"]
        );

        let exactly = "y".repeat(100);
        assert!(validate_item("x", &fields(&[("custom note", &exactly)])).is_valid());
    }

    #[test]
    fn blank_values_skip_typed_rules() {
        let result = validate_item("x", &fields(&[("price", "   "), ("year", "")]));
        assert_eq!(result, Validation::Valid);
    }

    #[test]
    fn case_duplicate_keys_are_rejected() {
        let result = validate_item("x", &fields(&[("Price", "999"), ("price", "888")]));
        assert_eq!(result.messages(), ["Duplicate field names are not allowed"]);
    }

    #[test]
    fn messages_come_in_form_order() {
        let result = validate_item("", &fields(&[("price", "-1"), ("year", "1800")]));
        assert_eq!(
            result.messages(),
            [
                "Name cannot be empty",
                "Price cannot be negative",
                "Year must be between 1900 and 2030",
            ]
        );
    }
}
