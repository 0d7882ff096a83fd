// ============================================================
// Layer 4 — Format File Loader
// ============================================================
// Parses the YAML format file into a validated LayoutConfig.
//
// Expected shape:
//
//   generator:
//     label_count: 24
//     font_size: 12pt          # optional
//   format:
//     LabelCols: 3
//     LabelRows: 8
//     numberoflabels: ~        # bare flag
//
// Validation rules:
//   - both `generator` and `format` keys must exist at the top
//     level (a key with an empty value still counts as present)
//   - `generator.label_count` must be a positive integer, given
//     either as a YAML number or as a string of digits
//   - every `format` value must be null or a scalar, because
//     each one becomes a single line of markup
//
// serde_yaml's Mapping keeps insertion order, which is what
// lets directives come out in the order they were written.

use std::{io::Read, num::NonZeroUsize};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::domain::layout::{Directive, LayoutConfig};
use crate::error::LabelError;

const REQUIRED_SECTIONS: [&str; 2] = ["generator", "format"];

static NULL: Value = Value::Null;

const LABEL_COUNT_REQUIRED: &str = "LabelCount in [generator] is required.";

/// The `generator` section, typed.
#[derive(Debug, Default, Deserialize)]
struct GeneratorSection {
    #[serde(default)]
    label_count: Option<Scalar>,

    #[serde(default)]
    font_size: Option<Scalar>,
}

/// Any single YAML value that can be written out as text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(n)   => n.to_string(),
            Scalar::Float(x) => x.to_string(),
            Scalar::Bool(b)  => b.to_string(),
            Scalar::Text(s)  => s,
        }
    }

    /// Interpret as a positive label count.
    /// Floats and booleans are rejected rather than truncated.
    fn as_label_count(&self) -> Option<NonZeroUsize> {
        match self {
            Scalar::Int(n)  => usize::try_from(*n).ok().and_then(NonZeroUsize::new),
            Scalar::Text(s) => s.trim().parse::<usize>().ok().and_then(NonZeroUsize::new),
            Scalar::Float(_) | Scalar::Bool(_) => None,
        }
    }
}

/// Read a whole format file from `reader` and validate it.
pub fn load_layout(mut reader: impl Read) -> Result<LayoutConfig, LabelError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_layout(&text)
}

/// Parse and validate format-file text.
pub fn parse_layout(text: &str) -> Result<LayoutConfig, LabelError> {
    // An empty document has no sections at all
    let root: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(text)?
    };

    let root = root
        .as_mapping()
        .filter(|m| REQUIRED_SECTIONS.iter().all(|key| m.contains_key(*key)))
        .ok_or_else(|| {
            LabelError::configuration(format!(
                "Missing required sections in format file: {}",
                REQUIRED_SECTIONS.join(", ")
            ))
        })?;

    let generator = parse_generator(section(root, "generator"))?;

    let label_count = generator
        .label_count
        .as_ref()
        .and_then(Scalar::as_label_count)
        .ok_or_else(|| LabelError::configuration(LABEL_COUNT_REQUIRED))?;

    let font_size  = generator.font_size.map(Scalar::into_text);
    let directives = parse_directives(section(root, "format"))?;

    tracing::debug!(
        "Loaded format: {} labels per sheet, {} directives",
        label_count,
        directives.len()
    );

    Ok(LayoutConfig::new(label_count, font_size, directives))
}

fn section<'a>(root: &'a Mapping, key: &str) -> &'a Value {
    root.get(key).unwrap_or(&NULL)
}

fn parse_generator(value: &Value) -> Result<GeneratorSection, LabelError> {
    match value {
        // `generator:` with nothing under it
        Value::Null => Ok(GeneratorSection::default()),
        Value::Mapping(_) => serde_yaml::from_value(value.clone()).map_err(|e| {
            LabelError::configuration(format!("Invalid [generator] section: {e}"))
        }),
        _ => Err(LabelError::configuration(LABEL_COUNT_REQUIRED)),
    }
}

fn parse_directives(value: &Value) -> Result<Vec<Directive>, LabelError> {
    let section: &Mapping = match value {
        Value::Null       => return Ok(Vec::new()),
        Value::Mapping(m) => m,
        _ => {
            return Err(LabelError::configuration(
                "The [format] section must be a list of name: value entries",
            ))
        }
    };

    section
        .iter()
        .map(|(key, val)| {
            let name = scalar_text(key).ok_or_else(|| {
                LabelError::configuration(format!("Invalid directive name in [format]: {key:?}"))
            })?;

            match val {
                Value::Null => Ok(Directive::flag(name)),
                other => scalar_text(other).map(|v| Directive::assign(&name, v)).ok_or_else(|| {
                    LabelError::configuration(format!(
                        "Directive '{name}' in [format] must have a single value"
                    ))
                }),
            }
        })
        .collect()
}

/// Text of a YAML scalar; `None` for null, sequences, mappings and tags
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b)   => Some(b.to_string()),
        _ => None,
    }
}
