//! Flag maps and `-D` flag lines.
//!
//! A flag map is built from a JSON object by keeping its primitive values in
//! sorted key order. Maps render to one `-DKEY` / `-DKEY=VALUE` line per
//! entry, meant to be read back line by line as individual compiler
//! arguments.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

const DEFINE_PREFIX: &str = "-D";

/// A primitive configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    /// JSON boolean, rendered as `ON` / `OFF`.
    Switch(bool),
    Number(Number),
    Text(String),
    /// JSON `null`, rendered as a bare define.
    Empty,
}

impl FlagValue {
    /// Convert a JSON value. Objects and arrays are not flag values.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(FlagValue::Switch(*b)),
            Value::Number(n) => Some(FlagValue::Number(n.clone())),
            Value::String(s) => Some(FlagValue::Text(s.clone())),
            Value::Null => Some(FlagValue::Empty),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Classify the value text of a rendered flag line.
    pub fn from_rendered(text: &str) -> Self {
        match text {
            "" => FlagValue::Empty,
            "ON" => FlagValue::Switch(true),
            "OFF" => FlagValue::Switch(false),
            _ if is_numeric_literal(text) => match serde_json::from_str::<Number>(text) {
                Ok(n) => FlagValue::Number(n),
                Err(_) => FlagValue::Text(text.to_string()),
            },
            _ => FlagValue::Text(text.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FlagValue::Empty => true,
            FlagValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// True when the value contributes nothing to a file name.
    pub fn is_blank(&self) -> bool {
        match self {
            FlagValue::Empty => true,
            FlagValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Switch(true) => f.write_str("ON"),
            FlagValue::Switch(false) => f.write_str("OFF"),
            FlagValue::Number(n) => f.write_str(&format_number(n)),
            FlagValue::Text(s) => f.write_str(s),
            FlagValue::Empty => Ok(()),
        }
    }
}

impl Serialize for FlagValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Text form of a JSON number.
///
/// Integer literals keep every digit (`-0` becomes `0`). Anything with a
/// fraction or exponent is a float: shortest round-trip digits, fixed
/// notation for exponents in `-4..16`, otherwise `1e-05` / `1.5e+16`, and
/// integral floats keep a trailing `.0`.
pub fn format_number(n: &Number) -> String {
    let lexeme = n.to_string();
    if !lexeme.contains(['.', 'e', 'E']) {
        return match lexeme.strip_prefix('-') {
            Some(digits) if digits.bytes().all(|b| b == b'0') => digits.to_string(),
            _ => lexeme,
        };
    }

    match n.as_f64() {
        Some(value) => format_float(value),
        None => lexeme,
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `-1.25e-5`.
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exp) => exp,
        Err(_) => return scientific,
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        if point <= 0 {
            let zeros = "0".repeat((-point) as usize);
            format!("{}0.{}{}", sign, zeros, digits)
        } else {
            let point = point as usize;
            if digits.len() <= point {
                let zeros = "0".repeat(point - digits.len());
                format!("{}{}{}.0", sign, digits, zeros)
            } else {
                format!("{}{}.{}", sign, &digits[..point], &digits[point..])
            }
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{}{}{}e{}{:02}", sign, lead, fraction, exp_sign, exponent.abs())
    }
}

/// True for integer and decimal literals with an optional exponent
/// (`42`, `-1.5`, `3e8`, `+6.02E23`).
pub fn is_numeric_literal(s: &str) -> bool {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    let re = NUMERIC.get_or_init(|| {
        Regex::new(r"^[+-]?\d+(\.\d+)?([eE][+-]?\d+)?$").expect("numeric pattern is valid")
    });
    re.is_match(s)
}

/// Insertion-ordered flag name to value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagMap {
    entries: Vec<(String, FlagValue)>,
}

impl FlagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the primitive entries of a JSON value in sorted key order.
    ///
    /// Anything other than an object yields an empty map; nested objects and
    /// arrays inside the object are dropped.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(obj)) => Self::from_object(obj),
            _ => Self::new(),
        }
    }

    pub fn from_object(obj: &Map<String, Value>) -> Self {
        let mut keys: Vec<&String> = obj.keys().collect();
        keys.sort();

        let mut map = Self::new();
        for key in keys {
            if let Some(value) = obj.get(key).and_then(FlagValue::from_json) {
                map.insert(key.clone(), value);
            }
        }
        map
    }

    /// Insert or overwrite. An existing key keeps its position.
    pub fn insert(&mut self, key: String, value: FlagValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &FlagValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Overlay `overrides` on a copy of `self`; override values win.
    pub fn merged_with(&self, overrides: &FlagMap) -> FlagMap {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key.to_string(), value.clone());
        }
        merged
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| FlagLine::render(key, value))
            .collect()
    }

    /// File content: one flag per line with a trailing newline.
    pub fn render(&self) -> String {
        let mut content = self.to_lines().join("\n");
        content.push('\n');
        content
    }
}

impl Serialize for FlagMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One `-DKEY[=VALUE]` line.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagLine {
    pub key: String,
    pub value: Option<FlagValue>,
}

impl FlagLine {
    /// Values are written raw: never quoted, never escaped.
    pub fn render(key: &str, value: &FlagValue) -> String {
        if value.is_empty() {
            format!("{}{}", DEFINE_PREFIX, key)
        } else {
            format!("{}{}={}", DEFINE_PREFIX, key, value)
        }
    }

    /// Parse a rendered line. Returns `None` for lines without the `-D` prefix
    /// or with an empty key.
    pub fn parse(line: &str) -> Option<Self> {
        let body = line.trim_end_matches(['\r', '\n']).strip_prefix(DEFINE_PREFIX)?;
        let (key, value) = match body.split_once('=') {
            Some((key, raw)) => (key, Some(FlagValue::from_rendered(raw))),
            None => (body, None),
        };
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value,
        })
    }
}
