//! Per-value type coercions selected by a rule's `type`.
//!
//! The table is explicit and injectable: `CoercionTable::from_config` builds
//! the built-in set once, and callers may `register` replacements (for
//! example a strict integer parser that errors instead of yielding `null`).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::config::ProjectorConfig;
use crate::error::{Error, Result};

/// Text emitted by the date coercions when the input is not a date.
pub const INVALID_DATE: &str = "Invalid date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionKind {
    Integer,
    Number,
    Datetime,
    Date,
    Array,
    Object,
    String,
    Empty,
}

impl CoercionKind {
    pub const ALL: [CoercionKind; 8] = [
        CoercionKind::Integer,
        CoercionKind::Number,
        CoercionKind::Datetime,
        CoercionKind::Date,
        CoercionKind::Array,
        CoercionKind::Object,
        CoercionKind::String,
        CoercionKind::Empty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CoercionKind::Integer => "integer",
            CoercionKind::Number => "number",
            CoercionKind::Datetime => "datetime",
            CoercionKind::Date => "date",
            CoercionKind::Array => "array",
            CoercionKind::Object => "object",
            CoercionKind::String => "string",
            CoercionKind::Empty => "empty",
        }
    }
}

impl fmt::Display for CoercionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type CoercionFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Mapping from coercion kind to the function applied to each collected value.
#[derive(Clone)]
pub struct CoercionTable {
    fns: HashMap<CoercionKind, CoercionFn>,
}

impl CoercionTable {
    /// A table with nothing registered.
    pub fn empty() -> Self {
        Self {
            fns: HashMap::new(),
        }
    }

    /// Built-in coercions, with date patterns taken from `config`.
    pub fn from_config(config: &ProjectorConfig) -> Result<Self> {
        check_pattern("datetime_format", &config.datetime_format)?;
        check_pattern("date_format", &config.date_format)?;

        let mut table = Self::empty();
        table.register(CoercionKind::Integer, |v| Ok(parse_int(v)));
        table.register(CoercionKind::Number, |v| Ok(to_number(v)));
        let datetime = config.datetime_format.clone();
        table.register(CoercionKind::Datetime, move |v| {
            Ok(format_date(v, &datetime))
        });
        let date = config.date_format.clone();
        table.register(CoercionKind::Date, move |v| Ok(format_date(v, &date)));
        table.register(CoercionKind::Array, |v| Ok(to_array(v)));
        table.register(CoercionKind::Object, parse_object);
        table.register(CoercionKind::String, |v| {
            serde_json::to_string(v)
                .map(Value::String)
                .map_err(|e| Error::Coerce {
                    kind: CoercionKind::String,
                    reason: e.to_string(),
                })
        });
        table.register(CoercionKind::Empty, |_| Ok(Value::Null));
        Ok(table)
    }

    /// Install (or replace) the function for `kind`.
    pub fn register<F>(&mut self, kind: CoercionKind, f: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.fns.insert(kind, Arc::new(f));
        self
    }

    pub fn get(&self, kind: CoercionKind) -> Option<&CoercionFn> {
        self.fns.get(&kind)
    }

    pub fn contains(&self, kind: CoercionKind) -> bool {
        self.fns.contains_key(&kind)
    }
}

impl Default for CoercionTable {
    fn default() -> Self {
        // Default patterns are known-good strftime strings.
        Self::from_config(&ProjectorConfig::default()).unwrap_or_else(|_| Self::empty())
    }
}

impl fmt::Debug for CoercionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.fns.keys().map(CoercionKind::name).collect();
        kinds.sort_unstable();
        f.debug_struct("CoercionTable").field("kinds", &kinds).finish()
    }
}

fn check_pattern(name: &str, pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidConfig(format!(
            "{name}: `{pattern}` is not a valid strftime pattern"
        )));
    }
    Ok(())
}

fn number_value(f: f64) -> Value {
    if !f.is_finite() {
        return Value::Null;
    }
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        return Value::from(f as i64);
    }
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// Leading base-10 integer of a value. Non-numeric input yields `null`.
pub fn parse_int(value: &Value) -> Value {
    match value {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Value::Number(n.clone())
            } else {
                n.as_f64().map(|f| number_value(f.trunc())).unwrap_or(Value::Null)
            }
        }
        Value::String(s) => parse_int_text(s),
        // A sequence reads as its comma-joined text, so only the first item counts.
        Value::Array(items) => items.first().map(parse_int).unwrap_or(Value::Null),
        Value::Null | Value::Bool(_) | Value::Object(_) => Value::Null,
    }
}

fn parse_int_text(text: &str) -> Value {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Value::Null;
    }
    let digits = &rest[..digits_len];
    match digits.parse::<i64>() {
        Ok(n) => Value::from(if negative { -n } else { n }),
        // Past i64: keep the magnitude as a float.
        Err(_) => digits
            .parse::<f64>()
            .map(|f| number_value(if negative { -f } else { f }))
            .unwrap_or(Value::Null),
    }
}

/// Loose numeric cast. Values with no numeric reading yield `null`.
pub fn to_number(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(n.clone()),
        Value::Bool(b) => Value::from(u8::from(*b)),
        Value::Null => Value::from(0),
        Value::String(s) => text_to_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => Value::from(0),
            [only @ (Value::Number(_) | Value::String(_))] => to_number(only),
            _ => Value::Null,
        },
        Value::Object(_) => Value::Null,
    }
}

fn text_to_number(text: &str) -> Value {
    let text = text.trim();
    if text.is_empty() {
        return Value::from(0);
    }
    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0b") | Some("0B") => Some(2),
        Some("0o") | Some("0O") => Some(8),
        _ => None,
    };
    if let Some(radix) = radix {
        return i64::from_str_radix(&text[2..], radix)
            .map(Value::from)
            .unwrap_or(Value::Null);
    }
    // Rust accepts `inf`/`nan` spellings that have no numeric reading here.
    if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return Value::Null;
    }
    text.parse::<f64>().map(number_value).unwrap_or(Value::Null)
}

/// Read a value as a UTC instant: numbers are epoch milliseconds, text is
/// RFC 3339 or a plain `YYYY-MM-DD[ HH:MM[:SS]]` stamp.
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_instant_text(s.trim()),
        _ => None,
    }
}

fn parse_instant_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    const STAMPS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for stamp in STAMPS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, stamp) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn format_date(value: &Value, pattern: &str) -> Value {
    match parse_instant(value) {
        Some(instant) => Value::String(instant.format(pattern).to_string()),
        None => Value::String(INVALID_DATE.to_string()),
    }
}

/// Text splits on commas; sequences pass; mappings give their values.
pub fn to_array(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::Array(s.split(',').map(Value::from).collect()),
        Value::Array(items) => Value::Array(items.clone()),
        Value::Object(map) => Value::Array(map.values().cloned().collect()),
        Value::Null | Value::Bool(_) | Value::Number(_) => Value::Array(Vec::new()),
    }
}

/// Parse JSON text; values that are already structured pass through.
pub fn parse_object(value: &Value) -> Result<Value> {
    match value {
        Value::String(s) => serde_json::from_str(s).map_err(|e| Error::Coerce {
            kind: CoercionKind::Object,
            reason: e.to_string(),
        }),
        other => Ok(other.clone()),
    }
}
