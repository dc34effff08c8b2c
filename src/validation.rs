//! Declarative field validation.
//!
//! A [`Validator`] is an ordered list of [`FieldChain`]s. Each chain targets one
//! field in one [`Location`] and holds predicate checks that are all evaluated
//! (no short-circuit), so a request gets back every violation at once.
//!
//! Values are checked through their text form the way form validators do:
//! strings as is, numbers and booleans via `to_string`, `null` as the empty
//! string. Arrays and objects have no text form and fail every check.

use serde::Serialize;
use serde_json::{Map, Value};

/// Where a field is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// A single failed check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: String,
    pub location: Location,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Fields gathered from one request
#[derive(Debug, Default, Clone)]
pub struct Input {
    params: Map<String, Value>,
    body: Map<String, Value>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), Value::String(value.into()));
        self
    }

    /// Use `body` as the request body; anything but a JSON object reads as empty.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    pub fn get(&self, location: Location, field: &str) -> Option<&Value> {
        match location {
            Location::Body => self.body.get(field),
            Location::Params => self.params.get(field),
        }
    }

    pub fn param(&self, field: &str) -> Option<&Value> {
        self.get(Location::Params, field)
    }

    pub fn body(&self, field: &str) -> Option<&Value> {
        self.get(Location::Body, field)
    }
}

static NULL: Value = Value::Null;

type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

struct Check {
    predicate: Predicate,
    message: String,
}

/// Checks for one field
pub struct FieldChain {
    field: &'static str,
    location: Location,
    optional: bool,
    checks: Vec<Check>,
}

impl FieldChain {
    fn new(field: &'static str, location: Location) -> Self {
        Self {
            field,
            location,
            optional: false,
            checks: Vec::new(),
        }
    }

    pub fn body(field: &'static str) -> Self {
        Self::new(field, Location::Body)
    }

    pub fn param(field: &'static str) -> Self {
        Self::new(field, Location::Params)
    }

    /// Skip every check when the field is absent. An explicit `null` is still checked.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn check<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.checks.push(Check {
            predicate: Box::new(predicate),
            message: message.into(),
        });
        self
    }

    pub fn not_empty(self, message: impl Into<String>) -> Self {
        self.check(rules::not_empty, message)
    }

    pub fn length(self, min: usize, max: usize, message: impl Into<String>) -> Self {
        self.check(move |value| rules::length(value, min, max), message)
    }

    pub fn float(self, min: f64, max: f64, message: impl Into<String>) -> Self {
        self.check(move |value| rules::float(value, min, max), message)
    }

    pub fn int(self, min: i64, max: i64, message: impl Into<String>) -> Self {
        self.check(move |value| rules::int(value, min, max), message)
    }

    /// Accept `""` as well as a well-formed http(s) URL
    pub fn empty_or_http_url(self, message: impl Into<String>) -> Self {
        self.check(
            |value| rules::text(value).is_some_and(|t| t.is_empty()) || rules::http_url(value),
            message,
        )
    }

    pub fn object_id(self, message: impl Into<String>) -> Self {
        self.check(rules::object_id, message)
    }

    fn run(&self, input: &Input, violations: &mut Vec<Violation>) {
        let value = input.get(self.location, self.field);
        if value.is_none() && self.optional {
            return;
        }

        let checked = value.unwrap_or(&NULL);
        for check in &self.checks {
            if !(check.predicate)(checked) {
                violations.push(Violation {
                    field: self.field.to_string(),
                    location: self.location,
                    message: check.message.clone(),
                    value: value.cloned(),
                });
            }
        }
    }
}

/// An ordered set of field chains evaluated as a unit
pub struct Validator {
    chains: Vec<FieldChain>,
}

impl Validator {
    pub fn new(chains: Vec<FieldChain>) -> Self {
        Self { chains }
    }

    /// Run every chain; violations come back in declaration order.
    pub fn validate(&self, input: &Input) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for chain in &self.chains {
            chain.run(input, &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Predicates and coercions shared by chains and by the code that reads
/// validated input.
pub mod rules {
    use serde_json::Value;

    /// Text form of a value; `None` for arrays and objects.
    pub fn text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some(String::new()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_float(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            _ => text(value)?.parse::<f64>().ok(),
        };
        parsed.filter(|f| f.is_finite())
    }

    /// Integers, integral floats (`25.0`, `1e2`) and integer strings
    pub fn as_int(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn not_empty(value: &Value) -> bool {
        text(value).is_some_and(|t| !t.is_empty())
    }

    pub fn length(value: &Value, min: usize, max: usize) -> bool {
        text(value).is_some_and(|t| (min..=max).contains(&t.chars().count()))
    }

    pub fn float(value: &Value, min: f64, max: f64) -> bool {
        as_float(value).is_some_and(|f| f >= min && f <= max)
    }

    pub fn int(value: &Value, min: i64, max: i64) -> bool {
        as_int(value).is_some_and(|i| (min..=max).contains(&i))
    }

    /// 24 hexadecimal characters
    pub fn object_id(value: &Value) -> bool {
        text(value).is_some_and(|t| t.len() == 24 && t.chars().all(|c| c.is_ascii_hexdigit()))
    }

    /// `http://` or `https://`, a dotted host name made of letters, digits and
    /// hyphens, an optional numeric port and no whitespace.
    pub fn http_url(value: &Value) -> bool {
        let Some(url) = text(value) else {
            return false;
        };
        if url.chars().any(char::is_whitespace) {
            return false;
        }

        let lower = url.to_ascii_lowercase();
        let rest = match lower
            .strip_prefix("https://")
            .or_else(|| lower.strip_prefix("http://"))
        {
            Some(rest) => rest,
            None => return false,
        };

        let authority = rest
            .split(|c: char| c == '/' || c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let host_port = authority.rsplit('@').next().unwrap_or_default();
        let host = match host_port.split_once(':') {
            Some((host, port)) => {
                if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
                    return false;
                }
                host
            }
            None => host_port,
        };

        host.contains('.')
            && host.split('.').all(|label| {
                !label.is_empty()
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
    }
}
