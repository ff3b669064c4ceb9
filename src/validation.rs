//! Request validation: declarative per-field rules evaluated collect-all, one validator per operation.

use crate::model::NewProduct;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;
use utoipa::ToSchema;

pub const INVALID_ID: &str = "ID no válido";
pub const EMPTY_NAME: &str = "El nombre de Producto no puede ir vacio";
pub const NOT_NUMERIC_PRICE: &str = "Valor No Valido";
pub const EMPTY_PRICE: &str = "El precio de Producto no puede ir vacio";
pub const INVALID_PRICE: &str = "Precio no válido";
pub const INVALID_AVAILABILITY: &str = "Valor para disponibilidad no válido";

/// Where in the request a field was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "ID no válido")]
    pub msg: String,
    #[schema(example = "id")]
    pub param: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(msg: &str, param: &str, location: Location) -> Self {
        FieldError {
            msg: msg.to_string(),
            param: param.to_string(),
            location,
        }
    }
}

/// Errors accumulated over one request, in rule declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

/// 400 body: `{ "errors": [{ "msg", "param", "location" }] }`.
#[derive(Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// One check against one request field.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub field: &'static str,
    pub location: Location,
    pub check: fn(Option<&Value>) -> bool,
    pub message: &'static str,
}

/// The parts of a request rules can look at.
#[derive(Clone, Copy, Debug)]
pub struct RequestFields<'a> {
    pub id: Option<&'a str>,
    pub body: &'a Value,
}

impl<'a> RequestFields<'a> {
    fn get(&self, location: Location, field: &str) -> Option<Value> {
        match location {
            Location::Params if field == "id" => self.id.map(|s| Value::String(s.to_string())),
            Location::Params => None,
            Location::Body => self.body.get(field).cloned(),
        }
    }
}

/// Run every rule in order and collect all failures.
pub fn run_rules(rules: &[Rule], request: &RequestFields<'_>) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for rule in rules {
        let value = request.get(rule.location, rule.field);
        if !(rule.check)(value.as_ref()) {
            errors.push(FieldError::new(rule.message, rule.field, rule.location));
        }
    }
    errors
}

const ID_RULES: &[Rule] = &[Rule {
    field: "id",
    location: Location::Params,
    check: is_int,
    message: INVALID_ID,
}];

const NAME_AND_PRICE_RULES: &[Rule] = &[
    Rule {
        field: "name",
        location: Location::Body,
        check: is_non_empty_string,
        message: EMPTY_NAME,
    },
    Rule {
        field: "price",
        location: Location::Body,
        check: is_numeric,
        message: NOT_NUMERIC_PRICE,
    },
    Rule {
        field: "price",
        location: Location::Body,
        check: is_not_empty,
        message: EMPTY_PRICE,
    },
    Rule {
        field: "price",
        location: Location::Body,
        check: is_positive,
        message: INVALID_PRICE,
    },
];

const REQUIRED_AVAILABILITY: Rule = Rule {
    field: "availability",
    location: Location::Body,
    check: is_boolean,
    message: INVALID_AVAILABILITY,
};

const OPTIONAL_AVAILABILITY: Rule = Rule {
    field: "availability",
    location: Location::Body,
    check: is_optional_boolean,
    message: INVALID_AVAILABILITY,
};

/// Validate the `id` path parameter (GET, PATCH, DELETE).
pub fn validate_id(id: &str) -> Result<i64, ValidationErrors> {
    let body = Value::Null;
    let request = RequestFields { id: Some(id), body: &body };
    let errors = run_rules(ID_RULES, &request);
    match parse_int(id) {
        Some(n) if errors.is_empty() => Ok(n),
        _ => Err(errors),
    }
}

/// Validate a create body. `availability` is optional and defaults to true.
pub fn validate_create(body: &Value) -> Result<NewProduct, ValidationErrors> {
    let request = RequestFields { id: None, body };
    let mut rules = NAME_AND_PRICE_RULES.to_vec();
    rules.push(OPTIONAL_AVAILABILITY);
    let errors = run_rules(&rules, &request);
    if !errors.is_empty() {
        return Err(errors);
    }
    let availability = match body.get("availability") {
        None | Some(Value::Null) => Some(true),
        Some(v) => boolean_value(v),
    };
    match (string_field(body, "name"), numeric_field(body, "price"), availability) {
        (Some(name), Some(price), Some(availability)) => Ok(NewProduct {
            name,
            price,
            availability,
        }),
        _ => Err(errors),
    }
}

/// Validate a full update: path id plus all three body fields.
pub fn validate_update(id: &str, body: &Value) -> Result<(i64, NewProduct), ValidationErrors> {
    let request = RequestFields { id: Some(id), body };
    let mut rules = ID_RULES.to_vec();
    rules.extend_from_slice(NAME_AND_PRICE_RULES);
    rules.push(REQUIRED_AVAILABILITY);
    let errors = run_rules(&rules, &request);
    if !errors.is_empty() {
        return Err(errors);
    }
    match (
        parse_int(id),
        string_field(body, "name"),
        numeric_field(body, "price"),
        body.get("availability").and_then(boolean_value),
    ) {
        (Some(id), Some(name), Some(price), Some(availability)) => Ok((
            id,
            NewProduct {
                name,
                price,
                availability,
            },
        )),
        _ => Err(errors),
    }
}

fn is_int(v: Option<&Value>) -> bool {
    match v {
        Some(Value::String(s)) => parse_int(s).is_some(),
        Some(Value::Number(n)) => n.is_i64(),
        _ => false,
    }
}

fn is_non_empty_string(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::String(s)) if !s.trim().is_empty())
}

fn is_not_empty(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn is_numeric(v: Option<&Value>) -> bool {
    v.and_then(numeric_value).is_some()
}

fn is_positive(v: Option<&Value>) -> bool {
    v.and_then(numeric_value).map(|n| n > 0.0).unwrap_or(false)
}

fn is_boolean(v: Option<&Value>) -> bool {
    v.and_then(boolean_value).is_some()
}

fn is_optional_boolean(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(v) => boolean_value(v).is_some(),
    }
}

static INT_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static NUMERIC_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn matches_pattern(cell: &'static OnceLock<Option<Regex>>, pattern: &str, s: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .map(|re| re.is_match(s))
        .unwrap_or(false)
}

/// Decimal integer with optional sign; leading zeros allowed.
fn parse_int(s: &str) -> Option<i64> {
    if !matches_pattern(&INT_PATTERN, r"^[+-]?[0-9]+$", s) {
        return None;
    }
    s.parse().ok()
}

/// JSON numbers, or strings of the form `[+-][digits.]digits`. Only finite values count.
fn numeric_value(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if matches_pattern(&NUMERIC_PATTERN, r"^[+-]?([0-9]*\.)?[0-9]+$", s) => s.parse().ok(),
        _ => None,
    };
    n.filter(|n: &f64| n.is_finite())
}

fn boolean_value(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn string_field(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

fn numeric_field(body: &Value, field: &str) -> Option<f64> {
    body.get(field).and_then(numeric_value)
}
