use serde::Serialize;
use serde_json::{Map, Value};
use strum_macros::Display as EnumDisplay;
use utoipa::ToSchema;

use super::TransactionRequest;

const KNOWN_FIELDS: [&str; 5] = [
    "transaction_id",
    "amount",
    "merchant_id",
    "user_id",
    "transaction_type",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumDisplay, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldErrorKind {
    ModelType,
    Missing,
    StringType,
    FloatType,
    FiniteNumber,
    GreaterThanEqual,
    ExtraForbidden,
    JsonInvalid,
}

impl FieldErrorKind {
    fn default_message(self) -> &'static str {
        match self {
            Self::ModelType => "Input should be a valid dictionary or object",
            Self::Missing => "Field required",
            Self::StringType => "Input should be a valid string",
            Self::FloatType => "Input should be a valid number",
            Self::FiniteNumber => "Input should be a finite number",
            Self::GreaterThanEqual => "Input should be greater than or equal to 0",
            Self::ExtraForbidden => "Extra inputs are not permitted",
            Self::JsonInvalid => "JSON decode error",
        }
    }
}

/// One invalid location in a request body.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = json!(["body", "amount"]))]
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(kind: FieldErrorKind, field: Option<&str>) -> Self {
        let mut loc = vec!["body".to_string()];
        loc.extend(field.map(str::to_string));
        Self {
            loc,
            msg: kind.default_message().to_string(),
            kind,
        }
    }

    pub fn json_invalid(message: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: message.into(),
            kind: FieldErrorKind::JsonInvalid,
        }
    }

    /// Field name this error points at, if any.
    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

impl TransactionRequest {
    /// Validates an untyped body, reporting every problem at once, then
    /// decodes the typed model.
    pub fn from_json_value(value: Value) -> Result<Self, Vec<FieldError>> {
        let errors = check_body(&value);
        if !errors.is_empty() {
            return Err(errors);
        }
        serde_json::from_value(value).map_err(|e| vec![FieldError::json_invalid(e.to_string())])
    }
}

/// Every problem serde would stop at, plus the amount range, in field order.
pub fn check_body(value: &Value) -> Vec<FieldError> {
    let Some(object) = value.as_object() else {
        return vec![FieldError::new(FieldErrorKind::ModelType, None)];
    };

    let mut errors = Vec::new();

    check_string(object, "transaction_id", &mut errors);
    check_amount(object, &mut errors);
    check_string(object, "merchant_id", &mut errors);
    check_string(object, "user_id", &mut errors);
    check_string(object, "transaction_type", &mut errors);

    errors.extend(
        object
            .keys()
            .filter(|key| !KNOWN_FIELDS.contains(&key.as_str()))
            .map(|key| FieldError::new(FieldErrorKind::ExtraForbidden, Some(key))),
    );
    errors
}

fn check_string(object: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) {
    match object.get(name) {
        None => errors.push(FieldError::new(FieldErrorKind::Missing, Some(name))),
        Some(Value::String(_)) => {}
        Some(_) => errors.push(FieldError::new(FieldErrorKind::StringType, Some(name))),
    }
}

fn check_amount(object: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    let kind = match object.get("amount") {
        None => FieldErrorKind::Missing,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(amount) if !amount.is_finite() => FieldErrorKind::FiniteNumber,
            Some(amount) if amount < 0.0 => FieldErrorKind::GreaterThanEqual,
            Some(_) => return,
            None => FieldErrorKind::FloatType,
        },
        Some(_) => FieldErrorKind::FloatType,
    };
    errors.push(FieldError::new(kind, Some("amount")));
}
