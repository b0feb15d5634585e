//! Uniform success/fail envelope passed between host subsystems.
//!
//! A [`ResultEnvelope`] is created through [`ResultEnvelope::success`],
//! [`ResultEnvelope::fail`] or [`ResultEnvelope::from_plain_object`] and then
//! filled in place with the fluent `set_*` mutators. Payloads are opaque JSON
//! values; `Value::Null` means "no payload".

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;

/// Numeric code of a failed outcome.
pub const CODE_FAIL: u8 = 0;

/// Numeric code of a successful outcome.
pub const CODE_SUCCESS: u8 = 1;

/// Outcome code carried by an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Fail,
    Success,
}

impl ResultCode {
    pub fn as_u8(self) -> u8 {
        match self {
            ResultCode::Fail => CODE_FAIL,
            ResultCode::Success => CODE_SUCCESS,
        }
    }

    /// Coerce an untyped `code` field.
    ///
    /// Falsy values and anything that does not loosely equal `1` (`1`, `1.0`,
    /// `true`, `"1"`) become `Fail`, so a present `0` and a missing code are
    /// indistinguishable.
    fn from_loose(value: Option<&Value>) -> Self {
        let is_one = match value {
            Some(Value::Number(n)) => n.as_f64() == Some(1.0),
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().parse::<f64>().ok() == Some(1.0),
            _ => false,
        };
        if is_one {
            ResultCode::Success
        } else {
            ResultCode::Fail
        }
    }
}

/// Binary outcome plus an optional message and an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct ResultEnvelope {
    code: ResultCode,
    message: String,
    data: Value,
}

impl ResultEnvelope {
    fn with_code(code: ResultCode) -> Self {
        Self {
            code,
            message: String::new(),
            data: Value::Null,
        }
    }

    /// Envelope with `code = Success`, empty message and no payload.
    pub fn success() -> Self {
        Self::with_code(ResultCode::Success)
    }

    /// Envelope with `code = Fail`, empty message and no payload.
    pub fn fail() -> Self {
        Self::with_code(ResultCode::Fail)
    }

    /// Build an envelope from an untyped `{code?, message?, data?}` record.
    ///
    /// Every field is defaulted with JavaScript-style falsiness: `null`,
    /// `false`, `0` and `""` count as absent. A payload of `0`, `""` or
    /// `false` therefore comes back as `Value::Null`. A missing or falsy
    /// record yields [`ResultEnvelope::fail`].
    pub fn from_plain_object(obj: Option<&Value>) -> Self {
        let obj = match obj {
            Some(v) if is_truthy(v) => v,
            _ => return Self::fail(),
        };

        let message = match obj.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(v) if is_truthy(v) => v.to_string(),
            _ => String::new(),
        };
        let data = match obj.get("data") {
            Some(v) if is_truthy(v) => v.clone(),
            _ => Value::Null,
        };

        Self {
            code: ResultCode::from_loose(obj.get("code")),
            message,
            data,
        }
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success
    }

    pub fn is_fail(&self) -> bool {
        self.code == ResultCode::Fail
    }

    /// Replace the payload and return the same envelope.
    pub fn set_data(&mut self, data: impl Into<Value>) -> &mut Self {
        self.data = data.into();
        self
    }

    /// Replace the message and return the same envelope.
    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = message.into();
        self
    }

    /// Consuming form of [`set_data`](Self::set_data) for one-expression construction.
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.set_data(data);
        self
    }

    /// Consuming form of [`set_message`](Self::set_message).
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.set_message(message);
        self
    }

    /// Render as `{ "code": 0|1, "message": "...", "data": ... }`.
    pub fn to_plain_object(&self) -> Value {
        json!({
            "code": self.code.as_u8(),
            "message": self.message,
            "data": self.data,
        })
    }
}

impl From<Value> for ResultEnvelope {
    fn from(value: Value) -> Self {
        Self::from_plain_object(Some(&value))
    }
}

impl From<ResultEnvelope> for Value {
    fn from(envelope: ResultEnvelope) -> Self {
        envelope.to_plain_object()
    }
}

impl From<CoreError> for ResultEnvelope {
    fn from(err: CoreError) -> Self {
        Self::fail().with_message(err.to_string())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_fail_are_mutually_exclusive() {
        let ok = ResultEnvelope::success();
        assert!(ok.is_success());
        assert!(!ok.is_fail());

        let bad = ResultEnvelope::fail();
        assert!(bad.is_fail());
        assert!(!bad.is_success());
    }

    #[test]
    fn test_factories_start_empty() {
        for env in [ResultEnvelope::success(), ResultEnvelope::fail()] {
            assert_eq!(env.message(), "");
            assert_eq!(env.data(), &Value::Null);
        }
    }

    #[test]
    fn test_from_plain_object_missing_or_null_is_fail() {
        assert_eq!(ResultEnvelope::from_plain_object(None), ResultEnvelope::fail());
        assert_eq!(
            ResultEnvelope::from_plain_object(Some(&Value::Null)),
            ResultEnvelope::fail()
        );
    }

    #[test]
    fn test_from_plain_object_full_record() {
        let obj = json!({ "code": 1, "message": "ok", "data": { "a": 1 } });
        let env = ResultEnvelope::from_plain_object(Some(&obj));
        assert!(env.is_success());
        assert_eq!(env.message(), "ok");
        assert_eq!(env.data(), &json!({ "a": 1 }));
    }

    #[test]
    fn test_from_plain_object_zero_code_collapses_to_fail() {
        let explicit = ResultEnvelope::from_plain_object(Some(&json!({ "code": 0, "data": "x" })));
        let missing = ResultEnvelope::from_plain_object(Some(&json!({ "data": "x" })));
        assert!(explicit.is_fail());
        assert_eq!(explicit, missing);
        assert_eq!(explicit.data(), &json!("x"));
    }

    #[test]
    fn test_from_plain_object_falsy_payloads_become_null() {
        for falsy in [json!(0), json!(""), json!(false), Value::Null] {
            let env = ResultEnvelope::from_plain_object(Some(&json!({ "code": 1, "data": falsy })));
            assert!(env.is_success());
            assert_eq!(env.data(), &Value::Null);
        }
    }

    #[test]
    fn test_from_plain_object_empty_containers_are_kept() {
        let env = ResultEnvelope::from_plain_object(Some(&json!({ "code": 1, "data": [] })));
        assert_eq!(env.data(), &json!([]));
    }

    #[test]
    fn test_from_plain_object_loose_code_values() {
        let cases = [
            (json!(1), true),
            (json!(1.0), true),
            (json!(true), true),
            (json!("1"), true),
            (json!(2), false),
            (json!("yes"), false),
            (json!(-1), false),
        ];
        for (code, success) in cases {
            let env = ResultEnvelope::from_plain_object(Some(&json!({ "code": code })));
            assert_eq!(env.is_success(), success, "code {code}");
        }
    }

    #[test]
    fn test_from_plain_object_non_string_message_is_rendered() {
        let env = ResultEnvelope::from_plain_object(Some(&json!({ "message": 42 })));
        assert_eq!(env.message(), "42");
        let env = ResultEnvelope::from_plain_object(Some(&json!({ "message": "" })));
        assert_eq!(env.message(), "");
    }

    #[test]
    fn test_from_plain_object_falsy_scalar_record_is_fail() {
        assert_eq!(ResultEnvelope::from_plain_object(Some(&json!(0))), ResultEnvelope::fail());
        assert_eq!(ResultEnvelope::from_plain_object(Some(&json!(""))), ResultEnvelope::fail());
    }

    #[test]
    fn test_setters_return_same_instance() {
        let mut env = ResultEnvelope::success();
        let ptr: *const ResultEnvelope = &env;
        let returned: *const ResultEnvelope = env.set_message("saved").set_data(7);
        assert_eq!(ptr, returned);
        assert_eq!(env.message(), "saved");
        assert_eq!(env.data(), &json!(7));
    }

    #[test]
    fn test_setter_order_does_not_matter() {
        let mut a = ResultEnvelope::fail();
        a.set_message("boom").set_data(json!({ "retry": false }));
        let mut b = ResultEnvelope::fail();
        b.set_data(json!({ "retry": false })).set_message("boom");
        assert_eq!(a, b);
    }

    #[test]
    fn test_setters_keep_falsy_payloads() {
        let env = ResultEnvelope::success().with_data(0);
        assert_eq!(env.data(), &json!(0));
    }

    #[test]
    fn test_serde_uses_plain_object_shape() {
        let env = ResultEnvelope::success().with_message("ok").with_data(json!([1, 2]));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json, json!({ "code": 1, "message": "ok", "data": [1, 2] }));

        let back: ResultEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(back, env);
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let env: ResultEnvelope = serde_json::from_str(r#"{"code":0,"data":""}"#).unwrap();
        assert_eq!(env, ResultEnvelope::fail());
    }

    #[test]
    fn test_from_core_error_is_fail_with_message() {
        let env: ResultEnvelope = CoreError::Io("tool missing".into()).into();
        assert!(env.is_fail());
        assert_eq!(env.message(), "tool missing");
        assert_eq!(env.data(), &Value::Null);
    }

    #[test]
    fn test_code_constants() {
        assert_eq!(ResultEnvelope::success().code().as_u8(), CODE_SUCCESS);
        assert_eq!(ResultEnvelope::fail().code().as_u8(), CODE_FAIL);
    }
}
