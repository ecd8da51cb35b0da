//! Request schemas
//!
//! Bodies are first decoded into loosely-typed structs whose fields are all
//! optional, then validated into solver input. Missing and non-numeric
//! values are told apart here so the solver only sees well-typed requests.

use crate::error::{ApiError, Result};
use alligo_solver::{Component, MixError, MixRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Body of `POST /api/mix/simple`
#[derive(Debug, Default, Deserialize)]
pub struct SimpleMixBody {
    pub a1: Option<Value>,
    pub a2: Option<Value>,
    pub m: Option<Value>,
    #[serde(rename = "S")]
    pub s: Option<Value>,
}

/// Validated two-component input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairInput {
    pub a1: Decimal,
    pub a2: Decimal,
    pub m: Decimal,
    pub total: Decimal,
}

impl SimpleMixBody {
    pub fn validate(self) -> std::result::Result<PairInput, MixError> {
        Ok(PairInput {
            a1: required_number("a1", self.a1)?,
            a2: required_number("a2", self.a2)?,
            m: required_number("m", self.m)?,
            total: required_number("S", self.s)?,
        })
    }
}

/// Body of `POST /api/mix/complex`
#[derive(Debug, Default, Deserialize)]
pub struct ComplexMixBody {
    pub components: Option<Vec<ComponentBody>>,
    #[serde(alias = "S")]
    pub total_amount: Option<Value>,
    #[serde(alias = "m")]
    pub desired_intensity: Option<Value>,
    pub mix_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComponentBody {
    #[serde(alias = "a")]
    pub intensity: Option<Value>,
    pub name: Option<Value>,
    pub priority: Option<Value>,
}

/// Mixing mode requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MixType {
    #[default]
    Standard,
}

impl MixType {
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(MixType::Standard),
            Some(v) if v.eq_ignore_ascii_case("standard") => Ok(MixType::Standard),
            Some(other) => Err(ApiError::UnsupportedMixType(other.to_string())),
        }
    }
}

/// Validated N-component input
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexInput {
    pub request: MixRequest,
    pub mix_type: MixType,
}

impl ComplexMixBody {
    pub fn validate(self) -> Result<ComplexInput> {
        let mix_type = MixType::parse(self.mix_type.as_deref())?;

        let components = self.components.ok_or_else(|| MixError::MissingField {
            field: "components".to_string(),
        })?;

        let components = components
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.validate(i))
            .collect::<std::result::Result<Vec<_>, MixError>>()?;

        let total = required_number("total_amount", self.total_amount)?;
        let target = required_number("desired_intensity", self.desired_intensity)?;

        Ok(ComplexInput {
            request: MixRequest::new(components, target, total),
            mix_type,
        })
    }
}

impl ComponentBody {
    fn validate(self, index: usize) -> std::result::Result<Component, MixError> {
        let intensity = required_number(&format!("components[{}].intensity", index), self.intensity)?;
        let name = match self.name {
            None => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        Ok(Component {
            intensity,
            name,
            priority: self.priority,
        })
    }
}

/// Accepts JSON numbers and numeric strings; anything else is invalid
pub fn required_number(field: &str, value: Option<Value>) -> std::result::Result<Decimal, MixError> {
    let invalid = |raw: String| MixError::InvalidNumeric {
        field: field.to_string(),
        value: raw,
    };

    match value {
        None => Err(MixError::MissingField {
            field: field.to_string(),
        }),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Decimal::from(u))
            } else {
                let text = n.to_string();
                parse_decimal(&text).ok_or_else(|| invalid(text))
            }
        }
        Some(Value::String(s)) => parse_decimal(s.trim()).ok_or_else(|| invalid(s)),
        Some(other) => Err(invalid(other.to_string())),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}
