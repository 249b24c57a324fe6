//! The decision-step condition grammar: `<field> <op> <literal>`.
//!
//! This is deliberately not a general expression evaluator. The field list
//! is closed, operators are the six comparisons, and type compatibility is
//! checked at parse time so that evaluation against a [`RobotState`] is
//! total.

use core::fmt;

use thiserror::Error;

use crate::world::RobotState;

/// A robot-state field a condition may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionField {
    BatteryLevel,
    IsCharging,
    CurrentLocationId,
    CarryingObject,
    DetectedObject,
}

impl ConditionField {
    pub fn parse(s: &str) -> Option<Self> {
        // Short aliases are accepted because generators routinely emit them.
        match s {
            "batteryLevel" | "battery" => Some(Self::BatteryLevel),
            "isCharging" | "charging" => Some(Self::IsCharging),
            "currentLocationId" | "location" => Some(Self::CurrentLocationId),
            "carryingObject" | "carrying" => Some(Self::CarryingObject),
            "detectedObject" | "detected" => Some(Self::DetectedObject),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::BatteryLevel => "batteryLevel",
            Self::IsCharging => "isCharging",
            Self::CurrentLocationId => "currentLocationId",
            Self::CarryingObject => "carryingObject",
            Self::DetectedObject => "detectedObject",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }

    /// Ordered comparisons only apply to the numeric field.
    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }
}

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(String),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionParseError {
    #[error("condition is empty")]
    Empty,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),
    #[error("missing literal after operator")]
    MissingLiteral,
    #[error("field `{field}` does not support ordered comparison")]
    OrderedComparisonOnNonNumeric { field: &'static str },
    #[error("field `{field}` requires a {expected} literal")]
    LiteralTypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

/// A parsed, type-checked decision condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: ConditionField,
    pub op: CompareOp,
    pub literal: Literal,
}

impl Condition {
    /// Parse a condition string such as `batteryLevel < 20`.
    pub fn parse(input: &str) -> Result<Self, ConditionParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ConditionParseError::Empty);
        }

        let mut tokens = input.split_whitespace();
        let field_tok = tokens.next().unwrap_or_default();
        let op_tok = tokens.next().unwrap_or_default();
        let lit_tok = tokens.collect::<Vec<_>>().join(" ");

        let field = ConditionField::parse(field_tok)
            .ok_or_else(|| ConditionParseError::UnknownField(field_tok.to_string()))?;
        let op = CompareOp::parse(op_tok)
            .ok_or_else(|| ConditionParseError::UnknownOperator(op_tok.to_string()))?;
        if lit_tok.is_empty() {
            return Err(ConditionParseError::MissingLiteral);
        }
        let literal = parse_literal(&lit_tok);

        if op.is_ordering() && field != ConditionField::BatteryLevel {
            return Err(ConditionParseError::OrderedComparisonOnNonNumeric {
                field: field.name(),
            });
        }

        match (field, &literal) {
            (ConditionField::BatteryLevel, Literal::Int(_)) => {}
            (ConditionField::BatteryLevel, _) => {
                return Err(ConditionParseError::LiteralTypeMismatch {
                    field: field.name(),
                    expected: "numeric",
                })
            }
            (ConditionField::IsCharging, Literal::Bool(_)) => {}
            (ConditionField::IsCharging, _) => {
                return Err(ConditionParseError::LiteralTypeMismatch {
                    field: field.name(),
                    expected: "boolean",
                })
            }
            (ConditionField::CurrentLocationId, Literal::Str(_)) => {}
            (ConditionField::CurrentLocationId, _) => {
                return Err(ConditionParseError::LiteralTypeMismatch {
                    field: field.name(),
                    expected: "string",
                })
            }
            // Carried/detected objects may be compared to a string or null.
            (_, Literal::Str(_) | Literal::Null) => {}
            (field, _) => {
                return Err(ConditionParseError::LiteralTypeMismatch {
                    field: field.name(),
                    expected: "string or null",
                })
            }
        }

        Ok(Self { field, op, literal })
    }

    /// Evaluate against a state. Total for any parsed condition.
    pub fn evaluate(&self, state: &RobotState) -> bool {
        match (self.field, &self.literal) {
            (ConditionField::BatteryLevel, Literal::Int(rhs)) => {
                compare_ints(i64::from(state.battery_level), self.op, *rhs)
            }
            (ConditionField::IsCharging, Literal::Bool(rhs)) => match self.op {
                CompareOp::Eq => state.is_charging == *rhs,
                CompareOp::Ne => state.is_charging != *rhs,
                _ => false,
            },
            (ConditionField::CurrentLocationId, Literal::Str(rhs)) => match self.op {
                CompareOp::Eq => state.current_location_id == *rhs,
                CompareOp::Ne => state.current_location_id != *rhs,
                _ => false,
            },
            (ConditionField::CarryingObject, lit) => {
                compare_optional(state.carrying_object.as_deref(), self.op, lit)
            }
            (ConditionField::DetectedObject, lit) => {
                compare_optional(state.detected_object.as_deref(), self.op, lit)
            }
            // Ruled out at parse time.
            _ => false,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field.name(), self.op.name(), self.literal)
    }
}

fn parse_literal(s: &str) -> Literal {
    match s {
        "null" | "none" => return Literal::Null,
        "true" => return Literal::Bool(true),
        "false" => return Literal::Bool(false),
        _ => {}
    }
    if let Ok(n) = s.parse::<i64>() {
        return Literal::Int(n);
    }
    let unquoted = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(s);
    Literal::Str(unquoted.to_string())
}

fn compare_ints(lhs: i64, op: CompareOp, rhs: i64) -> bool {
    match op {
        CompareOp::Lt => lhs < rhs,
        CompareOp::Le => lhs <= rhs,
        CompareOp::Gt => lhs > rhs,
        CompareOp::Ge => lhs >= rhs,
        CompareOp::Eq => lhs == rhs,
        CompareOp::Ne => lhs != rhs,
    }
}

fn compare_optional(lhs: Option<&str>, op: CompareOp, rhs: &Literal) -> bool {
    let equal = match rhs {
        Literal::Null => lhs.is_none(),
        Literal::Str(s) => lhs == Some(s.as_str()),
        _ => false,
    };
    match op {
        CompareOp::Eq => equal,
        CompareOp::Ne => !equal,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RobotState {
        RobotState {
            battery_level: 50,
            current_location_id: "dock".to_string(),
            is_charging: false,
            carrying_object: Some("cup".to_string()),
            detected_object: None,
        }
    }

    #[test]
    fn battery_comparisons() {
        let c = Condition::parse("batteryLevel < 20").unwrap();
        assert!(!c.evaluate(&state()));
        let c = Condition::parse("battery >= 50").unwrap();
        assert!(c.evaluate(&state()));
        let c = Condition::parse("batteryLevel != 50").unwrap();
        assert!(!c.evaluate(&state()));
    }

    #[test]
    fn charging_and_location() {
        let c = Condition::parse("isCharging == false").unwrap();
        assert!(c.evaluate(&state()));
        let c = Condition::parse("currentLocationId == dock").unwrap();
        assert!(c.evaluate(&state()));
        let c = Condition::parse("currentLocationId != \"kitchen\"").unwrap();
        assert!(c.evaluate(&state()));
    }

    #[test]
    fn optional_object_fields() {
        let c = Condition::parse("carryingObject == cup").unwrap();
        assert!(c.evaluate(&state()));
        let c = Condition::parse("carryingObject != null").unwrap();
        assert!(c.evaluate(&state()));
        let c = Condition::parse("detectedObject == null").unwrap();
        assert!(c.evaluate(&state()));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(Condition::parse("  "), Err(ConditionParseError::Empty));
        assert!(matches!(
            Condition::parse("altitude > 3"),
            Err(ConditionParseError::UnknownField(_))
        ));
        assert!(matches!(
            Condition::parse("batteryLevel ~ 3"),
            Err(ConditionParseError::UnknownOperator(_))
        ));
        assert_eq!(
            Condition::parse("batteryLevel <"),
            Err(ConditionParseError::MissingLiteral)
        );
        assert!(matches!(
            Condition::parse("carryingObject < cup"),
            Err(ConditionParseError::OrderedComparisonOnNonNumeric { .. })
        ));
        assert!(matches!(
            Condition::parse("isCharging == 3"),
            Err(ConditionParseError::LiteralTypeMismatch { .. })
        ));
    }

    #[test]
    fn display_roundtrips() {
        let c = Condition::parse("battery < 20").unwrap();
        assert_eq!(c.to_string(), "batteryLevel < 20");
        assert_eq!(Condition::parse(&c.to_string()).unwrap(), c);
    }
}
