//! Filter expression tree and its plain JSON form

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Right-hand side of a metadata comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Numeric operand accepted by the ordering operators
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Str(value.clone())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<Number> for Scalar {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(i) => Scalar::Int(i),
            Number::Float(f) => Scalar::Float(f),
        }
    }
}

macro_rules! impl_numeric_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(value: $source) -> Self {
                    Number::$variant(<$target>::from(value))
                }
            }

            impl From<$source> for Scalar {
                fn from(value: $source) -> Self {
                    Scalar::from(Number::from(value))
                }
            }
        )+
    };
}

impl_numeric_from!(Int as i64: i8, i16, i32, i64, u8, u16, u32);
impl_numeric_from!(Float as f64: f32, f64);

// values beyond i64 fall back to the nearest float
macro_rules! impl_wide_int_from {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(value: $source) -> Self {
                    i64::try_from(value)
                        .map(Number::Int)
                        .unwrap_or(Number::Float(value as f64))
                }
            }

            impl From<$source> for Scalar {
                fn from(value: $source) -> Self {
                    Scalar::from(Number::from(value))
                }
            }
        )+
    };
}

impl_wide_int_from!(u64, usize, isize);

/// Metadata comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Nin,
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "$eq",
            ComparisonOperator::Ne => "$ne",
            ComparisonOperator::Lt => "$lt",
            ComparisonOperator::Lte => "$lte",
            ComparisonOperator::Gt => "$gt",
            ComparisonOperator::Gte => "$gte",
            ComparisonOperator::In => "$in",
            ComparisonOperator::Nin => "$nin",
        }
    }
}

/// Document text operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentOperator {
    Contains,
    NotContains,
}

impl DocumentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentOperator::Contains => "$contains",
            DocumentOperator::NotContains => "$not_contains",
        }
    }
}

/// Combinators joining child expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "$and",
            LogicalOperator::Or => "$or",
        }
    }
}

/// Value side of a comparison leaf
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

/// A node of the filter tree.
///
/// Each node owns its children, so a tree is acyclic and can be converted to its
/// plain form any number of times with equal results.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `{field: [operator, value]}`
    Comparison {
        field: String,
        operator: ComparisonOperator,
        value: Operand,
    },
    /// `{"$contains": text}` / `{"$not_contains": text}`
    Document {
        operator: DocumentOperator,
        text: String,
    },
    /// `{"$and": [...]}` / `{"$or": [...]}`, children in construction order
    Logical {
        operator: LogicalOperator,
        children: Vec<Expression>,
    },
}

impl Expression {
    /// Convert to the plain nested-map form consumed by the query API
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(1);
        match self {
            Expression::Comparison { field, operator, value } => {
                let rhs = match value {
                    Operand::Scalar(s) => scalar_value(s),
                    Operand::List(items) => Value::Array(items.iter().map(scalar_value).collect()),
                };
                map.insert(
                    field.clone(),
                    Value::Array(vec![Value::String(operator.as_str().to_string()), rhs]),
                );
            }
            Expression::Document { operator, text } => {
                map.insert(operator.as_str().to_string(), Value::String(text.clone()));
            }
            Expression::Logical { operator, children } => {
                map.insert(
                    operator.as_str().to_string(),
                    Value::Array(children.iter().map(Expression::to_value).collect()),
                );
            }
        }
        Value::Object(map)
    }

    /// Combine with `other` under `$and`
    pub fn and(self, other: Expression) -> Expression {
        super::and([self, other])
    }

    /// Combine with `other` under `$or`
    pub fn or(self, other: Expression) -> Expression {
        super::or([self, other])
    }
}

fn scalar_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Str(s) => Value::String(s.clone()),
        Scalar::Int(i) => Value::from(*i),
        // NaN and infinities have no JSON representation and become null
        Scalar::Float(f) => Value::from(*f),
        Scalar::Bool(b) => Value::Bool(*b),
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<Expression> for Value {
    fn from(expression: Expression) -> Self {
        expression.to_value()
    }
}

impl From<&Expression> for Value {
    fn from(expression: &Expression) -> Self {
        expression.to_value()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl BitAnd for Expression {
    type Output = Expression;

    fn bitand(self, rhs: Expression) -> Expression {
        self.and(rhs)
    }
}

impl BitOr for Expression {
    type Output = Expression;

    fn bitor(self, rhs: Expression) -> Expression {
        self.or(rhs)
    }
}
