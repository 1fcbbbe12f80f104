//! Constructors for filter expressions
//!
//! ```
//! use chroma_extras::query::{and, contains, eq, gte, or, where_, where_document};
//! use serde_json::json;
//!
//! let filter = where_(and([eq("category", "chroma"), or([eq("author", "john"), eq("author", "jack")])]));
//! assert_eq!(
//!     filter,
//!     json!({"$and": [
//!         {"category": ["$eq", "chroma"]},
//!         {"$or": [{"author": ["$eq", "john"]}, {"author": ["$eq", "jack"]}]}
//!     ]})
//! );
//!
//! let docs = where_document(contains(["vector", "search"]));
//! assert_eq!(docs, json!({"$and": [{"$contains": "vector"}, {"$contains": "search"}]}));
//! # let _ = gte("year", 2020);
//! ```

use super::expression::{
    ComparisonOperator, DocumentOperator, Expression, LogicalOperator, Number, Operand, Scalar,
};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

fn comparison(field: impl Into<String>, operator: ComparisonOperator, value: Operand) -> Expression {
    Expression::Comparison {
        field: field.into(),
        operator,
        value,
    }
}

fn scalars<I>(values: I) -> Operand
where
    I: IntoIterator,
    I::Item: Into<Scalar>,
{
    Operand::List(values.into_iter().map(Into::into).collect())
}

/// `{field: ["$eq", value]}`
pub fn eq(field: impl Into<String>, value: impl Into<Scalar>) -> Expression {
    comparison(field, ComparisonOperator::Eq, Operand::Scalar(value.into()))
}

/// `{field: ["$ne", value]}`
pub fn ne(field: impl Into<String>, value: impl Into<Scalar>) -> Expression {
    comparison(field, ComparisonOperator::Ne, Operand::Scalar(value.into()))
}

/// `{field: ["$lt", value]}`
pub fn lt(field: impl Into<String>, value: impl Into<Number>) -> Expression {
    comparison(field, ComparisonOperator::Lt, Operand::Scalar(value.into().into()))
}

/// `{field: ["$lte", value]}`
pub fn lte(field: impl Into<String>, value: impl Into<Number>) -> Expression {
    comparison(field, ComparisonOperator::Lte, Operand::Scalar(value.into().into()))
}

/// `{field: ["$gt", value]}`
pub fn gt(field: impl Into<String>, value: impl Into<Number>) -> Expression {
    comparison(field, ComparisonOperator::Gt, Operand::Scalar(value.into().into()))
}

/// `{field: ["$gte", value]}`
pub fn gte(field: impl Into<String>, value: impl Into<Number>) -> Expression {
    comparison(field, ComparisonOperator::Gte, Operand::Scalar(value.into().into()))
}

/// `{field: ["$in", [values...]]}`, values kept in the given order
pub fn in_<I>(field: impl Into<String>, values: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Scalar>,
{
    comparison(field, ComparisonOperator::In, scalars(values))
}

/// `{field: ["$nin", [values...]]}`, values kept in the given order
pub fn nin<I>(field: impl Into<String>, values: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Scalar>,
{
    comparison(field, ComparisonOperator::Nin, scalars(values))
}

fn logical<I>(operator: LogicalOperator, expressions: I) -> Expression
where
    I: IntoIterator<Item = Expression>,
{
    let children: Vec<Expression> = expressions.into_iter().collect();
    if children.is_empty() {
        warn!("Building empty {} combinator; backend behaviour is undefined", operator.as_str());
    }
    Expression::Logical { operator, children }
}

/// `{"$and": [...]}`. Nested combinators are kept nested.
pub fn and<I>(expressions: I) -> Expression
where
    I: IntoIterator<Item = Expression>,
{
    logical(LogicalOperator::And, expressions)
}

/// `{"$or": [...]}`. Nested combinators are kept nested.
pub fn or<I>(expressions: I) -> Expression
where
    I: IntoIterator<Item = Expression>,
{
    logical(LogicalOperator::Or, expressions)
}

fn document<I>(operator: DocumentOperator, combinator: LogicalOperator, texts: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut leaves: Vec<Expression> = texts
        .into_iter()
        .map(|text| Expression::Document {
            operator,
            text: text.into(),
        })
        .collect();

    if leaves.len() == 1 {
        return leaves.remove(0);
    }
    logical(combinator, leaves)
}

/// Document must contain every text (`$and`); a single text yields the bare leaf
pub fn contains<I>(texts: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    document(DocumentOperator::Contains, LogicalOperator::And, texts)
}

/// Like [`contains`] with an explicit combinator for multiple texts
pub fn contains_with<I>(op: LogicalOperator, texts: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    document(DocumentOperator::Contains, op, texts)
}

/// Document must contain none of the texts (`$and`); a single text yields the bare leaf
pub fn not_contains<I>(texts: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    document(DocumentOperator::NotContains, LogicalOperator::And, texts)
}

/// Like [`not_contains`] with an explicit combinator for multiple texts
pub fn not_contains_with<I>(op: LogicalOperator, texts: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    document(DocumentOperator::NotContains, op, texts)
}

/// Metadata filter, passed as the query's `where` argument
#[derive(Debug, Clone, PartialEq)]
pub struct Where(Value);

/// Document filter, passed as the query's `where_document` argument
#[derive(Debug, Clone, PartialEq)]
pub struct WhereDocument(Value);

/// Convert an expression into a metadata filter
pub fn where_(expression: Expression) -> Where {
    Where(expression.to_value())
}

/// Convert an expression into a document filter
pub fn where_document(expression: Expression) -> WhereDocument {
    WhereDocument(expression.to_value())
}

macro_rules! impl_filter_value {
    ($($name:ident),+) => {
        $(
            impl $name {
                pub fn as_value(&self) -> &Value {
                    &self.0
                }

                pub fn into_value(self) -> Value {
                    self.0
                }
            }

            impl From<Expression> for $name {
                fn from(expression: Expression) -> Self {
                    $name(expression.to_value())
                }
            }

            impl From<$name> for Value {
                fn from(filter: $name) -> Self {
                    filter.0
                }
            }

            impl PartialEq<Value> for $name {
                fn eq(&self, other: &Value) -> bool {
                    &self.0 == other
                }
            }

            impl Serialize for $name {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    self.0.serialize(serializer)
                }
            }
        )+
    };
}

impl_filter_value!(Where, WhereDocument);
