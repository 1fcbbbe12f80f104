//! Filter expression builder and query model
//!
//! Expressions are composed from leaf constructors ([`eq`], [`in_`], [`contains`], ...)
//! and combinators ([`and`], [`or`], or the `&` / `|` operators), then turned into the
//! plain JSON filter structure with [`where_`] (metadata) or [`where_document`]
//! (document text).

pub mod expression;
pub mod filters;
pub mod request;
pub mod result;

pub use expression::{
    ComparisonOperator, DocumentOperator, Expression, LogicalOperator, Number, Operand, Scalar,
};
pub use filters::{
    and, contains, contains_with, eq, gt, gte, in_, lt, lte, ne, nin, not_contains,
    not_contains_with, or, where_, where_document, Where, WhereDocument,
};
pub use request::{Include, QueryRequest, QueryRequestBuilder};
pub use result::{Metadata, QueryResult};
