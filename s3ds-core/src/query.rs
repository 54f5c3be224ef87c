//! Query parameters and results of the datastore contract.

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

use crate::{Error, MaybeSend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    KeyCompare { op: Op, key: String },
    ValueCompare { op: Op, value: Bytes },
    KeyPrefix(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    ByKey { descending: bool },
    ByValue { descending: bool },
}

/// A prefix-scoped enumeration request.
///
/// `offset` is the number of matched entries to skip and `limit` caps the number of entries
/// produced, `0` meaning unbounded. Filters and orders can be expressed here, but a datastore is
/// free to reject them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub prefix: String,
    pub filters: Vec<Filter>,
    pub orders: Vec<Order>,
    pub offset: usize,
    pub limit: usize,
    pub keys_only: bool,
}

impl Query {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn keys_only(mut self, keys_only: bool) -> Self {
        self.keys_only = keys_only;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    /// `None` for keys-only queries.
    pub value: Option<Bytes>,
}

pub type QueryResult = Result<Entry, Error>;

/// Drains a result stream, returning the first error it carries.
pub async fn rest<S>(results: S) -> Result<Vec<Entry>, Error>
where
    S: Stream<Item = QueryResult> + MaybeSend,
{
    let mut results = std::pin::pin!(results);
    let mut entries = Vec::new();
    while let Some(result) = results.next().await {
        entries.push(result?);
    }
    Ok(entries)
}
