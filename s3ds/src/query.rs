//! Prefix queries emulated on top of object listings.
//!
//! A query is served by one listing of the scoped prefix. Offset and limit are applied to the
//! listing in backend order, then values are fetched one at a time while the caller polls the
//! result stream.

use async_stream::stream;
use futures_core::Stream;
use s3ds_core::{Entry, Error, Key, MaybeSend, Query, QueryResult};

use crate::{backend::ObjectBackend, options::OffsetPolicy, store::ObjectDatastore};

pub(crate) fn check_supported(query: &Query) -> Result<(), Error> {
    if !query.filters.is_empty() {
        return Err(Error::UnsupportedQuery {
            message: "s3 datastore queries do not support filters".into(),
        });
    }
    if !query.orders.is_empty() {
        return Err(Error::UnsupportedQuery {
            message: "s3 datastore queries do not support ordering".into(),
        });
    }
    Ok(())
}

pub(crate) fn select<T>(
    listing: impl IntoIterator<Item = T>,
    offset: usize,
    limit: usize,
    policy: OffsetPolicy,
) -> Vec<T> {
    let mut selected = Vec::new();
    for (index, item) in listing.into_iter().enumerate() {
        if policy.skips(index, offset) {
            continue;
        }
        if limit > 0 && selected.len() == limit {
            break;
        }
        selected.push(item);
    }
    selected
}

pub(crate) fn results<B: ObjectBackend>(
    store: &ObjectDatastore<B>,
    keys: Vec<Key>,
    keys_only: bool,
) -> impl Stream<Item = QueryResult> + MaybeSend + '_ {
    stream! {
        for key in keys {
            if keys_only {
                yield Ok(Entry { key: key.into(), value: None });
                continue;
            }
            match store.fetch(&key).await {
                Ok(value) => yield Ok(Entry { key: key.into(), value: Some(value) }),
                Err(err) => {
                    tracing::debug!(%key, error = %err, "query value fetch failed");
                    yield Err(err);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use s3ds_core::{Filter, Order};

    use super::*;

    const LISTING: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

    #[test]
    fn rejects_filters_and_orders() {
        assert!(check_supported(&Query::new("/")).is_ok());

        let filtered = Query::new("/").filter(Filter::KeyPrefix("/a".into()));
        assert!(matches!(
            check_supported(&filtered),
            Err(Error::UnsupportedQuery { .. })
        ));

        let ordered = Query::new("/").order(Order::ByValue { descending: false });
        assert!(matches!(
            check_supported(&ordered),
            Err(Error::UnsupportedQuery { .. })
        ));
    }

    #[test]
    fn no_offset_no_limit() {
        assert_eq!(select(LISTING, 0, 0, OffsetPolicy::Inclusive), LISTING);
        assert_eq!(select(LISTING, 0, 0, OffsetPolicy::Exclusive), LISTING);
    }

    #[test]
    fn inclusive_offset() {
        assert_eq!(select(LISTING, 1, 0, OffsetPolicy::Inclusive), ["c", "d", "e", "f"]);
        assert_eq!(select(LISTING, 2, 2, OffsetPolicy::Inclusive), ["d", "e"]);
        assert!(select(LISTING, 5, 0, OffsetPolicy::Inclusive).is_empty());
    }

    #[test]
    fn exclusive_offset() {
        assert_eq!(
            select(LISTING, 1, 0, OffsetPolicy::Exclusive),
            ["b", "c", "d", "e", "f"]
        );
        assert_eq!(select(LISTING, 2, 2, OffsetPolicy::Exclusive), ["c", "d"]);
        assert!(select(LISTING, 6, 0, OffsetPolicy::Exclusive).is_empty());
    }

    #[test]
    fn limit_caps_output() {
        assert_eq!(select(LISTING, 0, 3, OffsetPolicy::Inclusive), ["a", "b", "c"]);
        assert_eq!(select(LISTING, 0, 10, OffsetPolicy::Inclusive), LISTING);
    }
}
