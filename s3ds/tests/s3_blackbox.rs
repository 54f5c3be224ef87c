#![cfg(feature = "aws")]

use std::env;

use bytes::Bytes;
use s3ds::{rest, Datastore, Error, Key, Query, S3Datastore};
use tracing_subscriber::EnvFilter;

#[tokio::test]
#[ignore] // Requires real AWS credentials and an existing bucket
async fn s3_end_to_end() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let key_id = match env::var("AWS_ACCESS_KEY_ID") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("skipping: AWS_ACCESS_KEY_ID missing");
            return;
        }
    };
    let secret_key = match env::var("AWS_SECRET_ACCESS_KEY") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("skipping: AWS_SECRET_ACCESS_KEY missing");
            return;
        }
    };
    let bucket = match env::var("BUCKET_NAME") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("skipping: BUCKET_NAME missing");
            return;
        }
    };
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into());
    let token = env::var("AWS_SESSION_TOKEN").ok();

    let folder = format!(
        "s3ds-blackbox/{}/{}",
        env::var("USER").unwrap_or_else(|_| "user".into()),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis()
    );

    let store = S3Datastore::builder(bucket)
        .path(folder)
        .region(region)
        .credential(key_id, secret_key, token)
        .build()
        .unwrap();

    let keys = ["/a/b", "/a/b/c", "/a/c", "/d", "/e~f#[g]"];
    for key in keys {
        store
            .put(&Key::new(key), Bytes::copy_from_slice(key.as_bytes()))
            .await
            .unwrap();
    }

    assert_eq!(
        store.get(&Key::new("/a/b/c")).await.unwrap(),
        &b"/a/b/c"[..]
    );
    assert!(store.has(&Key::new("/d")).await.unwrap());
    assert_eq!(
        store.get(&Key::new("/e~f#[g]")).await.unwrap(),
        &b"/e~f#[g]"[..]
    );
    assert!(!store.has(&Key::new("/missing")).await.unwrap());
    assert!(matches!(
        store.get(&Key::new("/missing")).await,
        Err(Error::NotFound)
    ));

    let entries = rest(store.query(Query::new("/a/")).await.unwrap())
        .await
        .unwrap();
    let listed: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(listed, vec!["/a/b", "/a/b/c", "/a/c"]);

    for key in keys {
        store.delete(&Key::new(key)).await.unwrap();
    }
    assert!(matches!(
        store.delete(&Key::new("/d")).await,
        Err(Error::NotFound)
    ));

    let entries = rest(store.query(Query::new("/").keys_only(true)).await.unwrap())
        .await
        .unwrap();
    assert!(entries.is_empty());
}
