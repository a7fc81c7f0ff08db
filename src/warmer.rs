//! Cache Warmer
//!
//! Fills a running cache server with random records so it can be load
//! tested. Every accepted record is printed as a `GET <url>` line, ready to
//! be fed to an HTTP load tool as its target list.

use std::sync::Arc;

use rand::Rng;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode, Url};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::WarmerError;

/// Longest generated key, in bytes
pub const MAX_KEY_LEN: usize = 32;

/// Longest generated value, in bytes
pub const MAX_VALUE_LEN: usize = 1024;

/// Returns 1 to `max_len` random letters in `A..=Y`.
pub fn random_letters<R: Rng>(rng: &mut R, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(1..=max_len.max(1));
    (0..len).map(|_| rng.gen_range(b'A'..b'Z')).collect()
}

/// Stores `records` random values on the server at `base`, keeping at most
/// `concurrency` requests in flight.
///
/// Stops at the first failed request and returns its error; requests still
/// in flight are cancelled. Returns the number of accepted records.
pub async fn seed(
    client: &Client,
    base: &Url,
    records: usize,
    concurrency: usize,
) -> Result<usize, WarmerError> {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();
    let mut accepted = 0;

    info!(
        "Seeding {} records into {} with concurrency {}",
        records, base, concurrency
    );

    for _ in 0..records {
        while let Some(joined) = tasks.try_join_next() {
            joined??;
            accepted += 1;
        }

        let (key, value) = {
            let mut rng = rand::thread_rng();
            (
                random_letters(&mut rng, MAX_KEY_LEN),
                random_letters(&mut rng, MAX_VALUE_LEN),
            )
        };

        let mut url = base.clone();
        url.set_path(&String::from_utf8_lossy(&key));

        // The semaphore is never closed, so acquiring cannot fail.
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };
        let client = client.clone();

        tasks.spawn(async move {
            let result = push(&client, url, value).await;
            drop(permit);
            result
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined??;
        accepted += 1;
    }

    info!("Seeded {} records", accepted);
    Ok(accepted)
}

/// POSTs one record and prints its target line once the server accepts it.
async fn push(client: &Client, url: Url, value: Vec<u8>) -> Result<(), WarmerError> {
    let response = client
        .post(url.clone())
        .header(CONTENT_TYPE, "text/plain")
        .body(value)
        .send()
        .await?;

    if response.status() != StatusCode::ACCEPTED {
        return Err(WarmerError::UnexpectedStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    debug!("Stored {}", url);
    println!("GET {}", url);
    Ok(())
}
