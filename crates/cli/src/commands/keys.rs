//! API key lookup commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored record for a raw key a customer sent in
//! devrewoh-cli keys show --key ic_0123...
//! ```
//!
//! Only the hash is stored, so lookup hashes the raw key and matches on
//! that. The raw key itself is never printed back.

use devrewoh_core::API_KEY_TAG;
use devrewoh_site::db::{ApiKeyRecord, ApiKeyRepository};

use super::{CommandError, connect};

/// Look up an issued key by its raw secret and print its record.
pub async fn show(raw_key: &str) -> Result<(), CommandError> {
    let raw_key = raw_key.trim();
    if !raw_key.starts_with(API_KEY_TAG) {
        return Err(CommandError::InvalidKey(API_KEY_TAG));
    }

    let pool = connect().await?;
    let record = ApiKeyRepository::new(&pool).find_by_secret(raw_key).await?;
    pool.close().await;

    match record {
        Some(record) => print_record(&record),
        None => tracing::warn!("No API key matches the given secret"),
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_record(record: &ApiKeyRecord) {
    println!("{}", describe(record));
}

fn describe(record: &ApiKeyRecord) -> String {
    format!(
        "id:       {}\nprefix:   {}\nemail:    {}\ntier:     {}\ncredits:  {}\ncreated:  {}",
        record.id,
        record.key_prefix,
        record.user_email,
        record.tier_label,
        record.credits,
        record.created_at.to_rfc3339(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_describe_omits_hash() {
        let record = ApiKeyRecord {
            id: 7,
            key_hash: "f".repeat(64),
            key_prefix: "ic_1a2b3c4".to_string(),
            user_email: "buyer@example.com".to_string(),
            tier_label: "Growth".to_string(),
            credits: 10_000,
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };

        let text = describe(&record);
        assert!(text.contains("ic_1a2b3c4"));
        assert!(text.contains("Growth"));
        assert!(text.contains("10000"));
        assert!(text.contains("2026-01-02T03:04:05+00:00"));
        assert!(!text.contains(&record.key_hash));
    }

    #[tokio::test]
    async fn test_show_rejects_non_key_before_connecting() {
        let result = show("sk_live_not_ours").await;
        assert!(matches!(result, Err(CommandError::InvalidKey("ic_"))));
    }
}
