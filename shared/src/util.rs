/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: per-process sequence from a random start (4096 ids per ms)
///
/// The primary key constraint on every table is the final uniqueness guard.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    use std::sync::OnceLock;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    static SEED: OnceLock<i64> = OnceLock::new();
    static SEQUENCE: AtomicI64 = AtomicI64::new(0);

    let seed = *SEED.get_or_init(|| rand::thread_rng().gen_range(0..0x1000));
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let seq = (seed + SEQUENCE.fetch_add(1, Ordering::Relaxed)) & 0xFFF; // 12 bits
    (ts << 12) | seq
}

/// Human-readable order number: `ORD-YYYYMMDD-<id>`.
///
/// Unique because `id` is the order's primary key.
pub fn order_number(id: i64, created_at_millis: i64) -> String {
    let date = chrono::DateTime::from_timestamp_millis(created_at_millis)
        .unwrap_or_default()
        .format("%Y%m%d");
    format!("ORD-{date}-{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_id_is_positive_and_js_safe() {
        for _ in 0..100 {
            let id = snowflake_id();
            assert!(id > 0);
            assert!(id < (1_i64 << 53));
        }
    }

    #[test]
    fn test_snowflake_ids_unique_within_burst() {
        let ids: std::collections::HashSet<i64> = (0..1000).map(|_| snowflake_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_snowflake_id_roughly_time_ordered() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = snowflake_id();
        assert!(b > a);
    }

    #[test]
    fn test_order_number_format() {
        // 2024-03-05 12:00:00 UTC
        let ts = 1_709_640_000_000;
        assert_eq!(order_number(42, ts), "ORD-20240305-42");
    }
}
