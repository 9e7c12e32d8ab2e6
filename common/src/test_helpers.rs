/// Shared test helpers for cross-crate use.
///
/// Fixture data in the shop tests has to survive parallel execution, so
/// anything with a uniqueness constraint (customer emails in particular)
/// is generated from a timestamp plus an atomic counter.
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Global counter for truly unique test identifiers across parallel tests
static GLOBAL_TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a globally unique identifier with the given prefix, in the
/// format `{prefix}-{timestamp}-{counter}`.
pub fn generate_unique_id(prefix: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();
    let counter = GLOBAL_TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}-{}", prefix, timestamp, counter)
}

/// Generate a unique email address for customer fixtures.
pub fn generate_unique_email(prefix: &str) -> String {
    format!("{}@example.com", generate_unique_id(prefix))
}

/// Database URL used by the integration test suites.
///
/// Defaults to an in-memory SQLite database; override with DATABASE_URL to
/// run the same suites against a real server.
pub fn get_test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_do_not_collide() {
        let a = generate_unique_id("T");
        let b = generate_unique_id("T");
        assert_ne!(a, b);
    }

    #[test]
    fn unique_email_has_prefix_and_domain() {
        let email = generate_unique_email("cust");
        assert!(email.starts_with("cust-"));
        assert!(email.ends_with("@example.com"));
    }
}
