//! Prometheus counters for the link service.
//!
//! Counters go to whatever global `metrics` recorder the binary installs.
//! Without one they are no-ops.

use metrics::{counter, describe_counter};

/// Metric names exported by the link service.
pub mod names {
    /// Ids tried against the repository while creating links.
    pub const CREATE_ATTEMPTS_TOTAL: &str = "shortlink_create_attempts_total";
    /// Create attempts rejected because the id was taken.
    pub const CREATE_COLLISIONS_TOTAL: &str = "shortlink_create_collisions_total";
    /// Links stored successfully.
    pub const LINKS_CREATED_TOTAL: &str = "shortlink_links_created_total";
    /// Creates that returned an error, labelled by `reason`.
    pub const CREATE_FAILURES_TOTAL: &str = "shortlink_create_failures_total";
    /// Links removed from the repository.
    pub const LINKS_DELETED_TOTAL: &str = "shortlink_links_deleted_total";
    /// Cache lookups, labelled by `result` (`hit` or `miss`).
    pub const CACHE_LOOKUPS_TOTAL: &str = "shortlink_cache_lookups_total";
    /// Failed or timed-out cache calls, labelled by `operation`.
    pub const CACHE_ERRORS_TOTAL: &str = "shortlink_cache_errors_total";
    /// Cache entries dropped because the link vanished during a read-through.
    pub const CACHE_STALE_EVICTIONS_TOTAL: &str = "shortlink_cache_stale_evictions_total";
}

/// Registers descriptions for every link service metric.
pub fn register_metrics() {
    describe_counter!(
        names::CREATE_ATTEMPTS_TOTAL,
        "Ids tried against the repository while creating links"
    );
    describe_counter!(
        names::CREATE_COLLISIONS_TOTAL,
        "Create attempts rejected because the id already existed"
    );
    describe_counter!(names::LINKS_CREATED_TOTAL, "Links stored successfully");
    describe_counter!(names::CREATE_FAILURES_TOTAL, "Link creates that failed");
    describe_counter!(names::LINKS_DELETED_TOTAL, "Links removed from the repository");
    describe_counter!(names::CACHE_LOOKUPS_TOTAL, "Cache lookups by result");
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Cache calls that failed or timed out"
    );
    describe_counter!(
        names::CACHE_STALE_EVICTIONS_TOTAL,
        "Read-through cache entries dropped after a concurrent delete"
    );
}

/// Recording helpers used by [`LinkService`](crate::LinkService).
pub struct LinkMetrics;

impl LinkMetrics {
    pub fn create_attempt() {
        counter!(names::CREATE_ATTEMPTS_TOTAL).increment(1);
    }

    pub fn create_collision() {
        counter!(names::CREATE_COLLISIONS_TOTAL).increment(1);
    }

    pub fn link_created() {
        counter!(names::LINKS_CREATED_TOTAL).increment(1);
    }

    pub fn create_failed(reason: &'static str) {
        counter!(names::CREATE_FAILURES_TOTAL, "reason" => reason).increment(1);
    }

    pub fn link_deleted() {
        counter!(names::LINKS_DELETED_TOTAL).increment(1);
    }

    pub fn cache_lookup(hit: bool) {
        let result = if hit { "hit" } else { "miss" };
        counter!(names::CACHE_LOOKUPS_TOTAL, "result" => result).increment(1);
    }

    pub fn cache_error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }

    pub fn cache_stale_eviction() {
        counter!(names::CACHE_STALE_EVICTIONS_TOTAL).increment(1);
    }
}
