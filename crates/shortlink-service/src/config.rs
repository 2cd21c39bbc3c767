use std::time::Duration;
use typed_builder::TypedBuilder;

/// Number of ids tried before giving up on a create.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Tuning knobs for [`LinkService`](crate::LinkService).
#[derive(Debug, Clone, TypedBuilder)]
pub struct ServiceConfig {
    /// How many freshly generated ids a create may try. Values below 1 are
    /// treated as 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
    /// Upper bound for each repository or cache call. `None` waits as long
    /// as the backend does.
    #[builder(default, setter(strip_option))]
    pub operation_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
