use crate::error::{LinkError, Result};
use url::Url;

/// Longest URL accepted for shortening, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

const SCHEME_HOST_REQUIRED: &str = "a valid URL with http or https scheme is required";

/// Checks that `raw` is an absolute `http`/`https` URL with a host and at
/// most [`MAX_URL_LENGTH`] characters.
pub fn validate_url(raw: &str) -> Result<()> {
    if raw.chars().count() > MAX_URL_LENGTH {
        return Err(LinkError::invalid(format!(
            "URL cannot exceed {MAX_URL_LENGTH} characters"
        )));
    }

    // The parser silently trims surrounding whitespace; the stored URL would not be.
    if raw.is_empty() || raw.trim() != raw {
        return Err(LinkError::invalid(SCHEME_HOST_REQUIRED));
    }

    let parsed = Url::parse(raw).map_err(|_| LinkError::invalid(SCHEME_HOST_REQUIRED))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LinkError::invalid(SCHEME_HOST_REQUIRED));
    }

    // `https:example.com` parses leniently; require the authority form.
    let has_authority = raw
        .get(parsed.scheme().len()..)
        .is_some_and(|rest| rest.starts_with("://"));
    if !has_authority || parsed.host_str().map_or(true, str::is_empty) {
        return Err(LinkError::invalid(SCHEME_HOST_REQUIRED));
    }

    Ok(())
}
