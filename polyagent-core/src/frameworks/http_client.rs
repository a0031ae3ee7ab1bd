use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{Error, Result};

const DEFAULT_TIMEOUT_MS: u64 = 120_000;

pub fn normalize_timeout_ms(timeout_ms: u64) -> u64 {
    if timeout_ms == 0 {
        DEFAULT_TIMEOUT_MS
    } else {
        timeout_ms
    }
}

pub fn default_headers(api_key: Option<&str>, backend_label: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(key) = api_key {
        let mut value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|err| {
            Error::Config(format!("invalid {backend_label} api key: {err}"))
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

pub fn build_client(
    headers: HeaderMap,
    timeout_ms: u64,
    backend_label: &str,
) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(std::time::Duration::from_millis(normalize_timeout_ms(
            timeout_ms,
        )))
        .build()
        .map_err(|err| Error::Backend(format!("failed to build {backend_label} client: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_falls_back_to_default() {
        assert_eq!(normalize_timeout_ms(0), DEFAULT_TIMEOUT_MS);
        assert_eq!(normalize_timeout_ms(5_000), 5_000);
    }

    #[test]
    fn api_key_becomes_sensitive_bearer_header() {
        let headers = default_headers(Some("sk-test"), "llama_index").expect("headers");
        let auth = headers.get(AUTHORIZATION).expect("authorization header");
        assert!(auth.is_sensitive());

        let without_key = default_headers(None, "llama_index").expect("headers");
        assert!(without_key.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn control_characters_in_key_are_rejected() {
        let error = default_headers(Some("bad\nkey"), "llama_index").expect_err("should fail");
        assert!(error.to_string().contains("invalid llama_index api key"));
    }
}
