use reqwest::Client;
use std::time::Duration;
use tracing::trace;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Make a GET request to the target URL and return the response body as text.
///
/// Unlike a JSON fetch, a failed request is never retried: transport errors, timeouts and
/// non-success status codes are all returned to the caller.
///
/// ```no_run
/// use opref_common::utils::http::get_text_from_url;
///
/// let url = "https://example.com";
/// let timeout = 5;
/// // get_text_from_url(url, timeout).await;
/// ```
pub async fn get_text_from_url(url: &str, timeout: u64) -> Result<String, reqwest::Error> {
    trace!("GET {}", &url);

    let client = Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(Duration::from_secs(timeout))
        .build()?;

    let res = client.get(url).send().await.map_err(|e| {
        trace!("GET {}: {:?}", &url, &e);
        e
    })?;
    trace!("GET {}: {:?}", &url, &res);

    res.error_for_status()?.text().await
}
