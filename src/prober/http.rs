use reqwest::{Client, StatusCode};
use tokio::time::{timeout, Duration, Instant};
use tracing::{info, error};

use crate::config::ProjectConfig;
use super::ProbeOutcome;

/// Probe one project with a single HTTP request.
///
/// Never fails the run: every path resolves to a ProbeOutcome. Expiry of
/// the timeout drops the in-flight request, which aborts the connection.
pub async fn probe_http(client: &Client, project: &ProjectConfig, timeout_ms: u64) -> ProbeOutcome {
    let url = match project.request_url() {
        Ok(url) => url,
        Err(e) => {
            error!("{} not probed: {:#}", project.name, e);
            return ProbeOutcome::failed(&project.name, None, format!("{:#}", e));
        }
    };

    if project.auth && project.apikey.is_none() {
        error!("{} not probed: no apikey configured", project.name);
        return ProbeOutcome::failed(&project.name, None, "Missing apikey");
    }

    info!("pinging {} ({})", project.name, url);

    let mut request = client.request(project.probe_method().into(), url);
    if let Some(apikey) = &project.apikey {
        request = request.header("apikey", apikey).bearer_auth(apikey);
    }

    let start = Instant::now();
    match timeout(Duration::from_millis(timeout_ms), request.send()).await {
        Err(_) => {
            error!("{} timed out after {}ms", project.name, timeout_ms);
            ProbeOutcome::failed(&project.name, None, "Timeout")
        }
        Ok(Err(e)) if e.is_timeout() => {
            error!("{} timed out after {}ms", project.name, timeout_ms);
            ProbeOutcome::failed(&project.name, None, "Timeout")
        }
        Ok(Err(e)) => {
            error!("{} failed: {}", project.name, e);
            ProbeOutcome::failed(&project.name, None, e.to_string())
        }
        Ok(Ok(response)) => {
            let status = response.status();
            if status.is_success() {
                info!("{} status {} ({:?})", project.name, status.as_u16(), start.elapsed());
                ProbeOutcome::ok(&project.name, status.as_u16())
            } else {
                let reason = describe_status(status);
                error!("{} failed: {}", project.name, reason);
                ProbeOutcome::failed(&project.name, Some(status.as_u16()), reason)
            }
        }
    }
}

fn describe_status(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prober::ProbeMethod;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn project(server: &MockServer) -> ProjectConfig {
        ProjectConfig {
            name: "db".to_string(),
            url: server.uri(),
            endpoint: None,
            apikey: None,
            auth: false,
            method: None,
        }
    }

    #[tokio::test]
    async fn healthy_project_yields_success() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = probe_http(&Client::new(), &project(&server), 10_000).await;

        assert!(outcome.success);
        assert_eq!(outcome.status, Some(200));
        assert_eq!(outcome.error, None);
    }

    #[tokio::test]
    async fn server_error_yields_failure_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let outcome = probe_http(&Client::new(), &project(&server), 10_000).await;

        assert!(!outcome.success);
        assert_eq!(outcome.status, Some(500));
        assert_eq!(outcome.error.as_deref(), Some("HTTP 500 Internal Server Error"));
    }

    #[tokio::test]
    async fn authenticated_probe_sends_credential_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/"))
            .and(header("apikey", "secret"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let target = ProjectConfig {
            apikey: Some("secret".to_string()),
            auth: true,
            ..project(&server)
        };
        let outcome = probe_http(&Client::new(), &target, 10_000).await;

        assert!(outcome.success);
        assert_eq!(outcome.status, Some(200));
    }

    #[tokio::test]
    async fn missing_apikey_skips_the_network() {
        let server = MockServer::start().await;
        let target = ProjectConfig {
            auth: true,
            ..project(&server)
        };

        let outcome = probe_http(&Client::new(), &target, 10_000).await;

        assert!(!outcome.success);
        assert_eq!(outcome.status, None);
        assert_eq!(outcome.error.as_deref(), Some("Missing apikey"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let outcome = probe_http(&Client::new(), &project(&server), 100).await;

        assert!(!outcome.success);
        assert_eq!(outcome.status, None);
        assert_eq!(outcome.error.as_deref(), Some("Timeout"));
    }

    #[tokio::test]
    async fn connection_error_is_captured() {
        let server = MockServer::start().await;
        let target = project(&server);
        drop(server);

        let outcome = probe_http(&Client::new(), &target, 10_000).await;

        assert!(!outcome.success);
        assert_eq!(outcome.status, None);
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn method_override_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let target = ProjectConfig {
            method: Some(ProbeMethod::Get),
            ..project(&server)
        };
        let outcome = probe_http(&Client::new(), &target, 10_000).await;

        assert!(outcome.success);
    }

    #[tokio::test]
    async fn invalid_url_is_a_failed_outcome() {
        let target = ProjectConfig {
            name: "broken".to_string(),
            url: "not a url".to_string(),
            endpoint: None,
            apikey: None,
            auth: false,
            method: None,
        };

        let outcome = probe_http(&Client::new(), &target, 10_000).await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("Invalid url"));
    }
}
