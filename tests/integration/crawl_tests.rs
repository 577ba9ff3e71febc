//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, including files written to disk.

use api_mirror::config::{
    parse_config_str, Config, ConfigFormat, CrawlerConfig, EndpointConfig, OutputConfig,
    PathSpecConfig, UrlParts,
};
use api_mirror::crawler::run_crawl;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `base` into `output_dir`
fn create_test_config(base: &str, output_dir: &TempDir, urls: Vec<EndpointConfig>) -> Config {
    Config {
        base: base.to_string(),
        urls,
        crawler: CrawlerConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
            max_rounds: 50,
            ..CrawlerConfig::default()
        },
        output: OutputConfig {
            directory: output_dir.path().display().to_string(),
            extension: ".json".to_string(),
        },
    }
}

fn parts(segments: &[&str]) -> UrlParts {
    UrlParts::Parts(segments.iter().map(|s| s.to_string()).collect())
}

fn provides(pairs: &[(&str, &str)]) -> std::collections::BTreeMap<String, PathSpecConfig> {
    pairs
        .iter()
        .map(|(name, path)| (name.to_string(), PathSpecConfig::Dotted(path.to_string())))
        .collect()
}

async fn mount_json(server: &MockServer, route: &str, body: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/json"),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_applications_jobs_scenario() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/v1/", mock_server.uri());

    mount_json(
        &mock_server,
        "/api/v1/applications",
        r#"[{"id":"app1"},{"id":"app2"}]"#,
        1,
    )
    .await;
    mount_json(&mock_server, "/api/v1/applications/app1/jobs", r#"[{"jobId":0}]"#, 1).await;
    mount_json(&mock_server, "/api/v1/applications/app2/jobs", r#"[]"#, 1).await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(
        &base,
        &output,
        vec![
            EndpointConfig {
                url: UrlParts::Single("applications".into()),
                provides: provides(&[("app-id", "id")]),
            },
            EndpointConfig {
                url: parts(&["applications/", "{app-id}", "/jobs"]),
                provides: provides(&[("job-id", "jobId")]),
            },
        ],
    );

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.stats.fetched, 3);
    assert_eq!(report.stats.total_failures(), 0);
    assert_eq!(report.issued.count_for(1), 2);

    // Saved files mirror the URL layout below the base
    let apps = std::fs::read_to_string(output.path().join("applications.json")).unwrap();
    assert_eq!(apps, r#"[{"id":"app1"},{"id":"app2"}]"#);
    assert!(output.path().join("applications/app1/jobs.json").exists());
    assert!(output.path().join("applications/app2/jobs.json").exists());

    let job_ids: Vec<_> = report.params.values("job-id").unwrap().iter().collect();
    assert_eq!(job_ids, vec!["0"]);

    // Mock expectations (each URL exactly once) are verified on drop
}

#[tokio::test]
async fn test_failures_do_not_stop_the_crawl() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/", mock_server.uri());

    mount_json(
        &mock_server,
        "/applications",
        r#"[{"id":"good"},{"id":"broken"},{"id":"gone"}]"#,
        1,
    )
    .await;
    mount_json(&mock_server, "/applications/good/stages", r#"[{"stageId":1}]"#, 1).await;
    mount_json(&mock_server, "/applications/broken/stages", "not json at all", 1).await;
    Mock::given(method("GET"))
        .and(path("/applications/gone/stages"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_json(&mock_server, "/stages/1", "{}", 1).await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(
        &base,
        &output,
        vec![
            EndpointConfig {
                url: UrlParts::Single("applications".into()),
                provides: provides(&[("app-id", "id")]),
            },
            EndpointConfig {
                url: parts(&["applications/", "{app-id}", "/stages"]),
                provides: provides(&[("stage-id", "stageId")]),
            },
            EndpointConfig {
                url: parts(&["stages/", "{stage-id}"]),
                provides: Default::default(),
            },
        ],
    );

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.stats.fetch_failures, 1);
    assert_eq!(report.stats.extraction_failures, 1);
    assert_eq!(report.stats.fetched, 4);

    // The malformed body was still saved; the failed fetch was not
    assert!(output.path().join("applications/broken/stages.json").exists());
    assert!(!output.path().join("applications/gone/stages.json").exists());
    assert!(output.path().join("stages/1.json").exists());
}

#[tokio::test]
async fn test_crawl_from_json_config_document() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_json(&mock_server, "/users", r#"{"data":[{"login":"ada"},{"login":"bob"}]}"#, 1).await;
    mount_json(&mock_server, "/users/ada/repos", r#"{"data":[]}"#, 1).await;
    mount_json(&mock_server, "/users/bob/repos", r#"{"data":[]}"#, 1).await;

    let document = serde_json::json!({
        "base": format!("{}/", mock_server.uri()),
        "urls": [
            {"url": "users", "provides": {"user": ["data", "login"]}},
            {"url": ["users/", "{user}", "/repos"]}
        ],
        "output": {"directory": output.path().display().to_string()}
    });
    let config = parse_config_str(&document.to_string(), ConfigFormat::Json).unwrap();

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.stats.fetched, 3);
    assert_eq!(report.params.values("user").unwrap().len(), 2);
    assert!(output.path().join("users/bob/repos.json").exists());
}
