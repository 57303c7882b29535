//! Upstream test utilities

use mockito::{Mock, ServerGuard};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use hangar_versions::config::{ResolverConfig, VelocityCandidates};

pub const MANIFEST_PATH: &str = "/mc/game/version_manifest_v2.json";

/// Resolver config pointing both upstreams at a mock server
pub fn test_config(
    server: &ServerGuard,
    velocity_candidates: VelocityCandidates,
) -> ResolverConfig {
    ResolverConfig {
        manifest_url: format!("{}{}", server.url(), MANIFEST_PATH),
        fill_base_url: server.url(),
        fetch_timeout_ms: 5_000,
        velocity_candidates,
    }
}

/// Mock the version manifest with `(id, type, releaseTime)` entries
pub async fn mock_manifest(server: &mut ServerGuard, entries: &[(&str, &str, &str)]) -> Mock {
    let versions: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, kind, release_time)| {
            serde_json::json!({
                "id": id,
                "type": kind,
                "url": format!("https://piston-meta.mojang.com/v1/packages/{id}.json"),
                "time": release_time,
                "releaseTime": release_time,
            })
        })
        .collect();

    server
        .mock("GET", MANIFEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "latest": {"release": entries.first().map(|e| e.0), "snapshot": null},
                "versions": versions,
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await
}

/// Mock a Fill project with `(major label, versions)` groups
pub async fn mock_fill_project(
    server: &mut ServerGuard,
    project: &str,
    groups: &[(&str, Vec<&str>)],
) -> Mock {
    let versions: serde_json::Map<String, serde_json::Value> = groups
        .iter()
        .map(|(label, versions)| (label.to_string(), serde_json::json!(versions)))
        .collect();

    server
        .mock("GET", format!("/v3/projects/{project}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "project": {"id": project, "name": project},
                "versions": versions,
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await
}

/// Start an upstream that accepts connections and never answers.
/// Returns its base URL and the task holding the connections open.
pub async fn hung_upstream() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            open.push(stream);
        }
    });

    (url, handle)
}
