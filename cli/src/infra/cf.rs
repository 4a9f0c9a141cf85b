//! Infrastructure implementation of the deployment backend ports.
//!
//! `CfCli<R>` drives the Cloud Foundry CLI through a `CommandRunner`. The
//! target API, org, space and credentials are whatever `cf target` currently
//! points at; gonut never logs in on its own.

use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::{
    AppLifecycle, AppProbe, BuildpackInspector, CommandRunner, PushTarget,
};
use crate::domain::Bundle;
use crate::infra::command_runner::{LONG_CMD_TIMEOUT, TokioCommandRunner};

const CF: &str = "cf";

/// Timeout of the HTTP reachability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

// ── v3 API payloads ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ApiErrors {
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    resources: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct BuildpackResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AppResource {
    guid: String,
}

#[derive(Debug, Deserialize)]
struct RouteResource {
    url: String,
}

/// Parse a `cf curl` body, surfacing API errors that come back with exit status 0.
fn parse_page<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<Vec<T>> {
    if let Ok(api) = serde_json::from_slice::<ApiErrors>(body)
        && let Some(first) = api.errors.first()
    {
        anyhow::bail!("{}: {}", first.title, first.detail);
    }
    let page: Page<T> = serde_json::from_slice(body).context("parsing Cloud Foundry API response")?;
    Ok(page.resources)
}

/// Names of the buildpacks in a `/v3/buildpacks` response.
pub fn parse_buildpack_names(body: &[u8]) -> Result<Vec<String>> {
    Ok(parse_page::<BuildpackResource>(body)?
        .into_iter()
        .map(|b| b.name)
        .collect())
}

/// GUID of the first app in a `/v3/apps` response.
pub fn parse_app_guid(body: &[u8]) -> Result<String> {
    parse_page::<AppResource>(body)?
        .into_iter()
        .next()
        .map(|a| a.guid)
        .context("application not found")
}

/// URL of the first route in a `/v3/apps/:guid/routes` response.
pub fn parse_route_url(body: &[u8]) -> Result<String> {
    parse_page::<RouteResource>(body)?
        .into_iter()
        .next()
        .map(|r| r.url)
        .context("application has no route")
}

/// Most useful line(s) of a failed `cf` invocation.
fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let tail: Vec<&str> = stdout.trim().lines().rev().take(5).collect();
    tail.into_iter().rev().collect::<Vec<_>>().join("\n")
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// Infrastructure adapter that routes all `cf` CLI calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct CfCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> CfCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run a quick `cf` call under the runner's default timeout.
    async fn cf(&self, args: &[&str]) -> Result<Output> {
        let output = self.runner.run(CF, args).await;
        checked(args, output)
    }

    /// Run a `cf` call that waits on the platform to build or start an app.
    async fn cf_long(&self, args: &[&str]) -> Result<Output> {
        let output = self.runner.run_with_timeout(CF, args, LONG_CMD_TIMEOUT).await;
        checked(args, output)
    }

    async fn curl(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.cf(&["curl", path]).await?.stdout)
    }
}

fn checked(args: &[&str], output: Result<Output>) -> Result<Output> {
    let command = args.first().copied().unwrap_or_default();
    let output = output.with_context(|| format!("cf {command}"))?;
    if !output.status.success() {
        anyhow::bail!("cf {command} failed: {}", failure_detail(&output));
    }
    Ok(output)
}

impl CfCli<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> BuildpackInspector for CfCli<R> {
    async fn has_buildpack(&self, buildpack: &str) -> Result<bool> {
        let body = self
            .curl(&format!("/v3/buildpacks?names={buildpack}"))
            .await
            .context("listing buildpacks")?;
        Ok(parse_buildpack_names(&body)?
            .iter()
            .any(|name| name == buildpack))
    }
}

impl<R: CommandRunner> AppLifecycle for CfCli<R> {
    async fn create_app(&self, target: &PushTarget<'_>) -> Result<()> {
        self.cf(&["create-app", target.name]).await.map(drop)
    }

    async fn upload(&self, target: &PushTarget<'_>, bundle: &Bundle) -> Result<()> {
        let dir = write_bundle(bundle.clone()).await?;
        let path = dir.path().to_string_lossy().into_owned();
        self.cf_long(&[
            "push",
            target.name,
            "-p",
            &path,
            "-b",
            target.buildpack,
            "--no-start",
            "--random-route",
        ])
        .await
        .map(drop)
    }

    async fn stage(&self, target: &PushTarget<'_>) -> Result<()> {
        self.cf_long(&["stage-package", target.name]).await.map(drop)
    }

    async fn await_started(&self, target: &PushTarget<'_>) -> Result<()> {
        self.cf_long(&["start", target.name]).await.map(drop)
    }

    async fn delete_app(&self, name: &str) -> Result<()> {
        self.cf(&["delete", name, "-f", "-r"]).await.map(drop)
    }
}

impl<R: CommandRunner> AppProbe for CfCli<R> {
    async fn probe(&self, name: &str) -> Result<()> {
        let guid = parse_app_guid(&self.curl(&format!("/v3/apps?names={name}")).await?)?;
        let url = parse_route_url(&self.curl(&format!("/v3/apps/{guid}/routes")).await?)?;
        http_get(format!("https://{url}")).await
    }
}

/// Materialise a bundle in a temporary directory that lives as long as the
/// returned guard.
async fn write_bundle(bundle: Bundle) -> Result<tempfile::TempDir> {
    tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().context("creating temp dir for app bits")?;
        for file in &bundle.files {
            let path = dir.path().join(&file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(&path, &file.contents)
                .with_context(|| format!("writing {}", path.display()))?;
            #[cfg(unix)]
            if file.executable {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                    .with_context(|| format!("cannot set permissions on {}", path.display()))?;
            }
        }
        Ok::<_, anyhow::Error>(dir)
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
}

async fn http_get(url: String) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        match ureq::get(&url)
            .set("User-Agent", "gonut")
            .timeout(PROBE_TIMEOUT)
            .call()
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => anyhow::bail!("GET {url} returned HTTP {code}"),
            Err(e) => Err(anyhow::Error::new(e).context(format!("GET {url}"))),
        }
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
}
