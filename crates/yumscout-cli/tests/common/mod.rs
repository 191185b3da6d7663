#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

pub const REPOMD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<repomd xmlns="http://linux.duke.edu/metadata/repo">
  <data type="primary"><location href="repodata/primary.xml.gz"/></data>
</repomd>"#;

/// Create a configured `yumscout` command suitable for integration tests.
#[allow(dead_code)]
pub fn yumscout_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("yumscout"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("YUMSCOUT_CONFIG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Gzip-compressed primary metadata listing `hrefs`.
#[allow(dead_code)]
pub fn primary_gz(hrefs: &[String]) -> Vec<u8> {
    let packages: String = hrefs
        .iter()
        .map(|href| format!(r#"<package type="rpm"><location href="{href}"/></package>"#))
        .collect();
    let xml = format!(
        r#"<metadata xmlns="http://linux.duke.edu/metadata/common" packages="{}">{packages}</metadata>"#,
        hrefs.len()
    );
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(xml.as_bytes()).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

/// `host:port` of a mock server as it appears in the report.
#[allow(dead_code)]
pub fn domain_of(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

/// Serves a repository under `/repo` with the given package hrefs and a
/// 200 for every package probe.
#[allow(dead_code)]
pub async fn mount_repo(server: &MockServer, hrefs: &[String]) {
    Mock::given(method("GET"))
        .and(path("/repo/repodata/repomd.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REPOMD))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repo/repodata/primary.xml.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(primary_gz(hrefs)))
        .mount(server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}
