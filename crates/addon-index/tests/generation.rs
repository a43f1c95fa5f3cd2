//! Integration tests for repository index generation
//!
//! These tests lay out a repository with channels and addons in a temporary
//! directory, run the generator, and inspect the files it writes.

use addon_core::RepoConfig;
use addon_index::checksum::md5_hex;
use addon_index::{
    CHANNEL_MANIFEST_FILE, CHECKSUM_FILE, ChannelStatus, IndexError, MANIFEST_HEADER,
    RepoGenerator, RootPageStatus,
};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

const ROOT_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>Repo</title></head>\n\
                         <body>\n<h1>Addon Repository</h1>\n</body>\n</html>\n";

/// Helper to write an addon directory with a manifest and an archive
fn write_addon(channel_dir: &Path, id: &str, version: &str) {
    let dir = channel_dir.join(id);
    fs::create_dir_all(&dir).expect("create addon dir");
    fs::write(
        dir.join("addon.xml"),
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n\
             <addon id=\"{id}\" name=\"{id}\" version=\"{version}\" provider-name=\"tests\">\r\n\
             \x20   <extension point=\"xbmc.addon.metadata\">\r\n\
             \x20       <summary lang=\"en_GB\">Test addon</summary>\r\n\
             \x20   </extension>\r\n\
             </addon>\r\n"
        ),
    )
    .expect("write addon.xml");
    fs::write(dir.join(format!("{id}-{version}.zip")), b"PK\x05\x06").expect("write zip");
}

/// Helper to build a repository with two channels and a root page
fn create_repo() -> TempDir {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();

    write_addon(&root.join("stable"), "plugin.video.demo", "1.2.0");
    write_addon(&root.join("stable"), "repository.demo", "1.0.0");
    write_addon(&root.join("beta"), "plugin.video.demo", "1.3.0~beta1");
    fs::create_dir_all(root.join("zips")).expect("create zips");
    fs::create_dir_all(root.join("testing")).expect("create testing");
    fs::write(root.join("index.html"), ROOT_PAGE).expect("write root page");
    temp
}

/// Reads every generated output file under `root`
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| (e.path().to_path_buf(), fs::read(e.path()).expect("read file")))
        .collect()
}

/// Extracts `(href, text)` pairs from a hidden-link block
fn hidden_anchors(page: &str) -> Vec<(String, String)> {
    let block = Regex::new(r#"(?s)<div id="hidden-links" style="display:none">\n(.*?)</div>"#)
        .expect("valid regex");
    let anchor = Regex::new(r#"<a href="([^"]*)">([^<]*)</a>"#).expect("valid regex");

    let inner = block
        .captures(page)
        .and_then(|c| c.get(1))
        .expect("hidden block present")
        .as_str();
    anchor
        .captures_iter(inner)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

#[test]
fn test_discovers_channels_and_writes_outputs() {
    let repo = create_repo();
    let generator = RepoGenerator::new(repo.path(), RepoConfig::default());

    let report = generator.generate(&[]).expect("generation succeeds");

    let channels: Vec<_> = report.channels.iter().map(|c| c.channel.as_str()).collect();
    assert_eq!(channels, ["beta", "stable"]);
    assert!(report.channels.iter().all(|c| c.status == ChannelStatus::Published));
    assert_eq!(report.root_page, RootPageStatus::Updated);

    // "testing" is not in the discovery set
    assert!(!repo.path().join("testing").join(CHANNEL_MANIFEST_FILE).exists());
}

#[test]
fn test_channel_manifest_format() {
    let repo = create_repo();
    RepoGenerator::new(repo.path(), RepoConfig::default())
        .generate(&["stable".to_string()])
        .expect("generation succeeds");

    let manifest =
        fs::read_to_string(repo.path().join("stable").join(CHANNEL_MANIFEST_FILE)).expect("read");

    assert!(manifest.starts_with(MANIFEST_HEADER));
    assert!(manifest.ends_with("</addon>\n\n</addons>\n"));
    assert_eq!(manifest.matches("<?xml").count(), 1);
    assert!(!manifest.contains('\r'));
    assert!(manifest.contains("    <extension point=\"xbmc.addon.metadata\">\n"));

    let video = manifest.find("id=\"plugin.video.demo\"").expect("video addon");
    let repository = manifest.find("id=\"repository.demo\"").expect("repository addon");
    assert!(video < repository);
}

#[test]
fn test_checksum_matches_manifest_bytes() {
    let repo = create_repo();
    let report = RepoGenerator::new(repo.path(), RepoConfig::default())
        .generate(&[])
        .expect("generation succeeds");

    for channel in &report.channels {
        let dir = repo.path().join(channel.channel.as_str());
        let bytes = fs::read(dir.join(CHANNEL_MANIFEST_FILE)).expect("read manifest");
        let checksum = fs::read_to_string(dir.join(CHECKSUM_FILE)).expect("read checksum");

        assert_eq!(checksum, md5_hex(&bytes));
        assert_eq!(checksum.len(), 32);
        assert_eq!(channel.checksum.as_deref(), Some(checksum.as_str()));
    }
}

#[test]
fn test_second_run_is_byte_identical() {
    let repo = create_repo();
    let generator = RepoGenerator::new(repo.path(), RepoConfig::default());

    generator.generate(&[]).expect("first run");
    let first = snapshot(repo.path());
    let report = generator.generate(&[]).expect("second run");
    let second = snapshot(repo.path());

    assert_eq!(first, second);
    assert_eq!(report.root_page, RootPageStatus::Unchanged);
}

#[test]
fn test_listing_anchors_match_targets() {
    let repo = create_repo();
    RepoGenerator::new(repo.path(), RepoConfig::default())
        .generate(&["stable".to_string()])
        .expect("generation succeeds");

    let channel_page =
        fs::read_to_string(repo.path().join("stable/index.html")).expect("channel listing");
    let anchors = hidden_anchors(&channel_page);
    let hrefs: Vec<_> = anchors.iter().map(|(href, _)| href.as_str()).collect();
    assert_eq!(
        hrefs,
        [
            "addons.xml",
            "addons.xml.md5",
            "plugin.video.demo/",
            "repository.demo/"
        ]
    );
    assert!(anchors.iter().all(|(href, text)| href == text));

    let addon_page = fs::read_to_string(repo.path().join("stable/plugin.video.demo/index.html"))
        .expect("addon listing");
    let anchors = hidden_anchors(&addon_page);
    assert_eq!(
        anchors,
        [
            ("addon.xml".to_string(), "addon.xml".to_string()),
            (
                "plugin.video.demo-1.2.0.zip".to_string(),
                "plugin.video.demo-1.2.0.zip".to_string()
            ),
        ]
    );
}

#[test]
fn test_root_page_links_published_channels_and_aggregate() {
    let repo = create_repo();
    RepoGenerator::new(repo.path(), RepoConfig::default())
        .generate(&[])
        .expect("generation succeeds");

    let page = fs::read_to_string(repo.path().join("index.html")).expect("root page");
    let hrefs: Vec<_> = hidden_anchors(&page).into_iter().map(|(h, _)| h).collect();
    assert_eq!(hrefs, ["beta/", "stable/", "zips/"]);
    assert!(page.contains("<body>\n<!-- hidden-links -->\n"));
    assert!(page.contains("<!-- /hidden-links -->\n<h1>Addon Repository</h1>"));
}

#[test]
fn test_root_page_is_never_created() {
    let repo = create_repo();
    fs::remove_file(repo.path().join("index.html")).expect("remove root page");

    let report = RepoGenerator::new(repo.path(), RepoConfig::default())
        .generate(&[])
        .expect("generation succeeds");

    assert_eq!(report.root_page, RootPageStatus::Missing);
    assert!(!repo.path().join("index.html").exists());
}

#[test]
fn test_bad_manifest_is_skipped() {
    let repo = create_repo();
    let broken = repo.path().join("stable/plugin.broken");
    fs::create_dir_all(&broken).expect("create dir");
    fs::write(broken.join("addon.xml"), "<addon id=\"plugin.broken\"><unclosed>").expect("write");

    let report = RepoGenerator::new(repo.path(), RepoConfig::default())
        .generate(&["stable".to_string()])
        .expect("generation succeeds");

    let stable = &report.channels[0];
    assert_eq!(stable.addons.len(), 2);
    assert_eq!(stable.skipped.len(), 1);
    assert_eq!(stable.skipped[0].dir, "plugin.broken");

    let manifest =
        fs::read_to_string(repo.path().join("stable").join(CHANNEL_MANIFEST_FILE)).expect("read");
    assert!(!manifest.contains("plugin.broken"));
}

#[test]
fn test_empty_channel_keeps_previous_outputs() {
    let repo = create_repo();
    let empty = repo.path().join("alpha");
    fs::create_dir_all(empty.join("plugin.no-manifest")).expect("create dir");
    fs::write(empty.join(CHANNEL_MANIFEST_FILE), "old manifest").expect("write");
    fs::write(empty.join(CHECKSUM_FILE), "old checksum").expect("write");

    let report = RepoGenerator::new(repo.path(), RepoConfig::default())
        .generate(&[])
        .expect("generation succeeds");

    let alpha = report
        .channels
        .iter()
        .find(|c| c.channel.as_str() == "alpha")
        .expect("alpha processed");
    assert_eq!(alpha.status, ChannelStatus::Empty);
    assert_eq!(
        fs::read_to_string(empty.join(CHANNEL_MANIFEST_FILE)).expect("read"),
        "old manifest"
    );
    assert_eq!(
        fs::read_to_string(empty.join(CHECKSUM_FILE)).expect("read"),
        "old checksum"
    );

    let page = fs::read_to_string(repo.path().join("index.html")).expect("root page");
    let hrefs: Vec<_> = hidden_anchors(&page).into_iter().map(|(h, _)| h).collect();
    assert_eq!(hrefs, ["alpha/", "beta/", "stable/", "zips/"]);
}

#[test]
fn test_root_link_survives_channel_without_valid_addons() {
    let repo = create_repo();
    let generator = RepoGenerator::new(repo.path(), RepoConfig::default());
    generator
        .generate(&["beta".to_string()])
        .expect("first run");

    fs::write(
        repo.path().join("beta/plugin.video.demo/addon.xml"),
        "<addon id=\"plugin.video.demo\"",
    )
    .expect("corrupt manifest");
    let report = generator
        .generate(&["beta".to_string()])
        .expect("second run");

    assert_eq!(report.channels[0].status, ChannelStatus::Empty);
    assert!(repo.path().join("beta").join(CHANNEL_MANIFEST_FILE).is_file());
    let page = fs::read_to_string(repo.path().join("index.html")).expect("root page");
    let hrefs: Vec<_> = hidden_anchors(&page).into_iter().map(|(h, _)| h).collect();
    assert_eq!(hrefs, ["beta/", "zips/"]);
    assert_eq!(report.root_page, RootPageStatus::Unchanged);
}

#[test]
fn test_missing_explicit_channel_is_skipped() {
    let repo = create_repo();
    let report = RepoGenerator::new(repo.path(), RepoConfig::default())
        .generate(&["piers".to_string(), "stable".to_string()])
        .expect("generation succeeds");

    assert_eq!(report.channels[0].status, ChannelStatus::Missing);
    assert_eq!(report.channels[1].status, ChannelStatus::Published);
    assert!(!repo.path().join("piers").exists());
}

#[test]
fn test_no_channels_is_an_error() {
    let temp = TempDir::new().expect("temp dir");
    fs::create_dir(temp.path().join("zips")).expect("create zips");

    let err = RepoGenerator::new(temp.path(), RepoConfig::default())
        .generate(&[])
        .expect_err("nothing to do");

    assert!(matches!(err, IndexError::NoChannels { .. }));
    assert!(err.to_string().contains("alpha, beta, piers, stable"));
}

#[test]
fn test_configured_discovery_set() {
    let repo = create_repo();
    let mut config = RepoConfig::default();
    config.channels.discover = vec!["testing".to_string(), "stable".to_string()];
    write_addon(&repo.path().join("testing"), "script.module.demo", "0.1.0");

    let report = RepoGenerator::new(repo.path(), config)
        .generate(&[])
        .expect("generation succeeds");

    let channels: Vec<_> = report.channels.iter().map(|c| c.channel.as_str()).collect();
    assert_eq!(channels, ["stable", "testing"]);
}
