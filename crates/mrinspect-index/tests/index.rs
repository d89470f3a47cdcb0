use mrinspect_index::{IssueKind, Manifest, ValidationError};
use rstest::{fixture, rstest};

/// Trimmed down from a real `.mrpack` export, including the bits the
/// validator doesn't know about.
#[fixture]
fn exported() -> &'static str {
    r#"{
        "game": "minecraft",
        "formatVersion": 1,
        "versionId": "1.2.0",
        "name": "Fabulously Lean",
        "summary": null,
        "files": [
            {
                "path": "mods/sodium-fabric-0.5.8+mc1.20.4.jar",
                "hashes": {
                    "sha1": "4c8f3a4ff7e3c5d5a8b7c1b5b0e5f7a2b8c9d0e1",
                    "sha512": "0b9b8e1f3c1d2e4f"
                },
                "env": { "client": "required", "server": "unsupported" },
                "downloads": [
                    "https://cdn.modrinth.com/data/AANobbMI/versions/4GyXKCLd/sodium-fabric-0.5.8%2Bmc1.20.4.jar",
                    "https://github.com/CaffeineMC/sodium-fabric/releases/download/mc1.20.4-0.5.8/sodium-fabric-0.5.8+mc1.20.4.jar"
                ],
                "fileSize": 1015870
            },
            {
                "path": "config/yosbr/options.txt",
                "hashes": { "sha1": "da39a3ee5e6b4b0d3255bfef95601890afd80709" },
                "env": { "client": "optional", "server": "unsupported" },
                "downloads": [],
                "fileSize": 0,
                "x-comment": "made up by a tool we don't know"
            }
        ],
        "dependencies": {
            "minecraft": "1.20.4",
            "fabric-loader": "0.15.11"
        },
        "x-exporter": { "name": "someone", "version": 3 }
    }"#
}

#[rstest]
fn real_export(exported: &str) -> Result<(), ValidationError> {
    let manifest: Manifest = exported.parse()?;
    assert_eq!(manifest.name, "Fabulously Lean");
    assert_eq!(manifest.summary, None);
    assert_eq!(manifest.files.len(), 2);
    assert_eq!(manifest.files[0].downloads.len(), 2);
    assert_eq!(manifest.files[1].canonical_download(), None);
    assert_eq!(manifest.dependencies.len(), 2);
    Ok(())
}

#[rstest]
fn every_broken_file_is_reported(exported: &str) {
    let broken = exported
        .replace("\"fileSize\": 1015870", "\"fileSize\": 1015870.5")
        .replace("\"fileSize\": 0,", "\"fileSize\": \"0\",");
    let error = broken.parse::<Manifest>().unwrap_err();
    let issues = error.issues();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].location, "files[0].fileSize");
    assert_eq!(issues[1].location, "files[1].fileSize");
    assert!(issues.iter().all(|issue| matches!(issue.kind, IssueKind::WrongType { .. })));
}

#[rstest]
#[case::empty("")]
#[case::truncated(r#"{"formatVersion": 1, "game": "#)]
#[case::trailing_garbage(r#"{} {}"#)]
fn not_json(#[case] raw: &str) {
    assert!(matches!(
        Manifest::validate(raw),
        Err(ValidationError::Syntax(_))
    ));
}
