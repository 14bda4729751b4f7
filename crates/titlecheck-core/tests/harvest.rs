//! Display-name harvesting over the fixture node tree

mod common;

use titlecheck_core::display_name::{self, DeclarationShape, SourceKind};
use titlecheck_core::{
    IssueKind, MemorySources, PathSources, Policy, Sources, Validator, WalkSources,
};

#[test]
fn test_walk_fixture_tree() {
    let harvest = WalkSources::new(common::fixture_nodes_dir())
        .harvest()
        .expect("Failed to harvest fixture nodes");

    let names: Vec<&str> = harvest.vocabulary.iter().collect();
    assert_eq!(
        names,
        ["Gmail Trigger", "HTTP Request", "Mattermost", "Oura", "SyncroMSP"]
    );

    // GenericFunctions.ts matches neither convention
    assert_eq!(harvest.files_scanned, 7);
    assert!(harvest.warnings.is_empty(), "{:?}", harvest.warnings);
}

#[test]
fn test_each_fixture_shape() {
    let dir = common::fixture_nodes_dir();
    let cases = [
        (
            "Oura/Oura.node.ts",
            SourceKind::NodeFile,
            Some((DeclarationShape::Description, "Oura")),
        ),
        (
            "Mattermost/Mattermost.node.ts",
            SourceKind::NodeFile,
            Some((DeclarationShape::VersionedBase, "Mattermost")),
        ),
        ("Mattermost/v1/MattermostV1.node.ts", SourceKind::NodeFile, None),
        (
            "Mattermost/v1/actions/versionDescription.ts",
            SourceKind::VersionDescription,
            Some((DeclarationShape::VersionDescription, "Mattermost")),
        ),
        (
            "HttpRequest/HttpRequest.node.ts",
            SourceKind::NodeFile,
            Some((DeclarationShape::VersionedBase, "HTTP Request")),
        ),
    ];

    for (relative, kind, expected) in cases {
        let recognized = display_name::extract_file(kind, &dir.join(relative))
            .unwrap_or_else(|e| panic!("Failed to extract {relative}: {e}"));
        let actual = recognized
            .as_ref()
            .map(|r| (r.shape, r.display_name.as_str()));
        assert_eq!(actual, expected, "{relative}");
    }
}

#[test]
fn test_path_sources_classify_by_file_name() {
    let dir = common::fixture_nodes_dir();
    let harvest = PathSources::new([
        dir.join("SyncroMSP/v1/actions/versionDescription.ts"),
        dir.join("Gmail/GenericFunctions.ts"),
    ])
    .harvest()
    .unwrap();

    let names: Vec<&str> = harvest.vocabulary.iter().collect();
    assert_eq!(names, ["SyncroMSP"]);
    assert_eq!(harvest.files_scanned, 2);
}

#[test]
fn test_validator_over_walked_tree() {
    let validator = Validator::new(
        Policy::default(),
        WalkSources::new(common::fixture_nodes_dir()),
    );

    assert!(validator.validate("fix(HTTP Request Node): keep headers").is_empty());

    let issues = validator.validate("fix(Syncro Node): keep headers");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::InvalidScope);
    assert_eq!(issues[0].suggestion.as_deref(), Some("SyncroMSP"));
}

#[test]
fn test_validator_with_missing_root_skips_node_scopes() {
    let temp = tempfile::tempdir().unwrap();
    let validator = Validator::new(Policy::default(), WalkSources::new(temp.path().join("gone")));

    assert!(validator.validate("fix(Anything Node): keep headers").is_empty());
    assert_eq!(
        validator.validate("fix(Anything Node, bogus): keep headers")[0].kind,
        IssueKind::InvalidScope
    );
}

#[test]
fn test_unparseable_file_does_not_abort_batch() {
    let harvest = MemorySources::new()
        .add("Broken/Broken.node.ts", "export class {{{ description = ")
        .add(
            "Oura/Oura.node.ts",
            "export class Oura { description = { displayName: 'Oura' }; }",
        )
        .harvest()
        .unwrap();

    let names: Vec<&str> = harvest.vocabulary.iter().collect();
    assert_eq!(names, ["Oura"]);
}
