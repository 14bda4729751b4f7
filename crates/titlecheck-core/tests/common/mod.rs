//! Common test utilities.

#![allow(dead_code)]

use std::path::PathBuf;
use titlecheck_core::Vocabulary;

/// Get the path to the fixture node tree.
pub fn fixture_nodes_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("nodes")
}

/// A slice of the display names found in the nodes-base package.
pub fn node_display_names() -> Vocabulary {
    [
        "Action Network",
        "ActiveCampaign",
        "ActiveCampaign Trigger",
        "Airtable",
        "Airtable Trigger",
        "AWS Lambda",
        "AWS S3",
        "BambooHR",
        "Customer Datastore (n8n training)",
        "Date & Time",
        "Gmail",
        "Gmail Trigger",
        "Google Sheets ",
        "HTTP Request",
        "IF",
        "Matrix",
        "Mattermost",
        "Merge",
        "No Operation, do nothing",
        "Notion (Beta)",
        "Oura",
        "Set",
        "Slack",
        "SyncroMSP",
        "Webhook",
        "Zoom",
    ]
    .into_iter()
    .collect()
}
