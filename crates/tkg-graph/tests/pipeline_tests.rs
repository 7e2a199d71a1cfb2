//! Pipeline Integration Tests
//!
//! Runs lines → records → graph → layout → rendering end to end.

use tkg_core::{NodeKind, Position};
use tkg_extractor::{EmailExtractor, EntityExtractor};
use tkg_graph::{
    write_output, JsonRenderer, KnowledgeGraph, LayoutEngine, Renderer, SvgRenderer, EMAIL_TIER,
    ORGANIZATION_TIER, ORG_PADDING, PERSON_TIER,
};

/// Helper to turn string literals into owned lines
fn to_lines(input: &[&str]) -> Vec<String> {
    input.iter().map(|s| s.to_string()).collect()
}

fn email_report() -> Vec<String> {
    to_lines(&[
        "AI Legends Email Report",
        "From: Geoffrey Hinton <geoffrey.hinton@toronto.edu>",
        "To: Yann LeCun <yann.lecun@nyu.edu>, Yoshua Bengio <yoshua.bengio@mila.quebec>",
        "Cc: Demis Hassabis demis@deepmind.com",
        "Shane Legg shane@deepmind.com, regards",
        "From: Geoffrey H. geoffrey.hinton@toronto.edu",
        "zz x@nowhere.com",
        "Thanks!",
    ])
}

// =============================================================================
// Example Scenario
// =============================================================================

#[test]
fn test_example_scenario_end_to_end() {
    let lines = to_lines(&[
        "From: Alice Smith <alice@acme.com>",
        "Bob Lee bob@beta.io, regards",
    ]);

    let records = EmailExtractor::new().extract(&lines).unwrap();
    let rendered: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "('Alice Smith', 'alice@acme.com', 'Acme')",
            "('Bob Lee', 'bob@beta.io', 'Beta')",
        ]
    );

    let graph = KnowledgeGraph::from_records(&records);
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 4);

    let layout = LayoutEngine::new().compute(&graph);
    assert_eq!(layout.blocks.len(), 2);
    assert!(layout.blocks.iter().all(|b| b.members.len() == 1));
    assert!(layout.blocks[1].start_x - layout.blocks[0].end_x() >= ORG_PADDING);

    assert_eq!(layout.position("Alice Smith").unwrap().y, PERSON_TIER);
    assert_eq!(layout.position("alice@acme.com").unwrap().y, EMAIL_TIER);
    assert_eq!(layout.position("Acme").unwrap().y, ORGANIZATION_TIER);
}

// =============================================================================
// Multi-Organization Report
// =============================================================================

#[test]
fn test_report_extraction() {
    let (records, stats) = EmailExtractor::new().extract_with_stats(&email_report());

    let emails: Vec<&str> = records.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(
        emails,
        vec![
            "geoffrey.hinton@toronto.edu",
            "yann.lecun@nyu.edu",
            "yoshua.bengio@mila.quebec",
            "demis@deepmind.com",
            "shane@deepmind.com",
        ]
    );

    assert_eq!(records[0].name, "Geoffrey Hinton");
    assert_eq!(records[1].name, "Yann LeCun");
    assert_eq!(records[2].name, "Yann LeCun yann.lecun@nyu.edu>, Yoshua Bengio");
    assert_eq!(records[3].name, "Cc: Demis Hassabis");
    assert_eq!(records[3].organization, "Deepmind");
    assert_eq!(records[2].organization, "Mila");

    assert_eq!(stats.duplicates_dropped, 1);
    assert_eq!(stats.candidates_rejected, 1);
    assert_eq!(stats.lines_without_match, 2);
    assert!(stats.is_balanced());
}

#[test]
fn test_report_layout_tiers() {
    let records = EmailExtractor::new().extract(&email_report()).unwrap();
    let graph = KnowledgeGraph::from_records(&records);
    let layout = LayoutEngine::new().compute(&graph);

    // Deepmind has two members and is placed first
    assert_eq!(layout.blocks[0].organization, "Deepmind");
    assert_eq!(layout.blocks[0].members.len(), 2);
    assert_eq!(layout.position("Deepmind"), Some(Position::new(12.0, ORGANIZATION_TIER)));

    for node in &layout.nodes {
        let expected = match node.kind {
            NodeKind::Organization => ORGANIZATION_TIER,
            NodeKind::Person => PERSON_TIER,
            NodeKind::Email => EMAIL_TIER,
        };
        assert_eq!(node.position.y, expected, "tier of {}", node.id);
    }

    for record in &records {
        let person = layout.position(&record.name).unwrap();
        let email = layout.position(&record.email).unwrap();
        assert_eq!(email.x, person.x);
    }

    for pair in layout.blocks.windows(2) {
        assert!(pair[0].end_x() < pair[1].start_x);
    }
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_report_to_files() {
    let records = EmailExtractor::new().extract(&email_report()).unwrap();
    let layout = LayoutEngine::new().compute(&KnowledgeGraph::from_records(&records));
    let dir = tempfile::tempdir().unwrap();

    let renderers: Vec<Box<dyn Renderer>> = vec![
        Box::new(SvgRenderer::new().with_title("AI Legends")),
        Box::new(JsonRenderer),
    ];

    for renderer in &renderers {
        let path = dir.path().join(format!("report.{}", renderer.extension()));
        write_output(renderer.as_ref(), &layout, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    let svg = std::fs::read_to_string(dir.path().join("report.svg")).unwrap();
    assert!(svg.contains("AI Legends"));
    assert_eq!(svg.matches("<circle").count(), layout.nodes.len());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(json["blocks"][0]["organization"], "Deepmind");
}
