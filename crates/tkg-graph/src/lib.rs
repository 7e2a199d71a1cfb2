//! TKG Graph - Relationship graph, layout and rendering
//!
//! Builds the Person/Email/Organization graph from extracted records,
//! computes the deterministic tiered layout (Organization → Person → Email)
//! and renders it through an injectable [`Renderer`].

pub mod graph;
pub mod label;
pub mod layout;
pub mod render;

pub use graph::{GraphNode, KnowledgeGraph};
pub use label::{wrap_label, LabelFormatter};
pub use layout::{
    Bounds, Layout, LayoutEngine, LayoutNode, OrgBlock, EMAIL_TIER, MEMBER_SPACING,
    ORGANIZATION_TIER, ORG_PADDING, PERSON_TIER,
};
pub use render::{write_output, JsonRenderer, Renderer, SvgRenderer};
