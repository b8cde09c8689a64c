//! Deterministic node colours.

use nt_core::NodeId;

pub const PALETTE: [&str; 21] = [
    "#11A893", "#00B3D7", "#FFC400", "#A45AC1", "#83CB4E", "#FA6E37", "#C40685", //
    "#4ACAB7", "#3ED2F2", "#FFDD78", "#C07DDB", "#A2E572", "#FF9269", "#E550B0", //
    "#0E7365", "#0189A4", "#CE9E00", "#79428E", "#63973A", "#C6562C", "#910662",
];

/// Colour for the node with the given id: `PALETTE[id mod PALETTE.len()]`.
pub fn color_for(id: NodeId) -> &'static str {
    PALETTE[id.position() % PALETTE.len()]
}
