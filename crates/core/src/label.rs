//! Terminal journey labels shared by the extractor and the graph builder.

/// Label of a purchase event; a journey is cut after its first occurrence.
pub const PURCHASE_LABEL: &str = "Purchase";

/// Synthetic terminal appended to journeys that never reach a purchase.
pub const NON_PURCHASE_LABEL: &str = "Non-Purchase";

/// Terminal labels map to one shared graph node per outcome,
/// regardless of step position.
pub fn is_terminal(label: &str) -> bool {
    label == PURCHASE_LABEL || label == NON_PURCHASE_LABEL
}
