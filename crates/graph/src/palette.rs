//! Fixed page-label color table for the flow diagram.

/// Page labels mapped to their node colors.
pub const EVENT_COLORS: &[(&str, &str)] = &[
    ("Home", "#d02f80"),
    ("Search", "#d98c26"),
    ("Review", "#abd629"),
    ("Category", "#68d22d"),
    ("Product", "#2bd4bd"),
    ("Cart Journey", "#229cdd"),
    ("Checkout", "#229ddd"),
    ("Purchase", "#964db2"),
    ("Videolive", "#9a7965"),
    ("Videononlive", "#9a7345"),
    ("Voucher", "#6e918b"),
    ("History", "#edda12"),
    ("Brandshop", "#64739b"),
    ("Me", "#63d6d6"),
    ("Non-Purchase", "#63d8d6"),
    ("Shopeemall", "#23d8d6"),
    ("Allproductsandservices", "#62d8d6"),
];

/// Fallback for page labels without a mapped color.
pub const DEFAULT_NODE_COLOR: &str = "grey";

/// All transitions render in the same muted link color.
pub const LINK_COLOR: &str = "lightgrey";

/// Node color for a page label.
pub fn color_for(label: &str) -> &'static str {
    EVENT_COLORS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_NODE_COLOR)
}
