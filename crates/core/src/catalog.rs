//! Known mobile app packages whose event logs we can visualize.

/// App package ids mapped to display names for the selector UI.
pub const KNOWN_APPS: &[(&str, &str)] = &[
    ("com.ss.android.ugc.trill", "TikTok"),
    ("com.shopee.id", "Shopee"),
];

/// Display name for a known app package id.
pub fn app_display_name(app_id: &str) -> Option<&'static str> {
    KNOWN_APPS
        .iter()
        .find(|(id, _)| *id == app_id)
        .map(|(_, name)| *name)
}
