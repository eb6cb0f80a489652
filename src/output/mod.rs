pub mod formatter;

pub use formatter::{
    format_error_json, format_grade, format_json, format_number, format_report,
    format_results_text, format_share_text, share_links, should_use_colors, ShareLink, SITE_URL,
};
