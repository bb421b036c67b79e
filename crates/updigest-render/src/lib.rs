//! Text cleanup and report rendering for the monthly update digest.
//!
//! Turns raw update bodies into plain text, highlights keywords, extracts
//! links, summarises per-author activity, and composes the final HTML
//! document. PDF export goes through the [`PdfRenderer`] trait; the shipped
//! implementation drives a local headless Chrome or Edge.

pub mod activity;
pub mod error;
pub mod highlight;
pub mod html;
pub mod links;
pub mod pdf;
pub mod text;

pub use activity::{opacity, ActivityEntry, ActivitySummary};
pub use error::RenderError;
pub use highlight::KeywordHighlighter;
pub use html::ReportRenderer;
pub use links::{display_label, extract_links, strip_tracking_params};
pub use pdf::{ChromePdfRenderer, PdfRenderer};
pub use text::{escape_html, TextCleaner};
