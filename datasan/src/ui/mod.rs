// datasan/src/ui/mod.rs
pub mod diff_viewer;
pub mod output_format;
pub mod redaction_summary;
pub mod theme;
