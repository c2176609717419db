// Résumé render targets that share one record: interactive preview tree and
// flow-layout (style-run) document. The paginated target lives in `layout`.
// All three are pure functions of the record snapshot.

pub mod flow;
pub mod handlers;
pub mod preview;

pub use flow::{render_flow, FlowDocument};
pub use preview::{render_preview, PreviewNode};

/// Sanitizes a candidate name for use in an export file name: whitespace runs
/// become a single underscore, leading and trailing whitespace is dropped.
pub fn export_file_stem(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

pub fn pdf_file_name(name: &str) -> String {
    file_name(name, "Resume.pdf")
}

pub fn docx_file_name(name: &str) -> String {
    file_name(name, "Resume.docx")
}

fn file_name(name: &str, suffix: &str) -> String {
    let stem = export_file_stem(name);
    if stem.is_empty() {
        suffix.to_string()
    } else {
        format!("{stem}_{suffix}")
    }
}
