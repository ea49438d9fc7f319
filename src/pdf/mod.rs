//! PDF manipulation module

pub mod overlay;
pub mod stamp;

// Re-export commonly used items
pub use overlay::{apply_overlay, overlay_content, FONT_RESOURCE};
pub use stamp::{document_info, page_size, stamp_document};
