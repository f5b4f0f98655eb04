pub mod config;
pub mod error;
pub mod page;
pub mod publish;
pub mod segment;

pub use config::Config;
pub use error::PublishError;
pub use page::{RenderedDocument, Template, extract_title, render_document};
pub use publish::{PublishSummary, Publisher, output_path};
pub use segment::{Segment, segment};
