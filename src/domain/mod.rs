pub mod article;
pub mod document;
pub mod source;

pub use article::{ArticleState, ArticleStub};
pub use document::{Block, Document, LinkTable, Run, Style};
pub use source::Source;
