mod docx;
mod filename;
mod print;
mod word;

pub use docx::{Alignment, Document, ExportError, HeadingLevel, Paragraph, Run};
pub use filename::{export_file_name, sanitize_title};
pub use print::{attribution, export_to_pdf, render_printable, BrowserSurface, PrintSurface};
pub use word::{export_to_word, render_document};
