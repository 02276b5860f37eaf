// Resume documents: text extraction from uploads and LaTeX/PDF/DOCX rendering
// of structured resume data.
// PDF and DOCX extraction are CPU-bound and run inside spawn_blocking;
// pdflatex runs as an async child process.

pub mod docx;
pub mod extract;
pub mod handlers;
pub mod render;
pub mod templates;
