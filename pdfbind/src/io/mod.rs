//! File-system boundary: reading candidates in, writing merged output out.

pub mod reader;
pub mod writer;

pub use reader::{CandidateReader, ReadResult};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
