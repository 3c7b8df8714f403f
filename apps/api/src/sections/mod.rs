// Section segmentation: fuzzy header classification over a fixed canonical
// vocabulary, plus the line-bucketing state machine.

pub mod extractor;
pub mod headers;

pub use extractor::SectionExtractor;
pub use headers::Section;
