// Hybrid ranking engine.
// Three independent similarity signals (lexical TF-IDF, dense-embedding
// semantic, keyword/skill overlap) fused into a single score per resume.
// All embedding calls go through embedder — no scorer talks to a model
// service directly.

pub mod handlers;
pub mod keyword;
pub mod pipeline;
pub mod semantic;
pub mod tfidf;
