pub mod ambiguous;
pub mod annotations;
pub mod synonyms;

// Re-export command functions for convenience
pub use ambiguous::ambiguous;
pub use annotations::annotations;
pub use synonyms::synonyms;
