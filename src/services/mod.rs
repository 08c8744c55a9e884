pub mod banned_terms;
pub mod content_filter;
pub mod levenshtein;
pub mod moderation;
pub mod normalizer;
pub mod sanitizer;
pub mod slur_patterns;
pub mod variations;
