//! Heuristic checks over raw code text.
//!
//! Each sub-assessment reads only the code, the language and the derived
//! counts; none depends on another's output.

pub mod best_practices;
pub mod complexity;
pub mod predicates;
pub mod readability;
pub mod strengths;
pub mod suggestions;
