//! Filter implementations
//!
//! Contains TextFilter, SeverityFilter, and RegexFilter.

mod expression;
mod severity;
mod text;

pub use self::expression::RegexFilter;
pub use self::severity::SeverityFilter;
pub use self::text::TextFilter;
