//! Pure cipher transforms: stateless mappings from text + key to text.

pub mod shift;
pub mod transposition;
