//! Rule compilation for the regex-based sanitizer.
//!
//! Turns `RedactionRule`s into ordered, cached `CompiledRules` that the
//! engines in `crate::engines` apply to content.

pub mod compiler;
