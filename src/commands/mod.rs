pub mod completions;
pub mod syspkg;
