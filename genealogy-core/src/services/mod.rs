pub mod encoding;
pub mod json;
pub mod merge;
pub mod name_dictionary;
pub mod output;
pub mod pipeline;
pub mod qa;
pub mod report;
