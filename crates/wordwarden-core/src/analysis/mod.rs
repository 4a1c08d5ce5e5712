/// Analysis modules: aggregate statistics across a scan.

pub mod frequency;

pub use frequency::{WordFrequency, WordFrequencyTracker};
