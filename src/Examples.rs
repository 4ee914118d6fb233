/// runnable scenarios: digester runs and stream conversions
pub mod digester_examples;
