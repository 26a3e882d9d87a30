pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;
