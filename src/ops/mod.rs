pub mod assist;
pub mod context;
pub mod export;
pub mod stats;
pub mod status;
pub mod template;
pub mod tree_ops;

#[cfg(test)]
pub(crate) mod test_helpers;
