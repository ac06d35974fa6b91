
pub mod test_namespace;
