/// Common test utilities shared by the integration tests
pub mod test_helpers;
