#![allow(dead_code)]

pub use devloop_test_utils::builders;
pub use devloop_test_utils::fake_backend::{BackendCall, FakeBackend};
pub use devloop_test_utils::{init_tracing, wait_until, with_timeout};
