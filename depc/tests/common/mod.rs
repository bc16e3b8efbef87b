use depc::make::*;
use depc::Qty;

/// Enable logging for the current test, with `RUST_LOG=trace` for example.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Named term argument of type `i32_t`.
#[allow(dead_code)]
pub fn int(qty: Qty, name: &str) -> PArg {
    term_arg(qty, i32_t(), name)
}
