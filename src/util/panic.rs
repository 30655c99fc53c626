/// Asserts that running the block panics, catching the unwind so the test can carry on.
///
/// The block is wrapped in [`AssertUnwindSafe`](std::panic::AssertUnwindSafe) so that it can
/// capture the scratch values of the surrounding test by reference. Nothing captured should be
/// inspected after the panic, it may be half way through a mutation.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            $msg
        );
        println!("^ panic caught");
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
