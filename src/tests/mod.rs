mod lookup_tests;
mod sources_tests;

pub(crate) fn init_logging() {
    let _ = colog::default_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}
