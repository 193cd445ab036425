/// Provides the recommended log filter for programs which want to exclude castscope's
/// per-tick messages.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every frame unless something is wrong. Per-tick
/// `trace` messages from presentations use their own target so that they can be dropped
/// here while the rest of castscope's tracing remains.
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    !(target.starts_with(crate::present::FRAME_LOG_TARGET)
        || target.starts_with("parry3d::")) // noisy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter() {
        assert!(!standard_filter(
            &log::Metadata::builder().target("castscope::frame").build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder()
                .target("castscope::present")
                .build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder().target("some_random_crate").build()
        ));
    }
}
