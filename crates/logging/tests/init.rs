use logging::{TARGET_ROOT, Verbosity, init_tracing};

#[test]
fn second_initialisation_is_a_no_op() {
    assert!(init_tracing(Verbosity::Debug));
    assert!(!init_tracing(Verbosity::Trace));

    tracing::debug!(target: TARGET_ROOT, "subscriber accepts events after re-init");
}
