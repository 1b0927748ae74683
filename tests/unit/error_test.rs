//! Tests for error types

use prometheus_depot::core::{AppResult, DepotError};

#[test]
fn test_invalid_configuration_error() {
    let err = DepotError::InvalidConfiguration("ticks must be greater than 0".to_string());
    assert_eq!(
        format!("{err}"),
        "invalid configuration: ticks must be greater than 0"
    );
}

#[test]
fn test_buffer_closed_error() {
    let err = DepotError::BufferClosed;
    assert_eq!(format!("{err}"), "buffer closed");
}

#[test]
fn test_task_error() {
    let err = DepotError::Task("monitor: panicked".to_string());
    assert_eq!(format!("{err}"), "task failed: monitor: panicked");
}

#[test]
fn test_error_converts_into_app_result() {
    fn fails() -> AppResult<()> {
        Err::<(), _>(DepotError::BufferClosed)?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(err.downcast_ref::<DepotError>().is_some());
}
