use crate::error::{with_last_error_mut, SoilMixError, SoilMixErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Accepts any type implementing `SoilMixError` trait.
pub(crate) fn set_last_error(error: &impl SoilMixError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl SoilMixError) -> SoilMixErrorCode {
    tracing::debug!(code = ?error.code(), msg = error.msg(), "soil mix FFI call failed");
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = SoilMixErrorCode::Ok;
    });
}

/// Resolve a result into an error code, recording or clearing the
/// thread-local error to match.
pub(crate) fn track_result<T, E: SoilMixError>(result: Result<T, E>) -> SoilMixErrorCode {
    match result {
        Ok(_) => {
            clear_last_error();
            SoilMixErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}
