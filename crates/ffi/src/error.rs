use soil_mix_core::ValidationError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// This trait provides a unified way to handle errors across the FFI boundary,
/// allowing both simple error codes and custom error messages.
///
/// # Design
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait SoilMixError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> SoilMixErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `SoilMixError` for the errors this crate raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultSoilMixError {
    code: SoilMixErrorCode,
    msg: String,
}

impl DefaultSoilMixError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_recipe"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: SoilMixErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a rejected input quantity.
    ///
    /// # Arguments
    /// * `param_name` - The name of the rejected parameter (e.g., `"value"`, `"total_soil"`)
    /// * `error` - Why the value was rejected
    pub fn invalid_quantity(param_name: &str, error: ValidationError) -> Self {
        Self {
            code: error.into(),
            msg: format!("Parameter '{param_name}': {error}"),
        }
    }
}

impl SoilMixError for DefaultSoilMixError {
    fn code(&self) -> SoilMixErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by soil mix functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilMixErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Input value is NaN.
    NotANumber = 2,

    /// Input value is below the minimum (0).
    BelowMinimum = 3,

    /// Input value is above the maximum (10000).
    AboveMaximum = 4,
}

impl From<ValidationError> for SoilMixErrorCode {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::NotANumber => SoilMixErrorCode::NotANumber,
            ValidationError::BelowMinimum { .. } => SoilMixErrorCode::BelowMinimum,
            ValidationError::AboveMaximum { .. } => SoilMixErrorCode::AboveMaximum,
        }
    }
}

impl From<DefaultSoilMixError> for SoilMixErrorCode {
    fn from(error: DefaultSoilMixError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, SoilMixErrorCode)> = const { RefCell::new((None, SoilMixErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, SoilMixErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, SoilMixErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// SoilRecipeValues recipe;
/// if (soil_mix_compute_recipe(total, &recipe) != SoilMixErrorCode::Ok) {
///     const char* error = soil_mix_get_last_error();
///     if (error) {
///         printf("Soil mix failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn soil_mix_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn soil_mix_get_last_error_code() -> SoilMixErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_codes() {
        assert_eq!(
            SoilMixErrorCode::from(ValidationError::NotANumber),
            SoilMixErrorCode::NotANumber
        );
        let below = ValidationError::BelowMinimum {
            value: -1.0,
            minimum: 0.0,
        };
        assert_eq!(SoilMixErrorCode::from(below), SoilMixErrorCode::BelowMinimum);
    }

    #[test]
    fn test_invalid_quantity_message() {
        let err = DefaultSoilMixError::invalid_quantity(
            "value",
            ValidationError::AboveMaximum {
                value: 20000.0,
                maximum: 10000.0,
            },
        );
        assert_eq!(err.code(), SoilMixErrorCode::AboveMaximum);
        assert_eq!(err.msg(), "Parameter 'value': Value cannot exceed 10000");
    }
}
