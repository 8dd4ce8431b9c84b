use anyhow::{Context as _, Result};
use std::ffi::{CStr, CString, c_char};

/// Hands a string over to C. Interior NUL bytes are dropped.
pub(crate) fn string_to_cstring(s: String) -> *mut c_char {
    let text = match CString::new(s) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("text contains NUL bytes, stripping them");
            let mut bytes = err.into_vec();
            bytes.retain(|b| *b != 0);
            match CString::new(bytes) {
                Ok(text) => text,
                Err(_) => return std::ptr::null_mut(),
            }
        }
    };
    text.into_raw()
}

/// Takes back a string created by `string_to_cstring`.
pub(crate) unsafe fn drop_cstring(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

pub(crate) fn cstring_to_string(s: *const c_char) -> Result<String> {
    if s.is_null() {
        anyhow::bail!("NULL string");
    }
    Ok(unsafe { CStr::from_ptr(s) }
        .to_str()
        .context("failed to convert *char to String")?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_cross_the_boundary() {
        let ptr = string_to_cstring("héllo".to_string());
        assert_eq!(cstring_to_string(ptr).unwrap(), "héllo");
        unsafe { drop_cstring(ptr) };
    }

    #[test]
    fn nul_bytes_are_stripped() {
        let ptr = string_to_cstring("a\0b".to_string());
        assert_eq!(cstring_to_string(ptr).unwrap(), "ab");
        unsafe { drop_cstring(ptr) };
    }

    #[test]
    fn null_is_an_error() {
        assert!(cstring_to_string(std::ptr::null()).is_err());
    }
}
