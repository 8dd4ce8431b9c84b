use crate::{
    ffi::{drop_cstring, string_to_cstring},
    presenter::Visibility,
};
use std::ffi::c_char;

/// What changed since the last poll.
///
/// `items` is only meaningful when `rendered` is true (it may then hold zero
/// items). `visibility` is NULL when it did not change. Must be released
/// with `quickclip_output_drop`.
#[repr(C)]
pub struct Output {
    pub rendered: bool,
    pub items: *mut *mut c_char,
    pub items_len: usize,
    pub visibility: *mut Visibility,
}

impl Output {
    pub(crate) fn null() -> Self {
        Self {
            rendered: false,
            items: std::ptr::null_mut(),
            items_len: 0,
            visibility: std::ptr::null_mut(),
        }
    }

    pub(crate) fn new(items: Option<Vec<String>>, visibility: Option<Visibility>) -> Self {
        let mut out = Self::null();
        if let Some(items) = items {
            let items: Box<[*mut c_char]> = items.into_iter().map(string_to_cstring).collect();
            out.rendered = true;
            out.items_len = items.len();
            out.items = Box::into_raw(items).cast();
        }
        if let Some(visibility) = visibility {
            out.visibility = Box::into_raw(Box::new(visibility));
        }
        out
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_output_drop(output: Output) {
    if output.rendered && !output.items.is_null() {
        let items = std::ptr::slice_from_raw_parts_mut(output.items, output.items_len);
        let items = unsafe { Box::from_raw(items) };
        for item in items.iter() {
            unsafe { drop_cstring(*item) };
        }
    }
    if !output.visibility.is_null() {
        drop(unsafe { Box::from_raw(output.visibility) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::cstring_to_string;

    #[test]
    fn rendered_list_is_readable_from_c() {
        let output = Output::new(
            Some(vec!["beta".to_string(), "alpha".to_string()]),
            Some(Visibility::Hidden),
        );
        assert!(output.rendered);
        assert_eq!(output.items_len, 2);

        let items = unsafe { std::slice::from_raw_parts(output.items, output.items_len) };
        assert_eq!(cstring_to_string(items[0]).unwrap(), "beta");
        assert_eq!(cstring_to_string(items[1]).unwrap(), "alpha");
        assert_eq!(unsafe { *output.visibility }, Visibility::Hidden);

        quickclip_output_drop(output);
    }

    #[test]
    fn empty_render_is_distinct_from_no_render() {
        let cleared = Output::new(Some(Vec::new()), None);
        assert!(cleared.rendered);
        assert_eq!(cleared.items_len, 0);
        assert!(cleared.visibility.is_null());
        quickclip_output_drop(cleared);

        let nothing = Output::new(None, None);
        assert!(!nothing.rendered);
        quickclip_output_drop(nothing);
    }
}
