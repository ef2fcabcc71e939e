//! # Process title
//!
//! `setproctitle(3)` changes what `ps` and friends display for this process.
//! The title is passed as printf *data*, never as the format string, so `%`
//! sequences in it are inert. The kernel silently truncates titles longer
//! than its internal buffer; there is no failure signal for that.

/// A title that cannot be handed to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    #[error("the process title must not be empty")]
    Empty,
    #[error("the process title must not contain NUL bytes")]
    InteriorNul,
}

#[cfg_attr(not(target_os = "freebsd"), allow(dead_code))]
fn validate(title: &str) -> Result<(), TitleError> {
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    if title.as_bytes().contains(&0) {
        return Err(TitleError::InteriorNul);
    }
    Ok(())
}

/// Replace the displayed command line with `title`.
///
/// The leading dash in the format makes the kernel show the title verbatim
/// instead of appending it to the executable name.
#[cfg(target_os = "freebsd")]
pub fn set_title(title: &str) -> Result<(), TitleError> {
    use std::ffi::CString;

    validate(title)?;
    let c_title = CString::new(title).map_err(|_| TitleError::InteriorNul)?;
    // SAFETY: both pointers are NUL-terminated strings that outlive the call.
    unsafe { libc::setproctitle(c"-%s".as_ptr(), c_title.as_ptr()) };
    Ok(())
}

/// Restore the original process title.
#[cfg(target_os = "freebsd")]
pub fn clear_title() {
    // SAFETY: a null format is the documented restore form.
    unsafe { libc::setproctitle(core::ptr::null()) };
}
