//! # Raw kernel-call seam
//!
//! [`RawSysctl`] is the narrow waist between the marshaling logic and the
//! operating system: exactly one `sysctl(2)` invocation per call, no retries,
//! no allocation, no interpretation of the transferred bytes. The negotiation
//! and resolution code above it is generic over this trait, which is how it
//! is exercised off-target against a scripted fake.

/// One invocation of the sysctl kernel interface.
pub trait RawSysctl {
    /// Perform a single query against the node at `mib`.
    ///
    /// `old` receives the current value; passing `None` is the size probe
    /// form, where the kernel only reports how many bytes the value needs.
    /// `new` supplies an input buffer — a replacement value for a set call,
    /// or the lookup key for meta-nodes such as name-to-OID.
    ///
    /// Returns the byte count the kernel reported (bytes written into `old`,
    /// or the required size for a probe). A failure carries the native errno.
    fn query(&self, mib: &[i32], old: Option<&mut [u8]>, new: Option<&[u8]>) -> Result<usize, i32>;
}

/// The real backend: `libc::sysctl` on FreeBSD.
#[cfg(target_os = "freebsd")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LibcSysctl;

#[cfg(target_os = "freebsd")]
impl RawSysctl for LibcSysctl {
    fn query(&self, mib: &[i32], old: Option<&mut [u8]>, new: Option<&[u8]>) -> Result<usize, i32> {
        let mut oldlen: libc::size_t = old.as_ref().map_or(0, |b| b.len());
        let oldp = old.map_or(core::ptr::null_mut(), |b| {
            b.as_mut_ptr().cast::<libc::c_void>()
        });
        let (newp, newlen) = new.map_or((core::ptr::null_mut(), 0), |b| {
            (b.as_ptr().cast_mut().cast::<libc::c_void>(), b.len())
        });

        // SAFETY: every pointer/length pair describes a live buffer borrowed
        // for the duration of the call; a null oldp is the documented size
        // probe form, and the kernel never writes through newp.
        let rv = unsafe {
            libc::sysctl(
                mib.as_ptr().cast_mut(),
                mib.len() as libc::c_uint,
                oldp,
                &mut oldlen,
                newp,
                newlen,
            )
        };
        if rv == -1 { Err(errno()) } else { Ok(oldlen) }
    }
}

/// The errno left behind by the last failed libc call on this thread.
#[cfg(target_os = "freebsd")]
pub(crate) fn errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}
