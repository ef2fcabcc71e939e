#![allow(dead_code)]

//! A scripted stand-in for the kernel side of `sysctl(2)`.
//!
//! Implements [`RawSysctl`] over an in-memory node table, including the
//! `{0,3}` name-to-OID and `{0,4}` oidfmt meta-nodes, write permission
//! handling, injected errnos, and queued byte-image swaps that replay the
//! grow-between-probe-and-fetch race deterministically.

use freebsd_sysctl::RawSysctl;
use std::cell::RefCell;
use std::collections::BTreeMap;

struct Node {
    bytes: Vec<u8>,
    writable: bool,
    /// Writes must match this exact size, or the node reports EINVAL.
    strict_size: Option<usize>,
}

pub struct FakeKernel {
    nodes: RefCell<BTreeMap<Vec<i32>, Node>>,
    names: BTreeMap<String, Vec<i32>>,
    formats: BTreeMap<Vec<i32>, Vec<u8>>,
    faults: BTreeMap<Vec<i32>, i32>,
    /// Replacement byte images, swapped in one at a time after each size
    /// probe of the node, so the following fetch sees a changed value.
    swaps: RefCell<BTreeMap<Vec<i32>, Vec<Vec<u8>>>>,
}

impl FakeKernel {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(BTreeMap::new()),
            names: BTreeMap::new(),
            formats: BTreeMap::new(),
            faults: BTreeMap::new(),
            swaps: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn with_node(self, mib: &[i32], bytes: &[u8]) -> Self {
        self.insert(mib, bytes, false, None)
    }

    pub fn with_writable(self, mib: &[i32], bytes: &[u8]) -> Self {
        self.insert(mib, bytes, true, None)
    }

    pub fn with_strict_writable(self, mib: &[i32], bytes: &[u8]) -> Self {
        let size = bytes.len();
        self.insert(mib, bytes, true, Some(size))
    }

    pub fn with_name(mut self, name: &str, mib: &[i32]) -> Self {
        self.names.insert(name.to_owned(), mib.to_vec());
        self
    }

    pub fn with_format(mut self, mib: &[i32], kind: u32, fmt: &str) -> Self {
        let mut buf = kind.to_ne_bytes().to_vec();
        buf.extend_from_slice(fmt.as_bytes());
        buf.push(0);
        self.formats.insert(mib.to_vec(), buf);
        self
    }

    pub fn with_fault(mut self, mib: &[i32], errno: i32) -> Self {
        self.faults.insert(mib.to_vec(), errno);
        self
    }

    /// Queue a byte image to replace the node's value after its next probe.
    pub fn queue_swap(&self, mib: &[i32], bytes: &[u8]) {
        self.swaps
            .borrow_mut()
            .entry(mib.to_vec())
            .or_default()
            .push(bytes.to_vec());
    }

    /// Current byte image of a node, for post-write inspection.
    pub fn bytes_of(&self, mib: &[i32]) -> Vec<u8> {
        self.nodes.borrow()[mib].bytes.clone()
    }

    fn insert(self, mib: &[i32], bytes: &[u8], writable: bool, strict_size: Option<usize>) -> Self {
        self.nodes.borrow_mut().insert(
            mib.to_vec(),
            Node {
                bytes: bytes.to_vec(),
                writable,
                strict_size,
            },
        );
        self
    }

    fn apply_swap(&self, mib: &[i32]) {
        let mut swaps = self.swaps.borrow_mut();
        let Some(queue) = swaps.get_mut(mib) else {
            return;
        };
        if queue.is_empty() {
            return;
        }
        let next = queue.remove(0);
        if let Some(node) = self.nodes.borrow_mut().get_mut(mib) {
            node.bytes = next;
        }
    }

    fn serve(&self, data: &[u8], old: Option<&mut [u8]>) -> Result<usize, i32> {
        match old {
            None => Ok(data.len()),
            Some(buf) => {
                if buf.len() < data.len() {
                    return Err(libc::ENOMEM);
                }
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
        }
    }

    fn name_to_oid(&self, old: Option<&mut [u8]>, new: Option<&[u8]>) -> Result<usize, i32> {
        let key = new.ok_or(libc::EINVAL)?;
        let name = std::str::from_utf8(key).map_err(|_| libc::EINVAL)?;
        let oid = self.names.get(name).ok_or(libc::ENOENT)?;
        let mut bytes = Vec::with_capacity(oid.len() * 4);
        for c in oid {
            bytes.extend_from_slice(&c.to_ne_bytes());
        }
        self.serve(&bytes, old)
    }
}

impl RawSysctl for FakeKernel {
    fn query(&self, mib: &[i32], old: Option<&mut [u8]>, new: Option<&[u8]>) -> Result<usize, i32> {
        if let [0, 3] = mib {
            return self.name_to_oid(old, new);
        }
        if let [0, 4, rest @ ..] = mib {
            if !rest.is_empty() {
                let data = self.formats.get(rest).ok_or(libc::ENOENT)?.clone();
                return self.serve(&data, old);
            }
        }
        if let Some(&errno) = self.faults.get(mib) {
            return Err(errno);
        }

        if let Some(value) = new {
            // Set call.
            let mut nodes = self.nodes.borrow_mut();
            let node = nodes.get_mut(mib).ok_or(libc::ENOENT)?;
            if !node.writable {
                return Err(libc::EPERM);
            }
            if node.strict_size.is_some_and(|s| s != value.len()) {
                return Err(libc::EINVAL);
            }
            node.bytes = value.to_vec();
            return Ok(0);
        }

        let data = {
            let nodes = self.nodes.borrow();
            nodes.get(mib).ok_or(libc::ENOENT)?.bytes.clone()
        };
        let probing = old.is_none();
        let result = self.serve(&data, old);
        if probing {
            self.apply_swap(mib);
        }
        result
    }
}
