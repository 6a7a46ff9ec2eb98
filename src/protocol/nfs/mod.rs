//! NFS protocol family procedures.
//!
//! This module declares the procedures of the three programs an NFS server exposes:
//!
//! - `v3`: The NFS version 3 protocol as specified in RFC 1813. All 22 procedures
//!   (NULL and the 21 file operations) with their argument and result types and
//!   the failure statuses each one may return.
//!
//! - `mount`: The MOUNT version 3 protocol, which gives clients the initial file
//!   handle of an exported file system.
//!
//! - `portmap`: The PORTMAP version 2 protocol (RFC 1057), which lets clients
//!   discover the port an RPC program listens on. Unlike the other two it comes
//!   with its own state, a [`portmap::PortmapTable`].
//!
//! - `error`: translation of host I/O errors into protocol statuses.
//!
//! Handlers for `v3` and `mount` are supplied by the embedding file server and
//! attached to a [`crate::protocol::rpc::Program`].

pub mod error;
pub mod mount;
pub mod portmap;
pub mod v3;
