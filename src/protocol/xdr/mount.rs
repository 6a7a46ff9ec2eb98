//! This module implements the `MOUNT` protocol (RFC 1813 Appendix I) data structures
//! for XDR serialization and deserialization.
//!
//! The `MOUNT` protocol is used to establish the initial connection between an NFS client
//! and server. It provides functions for mounting and unmounting file systems, and
//! obtaining the initial file handle that serves as the root of the mounted file system.

#![allow(non_camel_case_types)]

use num_derive::{FromPrimitive, ToPrimitive};

use crate::{DeserializeEnum, SerializeEnum};

use super::nfs3::{nfs_fh3, nfsstring};
use super::List;
use super::XdrStruct;

/// MOUNT program number for RPC
pub const PROGRAM: u32 = 100005;
/// MOUNT protocol version 3
pub const VERSION: u32 = 3;

/// Maximum bytes in a path name
pub const MNTPATHLEN: u32 = 1024;
/// Maximum bytes in a name
pub const MNTNAMLEN: u32 = 255;
/// Maximum bytes in a V3 file handle
pub const FHSIZE3: u32 = 64;

/// File handle for NFS version 3, the same wire type as `nfs_fh3`
pub type fhandle3 = nfs_fh3;
/// Directory path on the server
pub type dirpath = nfsstring;
/// Name in the directory
pub type name = nfsstring;

/// Status codes returned by `MOUNT` protocol operations
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum mountstat3 {
    /// No error
    #[default]
    MNT3_OK = 0,
    /// Not owner
    MNT3ERR_PERM = 1,
    /// No such file or directory
    MNT3ERR_NOENT = 2,
    /// I/O error
    MNT3ERR_IO = 5,
    /// Permission denied
    MNT3ERR_ACCES = 13,
    /// Not a directory
    MNT3ERR_NOTDIR = 20,
    /// Invalid argument
    MNT3ERR_INVAL = 22,
    /// Filename too long
    MNT3ERR_NAMETOOLONG = 63,
    /// Operation not supported
    MNT3ERR_NOTSUPP = 10004,
    /// A failure on the server
    MNT3ERR_SERVERFAULT = 10006,
}
SerializeEnum!(mountstat3);
DeserializeEnum!(mountstat3);

/// Successful response to a mount request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct mountres3_ok {
    /// File handle for the mounted directory
    pub fhandle: fhandle3,
    /// List of authentication flavors supported by the server
    pub auth_flavors: Vec<u32>,
}
XdrStruct!(mountres3_ok, fhandle, auth_flavors);

/// One entry of the DUMP result: a client and the directory it mounted
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct mountbody {
    pub ml_hostname: name,
    pub ml_directory: dirpath,
}
XdrStruct!(mountbody, ml_hostname, ml_directory);

/// Result of DUMP
pub type mountlist = List<mountbody>;

/// One exported directory and the groups allowed to mount it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct exportnode {
    pub ex_dir: dirpath,
    pub ex_groups: List<name>,
}
XdrStruct!(exportnode, ex_dir, ex_groups);

/// Result of EXPORT
pub type exports = List<exportnode>;

/// Procedure numbers for the `MOUNT` version 3 protocol
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum MountProgram {
    /// Null procedure for service availability testing
    MOUNTPROC3_NULL = 0,
    /// Mount a file system
    MOUNTPROC3_MNT = 1,
    /// Get list of mounted file systems
    MOUNTPROC3_DUMP = 2,
    /// Unmount a file system
    MOUNTPROC3_UMNT = 3,
    /// Unmount all file systems
    MOUNTPROC3_UMNTALL = 4,
    /// Get list of exported file systems
    MOUNTPROC3_EXPORT = 5,
}
