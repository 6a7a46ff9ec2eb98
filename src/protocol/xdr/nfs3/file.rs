//! Module contains XDR data structures related to file operations for NFS version 3 protocol
//! as defined in RFC 1813.
//!
//! This module includes data structures for the following operations:
//! - GETATTR: Get file attributes (procedure 1)
//! - SETATTR: Set file attributes (procedure 2)
//! - ACCESS: Check access permission (procedure 4)
//! - READLINK: Read from symbolic link (procedure 5)
//! - READ: Read data from a file (procedure 6)
//! - WRITE: Write data to a file (procedure 7)
//! - LINK: Create a hard link (procedure 15)
//! - COMMIT: Commit asynchronously written data to stable storage (procedure 21)

// Preserve original RFC naming conventions (e.g. READ3args, COMMIT3resok)
// for consistency with the NFS version 3 protocol specification
#![allow(non_camel_case_types)]

use num_derive::{FromPrimitive, ToPrimitive};

use super::*;

/// Arguments for the GETATTR procedure (procedure 1) as defined in RFC 1813 section 3.3.1
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GETATTR3args {
    /// File handle of the object whose attributes are requested
    pub object: nfs_fh3,
}
XdrStruct!(GETATTR3args, object);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GETATTR3resok {
    pub obj_attributes: fattr3,
}
XdrStruct!(GETATTR3resok, obj_attributes);

/// Arguments for the SETATTR procedure (procedure 2) as defined in RFC 1813 section 3.3.2
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SETATTR3args {
    /// File handle for target file
    pub object: nfs_fh3,
    /// New attributes to set
    pub new_attributes: sattr3,
    /// Only change attributes if the object's ctime matches
    pub guard: sattrguard3,
}
XdrStruct!(SETATTR3args, object, new_attributes, guard);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SETATTR3resok {
    pub obj_wcc: wcc_data,
}
XdrStruct!(SETATTR3resok, obj_wcc);

/// Arguments for the ACCESS procedure (procedure 4) as defined in RFC 1813 section 3.3.4
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ACCESS3args {
    /// File handle for the object to check
    pub object: nfs_fh3,
    /// Bit mask of `ACCESS3_*` permissions to check
    pub access: u32,
}
XdrStruct!(ACCESS3args, object, access);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ACCESS3resok {
    pub obj_attributes: post_op_attr,
    /// Subset of the requested `ACCESS3_*` bits the caller actually holds
    pub access: u32,
}
XdrStruct!(ACCESS3resok, obj_attributes, access);

/// Arguments for the READLINK procedure (procedure 5) as defined in RFC 1813 section 3.3.5
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READLINK3args {
    pub symlink: nfs_fh3,
}
XdrStruct!(READLINK3args, symlink);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READLINK3resok {
    pub symlink_attributes: post_op_attr,
    pub data: nfspath3,
}
XdrStruct!(READLINK3resok, symlink_attributes, data);

/// Arguments for the READ procedure (procedure 6) as defined in RFC 1813 section 3.3.6
/// Used to read data from a regular file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READ3args {
    /// File handle for the file to be read
    pub file: nfs_fh3,
    /// Position within the file to begin reading
    pub offset: offset3,
    /// Number of bytes of data to read
    pub count: count3,
}
XdrStruct!(READ3args, file, offset, count);

/// Successful response for the READ procedure as defined in RFC 1813 section 3.3.6
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READ3resok {
    /// File attributes after the operation
    pub file_attributes: post_op_attr,
    /// Number of bytes actually read
    pub count: count3,
    /// True if the end of file was reached
    pub eof: bool,
    /// The data read from the file
    pub data: Vec<u8>,
}
XdrStruct!(READ3resok, file_attributes, count, eof, data);

/// Enumeration specifying how data should be written to storage
/// as defined in RFC 1813 section 3.3.7
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum stable_how {
    /// Data may be buffered before writing to stable storage
    #[default]
    UNSTABLE = 0,
    /// Data must be committed to stable storage before returning
    DATA_SYNC = 1,
    /// All file system data and metadata must be committed before returning
    FILE_SYNC = 2,
}
SerializeEnum!(stable_how);
DeserializeEnum!(stable_how);

/// Arguments for the WRITE procedure (procedure 7) as defined in RFC 1813 section 3.3.7
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WRITE3args {
    /// File handle for the file to write
    pub file: nfs_fh3,
    /// Position within the file to begin writing
    pub offset: offset3,
    /// Number of bytes of data to write
    pub count: count3,
    /// How to commit the data to storage
    pub stable: stable_how,
    /// The data to be written
    pub data: Vec<u8>,
}
XdrStruct!(WRITE3args, file, offset, count, stable, data);

/// Successful response for the WRITE procedure as defined in RFC 1813 section 3.3.7
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WRITE3resok {
    /// File attributes before and after the operation
    pub file_wcc: wcc_data,
    /// Number of bytes actually written
    pub count: count3,
    /// How the data was committed to stable storage
    pub committed: stable_how,
    /// Write verifier to detect server restarts
    pub verf: writeverf3,
}
XdrStruct!(WRITE3resok, file_wcc, count, committed, verf);

/// Arguments for the LINK procedure (procedure 15) as defined in RFC 1813 section 3.3.15
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LINK3args {
    /// File handle for the existing file
    pub file: nfs_fh3,
    /// Directory and name for the new link
    pub link: diropargs3,
}
XdrStruct!(LINK3args, file, link);

/// LINK result body, identical for success and failure
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LINK3wcc {
    pub file_attributes: post_op_attr,
    pub linkdir_wcc: wcc_data,
}
XdrStruct!(LINK3wcc, file_attributes, linkdir_wcc);

/// Arguments for the COMMIT procedure (procedure 21) as defined in RFC 1813 section 3.3.21
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct COMMIT3args {
    /// File handle for the file to commit
    pub file: nfs_fh3,
    /// Position within the file to start committing
    pub offset: offset3,
    /// Number of bytes to commit, zero meaning "to end of file"
    pub count: count3,
}
XdrStruct!(COMMIT3args, file, offset, count);

/// Successful response for the COMMIT procedure as defined in RFC 1813 section 3.3.21
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct COMMIT3resok {
    /// File attributes before and after the operation
    pub file_wcc: wcc_data,
    /// Write verifier to detect server restarts
    pub verf: writeverf3,
}
XdrStruct!(COMMIT3resok, file_wcc, verf);
