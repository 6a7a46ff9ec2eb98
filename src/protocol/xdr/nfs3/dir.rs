//! Module contains XDR data structures related to directories for NFS version 3 protocol
//! as defined in RFC 1813.
//!
//! This module includes data structures for the following directory operations:
//! - LOOKUP: Look up a filename (procedure 3)
//! - CREATE: Create a regular file (procedure 8)
//! - MKDIR: Create a directory (procedure 9)
//! - SYMLINK: Create a symbolic link (procedure 10)
//! - MKNOD: Create a special device (procedure 11)
//! - REMOVE / RMDIR: Remove a file or directory (procedures 12 and 13)
//! - RENAME: Rename a file or directory (procedure 14)
//! - READDIR: Read from a directory (procedure 16)
//! - READDIRPLUS: Extended read from a directory (procedure 17)

// Preserve original RFC naming conventions (e.g. READDIR3args, MKDIR3args)
// for consistency with the NFS version 3 protocol specification
#![allow(non_camel_case_types)]

use super::super::List;
use super::*;

/// Arguments for the LOOKUP procedure (procedure 3) as defined in RFC 1813 section 3.3.3
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LOOKUP3args {
    /// Directory to search and the name to look up
    pub what: diropargs3,
}
XdrStruct!(LOOKUP3args, what);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LOOKUP3resok {
    /// File handle of the object found
    pub object: nfs_fh3,
    pub obj_attributes: post_op_attr,
    pub dir_attributes: post_op_attr,
}
XdrStruct!(LOOKUP3resok, object, obj_attributes, dir_attributes);

/// Arguments for the CREATE procedure (procedure 8) as defined in RFC 1813 section 3.3.8
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CREATE3args {
    /// Directory in which to create the file and its name
    pub dirops: diropargs3,
    /// Creation mode with initial attributes or exclusive verifier
    pub how: createhow3,
}
XdrStruct!(CREATE3args, dirops, how);

/// Successful result shared by CREATE, MKDIR, SYMLINK and MKNOD
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct diropres3ok {
    /// Handle of the new object, if the server returns one
    pub obj: post_op_fh3,
    pub obj_attributes: post_op_attr,
    pub dir_wcc: wcc_data,
}
XdrStruct!(diropres3ok, obj, obj_attributes, dir_wcc);

/// Arguments for the MKDIR procedure (procedure 9) as defined in RFC 1813 section 3.3.9
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MKDIR3args {
    /// Directory where new directory should be created and its name
    pub dirops: diropargs3,
    /// Initial attributes for the new directory
    pub attributes: sattr3,
}
XdrStruct!(MKDIR3args, dirops, attributes);

/// Arguments for the SYMLINK procedure (procedure 10) as defined in RFC 1813 section 3.3.10
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SYMLINK3args {
    /// Directory where symbolic link should be created and its name
    pub dirops: diropargs3,
    /// Target path and attributes for the symbolic link
    pub symlink: symlinkdata3,
}
XdrStruct!(SYMLINK3args, dirops, symlink);

/// Arguments for the MKNOD procedure (procedure 11) as defined in RFC 1813 section 3.3.11
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MKNOD3args {
    /// Directory where the special file should be created and its name
    pub where_dir: diropargs3,
    /// Type and device information for the special file
    pub what: mknoddata3,
}
XdrStruct!(MKNOD3args, where_dir, what);

/// Arguments for REMOVE (procedure 12) and RMDIR (procedure 13)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct REMOVE3args {
    pub object: diropargs3,
}
XdrStruct!(REMOVE3args, object);

pub type RMDIR3args = REMOVE3args;

/// Successful result of REMOVE and RMDIR
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct REMOVE3resok {
    pub dir_wcc: wcc_data,
}
XdrStruct!(REMOVE3resok, dir_wcc);

/// Arguments for the RENAME procedure (procedure 14) as defined in RFC 1813 section 3.3.14
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RENAME3args {
    pub from: diropargs3,
    pub to: diropargs3,
}
XdrStruct!(RENAME3args, from, to);

/// RENAME result body, identical for success and failure
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RENAME3wcc {
    pub fromdir_wcc: wcc_data,
    pub todir_wcc: wcc_data,
}
XdrStruct!(RENAME3wcc, fromdir_wcc, todir_wcc);

/// Arguments for the READDIR procedure (procedure 16) as defined in RFC 1813 section 3.3.16
///
/// The server returns a variable number of directory entries, up to the
/// specified count limit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIR3args {
    /// File handle for the directory to be read
    pub dir: nfs_fh3,
    /// Where to start reading; zero means the beginning of the directory
    pub cookie: cookie3,
    /// Cookie verifier to detect whether directory has changed
    pub cookieverf: cookieverf3,
    /// Maximum number of bytes of directory information to return
    pub count: count3,
}
XdrStruct!(READDIR3args, dir, cookie, cookieverf, count);

/// Directory entry returned by READDIR operation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct entry3 {
    /// File identifier (inode number)
    pub fileid: fileid3,
    /// Name of the directory entry
    pub name: filename3,
    /// Cookie for the next READDIR operation
    pub cookie: cookie3,
}
XdrStruct!(entry3, fileid, name, cookie);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct dirlist3 {
    pub entries: List<entry3>,
    pub eof: bool,
}
XdrStruct!(dirlist3, entries, eof);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIR3resok {
    pub dir_attributes: post_op_attr,
    pub cookieverf: cookieverf3,
    pub reply: dirlist3,
}
XdrStruct!(READDIR3resok, dir_attributes, cookieverf, reply);

/// Arguments for the READDIRPLUS procedure (procedure 17) as defined in RFC 1813 section 3.3.17
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIRPLUS3args {
    /// Directory file handle
    pub dir: nfs_fh3,
    /// Cookie from previous READDIRPLUS - where to start reading
    pub cookie: cookie3,
    /// Cookie verifier to detect changed directories
    pub cookieverf: cookieverf3,
    /// Maximum number of bytes of directory information to return
    pub dircount: count3,
    /// Maximum size of the whole reply
    pub maxcount: count3,
}
XdrStruct!(READDIRPLUS3args, dir, cookie, cookieverf, dircount, maxcount);

/// Directory entry with attributes and handle for READDIRPLUS
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct entryplus3 {
    pub fileid: fileid3,
    pub name: filename3,
    pub cookie: cookie3,
    pub name_attributes: post_op_attr,
    pub name_handle: post_op_fh3,
}
XdrStruct!(entryplus3, fileid, name, cookie, name_attributes, name_handle);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct dirlistplus3 {
    pub entries: List<entryplus3>,
    pub eof: bool,
}
XdrStruct!(dirlistplus3, entries, eof);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct READDIRPLUS3resok {
    pub dir_attributes: post_op_attr,
    pub cookieverf: cookieverf3,
    pub reply: dirlistplus3,
}
XdrStruct!(READDIRPLUS3resok, dir_attributes, cookieverf, reply);
