//! The module defines XDR data types and constants for Network File System (NFS)
//! version 3, as defined in RFC 1813.
//!
//! NFS version 3 is a stateless distributed file system protocol
//! that provides transparent remote access to shared file systems over a network.
//! This module holds the constants, basic data types and the attribute
//! structures (`fattr3`, `sattr3`, `wcc_data`) shared by all procedures.
//! Per-procedure argument and result structures live in [`file`], [`dir`] and [`fs`].

#![allow(non_camel_case_types)]

use std::fmt;
use std::io::{Read, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use num_derive::{FromPrimitive, ToPrimitive};

use crate::{DeserializeEnum, SerializeEnum};

use super::utils;
use super::{deserialize, Deserialize, Serialize, XdrSize};
use super::{DeserializeStruct, SerializeStruct, XdrStruct};

pub mod dir;
pub mod file;
pub mod fs;

// Section 2.2 Constants
/// The RPC program number for NFS version 3 service.
pub const PROGRAM: u32 = 100003;
/// The version number for NFS version 3 protocol.
pub const VERSION: u32 = 3;

// Section 2.4 Sizes
//
/// The maximum size in bytes of the opaque file handle.
pub const NFS3_FHSIZE: u32 = 64;

/// The size in bytes of the opaque cookie verifier passed by
/// READDIR and READDIRPLUS.
pub const NFS3_COOKIEVERFSIZE: u32 = 8;

/// The size in bytes of the opaque verifier used for
/// exclusive CREATE.
pub const NFS3_CREATEVERFSIZE: u32 = 8;

/// The size in bytes of the opaque verifier used for
/// asynchronous WRITE.
pub const NFS3_WRITEVERFSIZE: u32 = 8;

// Section 2.5 Basic Data Types
/// A string type used in NFS for filenames and paths.
///
/// Filenames are not required to be UTF-8, so this is a byte vector
/// with the wire form of an XDR `string`.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct nfsstring(pub Vec<u8>);

impl nfsstring {
    /// Returns the length of the string in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for nfsstring {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for nfsstring {
    fn from(value: &[u8]) -> Self {
        Self(value.into())
    }
}

impl From<&str> for nfsstring {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().into())
    }
}

impl AsRef<[u8]> for nfsstring {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::ops::Deref for nfsstring {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for nfsstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for nfsstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Serialize for nfsstring {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.0.serialize(dest)
    }
}

impl Deserialize for nfsstring {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.0.deserialize(src)
    }
}

impl XdrSize for nfsstring {
    fn packed_size(&self) -> usize {
        self.0.packed_size()
    }
}

/// Procedure numbers for NFS version 3 protocol.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum NFSProgram {
    /// Do nothing - used primarily for performance measurement
    NFSPROC3_NULL = 0,
    /// Get file attributes
    NFSPROC3_GETATTR = 1,
    /// Set file attributes
    NFSPROC3_SETATTR = 2,
    /// Look up filename
    NFSPROC3_LOOKUP = 3,
    /// Check file access permission
    NFSPROC3_ACCESS = 4,
    /// Read from symbolic link
    NFSPROC3_READLINK = 5,
    /// Read from file
    NFSPROC3_READ = 6,
    /// Write to file
    NFSPROC3_WRITE = 7,
    /// Create file
    NFSPROC3_CREATE = 8,
    /// Create directory
    NFSPROC3_MKDIR = 9,
    /// Create symbolic link
    NFSPROC3_SYMLINK = 10,
    /// Create special device
    NFSPROC3_MKNOD = 11,
    /// Remove file
    NFSPROC3_REMOVE = 12,
    /// Remove directory
    NFSPROC3_RMDIR = 13,
    /// Rename file or directory
    NFSPROC3_RENAME = 14,
    /// Create hard link
    NFSPROC3_LINK = 15,
    /// Read directory
    NFSPROC3_READDIR = 16,
    /// Extended read directory
    NFSPROC3_READDIRPLUS = 17,
    /// Get file system statistics
    NFSPROC3_FSSTAT = 18,
    /// Get file system information
    NFSPROC3_FSINFO = 19,
    /// Get path configuration
    NFSPROC3_PATHCONF = 20,
    /// Commit cached data
    NFSPROC3_COMMIT = 21,
}

/// Opaque byte type as defined in RFC 1813 section 2.5
pub type opaque = u8;
/// String used for a component of a pathname
pub type filename3 = nfsstring;
/// String used for a pathname or a symbolic link contents
pub type nfspath3 = nfsstring;
/// A unique number that identifies a file within a filesystem
pub type fileid3 = u64;
/// Directory entry position cookie used by READDIR and READDIRPLUS
pub type cookie3 = u64;
/// Used to detect when a directory being read has changed
pub type cookieverf3 = [opaque; NFS3_COOKIEVERFSIZE as usize];
/// Used in CREATE operations with EXCLUSIVE mode to ensure uniqueness
pub type createverf3 = [opaque; NFS3_CREATEVERFSIZE as usize];
/// Used to detect server reboots between asynchronous WRITE and COMMIT operations
pub type writeverf3 = [opaque; NFS3_WRITEVERFSIZE as usize];
pub type uid3 = u32;
pub type gid3 = u32;
/// File size in bytes
pub type size3 = u64;
/// Position within a file
pub type offset3 = u64;
/// File type and permission bits
pub type mode3 = u32;
/// Count of bytes or entries
pub type count3 = u32;

/// Status codes returned by NFS version 3 operations
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum nfsstat3 {
    /// Indicates the call completed successfully.
    #[default]
    NFS3_OK = 0,
    /// Not owner. The operation was not allowed because the
    /// caller is either not a privileged user (root) or not the
    /// owner of the target of the operation.
    NFS3ERR_PERM = 1,
    /// No such file or directory. The file or directory name
    /// specified does not exist.
    NFS3ERR_NOENT = 2,
    /// I/O error. A hard error (for example, a disk error)
    /// occurred while processing the requested operation.
    NFS3ERR_IO = 5,
    /// I/O error. No such device or address.
    NFS3ERR_NXIO = 6,
    /// Permission denied. The caller does not have the correct
    /// permission to perform the requested operation. Contrast
    /// this with NFS3ERR_PERM, which restricts itself to owner
    /// or privileged user permission failures.
    NFS3ERR_ACCES = 13,
    /// File exists. The file specified already exists.
    NFS3ERR_EXIST = 17,
    /// Attempt to do a cross-device hard link.
    NFS3ERR_XDEV = 18,
    /// No such device.
    NFS3ERR_NODEV = 19,
    /// Not a directory. The caller specified a non-directory in
    /// a directory operation.
    NFS3ERR_NOTDIR = 20,
    /// Is a directory. The caller specified a directory in a
    /// non-directory operation.
    NFS3ERR_ISDIR = 21,
    /// Invalid argument or unsupported argument for an
    /// operation. Two examples are attempting a READLINK on an
    /// object other than a symbolic link or attempting to
    /// SETATTR a time field on a server that does not support
    /// this operation.
    NFS3ERR_INVAL = 22,
    /// File too large. The operation would have caused a file to
    /// grow beyond the server's limit.
    NFS3ERR_FBIG = 27,
    /// No space left on device. The operation would have caused
    /// the server's file system to exceed its limit.
    NFS3ERR_NOSPC = 28,
    /// Read-only file system. A modifying operation was
    /// attempted on a read-only file system.
    NFS3ERR_ROFS = 30,
    /// Too many hard links.
    NFS3ERR_MLINK = 31,
    /// The filename in an operation was too long.
    NFS3ERR_NAMETOOLONG = 63,
    /// An attempt was made to remove a directory that was not empty.
    NFS3ERR_NOTEMPTY = 66,
    /// Resource (quota) hard limit exceeded. The user's resource
    /// limit on the server has been exceeded.
    NFS3ERR_DQUOT = 69,
    /// Invalid file handle. The file handle given in the
    /// arguments was invalid. The file referred to by that file
    /// handle no longer exists or access to it has been
    /// revoked.
    NFS3ERR_STALE = 70,
    /// Too many levels of remote in path. The file handle given
    /// in the arguments referred to a file on a non-local file
    /// system on the server.
    NFS3ERR_REMOTE = 71,
    /// Illegal NFS file handle. The file handle failed internal
    /// consistency checks.
    NFS3ERR_BADHANDLE = 10001,
    /// Update synchronization mismatch was detected during a
    /// SETATTR operation.
    NFS3ERR_NOT_SYNC = 10002,
    /// READDIR or READDIRPLUS cookie is stale
    NFS3ERR_BAD_COOKIE = 10003,
    /// Operation is not supported.
    NFS3ERR_NOTSUPP = 10004,
    /// Buffer or request is too small.
    NFS3ERR_TOOSMALL = 10005,
    /// An error occurred on the server which does not map to any
    /// of the legal NFS version 3 protocol error values.  The
    /// client should translate this into an appropriate error.
    /// UNIX clients may choose to translate this to EIO.
    NFS3ERR_SERVERFAULT = 10006,
    /// An attempt was made to create an object of a type not
    /// supported by the server.
    NFS3ERR_BADTYPE = 10007,
    /// The server initiated the request, but was not able to
    /// complete it in a timely fashion. The client should wait
    /// and then try the request with a new RPC transaction ID.
    NFS3ERR_JUKEBOX = 10008,
}
SerializeEnum!(nfsstat3);
DeserializeEnum!(nfsstat3);

/// File type enumeration as defined in RFC 1813 section 2.3.5
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum ftype3 {
    /// Host file type with no NFS counterpart
    #[default]
    NF3NON = 0,
    /// Regular File
    NF3REG = 1,
    /// Directory
    NF3DIR = 2,
    /// Block Special Device
    NF3BLK = 3,
    /// Character Special Device
    NF3CHR = 4,
    /// Symbolic Link
    NF3LNK = 5,
    /// Socket
    NF3SOCK = 6,
    /// Named Pipe
    NF3FIFO = 7,
}
SerializeEnum!(ftype3);
DeserializeEnum!(ftype3);

/// Major and minor device numbers of a character or block special device
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct specdata3 {
    /// Major device number
    pub specdata1: u32,
    /// Minor device number
    pub specdata2: u32,
}
XdrStruct!(specdata3, specdata1, specdata2);

/// The NFS version 3 file handle
///
/// The server is responsible for the internal format and interpretation of
/// the file handle; on the wire it is variable-length opaque data of at most
/// [`NFS3_FHSIZE`] bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct nfs_fh3 {
    /// Raw file handle data (up to NFS3_FHSIZE bytes)
    pub data: Vec<u8>,
}

impl From<Vec<u8>> for nfs_fh3 {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl Serialize for nfs_fh3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        if self.data.len() > NFS3_FHSIZE as usize {
            return Err(utils::invalid_data("file handle exceeds NFS3_FHSIZE"));
        }
        self.data.serialize(dest)
    }
}

impl Deserialize for nfs_fh3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let length = deserialize::<u32>(src)? as usize;
        if length > NFS3_FHSIZE as usize {
            return Err(utils::invalid_data(&format!(
                "file handle of {length} bytes exceeds NFS3_FHSIZE"
            )));
        }
        self.data.resize(length, 0);
        src.read_exact(&mut self.data)?;
        utils::read_padding(length, src)
    }
}

impl XdrSize for nfs_fh3 {
    fn packed_size(&self) -> usize {
        self.data.packed_size()
    }
}

/// NFS version 3 time structure
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct nfstime3 {
    /// Seconds since Unix epoch (January 1, 1970)
    pub seconds: u32,
    /// Nanoseconds (0-999999999)
    pub nseconds: u32,
}
XdrStruct!(nfstime3, seconds, nseconds);

impl From<nfstime3> for filetime::FileTime {
    fn from(time: nfstime3) -> Self {
        filetime::FileTime::from_unix_time(time.seconds as i64, time.nseconds)
    }
}

impl From<filetime::FileTime> for nfstime3 {
    /// Times before the epoch or past 2106 are clamped to the `u32` range.
    fn from(time: filetime::FileTime) -> Self {
        nfstime3 {
            seconds: time.unix_seconds().clamp(0, u32::MAX as i64) as u32,
            nseconds: time.nanoseconds(),
        }
    }
}

impl From<SystemTime> for nfstime3 {
    fn from(time: SystemTime) -> Self {
        let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        nfstime3 {
            seconds: since_epoch.as_secs().min(u32::MAX as u64) as u32,
            nseconds: since_epoch.subsec_nanos(),
        }
    }
}

impl From<nfstime3> for SystemTime {
    fn from(time: nfstime3) -> Self {
        UNIX_EPOCH + Duration::new(time.seconds as u64, time.nseconds)
    }
}

/// File attributes in NFS version 3 as defined in RFC 1813 section 2.3.5
///
/// Every field is fixed-size, so the encoded form is always
/// [`fattr3::XDR_SIZE`] bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct fattr3 {
    /// Type of file (regular, directory, symbolic link, etc.)
    pub ftype: ftype3,
    /// File access mode bits
    pub mode: mode3,
    /// Number of hard links to the file
    pub nlink: u32,
    /// User ID of the file owner
    pub uid: uid3,
    /// Group ID of the file's group
    pub gid: gid3,
    /// File size in bytes
    pub size: size3,
    /// Size in bytes actually allocated to the file on the server's file system
    pub used: size3,
    /// Device numbers for character or block special files
    pub rdev: specdata3,
    /// File system identifier
    pub fsid: u64,
    /// File identifier (inode number) within its file system
    pub fileid: fileid3,
    /// Time of last access to the file data
    pub atime: nfstime3,
    /// Time of last modification to the file data
    pub mtime: nfstime3,
    /// Time of last status change
    pub ctime: nfstime3,
}
DeserializeStruct!(
    fattr3, ftype, mode, nlink, uid, gid, size, used, rdev, fsid, fileid, atime, mtime, ctime
);
SerializeStruct!(
    fattr3, ftype, mode, nlink, uid, gid, size, used, rdev, fsid, fileid, atime, mtime, ctime
);

impl fattr3 {
    /// Encoded size of every `fattr3`.
    pub const XDR_SIZE: usize = 84;
}

impl XdrSize for fattr3 {
    fn packed_size(&self) -> usize {
        Self::XDR_SIZE
    }
}

/// Attributes used in weak cache consistency checking as defined in RFC 1813 section 2.3.8
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct wcc_attr {
    /// File size in bytes
    pub size: size3,
    /// Last modification time of the file
    pub mtime: nfstime3,
    /// Last status change time of the file
    pub ctime: nfstime3,
}
SerializeStruct!(wcc_attr, size, mtime, ctime);
DeserializeStruct!(wcc_attr, size, mtime, ctime);

impl wcc_attr {
    /// Encoded size of every `wcc_attr`.
    pub const XDR_SIZE: usize = 24;
}

impl XdrSize for wcc_attr {
    fn packed_size(&self) -> usize {
        Self::XDR_SIZE
    }
}

impl From<&fattr3> for wcc_attr {
    fn from(attr: &fattr3) -> Self {
        wcc_attr { size: attr.size, mtime: attr.mtime, ctime: attr.ctime }
    }
}

/// Pre-operation attributes: the file state before an operation, if known
pub type pre_op_attr = Option<wcc_attr>;

/// Post-operation attributes: the file state after an operation, if known.
/// Returned in almost all NFS procedure responses.
pub type post_op_attr = Option<fattr3>;

/// Weak cache consistency data as defined in RFC 1813 section 2.3.8
///
/// Returned by operations that modify a file or directory so the client can
/// tell whether its cached attributes are still current. `wcc_data::default()`
/// has both halves absent and encodes to 8 bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct wcc_data {
    /// File attributes before operation
    pub before: pre_op_attr,
    /// File attributes after operation
    pub after: post_op_attr,
}
XdrStruct!(wcc_data, before, after);

/// Optional file handle response
pub type post_op_fh3 = Option<nfs_fh3>;

/// Optional file mode for SETATTR operations
pub type set_mode3 = Option<mode3>;
/// Optional user ID for SETATTR operations
pub type set_uid3 = Option<uid3>;
/// Optional group ID for SETATTR operations
pub type set_gid3 = Option<gid3>;
/// Optional file size for SETATTR operations
pub type set_size3 = Option<size3>;

/// How a SETATTR operation changes a file time (`time_how` in RFC 1813).
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum set_time {
    /// Leave the time unchanged
    #[default]
    DONT_CHANGE,
    /// Set the time to the server's current time
    SET_TO_SERVER_TIME,
    /// Set the time to a client-provided value
    SET_TO_CLIENT_TIME(nfstime3),
}

/// Last access time update of a SETATTR operation
pub type set_atime = set_time;
/// Last modification time update of a SETATTR operation
pub type set_mtime = set_time;

impl Serialize for set_time {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            set_time::DONT_CHANGE => 0_u32.serialize(dest),
            set_time::SET_TO_SERVER_TIME => 1_u32.serialize(dest),
            set_time::SET_TO_CLIENT_TIME(v) => {
                2_u32.serialize(dest)?;
                v.serialize(dest)
            }
        }
    }
}

impl Deserialize for set_time {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = match deserialize::<u32>(src)? {
            0 => set_time::DONT_CHANGE,
            1 => set_time::SET_TO_SERVER_TIME,
            2 => set_time::SET_TO_CLIENT_TIME(deserialize(src)?),
            c => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid time_how value: {c}"),
                ));
            }
        };

        Ok(())
    }
}

impl XdrSize for set_time {
    fn packed_size(&self) -> usize {
        match self {
            set_time::SET_TO_CLIENT_TIME(t) => 4 + t.packed_size(),
            _ => 4,
        }
    }
}

/// Set of file attributes to change in SETATTR, CREATE, MKDIR, SYMLINK and MKNOD
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct sattr3 {
    /// File mode (permissions)
    pub mode: set_mode3,
    /// User ID of owner
    pub uid: set_uid3,
    /// Group ID of owner
    pub gid: set_gid3,
    /// File size
    pub size: set_size3,
    /// Last access time
    pub atime: set_atime,
    /// Last modification time
    pub mtime: set_mtime,
}
XdrStruct!(sattr3, mode, uid, gid, size, atime, mtime);

/// Arguments for directory operations (specifying directory handle and name)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct diropargs3 {
    /// Directory file handle
    pub dir: nfs_fh3,
    /// Name within the directory
    pub name: filename3,
}
XdrStruct!(diropargs3, dir, name);

/// Data for creating a symbolic link
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct symlinkdata3 {
    /// Attributes for the symbolic link
    pub symlink_attributes: sattr3,
    /// Target path for the symbolic link
    pub symlink_data: nfspath3,
}
XdrStruct!(symlinkdata3, symlink_attributes, symlink_data);

/// Access permission to read file data or read a directory as defined in RFC 1813 section 3.3.4
pub const ACCESS3_READ: u32 = 0x0001;
/// Access permission to look up names in a directory
pub const ACCESS3_LOOKUP: u32 = 0x0002;
/// Access permission to modify the contents of an existing file
pub const ACCESS3_MODIFY: u32 = 0x0004;
/// Access permission to grow the file's size or extend a directory by adding entries
pub const ACCESS3_EXTEND: u32 = 0x0008;
/// Access permission to delete a file or directory entry
pub const ACCESS3_DELETE: u32 = 0x0010;
/// Access permission to execute a file or traverse a directory
pub const ACCESS3_EXECUTE: u32 = 0x0020;

/// File creation modes for CREATE operations
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum createmode3 {
    /// Normal file creation - doesn't error if file exists
    #[default]
    UNCHECKED = 0,
    /// Return error if file exists
    GUARDED = 1,
    /// Use exclusive create mechanism (with verifier)
    EXCLUSIVE = 2,
}
SerializeEnum!(createmode3);
DeserializeEnum!(createmode3);

/// How CREATE should create the file, discriminated by [`createmode3`]
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum createhow3 {
    UNCHECKED(sattr3),
    GUARDED(sattr3),
    EXCLUSIVE(createverf3),
}

impl Default for createhow3 {
    fn default() -> Self {
        createhow3::UNCHECKED(sattr3::default())
    }
}

impl createhow3 {
    pub fn mode(&self) -> createmode3 {
        match self {
            createhow3::UNCHECKED(_) => createmode3::UNCHECKED,
            createhow3::GUARDED(_) => createmode3::GUARDED,
            createhow3::EXCLUSIVE(_) => createmode3::EXCLUSIVE,
        }
    }
}

impl Serialize for createhow3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.mode().serialize(dest)?;
        match self {
            createhow3::UNCHECKED(attr) | createhow3::GUARDED(attr) => attr.serialize(dest),
            createhow3::EXCLUSIVE(verf) => verf.serialize(dest),
        }
    }
}

impl Deserialize for createhow3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = match deserialize::<createmode3>(src)? {
            createmode3::UNCHECKED => createhow3::UNCHECKED(deserialize(src)?),
            createmode3::GUARDED => createhow3::GUARDED(deserialize(src)?),
            createmode3::EXCLUSIVE => createhow3::EXCLUSIVE(deserialize(src)?),
        };
        Ok(())
    }
}

impl XdrSize for createhow3 {
    fn packed_size(&self) -> usize {
        4 + match self {
            createhow3::UNCHECKED(attr) | createhow3::GUARDED(attr) => attr.packed_size(),
            createhow3::EXCLUSIVE(verf) => verf.packed_size(),
        }
    }
}

/// Guard condition for SETATTR operations based on ctime
pub type sattrguard3 = Option<nfstime3>;

/// Attributes and device numbers for a new character or block device
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct devicedata3 {
    pub dev_attributes: sattr3,
    pub spec: specdata3,
}
XdrStruct!(devicedata3, dev_attributes, spec);

/// Type-specific data of a MKNOD call, discriminated by [`ftype3`]
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum mknoddata3 {
    NF3CHR(devicedata3),
    NF3BLK(devicedata3),
    NF3SOCK(sattr3),
    NF3FIFO(sattr3),
    /// Any other file type carries no data. Encoding fails when this holds
    /// one of the types above.
    Other(ftype3),
}

impl Default for mknoddata3 {
    fn default() -> Self {
        mknoddata3::Other(ftype3::NF3REG)
    }
}

impl mknoddata3 {
    pub fn ftype(&self) -> ftype3 {
        match self {
            mknoddata3::NF3CHR(_) => ftype3::NF3CHR,
            mknoddata3::NF3BLK(_) => ftype3::NF3BLK,
            mknoddata3::NF3SOCK(_) => ftype3::NF3SOCK,
            mknoddata3::NF3FIFO(_) => ftype3::NF3FIFO,
            mknoddata3::Other(t) => *t,
        }
    }
}

impl Serialize for mknoddata3 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        if let mknoddata3::Other(
            t @ (ftype3::NF3CHR | ftype3::NF3BLK | ftype3::NF3SOCK | ftype3::NF3FIFO),
        ) = self
        {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{t:?} mknod data needs its own variant"),
            ));
        }
        self.ftype().serialize(dest)?;
        match self {
            mknoddata3::NF3CHR(dev) | mknoddata3::NF3BLK(dev) => dev.serialize(dest),
            mknoddata3::NF3SOCK(attr) | mknoddata3::NF3FIFO(attr) => attr.serialize(dest),
            mknoddata3::Other(_) => Ok(()),
        }
    }
}

impl Deserialize for mknoddata3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = match deserialize::<ftype3>(src)? {
            ftype3::NF3CHR => mknoddata3::NF3CHR(deserialize(src)?),
            ftype3::NF3BLK => mknoddata3::NF3BLK(deserialize(src)?),
            ftype3::NF3SOCK => mknoddata3::NF3SOCK(deserialize(src)?),
            ftype3::NF3FIFO => mknoddata3::NF3FIFO(deserialize(src)?),
            other => mknoddata3::Other(other),
        };
        Ok(())
    }
}

impl XdrSize for mknoddata3 {
    fn packed_size(&self) -> usize {
        4 + match self {
            mknoddata3::NF3CHR(dev) | mknoddata3::NF3BLK(dev) => dev.packed_size(),
            mknoddata3::NF3SOCK(attr) | mknoddata3::NF3FIFO(attr) => attr.packed_size(),
            mknoddata3::Other(_) => 0,
        }
    }
}
