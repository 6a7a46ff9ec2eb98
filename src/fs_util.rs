//! File System Utilities module converts between local file system metadata and
//! NFS attributes.
//!
//! This module contains functions for:
//! - Building `fattr3` from the result of a host `stat`
//! - Applying the updates of an `sattr3` to a local path

use std::fs::{FileType, Metadata, Permissions};
use std::io;
use std::os::unix::fs::{FileTypeExt, MetadataExt, PermissionsExt};
use std::path::Path;

use filetime::FileTime;
use tokio::fs::OpenOptions;
use tracing::debug;

use crate::protocol::xdr::nfs3;

/// Maps a host file type to `ftype3`.
///
/// Types NFS has no name for map to `NF3NON`.
pub fn file_type_to_ftype3(file_type: FileType) -> nfs3::ftype3 {
    if file_type.is_file() {
        nfs3::ftype3::NF3REG
    } else if file_type.is_dir() {
        nfs3::ftype3::NF3DIR
    } else if file_type.is_symlink() {
        nfs3::ftype3::NF3LNK
    } else if file_type.is_block_device() {
        nfs3::ftype3::NF3BLK
    } else if file_type.is_char_device() {
        nfs3::ftype3::NF3CHR
    } else if file_type.is_socket() {
        nfs3::ftype3::NF3SOCK
    } else if file_type.is_fifo() {
        nfs3::ftype3::NF3FIFO
    } else {
        nfs3::ftype3::NF3NON
    }
}

/// Splits a Linux `dev_t` into its major and minor numbers.
fn rdev_to_specdata3(rdev: u64) -> nfs3::specdata3 {
    let major = ((rdev >> 8) & 0xfff) | ((rdev >> 32) & !0xfff);
    let minor = (rdev & 0xff) | ((rdev >> 12) & !0xff);
    nfs3::specdata3 { specdata1: major as u32, specdata2: minor as u32 }
}

/// Converts filesystem metadata to NFS file attributes
///
/// # Arguments
///
/// * `fid` - NFS file ID to use for the file
/// * `meta` - Filesystem metadata to convert, as returned by `symlink_metadata`
///
/// # Returns
///
/// NFS file attributes structure. `fsid` is the host device number and
/// `used` counts allocated 512-byte blocks.
pub fn metadata_to_fattr3(fid: nfs3::fileid3, meta: &Metadata) -> nfs3::fattr3 {
    let ftype = file_type_to_ftype3(meta.file_type());
    let rdev = match ftype {
        nfs3::ftype3::NF3BLK | nfs3::ftype3::NF3CHR => rdev_to_specdata3(meta.rdev()),
        _ => nfs3::specdata3::default(),
    };
    nfs3::fattr3 {
        ftype,
        mode: meta.mode() & 0o7777,
        nlink: meta.nlink().min(u32::MAX as u64) as u32,
        uid: meta.uid(),
        gid: meta.gid(),
        size: meta.size(),
        used: meta.blocks().saturating_mul(512),
        rdev,
        fsid: meta.dev(),
        fileid: fid,
        atime: FileTime::from_last_access_time(meta).into(),
        mtime: FileTime::from_last_modification_time(meta).into(),
        ctime: FileTime::from_unix_time(meta.ctime(), meta.ctime_nsec() as u32).into(),
    }
}

/// Sets attributes of a file path based on NFS SETATTR operation
///
/// Size is applied first and times last, since resizing moves mtime. The
/// first failure stops the update and is returned; earlier changes stay
/// applied.
///
/// # Arguments
///
/// * `path` - Path to the file or directory
/// * `setattr` - NFS attributes to set
pub async fn path_setattr(path: &Path, setattr: &nfs3::sattr3) -> io::Result<()> {
    if let Some(size) = setattr.size {
        debug!(" -- set size {:?} {:?}", path, size);
        let file = OpenOptions::new().write(true).truncate(false).open(path).await?;
        file.set_len(size).await?;
    }
    if let Some(mode) = setattr.mode {
        debug!(" -- set permissions {:?} {:o}", path, mode);
        tokio::fs::set_permissions(path, Permissions::from_mode(mode & 0o7777)).await?;
    }
    let owned = path.to_path_buf();
    let setattr = *setattr;
    tokio::task::spawn_blocking(move || set_owner_and_times(&owned, &setattr))
        .await
        .map_err(io::Error::other)?
}

/// Blocking half of [`path_setattr`].
fn set_owner_and_times(path: &Path, setattr: &nfs3::sattr3) -> io::Result<()> {
    if setattr.uid.is_some() || setattr.gid.is_some() {
        debug!(" -- set owner {:?} {:?}:{:?}", path, setattr.uid, setattr.gid);
        std::os::unix::fs::chown(path, setattr.uid, setattr.gid)?;
    }
    let now = FileTime::now();
    let resolve = |time: &nfs3::set_time| match time {
        nfs3::set_time::DONT_CHANGE => None,
        nfs3::set_time::SET_TO_SERVER_TIME => Some(now),
        nfs3::set_time::SET_TO_CLIENT_TIME(time) => Some(FileTime::from(*time)),
    };
    match (resolve(&setattr.atime), resolve(&setattr.mtime)) {
        (None, None) => {}
        (Some(atime), Some(mtime)) => filetime::set_file_times(path, atime, mtime)?,
        (Some(atime), None) => filetime::set_file_atime(path, atime)?,
        (None, Some(mtime)) => filetime::set_file_mtime(path, mtime)?,
    }
    Ok(())
}
