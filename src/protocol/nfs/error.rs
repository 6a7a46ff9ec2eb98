//! Translation of host I/O errors into NFS and MOUNT statuses.

use std::io;

use crate::protocol::rpc::StatusProcedure;
use crate::protocol::xdr::mount::mountstat3;
use crate::protocol::xdr::nfs3::nfsstat3;

/// Result type for NFS operations
pub type NFSResult<T> = Result<T, nfsstat3>;

/// Host failures other than a missing entry, a denied permission or a path
/// through a non-directory become `SERVERFAULT`, so host-specific detail
/// never reaches the wire.
impl From<&io::Error> for nfsstat3 {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => nfsstat3::NFS3ERR_NOENT,
            io::ErrorKind::PermissionDenied => nfsstat3::NFS3ERR_ACCES,
            io::ErrorKind::NotADirectory => nfsstat3::NFS3ERR_NOTDIR,
            _ => nfsstat3::NFS3ERR_SERVERFAULT,
        }
    }
}

impl From<io::Error> for nfsstat3 {
    fn from(err: io::Error) -> Self {
        nfsstat3::from(&err)
    }
}

impl From<&io::Error> for mountstat3 {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => mountstat3::MNT3ERR_NOENT,
            io::ErrorKind::PermissionDenied => mountstat3::MNT3ERR_ACCES,
            io::ErrorKind::NotADirectory => mountstat3::MNT3ERR_NOTDIR,
            _ => mountstat3::MNT3ERR_SERVERFAULT,
        }
    }
}

/// `status` when procedure `P` may return it, `SERVERFAULT` otherwise.
///
/// Every NFS procedure allows `NFS3ERR_SERVERFAULT`.
pub fn allowed_or_serverfault<P>(status: nfsstat3) -> nfsstat3
where
    P: StatusProcedure<Status = nfsstat3>,
{
    if P::allows(status) {
        status
    } else {
        nfsstat3::NFS3ERR_SERVERFAULT
    }
}

/// Extension trait for Result to convert IO errors to NFS errors
pub trait ResultExt<T> {
    /// Convert an IO error to the matching NFS error
    fn or_nfs_error(self) -> NFSResult<T>;

    /// Convert an IO error to an NFS error procedure `P` is allowed to return
    fn or_nfs_error_for<P>(self) -> NFSResult<T>
    where
        P: StatusProcedure<Status = nfsstat3>;
}

impl<T> ResultExt<T> for Result<T, io::Error> {
    fn or_nfs_error(self) -> NFSResult<T> {
        self.map_err(nfsstat3::from)
    }

    fn or_nfs_error_for<P>(self) -> NFSResult<T>
    where
        P: StatusProcedure<Status = nfsstat3>,
    {
        self.map_err(|e| allowed_or_serverfault::<P>(nfsstat3::from(&e)))
    }
}
