//! Implementation of the MNT procedure (procedure 1) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.2.
//!
//! The MNT procedure establishes a mount point for an NFS client.
//! It is used by NFS clients to:
//! - Get the initial file handle for the root of a mounted file system
//! - Validate that the server exports the requested path
//! - Determine supported authentication flavors for the mount
//!
//! MNT takes a directory path as input and returns a file handle for that
//! path and a list of acceptable authentication flavors if the mount is successful.
//! A failed mount returns the status alone.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::mount::{dirpath, mountres3_ok, mountstat3, MountProgram};

status_procedure! {
    /// Mount an exported directory (`MOUNTPROC3_MNT`)
    Mnt {
        proc: MountProgram::MOUNTPROC3_MNT,
        name: "MNT",
        args: dirpath,
        status: mountstat3,
        resok: mountres3_ok,
        resfail: (),
        errors: [
            MNT3ERR_PERM, MNT3ERR_NOENT, MNT3ERR_IO, MNT3ERR_ACCES, MNT3ERR_NOTDIR,
            MNT3ERR_INVAL, MNT3ERR_NAMETOOLONG, MNT3ERR_NOTSUPP, MNT3ERR_SERVERFAULT,
        ],
    }
}
