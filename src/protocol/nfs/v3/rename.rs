//! Implementation of the `RENAME` procedure (procedure 14) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.14.
//!
//! The `RENAME` procedure changes the name of a file system object, possibly
//! moving it to another directory of the same file system.
//!
//! The client specifies:
//! - The file handle and filename identifying the source object
//! - The file handle and filename identifying the target location
//!
//! Both results carry the weak cache consistency data of the source and the
//! target directory.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{RENAME3args, RENAME3wcc};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3};

status_procedure! {
    /// Rename a file or directory (`NFSPROC3_RENAME`)
    Rename {
        proc: NFSProgram::NFSPROC3_RENAME,
        name: "RENAME",
        args: RENAME3args,
        status: nfsstat3,
        resok: RENAME3wcc,
        resfail: RENAME3wcc,
        errors: [
            NFS3ERR_NOENT, NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_EXIST, NFS3ERR_XDEV,
            NFS3ERR_NOTDIR, NFS3ERR_ISDIR, NFS3ERR_INVAL, NFS3ERR_NOSPC, NFS3ERR_ROFS,
            NFS3ERR_MLINK, NFS3ERR_NAMETOOLONG, NFS3ERR_NOTEMPTY, NFS3ERR_DQUOT, NFS3ERR_STALE,
            NFS3ERR_BADHANDLE, NFS3ERR_NOTSUPP, NFS3ERR_SERVERFAULT,
        ],
    }
}
