//! Implementation of the `SYMLINK` procedure (procedure 10) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.10.
//!
//! The `SYMLINK` procedure creates a symbolic link in a directory.
//!
//! The path stored in the link is not interpreted by the server and may name
//! an object that does not exist.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{SYMLINK3args, diropres3ok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Create a symbolic link (`NFSPROC3_SYMLINK`)
    Symlink {
        proc: NFSProgram::NFSPROC3_SYMLINK,
        name: "SYMLINK",
        args: SYMLINK3args,
        status: nfsstat3,
        resok: diropres3ok,
        resfail: wcc_data,
        errors: [
            NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_EXIST, NFS3ERR_NOTDIR, NFS3ERR_NOSPC,
            NFS3ERR_ROFS, NFS3ERR_NAMETOOLONG, NFS3ERR_DQUOT, NFS3ERR_STALE, NFS3ERR_BADHANDLE,
            NFS3ERR_NOTSUPP, NFS3ERR_SERVERFAULT,
        ],
    }
}
