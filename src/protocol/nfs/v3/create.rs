//! Implementation of the `CREATE` procedure (procedure 8) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.8.
//!
//! The `CREATE` procedure creates a regular file in a specified directory.
//!
//! The three creation methods are:
//! - UNCHECKED: Creates the file or updates attributes if it exists
//! - GUARDED: Creates the file only if it doesn't exist
//! - EXCLUSIVE: Creates the file only if it doesn't exist, using a unique verifier
//!
//! On successful return, the server provides:
//! - The file handle of the new file
//! - The attributes of the new file
//! - The attributes of the parent directory before and after the operation (weak cache consistency)

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{CREATE3args, diropres3ok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Create a regular file (`NFSPROC3_CREATE`)
    Create {
        proc: NFSProgram::NFSPROC3_CREATE,
        name: "CREATE",
        args: CREATE3args,
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
