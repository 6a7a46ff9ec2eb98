//! Implementation of the `MKDIR` procedure (procedure 9) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.9.
//!
//! The `MKDIR` procedure creates a new directory in the specified parent
//! directory with the given initial attributes.
//!
//! The result has the same shape as the `CREATE` result.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{MKDIR3args, diropres3ok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Create a directory (`NFSPROC3_MKDIR`)
    Mkdir {
        proc: NFSProgram::NFSPROC3_MKDIR,
        name: "MKDIR",
        args: MKDIR3args,
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
