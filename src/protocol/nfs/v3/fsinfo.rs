//! Implementation of the `FSINFO` procedure (procedure 19) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.19.
//!
//! The `FSINFO` procedure retrieves static information about the exported file
//! system: transfer sizes, server time precision, maximum file size and the
//! `FSF_*` properties.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::fs::{FSINFO3args, fsinfo3};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Get static file system information (`NFSPROC3_FSINFO`)
    Fsinfo {
        proc: NFSProgram::NFSPROC3_FSINFO,
        name: "FSINFO",
        args: FSINFO3args,
        status: nfsstat3,
        resok: fsinfo3,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
