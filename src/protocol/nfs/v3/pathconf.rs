//! Implementation of the `PATHCONF` procedure (procedure 20) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.20.
//!
//! The `PATHCONF` procedure retrieves the POSIX pathconf information of a
//! file or directory: link and name limits and name handling rules.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::fs::{PATHCONF3args, PATHCONF3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Retrieve POSIX information (`NFSPROC3_PATHCONF`)
    Pathconf {
        proc: NFSProgram::NFSPROC3_PATHCONF,
        name: "PATHCONF",
        args: PATHCONF3args,
        status: nfsstat3,
        resok: PATHCONF3resok,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
