//! Implementation of the `FSSTAT` procedure (procedure 18) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.18.
//!
//! The `FSSTAT` procedure retrieves volatile file system state: total, free
//! and available bytes and file slots, and for how long the figures remain
//! valid (`invarsec`).

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::fs::{FSSTAT3args, FSSTAT3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Get dynamic file system information (`NFSPROC3_FSSTAT`)
    Fsstat {
        proc: NFSProgram::NFSPROC3_FSSTAT,
        name: "FSSTAT",
        args: FSSTAT3args,
        status: nfsstat3,
        resok: FSSTAT3resok,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_IO, NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
