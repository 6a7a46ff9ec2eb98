//! Implementation of the `SETATTR` procedure (procedure 2) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.2.
//!
//! The `SETATTR` procedure changes one or more attributes of a file system
//! object. The client sends the object handle, an `sattr3` naming the
//! attributes to change, and an optional guard: when present, the server
//! only applies the change if the object's ctime still equals the guard
//! (and fails with `NFS3ERR_NOT_SYNC` otherwise).
//!
//! Both the success and failure results carry the weak cache consistency
//! data of the object.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::file::{SETATTR3args, SETATTR3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Set file attributes (`NFSPROC3_SETATTR`)
    Setattr {
        proc: NFSProgram::NFSPROC3_SETATTR,
        name: "SETATTR",
        args: SETATTR3args,
        status: nfsstat3,
        resok: SETATTR3resok,
        resfail: wcc_data,
        errors: [
            NFS3ERR_PERM, NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_INVAL, NFS3ERR_NOSPC, NFS3ERR_ROFS,
            NFS3ERR_DQUOT, NFS3ERR_NOT_SYNC, NFS3ERR_STALE, NFS3ERR_BADHANDLE,
            NFS3ERR_SERVERFAULT,
        ],
    }
}
