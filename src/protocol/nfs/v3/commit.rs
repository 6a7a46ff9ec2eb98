//! Implementation of the `COMMIT` procedure (procedure 21) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.21.
//!
//! The `COMMIT` procedure forces data previously written with `stable` set to
//! `UNSTABLE` onto stable storage. A `count` of 0 commits everything from
//! `offset` to the end of the file.
//!
//! The write verifier in the result must be compared with the one returned
//! by the `WRITE` calls to detect a server restart.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::file::{COMMIT3args, COMMIT3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Commit cached data on the server to stable storage (`NFSPROC3_COMMIT`)
    Commit {
        proc: NFSProgram::NFSPROC3_COMMIT,
        name: "COMMIT",
        args: COMMIT3args,
        status: nfsstat3,
        resok: COMMIT3resok,
        resfail: wcc_data,
        errors: [
            NFS3ERR_IO, NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
