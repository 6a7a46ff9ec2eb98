//! Implementation of the `WRITE` procedure (procedure 7) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.7.
//!
//! The `WRITE` procedure writes data to a regular file.
//!
//! The `stable` argument tells how far the data must be committed before
//! the server replies. `UNSTABLE` writes are later made durable with
//! `COMMIT`; the write verifier in the result lets the client detect a
//! server restart that lost such data.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::file::{WRITE3args, WRITE3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, wcc_data};

status_procedure! {
    /// Write to a file (`NFSPROC3_WRITE`)
    Write {
        proc: NFSProgram::NFSPROC3_WRITE,
        name: "WRITE",
        args: WRITE3args,
        status: nfsstat3,
        resok: WRITE3resok,
        resfail: wcc_data,
        errors: [
            NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_FBIG, NFS3ERR_DQUOT, NFS3ERR_NOSPC, NFS3ERR_ROFS,
            NFS3ERR_INVAL, NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
