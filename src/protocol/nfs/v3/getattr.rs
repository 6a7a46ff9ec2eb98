//! Implementation of the `GETATTR` procedure (procedure 1) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.1.
//!
//! The `GETATTR` procedure retrieves the attributes of a file system object.
//! Clients use it to check whether cached attributes are still valid and to
//! get the initial attributes of files and directories.
//!
//! The result carries the complete `fattr3` structure of RFC 1813 section
//! 2.3.5 on success and nothing on failure.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::file::{GETATTR3args, GETATTR3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3};

status_procedure! {
    /// Get file attributes (`NFSPROC3_GETATTR`)
    Getattr {
        proc: NFSProgram::NFSPROC3_GETATTR,
        name: "GETATTR",
        args: GETATTR3args,
        status: nfsstat3,
        resok: GETATTR3resok,
        resfail: (),
        errors: [
            NFS3ERR_IO, NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
