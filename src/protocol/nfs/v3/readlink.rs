//! Implementation of the `READLINK` procedure (procedure 5) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.5.
//!
//! The `READLINK` procedure reads the path stored in a symbolic link.
//!
//! If the file handle does not refer to an object of type `NF3LNK` the server
//! returns `NFS3ERR_INVAL`.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::file::{READLINK3args, READLINK3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Read from a symbolic link (`NFSPROC3_READLINK`)
    Readlink {
        proc: NFSProgram::NFSPROC3_READLINK,
        name: "READLINK",
        args: READLINK3args,
        status: nfsstat3,
        resok: READLINK3resok,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_IO, NFS3ERR_INVAL, NFS3ERR_ACCES, NFS3ERR_STALE, NFS3ERR_BADHANDLE,
            NFS3ERR_NOTSUPP, NFS3ERR_SERVERFAULT,
        ],
    }
}
