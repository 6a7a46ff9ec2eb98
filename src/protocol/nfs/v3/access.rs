//! Implementation of the `ACCESS` procedure (procedure 4) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.4.
//!
//! The `ACCESS` procedure determines the access rights that the caller, as
//! identified by its credentials, has on a file system object. The client
//! sends a bit mask built from the `ACCESS3_*` constants and the server
//! answers with the subset it grants.
//!
//! The server may only clear bits the client set; bits it does not check are
//! left as sent.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::file::{ACCESS3args, ACCESS3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Check access permission (`NFSPROC3_ACCESS`)
    Access {
        proc: NFSProgram::NFSPROC3_ACCESS,
        name: "ACCESS",
        args: ACCESS3args,
        status: nfsstat3,
        resok: ACCESS3resok,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_IO, NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
