//! Implementation of the `READDIRPLUS` procedure (procedure 17) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.17.
//!
//! The `READDIRPLUS` procedure is an extended version of `READDIR` that also
//! returns the attributes and file handle of every entry, saving the client a
//! `LOOKUP` per entry.
//!
//! `dircount` bounds the size of the names and cookies alone while `maxcount`
//! bounds the whole result.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{READDIRPLUS3args, READDIRPLUS3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Extended read from a directory (`NFSPROC3_READDIRPLUS`)
    Readdirplus {
        proc: NFSProgram::NFSPROC3_READDIRPLUS,
        name: "READDIRPLUS",
        args: READDIRPLUS3args,
        status: nfsstat3,
        resok: READDIRPLUS3resok,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_NOTDIR, NFS3ERR_BAD_COOKIE, NFS3ERR_TOOSMALL,
            NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT, NFS3ERR_NOTSUPP,
        ],
    }
}
