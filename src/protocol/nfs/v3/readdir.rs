//! Implementation of the `READDIR` procedure (procedure 16) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.16.
//!
//! The `READDIR` procedure retrieves a variable number of entries from a
//! directory.
//!
//! The client specifies:
//! - The file handle of the directory to read
//! - A cookie indicating where to start reading in the directory
//! - A cookie verifier to validate the cookie
//! - The maximum size of directory information to return
//!
//! On successful return, the server provides the directory attributes, a new
//! cookie verifier, the entries (file id, name, cookie) and an EOF flag.

use crate::protocol::rpc::status_procedure;
use crate::protocol::xdr::nfs3::dir::{READDIR3args, READDIR3resok};
use crate::protocol::xdr::nfs3::{NFSProgram, nfsstat3, post_op_attr};

status_procedure! {
    /// Read from a directory (`NFSPROC3_READDIR`)
    Readdir {
        proc: NFSProgram::NFSPROC3_READDIR,
        name: "READDIR",
        args: READDIR3args,
        status: nfsstat3,
        resok: READDIR3resok,
        resfail: post_op_attr,
        errors: [
            NFS3ERR_IO, NFS3ERR_ACCES, NFS3ERR_NOTDIR, NFS3ERR_BAD_COOKIE, NFS3ERR_TOOSMALL,
            NFS3ERR_STALE, NFS3ERR_BADHANDLE, NFS3ERR_SERVERFAULT,
        ],
    }
}
